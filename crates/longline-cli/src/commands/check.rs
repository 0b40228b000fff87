//! Check command implementation.

use anyhow::{Context, Result};
use longline_core::{ClassifierBox, CodeAnalyzer, Collector, Config, Counter, FeedbackBus};
use longline_python::PythonParser;
use longline_rules::classifiers_from_config;
use std::path::Path;
use std::sync::Arc;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Command-line options of `longline check`.
#[derive(Debug, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated classifier names or codes.
    pub classifiers: Option<String>,
    /// Extra exclude globs.
    pub exclude: Vec<String>,
    /// Line length override.
    pub max_line_length: Option<usize>,
}

/// Runs the check command.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<()> {
    let mut config = load_config(source)?;
    if let Some(limit) = options.max_line_length {
        config.analyzer.max_line_length = limit;
    }

    let classifiers = select_classifiers(&config, options.classifiers.as_deref());

    let mut builder = CodeAnalyzer::builder()
        .root(path)
        .parser(Arc::new(PythonParser::new()))
        .excludes(options.exclude.iter().cloned())
        .config(config);
    for classifier in classifiers {
        builder = builder.classifier_box(classifier);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} classifiers (limit {})",
        path.display(),
        analyzer.classifier_count(),
        analyzer.max_line_length()
    );

    let mut counter = Counter::new();
    let mut collector = Collector::new();
    let summary = {
        let mut bus = FeedbackBus::new();
        bus.register(&mut counter);
        bus.register(&mut collector);
        analyzer.analyze(&mut bus).context("Analysis failed")?
    };

    super::output::print(&counter, &collector, &summary, options.format)?;

    if counter.total_violation_count() > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

/// Classifiers from the config, narrowed to `filter` when given.
fn select_classifiers(config: &Config, filter: Option<&str>) -> Vec<ClassifierBox> {
    let available = classifiers_from_config(config);
    let Some(filter) = filter else {
        return available;
    };

    let wanted: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    for name in &wanted {
        if !available
            .iter()
            .any(|c| c.name() == *name || c.code() == *name)
        {
            tracing::warn!("Unknown classifier: {}", name);
        }
    }

    available
        .into_iter()
        .filter(|c| wanted.iter().any(|w| c.name() == *w || c.code() == *w))
        .collect()
}
