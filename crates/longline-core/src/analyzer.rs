//! Core analyzer for orchestrating classification.

use crate::classifier::{Classifier, ClassifierBox, ClassifyError};
use crate::config::Config;
use crate::context::{LineContext, SourceLocation};
use crate::feedback::FeedbackBus;
use crate::finder::SourceFileFinder;
use crate::parser::{ParseError, SourceParser};
use crate::scanner::long_lines;
use crate::syntax::SyntaxTree;
use crate::types::FeedbackEvent;

use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A file could not be parsed. Only surfaced with
    /// [`CodeAnalyzerBuilder::fail_on_parse_error`].
    #[error("Parse error in {path}: {source}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// What went wrong.
        source: ParseError,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// A classifier found the tree missing detail it relies on.
    #[error("Classification failed in {path}: {source}")]
    Classify {
        /// Path to the file being classified.
        path: PathBuf,
        /// The classifier's error.
        source: ClassifyError,
    },

    /// The analyzer was built without a parser.
    #[error("No source parser configured")]
    NoParser,
}

/// What one run looked at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Files read and, where needed, parsed.
    pub files_checked: usize,
    /// Files skipped because they could not be parsed.
    pub files_skipped: usize,
    /// Lines longer than the limit.
    pub lines_flagged: usize,
    /// Flagged lines with no node starting on them.
    pub lines_unresolved: usize,
    /// Feedback events published on the bus.
    pub feedback_published: usize,
}

impl ScanSummary {
    /// Adds another summary's counts to this one.
    pub fn merge(&mut self, other: &ScanSummary) {
        self.files_checked += other.files_checked;
        self.files_skipped += other.files_skipped;
        self.lines_flagged += other.lines_flagged;
        self.lines_unresolved += other.lines_unresolved;
        self.feedback_published += other.feedback_published;
    }
}

/// Builder for configuring a [`CodeAnalyzer`].
#[derive(Default)]
pub struct CodeAnalyzerBuilder {
    root: Option<PathBuf>,
    parser: Option<Arc<dyn SourceParser>>,
    classifiers: Vec<ClassifierBox>,
    exclude_patterns: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
    max_line_length: Option<usize>,
    parse_timeout: Option<Option<Duration>>,
}

impl CodeAnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file or directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Sets the parser used for files with long lines.
    #[must_use]
    pub fn parser(mut self, parser: Arc<dyn SourceParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Adds a classifier. Classifiers run in the order they are added.
    #[must_use]
    pub fn classifier<C: Classifier + 'static>(mut self, classifier: C) -> Self {
        self.classifiers.push(Box::new(classifier));
        self
    }

    /// Adds a boxed classifier.
    #[must_use]
    pub fn classifier_box(mut self, classifier: ClassifierBox) -> Self {
        self.classifiers.push(classifier);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on parse errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Overrides the configured line length limit.
    #[must_use]
    pub fn max_line_length(mut self, limit: usize) -> Self {
        self.max_line_length = Some(limit);
        self
    }

    /// Overrides the configured parse timeout; `None` waits indefinitely.
    #[must_use]
    pub fn parse_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.parse_timeout = Some(timeout);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no parser was given, an exclude pattern is
    /// invalid, or the working directory cannot be determined.
    pub fn build(self) -> Result<CodeAnalyzer, AnalyzerError> {
        let parser = self.parser.ok_or(AnalyzerError::NoParser)?;
        let config = self.config.unwrap_or_default();

        let root = absolutize(self.root.unwrap_or_else(|| config.analyzer.root.clone()))?;

        // Merge exclude patterns from config
        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());

        let mut extensions = config.analyzer.extensions.clone();
        if extensions.is_empty() {
            extensions.extend(parser.extensions().iter().map(|e| (*e).to_string()));
        }
        let finder = SourceFileFinder::new(extensions, exclude_patterns)?;

        let classifiers = self
            .classifiers
            .into_iter()
            .filter(|c| {
                let enabled = config.is_classifier_enabled(c.name());
                if !enabled {
                    debug!("Skipping disabled classifier: {}", c.name());
                }
                enabled
            })
            .collect();

        let max_line_length = self
            .max_line_length
            .unwrap_or(config.analyzer.max_line_length);
        let parse_timeout = self
            .parse_timeout
            .unwrap_or_else(|| config.analyzer.parse_timeout_ms.map(Duration::from_millis));

        Ok(CodeAnalyzer {
            root,
            parser,
            classifiers,
            finder,
            max_line_length,
            parse_timeout,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// Scans files for long lines and publishes classifier feedback.
///
/// Use [`CodeAnalyzer::builder()`] to construct an instance.
pub struct CodeAnalyzer {
    root: PathBuf,
    parser: Arc<dyn SourceParser>,
    classifiers: Vec<ClassifierBox>,
    finder: SourceFileFinder,
    max_line_length: usize,
    parse_timeout: Option<Duration>,
    fail_on_parse_error: bool,
}

impl CodeAnalyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> CodeAnalyzerBuilder {
        CodeAnalyzerBuilder::new()
    }

    /// Returns the file or directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of active classifiers.
    #[must_use]
    pub fn classifier_count(&self) -> usize {
        self.classifiers.len()
    }

    /// Returns the line length limit.
    #[must_use]
    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    /// Analyzes the configured root, file or directory.
    ///
    /// # Errors
    ///
    /// See [`analyze_directory`](Self::analyze_directory).
    pub fn analyze(&self, bus: &mut FeedbackBus<'_>) -> Result<ScanSummary, AnalyzerError> {
        if self.root.is_file() {
            self.analyze_file(&self.root, bus)
        } else {
            self.analyze_directory(&self.root, bus)
        }
    }

    /// Analyzes every source file under `dir`, in sorted path order.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure, on a classifier contract violation,
    /// or on a parse failure when `fail_on_parse_error` is set.
    pub fn analyze_directory(
        &self,
        dir: &Path,
        bus: &mut FeedbackBus<'_>,
    ) -> Result<ScanSummary, AnalyzerError> {
        let dir = absolutize(dir.to_path_buf())?;
        info!("Starting analysis at {}", dir.display());

        let mut summary = ScanSummary::default();
        for path in self.finder.discover(&dir)? {
            let file_summary = self.analyze_file(&path, bus)?;
            summary.merge(&file_summary);
        }

        info!(
            "Analysis complete: {} feedback in {} files ({} skipped)",
            summary.feedback_published, summary.files_checked, summary.files_skipped
        );
        Ok(summary)
    }

    /// Analyzes a single file.
    ///
    /// The file is parsed only if it has at least one long line.
    ///
    /// # Errors
    ///
    /// See [`analyze_directory`](Self::analyze_directory).
    pub fn analyze_file(
        &self,
        path: &Path,
        bus: &mut FeedbackBus<'_>,
    ) -> Result<ScanSummary, AnalyzerError> {
        let path = absolutize(path.to_path_buf())?;
        debug!("Analyzing: {}", path.display());

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return self.skip(path, ParseError::Encoding);
            }
            Err(e) => return Err(e.into()),
        };

        let mut summary = ScanSummary {
            files_checked: 1,
            ..ScanSummary::default()
        };

        let mut lines = long_lines(&content, self.max_line_length).peekable();
        if lines.peek().is_none() {
            return Ok(summary);
        }

        let tree = match self.parse(&content) {
            Ok(tree) => tree,
            Err(e) => return self.skip(path, e),
        };

        for line in lines {
            summary.lines_flagged += 1;

            let anchor = match tree.locate(line.number) {
                Ok(node) => node,
                Err(e) => {
                    warn!("Skipping {}:{}: {}", path.display(), line.number, e);
                    summary.lines_unresolved += 1;
                    continue;
                }
            };

            let location = SourceLocation::new(&path, line.number, line.text);
            let ctx = LineContext::new(&location, anchor, &tree);

            for classifier in &self.classifiers {
                let violations =
                    classifier
                        .classify(&ctx)
                        .map_err(|source| AnalyzerError::Classify {
                            path: path.clone(),
                            source,
                        })?;

                for violation in violations {
                    debug!(
                        "{}:{} {} -> {}",
                        path.display(),
                        line.number,
                        classifier.name(),
                        violation
                    );
                    bus.publish(&FeedbackEvent::new(violation, location.clone()));
                    summary.feedback_published += 1;
                }
            }
        }

        Ok(summary)
    }

    fn parse(&self, content: &str) -> Result<SyntaxTree, ParseError> {
        match self.parse_timeout {
            Some(budget) => self.parser.parse_within(content, budget),
            None => self.parser.parse(content),
        }
    }

    fn skip(&self, path: PathBuf, source: ParseError) -> Result<ScanSummary, AnalyzerError> {
        if self.fail_on_parse_error {
            return Err(AnalyzerError::Parse { path, source });
        }
        warn!("Failed to parse {}: {}", path.display(), source);
        Ok(ScanSummary {
            files_skipped: 1,
            ..ScanSummary::default()
        })
    }
}

impl std::fmt::Debug for CodeAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeAnalyzer")
            .field("root", &self.root)
            .field("language", &self.parser.language_id())
            .field(
                "classifiers",
                &self.classifiers.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("max_line_length", &self.max_line_length)
            .field("parse_timeout", &self.parse_timeout)
            .finish_non_exhaustive()
    }
}

fn absolutize(path: PathBuf) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
