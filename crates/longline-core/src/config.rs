//! Configuration types for longline.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default line length limit.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 100;

/// Default parse timeout in milliseconds.
pub const DEFAULT_PARSE_TIMEOUT_MS: u64 = 10_000;

/// Top-level configuration for longline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "comments-only").
    #[serde(default)]
    pub preset: Option<String>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-classifier configurations.
    #[serde(default)]
    pub classifiers: HashMap<String, ClassifierConfig>,
}

impl Config {
    /// Reads a `longline.toml` file.
    ///
    /// # Errors
    ///
    /// Fails when the file is unreadable or is not valid config TOML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses config TOML. Missing sections take their defaults.
    ///
    /// # Errors
    ///
    /// Fails on malformed TOML or mistyped values.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Checks if a classifier is enabled. Classifiers are enabled unless
    /// configured otherwise.
    #[must_use]
    pub fn is_classifier_enabled(&self, name: &str) -> bool {
        self.classifiers
            .get(name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Options for one classifier, if any were given.
    #[must_use]
    pub fn classifier(&self, name: &str) -> Option<&ClassifierConfig> {
        self.classifiers.get(name)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// File or directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Lines longer than this many characters are classified.
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// File extensions to scan, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Per-file parse budget in milliseconds; `None` disables the limit.
    #[serde(default = "default_parse_timeout_ms")]
    pub parse_timeout_ms: Option<u64>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            max_line_length: default_max_line_length(),
            extensions: default_extensions(),
            exclude: default_exclude(),
            parse_timeout_ms: default_parse_timeout_ms(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LENGTH
}

fn default_extensions() -> Vec<String> {
    vec!["py".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec!["**/.venv/**".to_string(), "**/__pycache__/**".to_string()]
}

#[allow(clippy::unnecessary_wraps)]
fn default_parse_timeout_ms() -> Option<u64> {
    Some(DEFAULT_PARSE_TIMEOUT_MS)
}

/// Per-classifier configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Whether this classifier is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Classifier-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl ClassifierConfig {
    /// A count or length limit. Negative, non-integer and missing values
    /// all yield `default`.
    #[must_use]
    pub fn get_usize(&self, key: &str, default: usize) -> usize {
        match self.options.get(key).and_then(toml::Value::as_integer) {
            Some(v) => usize::try_from(v).unwrap_or(default),
            None => default,
        }
    }
}

/// Errors loading a config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// The config file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The TOML was malformed or had mistyped values.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
