//! # longline-core
//!
//! Core framework for explaining why source lines are too long.
//!
//! This crate provides the foundational traits and types. It includes:
//!
//! - [`syntax`], a language-neutral node arena with line lookup
//! - [`Classifier`] trait for per-line diagnoses
//! - [`FeedbackBus`] with the [`Counter`] and [`Collector`] subscribers
//! - [`CodeAnalyzer`] for orchestrating the scan
//!
//! ## Example
//!
//! ```ignore
//! use longline_core::{CodeAnalyzer, Collector, Counter, FeedbackBus};
//!
//! let analyzer = CodeAnalyzer::builder()
//!     .root("./course")
//!     .parser(Arc::new(PythonParser::new()))
//!     .classifier(LongComment::new())
//!     .build()?;
//!
//! let mut counter = Counter::new();
//! let mut bus = FeedbackBus::new();
//! bus.register(&mut counter);
//! analyzer.analyze(&mut bus)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod classifier;
mod config;
mod context;
mod feedback;
mod finder;
mod parser;
mod scanner;
mod types;

/// Language-neutral syntax tree.
pub mod syntax;

pub use analyzer::{AnalyzerError, CodeAnalyzer, CodeAnalyzerBuilder, ScanSummary};
pub use classifier::{Classifier, ClassifierBox, ClassifyError};
pub use config::{
    AnalyzerConfig, ClassifierConfig, Config, ConfigError, DEFAULT_MAX_LINE_LENGTH,
    DEFAULT_PARSE_TIMEOUT_MS,
};
pub use context::{LineContext, SourceLocation};
pub use feedback::{Collector, Counter, FeedbackBus, FeedbackSubscriber};
pub use finder::SourceFileFinder;
pub use parser::{ParseError, SourceParser};
pub use scanner::{long_lines, LongLine, LongLines};
pub use types::{display_path, FeedbackDiagnostic, FeedbackEvent, Violation};
