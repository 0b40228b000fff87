//! The parser collaborator.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::syntax::SyntaxTree;

/// Why a whole file could not be turned into a [`SyntaxTree`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The source contains a syntax error.
    #[error("syntax error at line {line}, column {column}")]
    Syntax {
        /// Line of the first error (1-indexed).
        line: usize,
        /// Column of the first error (0-indexed).
        column: usize,
    },

    /// The file is not valid UTF-8.
    #[error("file is not valid UTF-8")]
    Encoding,

    /// Parsing did not finish in time.
    #[error("parsing did not finish within {0:?}")]
    TimedOut(Duration),

    /// The parser gave up without producing a tree.
    #[error("parser produced no tree")]
    Aborted,

    /// The parser could not be set up.
    #[error("parser setup failed: {0}")]
    Setup(String),
}

/// Turns source text into a [`SyntaxTree`].
///
/// Implement this to teach the analyzer a new language. The implementation
/// lowers its grammar onto [`crate::syntax::NodeKind`] and attaches
/// [`crate::syntax::NodeDetail`] to every assignment and function definition.
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., `"python"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles, without the dot (e.g., `&["py"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses a whole file.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the file cannot be parsed.
    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError>;

    /// Parses a whole file within `budget`, on the calling thread.
    ///
    /// The default cannot interrupt [`parse`](Self::parse); it only rejects
    /// a result that arrives late. Parsers that can stop part-way override
    /// this and abandon the parse once the budget is spent.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::TimedOut`] when the budget runs out, or any
    /// error from [`parse`](Self::parse).
    fn parse_within(&self, source: &str, budget: Duration) -> Result<SyntaxTree, ParseError> {
        let started = Instant::now();
        let tree = self.parse(source)?;
        if started.elapsed() > budget {
            return Err(ParseError::TimedOut(budget));
        }
        Ok(tree)
    }
}
