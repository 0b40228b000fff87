//! Classifier trait for diagnosing long lines.

use thiserror::Error;

use crate::context::LineContext;
use crate::syntax::NodeKind;
use crate::types::Violation;

/// A classifier that explains why a line is long.
///
/// Classifiers look at the nodes that share the over-length line and return
/// zero or more violations. They never mutate the tree and never publish
/// feedback themselves; the analyzer does that in classifier order.
///
/// # Example
///
/// ```
/// use longline_core::{Classifier, ClassifyError, LineContext, Violation};
/// use longline_core::syntax::NodeKind;
///
/// pub struct LoneComment;
///
/// impl Classifier for LoneComment {
///     fn name(&self) -> &'static str { "lone-comment" }
///     fn code(&self) -> &'static str { "LL900" }
///
///     fn classify(&self, ctx: &LineContext<'_>) -> Result<Vec<Violation>, ClassifyError> {
///         match ctx.same_line_nodes().as_slice() {
///             [only] if only.is(NodeKind::Comment) => Ok(vec![Violation::Comment]),
///             _ => Ok(Vec::new()),
///         }
///     }
/// }
/// ```
pub trait Classifier: Send + Sync {
    /// Returns the kebab-case name of this classifier (e.g., "long-comment").
    fn name(&self) -> &'static str;

    /// Returns the classifier code (e.g., "LL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this classifier detects.
    fn description(&self) -> &'static str {
        ""
    }

    /// Classifies one over-length line.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError`] if the tree is missing detail the classifier
    /// relies on.
    fn classify(&self, ctx: &LineContext<'_>) -> Result<Vec<Violation>, ClassifyError>;
}

/// Type alias for boxed Classifier trait objects.
pub type ClassifierBox = Box<dyn Classifier>;

/// Failure while classifying a line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// A node of the expected kind carries no detail payload.
    #[error("{classifier}: {kind} node on line {line} has no {expected} detail")]
    MissingDetail {
        /// Classifier that needed the detail.
        classifier: &'static str,
        /// Kind of the node lacking detail.
        kind: NodeKind,
        /// Line the node starts on.
        line: usize,
        /// What detail was expected.
        expected: &'static str,
    },
}
