//! Classifier for comments that make a line long.
//!
//! # Detected Patterns
//!
//! - A line that is nothing but a comment
//! - A comment trailing code on the same line

use longline_core::syntax::NodeKind;
use longline_core::{Classifier, ClassifyError, LineContext, Violation};

/// Classifier code for long-comment.
pub const CODE: &str = "LL001";

/// Classifier name for long-comment.
pub const NAME: &str = "long-comment";

/// Flags comments on over-length lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongComment;

impl LongComment {
    /// Creates a new classifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Classifier for LongComment {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Suggests splitting long comments or moving trailing comments above the code"
    }

    fn classify(&self, ctx: &LineContext<'_>) -> Result<Vec<Violation>, ClassifyError> {
        let violation = match ctx.same_line_nodes().as_slice() {
            [only] if only.is(NodeKind::Comment) => Some(Violation::Comment),
            [_, .., last] if last.is(NodeKind::Comment) => Some(Violation::CommentAfterStatement),
            _ => None,
        };
        Ok(violation.into_iter().collect())
    }
}
