//! Classifier for tuple assignments like `a, b = 1, 2`.

use longline_core::syntax::NodeKind;
use longline_core::{Classifier, ClassifyError, LineContext, Violation};

/// Classifier code for multi-assignment.
pub const CODE: &str = "LL003";

/// Classifier name for multi-assignment.
pub const NAME: &str = "multi-assignment";

/// Flags lines that bind several names to as many values at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiAssignment;

impl MultiAssignment {
    /// Creates a new classifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Classifier for MultiAssignment {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Suggests splitting tuple assignments into one assignment per line"
    }

    fn classify(&self, ctx: &LineContext<'_>) -> Result<Vec<Violation>, ClassifyError> {
        let anchor = ctx.anchor;
        if !anchor.is(NodeKind::Assignment) {
            return Ok(Vec::new());
        }

        let shape = anchor.assignment().ok_or(ClassifyError::MissingDetail {
            classifier: NAME,
            kind: anchor.kind(),
            line: ctx.line_number(),
            expected: "assignment shape",
        })?;

        // Unpacking `a, b = pair()` is asymmetric and left alone.
        if shape.targets > 1 && shape.targets == shape.values {
            Ok(vec![Violation::MultiAssignment])
        } else {
            Ok(Vec::new())
        }
    }
}
