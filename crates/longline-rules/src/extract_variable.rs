//! Classifier for lines packed with arithmetic.
//!
//! # Measure
//!
//! Counts the operands joined by binary operators that lie entirely on the
//! line: `a + b * c` has three. Nested operators are not operands themselves,
//! so a chain of `n` operators has `n + 1` operands. Parentheses around a
//! nested operator do not make it an operand: `(a + b) * (c + d)` has four.
//!
//! # Configuration
//!
//! - `max_operands`: Operands allowed before feedback fires (default: 4)

use longline_core::syntax::{NodeKind, SyntaxNode, SyntaxTree};
use longline_core::{Classifier, ClassifyError, Config, LineContext, Violation};
use tracing::trace;

/// Classifier code for extract-variable.
pub const CODE: &str = "LL002";

/// Classifier name for extract-variable.
pub const NAME: &str = "extract-variable";

/// Default operand limit.
pub const DEFAULT_MAX_OPERANDS: usize = 4;

/// Suggests naming intermediate results of long expressions.
#[derive(Debug, Clone)]
pub struct ExtractVariable {
    max_operands: usize,
}

impl Default for ExtractVariable {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractVariable {
    /// Creates a new classifier with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_operands: DEFAULT_MAX_OPERANDS,
        }
    }

    /// Creates a classifier from the `[classifiers.extract-variable]` table.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let max = config
            .classifier(NAME)
            .map_or(DEFAULT_MAX_OPERANDS, |c| {
                c.get_usize("max_operands", DEFAULT_MAX_OPERANDS)
            });
        Self::new().max_operands(max)
    }

    /// Sets the operand limit.
    #[must_use]
    pub fn max_operands(mut self, max: usize) -> Self {
        self.max_operands = max;
        self
    }

    fn operands(tree: &SyntaxTree, node: &SyntaxNode) -> usize {
        node.children()
            .iter()
            .map(|&id| Self::unwrap_parens(tree, tree.node(id)))
            .filter(|child| !child.is(NodeKind::BinaryOperator) && !child.is(NodeKind::Comment))
            .count()
    }

    /// Innermost expression of `((...))`; `node` itself when not wrapped.
    fn unwrap_parens<'t>(tree: &'t SyntaxTree, mut node: &'t SyntaxNode) -> &'t SyntaxNode {
        while node.is(NodeKind::Parenthesized) {
            let inner = node
                .children()
                .iter()
                .map(|&id| tree.node(id))
                .find(|child| !child.is(NodeKind::Comment));
            match inner {
                Some(inner) => node = inner,
                None => break,
            }
        }
        node
    }
}

impl Classifier for ExtractVariable {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Suggests storing parts of long expressions in named variables"
    }

    fn classify(&self, ctx: &LineContext<'_>) -> Result<Vec<Violation>, ClassifyError> {
        let line = ctx.line_number();
        let operands: usize = ctx
            .anchor_subtree()
            .iter()
            .filter(|n| n.is(NodeKind::BinaryOperator) && n.span().lies_on(line))
            .map(|n| Self::operands(ctx.tree, n))
            .sum();

        trace!("line {line}: {operands} operands");

        if operands > self.max_operands {
            Ok(vec![Violation::ExtractVariable])
        } else {
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::classify_line;

    #[test]
    fn test_five_operands_fire() {
        let found = classify_line(&ExtractVariable::new(), "x = 1 + 2 + 3 + 4 + 5\n", 1);
        assert_eq!(found, vec![Violation::ExtractVariable]);
    }

    #[test]
    fn test_four_operands_do_not_fire() {
        assert!(classify_line(&ExtractVariable::new(), "x = 1 + 2 + 3 + 4\n", 1).is_empty());
    }

    #[test]
    fn test_parenthesized_operators_are_not_operands() {
        let classifier = ExtractVariable::new();
        assert!(classify_line(&classifier, "x = (a + b) * (c + d)\n", 1).is_empty());
        assert!(classify_line(&classifier, "x = ((a + b)) * c\n", 1).is_empty());
        assert_eq!(
            classify_line(&classifier, "x = (a + b) * (c + d) - e\n", 1),
            vec![Violation::ExtractVariable]
        );
    }

    #[test]
    fn test_parenthesized_name_is_an_operand() {
        let classifier = ExtractVariable::new().max_operands(2);
        assert_eq!(
            classify_line(&classifier, "x = (a) + b + c\n", 1),
            vec![Violation::ExtractVariable]
        );
    }

    #[test]
    fn test_operands_across_separate_expressions() {
        let src = "total = f(a * b, c * d, e - g)\n";
        assert_eq!(
            classify_line(&ExtractVariable::new(), src, 1),
            vec![Violation::ExtractVariable]
        );
    }

    #[test]
    fn test_custom_limit() {
        let classifier = ExtractVariable::new().max_operands(5);
        assert!(classify_line(&classifier, "x = 1 + 2 + 3 + 4 + 5\n", 1).is_empty());
    }

    #[test]
    fn test_limit_from_config() {
        let config = Config::parse("[classifiers.extract-variable]\nmax_operands = 9\n").unwrap();
        assert_eq!(ExtractVariable::from_config(&config).max_operands, 9);
        assert_eq!(
            ExtractVariable::from_config(&Config::default()).max_operands,
            DEFAULT_MAX_OPERANDS
        );
    }

    #[test]
    fn test_only_operators_on_the_line_count() {
        let src = "x = (1 + 2 +\n     3 + 4 + 5)\n";
        assert!(classify_line(&ExtractVariable::new(), src, 1).is_empty());
    }

    #[test]
    fn test_boolean_operators_are_not_counted() {
        let src = "ok = a and b and c and d and e\n";
        assert!(classify_line(&ExtractVariable::new(), src, 1).is_empty());
    }
}
