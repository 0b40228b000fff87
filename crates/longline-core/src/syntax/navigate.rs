//! Line-oriented queries over a [`SyntaxTree`].

use thiserror::Error;

use super::{NodeId, SyntaxNode, SyntaxTree};

/// No node starts on the requested line.
///
/// Expected for lines inside multi-line string literals, which the parser
/// flattens into one node spanning many lines. Callers skip the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no syntax node starts on line {line}")]
pub struct LineResolutionError {
    /// The line that could not be resolved (1-indexed).
    pub line: usize,
}

impl SyntaxTree {
    /// Returns the first node, in pre-order, whose span begins on `line`.
    ///
    /// The root never qualifies.
    ///
    /// # Errors
    ///
    /// Returns [`LineResolutionError`] when no node is anchored on `line`.
    pub fn locate(&self, line: usize) -> Result<&SyntaxNode, LineResolutionError> {
        self.first_on_line(line)
            .map(|id| self.node(id))
            .ok_or(LineResolutionError { line })
    }

    /// Collects the nodes that visually occupy the anchor's line.
    ///
    /// Walks source order from `anchor` while each candidate is single-line and
    /// shares the anchor's start and end line. A multi-line anchor yields only
    /// itself. The result always starts with the anchor.
    #[must_use]
    pub fn same_line_nodes(&self, anchor: NodeId) -> Vec<&SyntaxNode> {
        let first = self.node(anchor);
        let mut nodes = vec![first];
        let mut current = first;

        while let Some(candidate) = self.next(current.id()) {
            if !first.span().shares_line_with(&candidate.span()) {
                break;
            }
            nodes.push(candidate);
            current = candidate;
        }

        nodes
    }
}
