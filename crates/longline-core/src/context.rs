//! Context types for classifier execution.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::syntax::{SyntaxNode, SyntaxTree};

/// Where an over-length line was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceLocation {
    /// Line number (1-indexed).
    pub line_number: usize,
    /// Raw line text, including its trailing newline.
    pub line_text: String,
    /// Path of the source file.
    pub path: PathBuf,
}

impl SourceLocation {
    /// Creates a new location.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, line_number: usize, line_text: impl Into<String>) -> Self {
        Self {
            line_number,
            line_text: line_text.into(),
            path: path.into(),
        }
    }

    /// The line without its line terminator.
    #[must_use]
    pub fn code(&self) -> &str {
        self.line_text.trim_end_matches(['\n', '\r'])
    }

    /// Length of the raw line in characters, line terminator included.
    #[must_use]
    pub fn length(&self) -> usize {
        self.line_text.chars().count()
    }
}

/// Everything a classifier may look at for one over-length line.
///
/// The tree is shared by every context built for the same file.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    /// The line being classified.
    pub location: &'a SourceLocation,
    /// First node starting on the line.
    pub anchor: &'a SyntaxNode,
    /// The whole parsed file.
    pub tree: &'a SyntaxTree,
}

impl<'a> LineContext<'a> {
    /// Creates a new line context.
    #[must_use]
    pub fn new(location: &'a SourceLocation, anchor: &'a SyntaxNode, tree: &'a SyntaxTree) -> Self {
        Self {
            location,
            anchor,
            tree,
        }
    }

    /// Line number being classified.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.location.line_number
    }

    /// Path of the file being classified.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.location.path
    }

    /// Nodes that visually occupy the line, starting with the anchor.
    #[must_use]
    pub fn same_line_nodes(&self) -> Vec<&'a SyntaxNode> {
        self.tree.same_line_nodes(self.anchor.id())
    }

    /// The anchor and all its descendants.
    #[must_use]
    pub fn anchor_subtree(&self) -> &'a [SyntaxNode] {
        self.tree.subtree(self.anchor.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_strips_line_terminator() {
        let loc = SourceLocation::new("a.py", 3, "x = 1\r\n");
        assert_eq!(loc.code(), "x = 1");
        assert_eq!(loc.length(), 7);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let loc = SourceLocation::new("a.py", 1, "# café\n");
        assert_eq!(loc.length(), 7);
    }
}
