//! Lowering of tree-sitter-python nodes onto the core node arena.

use longline_core::syntax::{
    AssignmentShape, FunctionSignature, NodeDetail, NodeKind, Parameter, Span, SyntaxTree,
    SyntaxTreeBuilder,
};
use tree_sitter::{Node, Point};

/// How a concrete node shows up in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    /// Becomes an arena node.
    Keep,
    /// Dropped, but its children attach to the enclosing node.
    Transparent,
    /// Dropped with everything below it.
    Skip,
}

/// Wrappers that have no counterpart in Python's statement model.
const TRANSPARENT: &[&str] = &["expression_statement", "block", "decorated_definition"];

/// String internals; a multi-line literal stays one opaque node.
const STRING_PARTS: &[&str] = &[
    "string_start",
    "string_content",
    "string_end",
    "escape_sequence",
    "escape_interpolation",
];

/// Node kinds whose element count is the number of names or values.
const SEQUENCES: &[&str] = &[
    "pattern_list",
    "tuple_pattern",
    "list_pattern",
    "expression_list",
    "tuple",
];

pub(crate) struct Lowering<'s> {
    src: &'s str,
    line_starts: Vec<usize>,
}

impl<'s> Lowering<'s> {
    pub(crate) fn new(src: &'s str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(src.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { src, line_starts }
    }

    /// Walks `root` in pre-order and builds the arena.
    pub(crate) fn lower(&self, root: Node<'_>) -> SyntaxTree {
        let mut builder = SyntaxTreeBuilder::new(root.kind(), self.span(root));
        let mut cursor = root.walk();
        // One entry per concrete node we descended into: was it opened?
        let mut opened: Vec<bool> = Vec::new();

        if !cursor.goto_first_child() {
            return builder.build();
        }

        loop {
            let node = cursor.node();
            let role = role(node);
            let entered = role == Role::Keep;
            if entered {
                self.open(&mut builder, node);
            }

            if role != Role::Skip && cursor.goto_first_child() {
                opened.push(entered);
                continue;
            }
            if entered {
                builder.finish_node();
            }

            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    return builder.build();
                }
                match opened.pop() {
                    Some(true) => builder.finish_node(),
                    Some(false) => {}
                    None => return builder.build(),
                }
            }
        }
    }

    fn open(&self, builder: &mut SyntaxTreeBuilder, node: Node<'_>) {
        let kind = node_kind(node.kind());
        let id = builder.start_node(kind, node.kind(), self.span(node));
        match kind {
            NodeKind::Assignment => {
                builder.attach_detail(id, NodeDetail::Assignment(assignment_shape(node)));
            }
            NodeKind::FunctionDefinition => {
                if let Some(signature) = self.signature(node) {
                    builder.attach_detail(id, NodeDetail::Function(signature));
                }
            }
            _ => {}
        }
    }

    fn signature(&self, node: Node<'_>) -> Option<FunctionSignature> {
        let name = self.text(node.child_by_field_name("name")?).to_string();
        let params = node.child_by_field_name("parameters")?;

        let mut cursor = params.walk();
        let parameters = params
            .named_children(&mut cursor)
            .filter_map(|p| self.parameter_name(p))
            .map(Parameter::new)
            .collect();

        let rendered = self.text(params).split_whitespace().collect::<Vec<_>>().join(" ");

        Some(FunctionSignature {
            name,
            parameters,
            parameter_list_width: rendered.chars().count(),
        })
    }

    /// Finds the bound name of a parameter by following first named
    /// children. Separators like `*` and `/` have none and yield `None`.
    fn parameter_name(&self, mut node: Node<'_>) -> Option<String> {
        loop {
            match node.kind() {
                "identifier" => return Some(self.text(node).to_string()),
                "comment" => return None,
                _ => node = node.named_child(0)?,
            }
        }
    }

    /// Location of the first error or missing node below `root`.
    pub(crate) fn first_error(&self, root: Node<'_>) -> (usize, usize) {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node.is_error() || node.is_missing() {
                return self.position(node.start_position());
            }
            let mut cursor = node.walk();
            let children: Vec<_> = node
                .children(&mut cursor)
                .filter(|c| c.has_error() || c.is_missing())
                .collect();
            stack.extend(children.into_iter().rev());
        }
        self.position(root.start_position())
    }

    fn text(&self, node: Node<'_>) -> &'s str {
        self.src.get(node.byte_range()).unwrap_or("")
    }

    fn span(&self, node: Node<'_>) -> Span {
        Span::new(
            self.position(node.start_position()),
            self.position(node.end_position()),
        )
    }

    /// Converts a tree-sitter point (0-based row, byte column) to a 1-based
    /// line and character column.
    fn position(&self, point: Point) -> (usize, usize) {
        let start = self
            .line_starts
            .get(point.row)
            .copied()
            .unwrap_or(self.src.len());
        let column = self
            .src
            .get(start..start + point.column)
            .map_or(point.column, |prefix| prefix.chars().count());
        (point.row + 1, column)
    }
}

fn role(node: Node<'_>) -> Role {
    let kind = node.kind();
    if !node.is_named() || STRING_PARTS.contains(&kind) {
        Role::Skip
    } else if TRANSPARENT.contains(&kind) {
        Role::Transparent
    } else {
        Role::Keep
    }
}

fn node_kind(kind: &str) -> NodeKind {
    match kind {
        "comment" => NodeKind::Comment,
        "assignment" | "augmented_assignment" => NodeKind::Assignment,
        "tuple" | "pattern_list" | "expression_list" | "tuple_pattern" => NodeKind::Tuple,
        "function_definition" => NodeKind::FunctionDefinition,
        "binary_operator" => NodeKind::BinaryOperator,
        "parenthesized_expression" => NodeKind::Parenthesized,
        _ => NodeKind::Other,
    }
}

fn assignment_shape(node: Node<'_>) -> AssignmentShape {
    AssignmentShape {
        targets: node.child_by_field_name("left").map_or(1, arity),
        values: node.child_by_field_name("right").map_or(0, arity),
    }
}

fn arity(node: Node<'_>) -> usize {
    if !SEQUENCES.contains(&node.kind()) {
        return 1;
    }
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_kinds_are_mapped() {
        assert_eq!(node_kind("comment"), NodeKind::Comment);
        assert_eq!(node_kind("augmented_assignment"), NodeKind::Assignment);
        assert_eq!(node_kind("pattern_list"), NodeKind::Tuple);
        assert_eq!(node_kind("binary_operator"), NodeKind::BinaryOperator);
        assert_eq!(node_kind("parenthesized_expression"), NodeKind::Parenthesized);
        assert_eq!(node_kind("boolean_operator"), NodeKind::Other);
    }

    #[test]
    fn positions_use_character_columns() {
        let src = "x = 1\ns = \"é\" + t\n";
        let lowering = Lowering::new(src);
        // `+` sits after a two-byte character on row 1
        assert_eq!(lowering.position(Point::new(1, 9)), (2, 8));
        assert_eq!(lowering.position(Point::new(0, 0)), (1, 0));
    }
}
