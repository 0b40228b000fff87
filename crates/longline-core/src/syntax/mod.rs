//! Language-neutral syntax tree consumed by classifiers.
//!
//! Parsers lower their concrete syntax trees into a [`SyntaxTree`]: an arena of
//! [`SyntaxNode`]s stored in pre-order, each tagged with a closed [`NodeKind`]
//! and a 1-based line [`Span`]. The arena layout gives every node an O(1)
//! "next in source order" successor and a contiguous subtree range.

mod navigate;
mod tree;

pub use navigate::LineResolutionError;
pub use tree::{SyntaxTree, SyntaxTreeBuilder};

use serde::Serialize;

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena slot of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Closed vocabulary of node kinds that classifiers care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// A `# ...` comment.
    Comment,
    /// A plain, annotated or augmented assignment statement.
    Assignment,
    /// A tuple, or a bare comma-separated list of targets or values.
    Tuple,
    /// A `def` statement.
    FunctionDefinition,
    /// An arithmetic or bitwise binary operation.
    BinaryOperator,
    /// An expression wrapped in parentheses.
    Parenthesized,
    /// Anything else.
    Other,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Comment => "comment",
            Self::Assignment => "assignment",
            Self::Tuple => "tuple",
            Self::FunctionDefinition => "function-definition",
            Self::BinaryOperator => "binary-operator",
            Self::Parenthesized => "parenthesized",
            Self::Other => "other",
        };
        f.write_str(s)
    }
}

/// A point in the source: 1-indexed line, 0-indexed character column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column in characters (0-indexed).
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Source range covered by a node. `end` is exclusive on its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// First position of the node.
    pub start: Position,
    /// Position just past the node.
    pub end: Position,
}

impl Span {
    /// Creates a span from `(line, column)` pairs.
    #[must_use]
    pub fn new(start: (usize, usize), end: (usize, usize)) -> Self {
        Self {
            start: Position::new(start.0, start.1),
            end: Position::new(end.0, end.1),
        }
    }

    /// Returns true if the node starts and ends on the same line.
    #[must_use]
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Returns true if the node lies entirely on `line`.
    #[must_use]
    pub fn lies_on(&self, line: usize) -> bool {
        self.is_single_line() && self.start.line == line
    }

    /// Returns true if both spans cover exactly the same single line.
    #[must_use]
    pub fn shares_line_with(&self, other: &Span) -> bool {
        self.is_single_line()
            && other.is_single_line()
            && self.start.line == other.start.line
            && self.end.line == other.end.line
    }
}

/// Target and value counts of an assignment (`a, b = 1, 2` is `2` and `2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssignmentShape {
    /// Number of names being bound.
    pub targets: usize,
    /// Number of expressions on the right-hand side.
    pub values: usize,
}

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    /// The bound name, without `*`/`**` prefixes or annotations.
    pub name: String,
}

impl Parameter {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Name and parameter list of a function definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionSignature {
    /// The function's name.
    pub name: String,
    /// Declared parameters in order.
    pub parameters: Vec<Parameter>,
    /// Rendered width of the parenthesised parameter list, in characters.
    pub parameter_list_width: usize,
}

/// Kind-specific payload attached by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NodeDetail {
    /// Shape of an [`NodeKind::Assignment`].
    Assignment(AssignmentShape),
    /// Signature of a [`NodeKind::FunctionDefinition`].
    Function(FunctionSignature),
}

/// A node in the arena.
#[derive(Debug, Clone, Serialize)]
pub struct SyntaxNode {
    id: NodeId,
    kind: NodeKind,
    label: &'static str,
    span: Span,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    subtree_end: usize,
    detail: Option<NodeDetail>,
}

impl SyntaxNode {
    /// The node's id.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's kind.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Grammar label the node was lowered from (e.g. `expression_list`).
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Source span.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Line the node starts on.
    #[must_use]
    pub fn start_line(&self) -> usize {
        self.span.start.line
    }

    /// Returns true if the node fits on one line.
    #[must_use]
    pub fn is_single_line(&self) -> bool {
        self.span.is_single_line()
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in source order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns true if `self.kind() == kind`.
    #[must_use]
    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind == kind
    }

    /// Assignment shape, when the parser recorded one.
    #[must_use]
    pub fn assignment(&self) -> Option<&AssignmentShape> {
        match &self.detail {
            Some(NodeDetail::Assignment(shape)) => Some(shape),
            _ => None,
        }
    }

    /// Function signature, when the parser recorded one.
    #[must_use]
    pub fn signature(&self) -> Option<&FunctionSignature> {
        match &self.detail {
            Some(NodeDetail::Function(sig)) => Some(sig),
            _ => None,
        }
    }
}
