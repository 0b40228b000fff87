//! Arena storage and construction.

use std::collections::BTreeMap;

use super::{NodeDetail, NodeId, NodeKind, Span, SyntaxNode};

/// An immutable, parsed file.
///
/// Nodes live in a single `Vec` in pre-order, so:
///
/// - the source-order successor of node `i` is node `i + 1`;
/// - the subtree of node `i` is the contiguous slice `i..subtree_end`.
///
/// Both relations are therefore answered without walking the tree, which keeps
/// files with many long lines linear to analyze.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    first_on_line: BTreeMap<usize, NodeId>,
}

impl SyntaxTree {
    /// The root node (the whole module).
    #[must_use]
    pub fn root(&self) -> &SyntaxNode {
        &self.nodes[0]
    }

    /// Returns the node for an id produced by this tree.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to a different tree and is out of range.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    /// Returns the node for `id`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id.index())
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.nodes.iter()
    }

    /// Next node in source order: the first child if any, else the next
    /// sibling, else the next sibling of the nearest ancestor that has one.
    #[must_use]
    pub fn next(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id.index() + 1)
    }

    /// The node and all its descendants, in pre-order.
    #[must_use]
    pub fn subtree(&self, id: NodeId) -> &[SyntaxNode] {
        let node = self.node(id);
        &self.nodes[id.index()..node.subtree_end]
    }

    /// All descendants of the node, in pre-order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> &[SyntaxNode] {
        &self.subtree(id)[1..]
    }

    pub(super) fn first_on_line(&self, line: usize) -> Option<NodeId> {
        self.first_on_line.get(&line).copied()
    }
}

/// Builds a [`SyntaxTree`] in pre-order.
///
/// Parsers call [`start_node`](Self::start_node) when entering a node and
/// [`finish_node`](Self::finish_node) when leaving it; children are attached
/// to whichever node is currently open.
///
/// ```
/// use longline_core::syntax::{NodeKind, Span, SyntaxTreeBuilder};
///
/// let mut b = SyntaxTreeBuilder::new("module", Span::new((1, 0), (2, 0)));
/// b.start_node(NodeKind::Assignment, "assignment", Span::new((1, 0), (1, 5)));
/// b.leaf(NodeKind::Other, "identifier", Span::new((1, 0), (1, 1)));
/// b.finish_node();
/// let tree = b.build();
/// assert_eq!(tree.len(), 3);
/// ```
#[derive(Debug)]
pub struct SyntaxTreeBuilder {
    nodes: Vec<SyntaxNode>,
    open: Vec<NodeId>,
}

impl SyntaxTreeBuilder {
    /// Creates a builder whose root node is already open.
    #[must_use]
    pub fn new(root_label: &'static str, root_span: Span) -> Self {
        let mut builder = Self {
            nodes: Vec::new(),
            open: Vec::new(),
        };
        builder.start_node(NodeKind::Other, root_label, root_span);
        builder
    }

    /// Opens a node as the last child of the currently open node.
    pub fn start_node(&mut self, kind: NodeKind, label: &'static str, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = self.open.last().copied();
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        self.nodes.push(SyntaxNode {
            id,
            kind,
            label,
            span,
            parent,
            children: Vec::new(),
            subtree_end: id.index() + 1,
            detail: None,
        });
        self.open.push(id);
        id
    }

    /// Attaches kind-specific detail to a node.
    pub fn attach_detail(&mut self, id: NodeId, detail: NodeDetail) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.detail = Some(detail);
        }
    }

    /// Closes the most recently opened node. The root stays open until
    /// [`build`](Self::build).
    pub fn finish_node(&mut self) {
        if self.open.len() > 1 {
            self.close_top();
        }
    }

    /// Adds a node without children.
    pub fn leaf(&mut self, kind: NodeKind, label: &'static str, span: Span) -> NodeId {
        let id = self.start_node(kind, label, span);
        self.finish_node();
        id
    }

    /// Closes any open nodes and indexes the tree by line.
    #[must_use]
    pub fn build(mut self) -> SyntaxTree {
        while !self.open.is_empty() {
            self.close_top();
        }

        let mut first_on_line = BTreeMap::new();
        for node in self.nodes.iter().skip(1) {
            first_on_line.entry(node.start_line()).or_insert(node.id);
        }

        SyntaxTree {
            nodes: self.nodes,
            first_on_line,
        }
    }

    fn close_top(&mut self) {
        if let Some(id) = self.open.pop() {
            let end = self.nodes.len();
            self.nodes[id.index()].subtree_end = end;
        }
    }
}
