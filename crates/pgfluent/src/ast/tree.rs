//! Arena tree with an open-node stack.

use std::fmt;

use super::format::{PreparedSql, TreeFormatter};
use super::node::NodeKind;
use crate::config::RenderOptions;
use crate::error::{BuildError, BuildResult};
use crate::token::Token;

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// A child of a node: a leaf token or a nested node.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Leaf(Token),
    Node(NodeId),
}

/// A tree vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Child>,
    pub parent: Option<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            children: Vec::new(),
            parent,
        }
    }
}

/// The syntax tree of one statement.
///
/// Built by opening nodes with [`start_node`](Tree::start_node), attaching
/// leaves to whichever node is open with [`add_leaf`](Tree::add_leaf), and
/// closing with [`end_node`](Tree::end_node). Nodes live in a flat arena and
/// refer to each other by [`NodeId`].
///
/// # Example
///
/// ```ignore
/// use pgfluent::ast::{NodeKind, Tree};
/// use pgfluent::as_name;
///
/// let mut tree = Tree::new();
/// tree.start_node(NodeKind::Select)
///     .add_leaf(as_name("id"))
///     .add_leaf(as_name("name"))
///     .end_node();
/// assert_eq!(tree.render()?, "SELECT id, name");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
    /// Open nodes, root at the bottom. Never empty.
    open: Vec<NodeId>,
}

impl Tree {
    /// Create a tree holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Root, None)],
            open: vec![NodeId::ROOT],
        }
    }

    fn top(&self) -> NodeId {
        self.open.last().copied().unwrap_or(NodeId::ROOT)
    }

    // ==================== Building ====================

    /// Open a new node of `kind` under the current node and make it current.
    pub fn start_node(&mut self, kind: NodeKind) -> &mut Self {
        let parent = self.top();
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, Some(parent)));
        self.nodes[parent.0].children.push(Child::Node(id));
        self.open.push(id);
        self
    }

    /// Append a leaf to the current node.
    pub fn add_leaf(&mut self, token: Token) -> &mut Self {
        let top = self.top();
        self.nodes[top.0].children.push(Child::Leaf(token));
        self
    }

    /// Append every token in order to the current node.
    pub fn add_leaves(&mut self, tokens: impl IntoIterator<Item = Token>) -> &mut Self {
        for token in tokens {
            self.add_leaf(token);
        }
        self
    }

    /// Close the current node.
    ///
    /// # Panics
    ///
    /// Panics when only the root is open. Use [`try_end_node`](Tree::try_end_node)
    /// to get an error instead.
    pub fn end_node(&mut self) -> &mut Self {
        if let Err(err) = self.try_end_node() {
            panic!("{err}");
        }
        self
    }

    /// Close the current node, failing when only the root is open.
    pub fn try_end_node(&mut self) -> BuildResult<&mut Self> {
        if self.open.len() <= 1 {
            return Err(BuildError::UnbalancedEnd);
        }
        self.open.pop();
        Ok(self)
    }

    /// Open `kind`, run `f` on the tree, then close it.
    pub fn with_node(&mut self, kind: NodeKind, f: impl FnOnce(&mut Self)) -> &mut Self {
        self.start_node(kind);
        f(self);
        self.end_node()
    }

    // ==================== Inspection ====================

    /// Number of nodes opened and not yet closed (the root is not counted).
    pub fn depth(&self) -> usize {
        self.open.len() - 1
    }

    /// Whether nothing has been attached to the root.
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    // ==================== Rendering ====================

    fn check_complete(&self) -> BuildResult<()> {
        if self.depth() > 0 {
            return Err(BuildError::unclosed(self.depth()));
        }
        if self.is_empty() {
            return Err(BuildError::EmptyTree);
        }
        Ok(())
    }

    /// Render literal SQL. Fails on an empty tree or unclosed nodes.
    pub fn render(&self) -> BuildResult<String> {
        self.check_complete()?;
        Ok(TreeFormatter::default().literal(self))
    }

    /// Render SQL with `?` placeholders and the bound parameters.
    pub fn render_prepared(&self) -> BuildResult<PreparedSql> {
        self.render_prepared_with(&RenderOptions::default())
    }

    /// Render prepared SQL using the given options.
    pub fn render_prepared_with(&self, options: &RenderOptions) -> BuildResult<PreparedSql> {
        self.check_complete()?;
        Ok(TreeFormatter::new(options.clone()).prepared(self))
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Literal SQL of whatever the tree holds, without completeness checks.
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&TreeFormatter::default().literal(self))
    }
}
