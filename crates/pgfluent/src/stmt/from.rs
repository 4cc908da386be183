//! FROM items and joins.

use crate::ast::{NodeKind, Tree};
use crate::condition::Conditions;
use crate::stmt::write_list;
use crate::token::{Token, as_func, as_name};

/// One entry of a FROM (or UPDATE ... FROM) list.
///
/// ```ignore
/// FromItem::only("book").tablesample("BERNOULLI", 30).repeatable(15)
/// // ONLY book TABLESAMPLE BERNOULLI(30) REPEATABLE(15)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FromItem {
    only: bool,
    source: Token,
    sample: Option<TableSample>,
}

#[derive(Debug, Clone, PartialEq)]
struct TableSample {
    method: Token,
    repeatable: Option<Token>,
}

impl FromItem {
    pub fn new(source: impl Into<Token>) -> Self {
        Self {
            only: false,
            source: source.into(),
            sample: None,
        }
    }

    /// `ONLY source`: skip inheriting tables.
    pub fn only(source: impl Into<Token>) -> Self {
        Self {
            only: true,
            ..Self::new(source)
        }
    }

    /// `TABLESAMPLE method(argument)`
    pub fn tablesample(mut self, method: impl Into<String>, argument: impl Into<Token>) -> Self {
        self.sample = Some(TableSample {
            method: as_func(method, argument),
            repeatable: None,
        });
        self
    }

    /// `REPEATABLE(seed)` after a TABLESAMPLE clause. Ignored without one.
    pub fn repeatable(mut self, seed: impl Into<Token>) -> Self {
        if let Some(sample) = &mut self.sample {
            sample.repeatable = Some(as_func("REPEATABLE", seed));
        }
        self
    }

    pub(crate) fn write_to(&self, tree: &mut Tree) {
        tree.start_node(NodeKind::Empty);
        if self.only {
            tree.add_leaf(as_name("ONLY"));
        }
        tree.add_leaf(self.source.clone());
        if let Some(sample) = &self.sample {
            tree.start_node(NodeKind::TableSample)
                .add_leaf(sample.method.clone())
                .add_leaves(sample.repeatable.clone())
                .end_node();
        }
        tree.end_node();
    }
}

impl From<&str> for FromItem {
    fn from(s: &str) -> Self {
        FromItem::new(s)
    }
}

impl From<String> for FromItem {
    fn from(s: String) -> Self {
        FromItem::new(s)
    }
}

impl From<Token> for FromItem {
    fn from(token: Token) -> Self {
        FromItem::new(token)
    }
}

/// Write `FROM item, item, ...`, or nothing when there are no items.
pub(crate) fn write_from(tree: &mut Tree, kind: NodeKind, items: &[FromItem]) {
    if items.is_empty() {
        return;
    }
    tree.start_node(kind);
    for item in items {
        item.write_to(tree);
    }
    tree.end_node();
}

/// Join flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Join,
    Inner,
    Left,
    Right,
    Full,
    Cross,
    Natural,
}

impl JoinKind {
    fn node_kind(self) -> NodeKind {
        match self {
            JoinKind::Join => NodeKind::Join,
            JoinKind::Inner => NodeKind::InnerJoin,
            JoinKind::Left => NodeKind::LeftJoin,
            JoinKind::Right => NodeKind::RightJoin,
            JoinKind::Full => NodeKind::FullJoin,
            JoinKind::Cross => NodeKind::CrossJoin,
            JoinKind::Natural => NodeKind::NaturalJoin,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Join {
    pub kind: JoinKind,
    pub source: FromItem,
    pub on: Conditions,
    pub using: Vec<Token>,
}

impl Join {
    pub fn new(kind: JoinKind, source: FromItem) -> Self {
        Self {
            kind,
            source,
            on: Conditions::new(),
            using: Vec::new(),
        }
    }

    pub fn write_to(&self, tree: &mut Tree) {
        tree.start_node(self.kind.node_kind());
        self.source.write_to(tree);
        self.on.write_clause(tree, NodeKind::On);
        write_list(tree, NodeKind::JoinUsing, &self.using);
        tree.end_node();
    }
}
