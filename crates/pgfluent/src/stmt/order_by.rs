//! ORDER BY terms.

use crate::ast::{NodeKind, Tree};
use crate::token::{Token, as_name};

/// Placement of NULLs in a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nulls {
    First,
    Last,
}

impl Nulls {
    fn as_str(self) -> &'static str {
        match self {
            Nulls::First => "NULLS FIRST",
            Nulls::Last => "NULLS LAST",
        }
    }
}

/// One ORDER BY term: `expr [direction] [nulls placement]`.
///
/// Direction and nulls placement are optional; absent parts leave no trace in
/// the output. Raw strings are emitted as given, so
/// `OrderBy::from(("name", "desc", "nulls last"))` renders `name desc nulls last`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    expr: Token,
    direction: Option<Token>,
    nulls: Option<Token>,
}

impl OrderBy {
    pub fn new(expr: impl Into<Token>) -> Self {
        Self {
            expr: expr.into(),
            direction: None,
            nulls: None,
        }
    }

    pub fn asc(self) -> Self {
        self.sorting("ASC")
    }

    pub fn desc(self) -> Self {
        self.sorting("DESC")
    }

    /// Raw sort direction, e.g. `"desc"` or `"USING >"`.
    pub fn sorting(mut self, direction: impl Into<Token>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    pub fn nulls_first(self) -> Self {
        self.nulls_placement(Nulls::First)
    }

    pub fn nulls_last(self) -> Self {
        self.nulls_placement(Nulls::Last)
    }

    pub fn nulls_placement(self, nulls: Nulls) -> Self {
        self.nulls(as_name(nulls.as_str()))
    }

    /// Raw nulls placement, e.g. `"nulls last"`.
    pub fn nulls(mut self, placement: impl Into<Token>) -> Self {
        self.nulls = Some(placement.into());
        self
    }

    pub(crate) fn write_to(&self, tree: &mut Tree) {
        tree.start_node(NodeKind::Empty)
            .add_leaf(self.expr.clone())
            .add_leaves(self.direction.clone());
        if let Some(nulls) = &self.nulls {
            tree.start_node(NodeKind::Nulls)
                .add_leaf(nulls.clone())
                .end_node();
        }
        tree.end_node();
    }
}

impl From<&str> for OrderBy {
    fn from(s: &str) -> Self {
        OrderBy::new(s)
    }
}

impl From<String> for OrderBy {
    fn from(s: String) -> Self {
        OrderBy::new(s)
    }
}

impl From<Token> for OrderBy {
    fn from(token: Token) -> Self {
        OrderBy::new(token)
    }
}

impl<E: Into<Token>, D: Into<Token>> From<(E, D)> for OrderBy {
    fn from((expr, direction): (E, D)) -> Self {
        OrderBy::new(expr).sorting(direction)
    }
}

impl<E: Into<Token>, D: Into<Token>, N: Into<Token>> From<(E, D, N)> for OrderBy {
    fn from((expr, direction, nulls): (E, D, N)) -> Self {
        OrderBy::new(expr).sorting(direction).nulls(nulls)
    }
}

/// Write `ORDER BY term, term, ...`, or nothing when there are no terms.
pub(crate) fn write_order_by(tree: &mut Tree, terms: &[OrderBy]) {
    if terms.is_empty() {
        return;
    }
    tree.start_node(NodeKind::OrderBy);
    for term in terms {
        term.write_to(tree);
    }
    tree.end_node();
}
