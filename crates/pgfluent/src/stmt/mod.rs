//! Statement builders.
//!
//! Each builder records clause state through consuming `fn(self, ..) -> Self`
//! calls and replays it into a fresh [`Tree`] in grammatical order when output
//! is requested, so clause order never depends on call order.
//!
//! # Example
//!
//! ```ignore
//! use pgfluent::prelude::*;
//!
//! let q = select(["id", "name"])
//!     .from("book")
//!     .limit(10)
//!     .where_("price", ">", as_constant(100))
//!     .order_by(OrderBy::new("name").desc());
//!
//! assert_eq!(q.sql(), "SELECT id, name FROM book WHERE price > 100 ORDER BY name DESC LIMIT 10");
//! let prepared = q.prepared();
//! assert_eq!(prepared.sql, "SELECT id, name FROM book WHERE price > ? ORDER BY name DESC LIMIT ?");
//! ```

mod delete;
mod from;
mod insert;
mod order_by;
mod select;
mod sequence;
mod update;
mod with;

pub use delete::Delete;
pub use from::{FromItem, JoinKind};
pub use insert::{Insert, Overriding};
pub use order_by::{Nulls, OrderBy};
pub use select::{Lock, Select, SetOperator};
pub use sequence::CreateSequence;
pub use update::Update;
pub use with::{PendingCte, With};

use crate::ast::{NodeKind, PreparedSql, Tree, TreeFormatter};
use crate::config::RenderOptions;
use crate::token::{IntoOperand, Token, as_name};

/// A statement that can assemble itself into a [`Tree`].
pub trait Statement {
    /// Replay this statement's clauses into `tree`, in clause order.
    fn assemble(&self, tree: &mut Tree);

    /// A freshly assembled tree.
    fn tree(&self) -> Tree {
        let mut tree = Tree::new();
        self.assemble(&mut tree);
        tree
    }

    /// Literal SQL.
    fn sql(&self) -> String {
        TreeFormatter::default().literal(&self.tree())
    }

    /// SQL with `?` placeholders plus the bound values.
    fn prepared(&self) -> PreparedSql {
        self.prepared_with(&RenderOptions::default())
    }

    fn prepared_with(&self, options: &RenderOptions) -> PreparedSql {
        TreeFormatter::new(options.clone()).prepared(&self.tree())
    }
}

impl<T: Statement + ?Sized> Statement for &T {
    fn assemble(&self, tree: &mut Tree) {
        (**self).assemble(tree)
    }
}

/// A hand-built tree can stand wherever a statement is expected.
impl Statement for Tree {
    fn assemble(&self, tree: &mut Tree) {
        tree.add_leaf(Token::statement(self.clone()));
    }

    fn tree(&self) -> Tree {
        self.clone()
    }
}

macro_rules! impl_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&$crate::stmt::Statement::sql(self))
                }
            }
        )*
    };
}

pub(crate) use impl_display;

/// `target = value` in SET and DO UPDATE SET.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Assignment {
    pub target: Token,
    pub value: Token,
}

impl Assignment {
    pub fn new(target: impl Into<Token>, value: impl IntoOperand) -> Self {
        Self {
            target: target.into(),
            value: value.into_operand(),
        }
    }

    fn write_to(&self, tree: &mut Tree) {
        tree.start_node(NodeKind::Empty)
            .add_leaf(self.target.clone())
            .add_leaf(as_name("="))
            .add_leaf(self.value.clone())
            .end_node();
    }
}

/// Write `kind` with one child per assignment, or nothing when empty.
pub(crate) fn write_assignments(tree: &mut Tree, kind: NodeKind, assignments: &[Assignment]) {
    if assignments.is_empty() {
        return;
    }
    tree.start_node(kind);
    for assignment in assignments {
        assignment.write_to(tree);
    }
    tree.end_node();
}

/// Write `kind` with the tokens as leaves, or nothing when there are none.
pub(crate) fn write_list(tree: &mut Tree, kind: NodeKind, tokens: &[Token]) {
    if tokens.is_empty() {
        return;
    }
    tree.start_node(kind)
        .add_leaves(tokens.iter().cloned())
        .end_node();
}

pub(crate) fn collect_tokens<T: Into<Token>>(items: impl IntoIterator<Item = T>) -> Vec<Token> {
    items.into_iter().map(Into::into).collect()
}

// ==================== Factories ====================

/// `SELECT cols`
pub fn select<T: Into<Token>>(cols: impl IntoIterator<Item = T>) -> Select {
    Select::new().columns(cols)
}

/// `SELECT ALL cols`
pub fn select_all<T: Into<Token>>(cols: impl IntoIterator<Item = T>) -> Select {
    Select::new().all().columns(cols)
}

/// `SELECT DISTINCT cols`
pub fn select_distinct<T: Into<Token>>(cols: impl IntoIterator<Item = T>) -> Select {
    Select::new().distinct().columns(cols)
}

/// `SELECT DISTINCT ON (on) cols`
pub fn select_distinct_on<O, T>(
    on: impl IntoIterator<Item = O>,
    cols: impl IntoIterator<Item = T>,
) -> Select
where
    O: Into<Token>,
    T: Into<Token>,
{
    Select::new().distinct_on(on).columns(cols)
}

/// `INSERT INTO table`
pub fn insert_into(table: impl Into<Token>) -> Insert {
    Insert::new(table)
}

/// `UPDATE table`
pub fn update(table: impl Into<Token>) -> Update {
    Update::new(table)
}

/// `UPDATE ONLY table`
pub fn update_only(table: impl Into<Token>) -> Update {
    Update::new(table).only()
}

/// `DELETE FROM table`
pub fn delete_from(table: impl Into<Token>) -> Delete {
    Delete::new(table)
}

/// `DELETE FROM ONLY table`
pub fn delete_from_only(table: impl Into<Token>) -> Delete {
    Delete::new(table).only()
}

/// `CREATE SEQUENCE name`
pub fn create_sequence(name: impl Into<Token>) -> CreateSequence {
    CreateSequence::new(name)
}

/// `CREATE TEMP SEQUENCE name`
pub fn create_temp_sequence(name: impl Into<Token>) -> CreateSequence {
    CreateSequence::new(name).temp()
}

/// `CREATE SEQUENCE IF NOT EXISTS name`
pub fn create_sequence_if_not_exists(name: impl Into<Token>) -> CreateSequence {
    CreateSequence::new(name).if_not_exists()
}

/// `CREATE TEMP SEQUENCE IF NOT EXISTS name`
pub fn create_temp_sequence_if_not_exists(name: impl Into<Token>) -> CreateSequence {
    CreateSequence::new(name).temp().if_not_exists()
}

/// `WITH name (cols) AS (...)`; finish the CTE with [`PendingCte::as_query`].
pub fn with<S: Into<String>>(name: impl Into<String>, columns: impl IntoIterator<Item = S>) -> PendingCte {
    With::new(false).with(name, columns)
}

/// `WITH RECURSIVE name (cols) AS (...)`
pub fn with_recursive<S: Into<String>>(
    name: impl Into<String>,
    columns: impl IntoIterator<Item = S>,
) -> PendingCte {
    With::new(true).with(name, columns)
}

#[cfg(test)]
mod tests;
