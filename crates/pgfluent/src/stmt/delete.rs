//! DELETE statement builder.

use crate::ast::{NodeKind, Tree};
use crate::condition::{Conditions, Filter};
use crate::stmt::{Statement, With, collect_tokens, impl_display, write_list};
use crate::token::{Token, as_name};

/// DELETE statement builder.
///
/// ```ignore
/// let q = delete_from("book")
///     .alias("b")
///     .using(["author", "order"])
///     .where_("b.id", "=", 1)
///     .returning(["*"]);
/// assert_eq!(q.sql(), "DELETE FROM book AS b USING author, order WHERE b.id = 1 RETURNING *");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    with: Option<With>,
    only: bool,
    table: Token,
    using: Vec<Token>,
    where_: Conditions,
    current_of: Option<Token>,
    returning: Vec<Token>,
}

impl Delete {
    pub fn new(table: impl Into<Token>) -> Self {
        Self {
            with: None,
            only: false,
            table: table.into(),
            using: Vec::new(),
            where_: Conditions::new(),
            current_of: None,
            returning: Vec::new(),
        }
    }

    pub(crate) fn with_clause(mut self, with: With) -> Self {
        self.with = Some(with);
        self
    }

    /// `DELETE FROM ONLY table`
    pub fn only(mut self) -> Self {
        self.only = true;
        self
    }

    /// `DELETE FROM table AS alias`
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.table = self.table.alias(alias);
        self
    }

    /// `USING items`
    pub fn using<T: Into<Token>>(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.using.extend(collect_tokens(items));
        self
    }

    /// `WHERE CURRENT OF cursor`, replacing any other WHERE conditions.
    pub fn where_current_of(mut self, cursor: impl Into<String>) -> Self {
        self.current_of = Some(as_name(cursor.into()));
        self
    }

    pub fn returning<T: Into<Token>>(mut self, cols: impl IntoIterator<Item = T>) -> Self {
        self.returning.extend(collect_tokens(cols));
        self
    }
}

impl Filter for Delete {
    fn where_mut(&mut self) -> &mut Conditions {
        &mut self.where_
    }

    fn active_mut(&mut self) -> &mut Conditions {
        &mut self.where_
    }
}

impl Statement for Delete {
    fn assemble(&self, tree: &mut Tree) {
        if let Some(with) = &self.with {
            with.write_to(tree);
        }
        tree.start_node(NodeKind::DeleteFrom);
        if self.only {
            tree.add_leaf(as_name("ONLY"));
        }
        tree.add_leaf(self.table.clone()).end_node();

        write_list(tree, NodeKind::Using, &self.using);
        match &self.current_of {
            Some(cursor) => {
                tree.start_node(NodeKind::WhereCurrentOf)
                    .add_leaf(cursor.clone())
                    .end_node();
            }
            None => self.where_.write_clause(tree, NodeKind::Where),
        }
        write_list(tree, NodeKind::Returning, &self.returning);
    }
}

impl_display!(Delete);
