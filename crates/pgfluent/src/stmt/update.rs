//! UPDATE statement builder.

use crate::ast::{NodeKind, Tree};
use crate::condition::{Conditions, Filter};
use crate::stmt::from::write_from;
use crate::stmt::{
    Assignment, FromItem, Statement, With, collect_tokens, impl_display, write_assignments,
    write_list,
};
use crate::token::{IntoOperand, Token, as_list, as_name, as_sub_query};

/// UPDATE statement builder.
///
/// ```ignore
/// let q = update_only("author").set("name", "test").returning(["id", "name"]);
/// assert_eq!(q.sql(), "UPDATE ONLY author SET name = 'test' RETURNING id, name");
/// assert_eq!(q.prepared().sql, "UPDATE ONLY author SET name = ? RETURNING id, name");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    with: Option<With>,
    only: bool,
    table: Token,
    set: Vec<Assignment>,
    from: Vec<FromItem>,
    where_: Conditions,
    current_of: Option<Token>,
    returning: Vec<Token>,
}

impl Update {
    pub fn new(table: impl Into<Token>) -> Self {
        Self {
            with: None,
            only: false,
            table: table.into(),
            set: Vec::new(),
            from: Vec::new(),
            where_: Conditions::new(),
            current_of: None,
            returning: Vec::new(),
        }
    }

    pub(crate) fn with_clause(mut self, with: With) -> Self {
        self.with = Some(with);
        self
    }

    /// `UPDATE ONLY table`
    pub fn only(mut self) -> Self {
        self.only = true;
        self
    }

    /// `UPDATE table AS alias`
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.table = self.table.alias(alias);
        self
    }

    // ==================== SET ====================

    /// `SET column = value`; plain Rust values bind as parameters.
    pub fn set(mut self, column: impl Into<Token>, value: impl IntoOperand) -> Self {
        self.set.push(Assignment::new(column, value));
        self
    }

    /// `SET (a, b) = (v1, v2)`
    pub fn set_row<C, V>(
        mut self,
        columns: impl IntoIterator<Item = C>,
        values: impl IntoIterator<Item = V>,
    ) -> Self
    where
        C: Into<Token>,
        V: IntoOperand,
    {
        let values: Vec<Token> = values.into_iter().map(IntoOperand::into_operand).collect();
        self.set
            .push(Assignment::new(as_list(columns), as_list(values)));
        self
    }

    /// `SET (a, b) = (sub-select)`
    pub fn set_sub_query<C: Into<Token>>(
        mut self,
        columns: impl IntoIterator<Item = C>,
        query: &impl Statement,
    ) -> Self {
        self.set
            .push(Assignment::new(as_list(columns), as_sub_query(query)));
        self
    }

    // ==================== FROM ====================

    /// Append an `UPDATE ... FROM` item.
    pub fn from(mut self, item: impl Into<FromItem>) -> Self {
        self.from.push(item.into());
        self
    }

    // ==================== WHERE / RETURNING ====================

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

impl Filter for Update {
    fn where_mut(&mut self) -> &mut Conditions {
        &mut self.where_
    }

    fn active_mut(&mut self) -> &mut Conditions {
        &mut self.where_
    }
}

impl Statement for Update {
    fn assemble(&self, tree: &mut Tree) {
        if let Some(with) = &self.with {
            with.write_to(tree);
        }
        tree.start_node(NodeKind::Update);
        if self.only {
            tree.add_leaf(as_name("ONLY"));
        }
        tree.add_leaf(self.table.clone()).end_node();

        write_assignments(tree, NodeKind::Set, &self.set);
        write_from(tree, NodeKind::From, &self.from);
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

impl_display!(Update);
