//! WITH (common table expressions).

use crate::ast::{NodeKind, Tree};
use crate::stmt::{Delete, Insert, Select, Statement, Update};
use crate::token::{Token, TokenKind, as_list, as_name};

#[derive(Debug, Clone, PartialEq)]
struct Cte {
    name: String,
    columns: Vec<String>,
    query: Tree,
}

/// A WITH clause: one or more named queries preceding a statement.
///
/// ```ignore
/// use pgfluent::{with, update_only, insert_into};
///
/// let q = with("latest", ["id", "name"])
///     .as_query(update_only("author").set("name", "test").returning(["id", "name"]))
///     .with("newest", ["id", "name"])
///     .as_query(insert_into("book").default_values().returning(["id", "name"]))
///     .delete_from("book")
///     .returning(["*"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct With {
    recursive: bool,
    ctes: Vec<Cte>,
}

/// A named CTE waiting for its query.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCte {
    with: With,
    name: String,
    columns: Vec<String>,
}

impl PendingCte {
    /// `name (cols) AS (query)`. The query is snapshotted now.
    pub fn as_query(mut self, query: impl Statement) -> With {
        self.with.ctes.push(Cte {
            name: self.name,
            columns: self.columns,
            query: query.tree(),
        });
        self.with
    }
}

impl With {
    pub(crate) fn new(recursive: bool) -> Self {
        Self {
            recursive,
            ctes: Vec::new(),
        }
    }

    /// Start another CTE.
    pub fn with<S: Into<String>>(
        self,
        name: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
    ) -> PendingCte {
        PendingCte {
            with: self,
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Start another CTE and mark the clause `WITH RECURSIVE`.
    pub fn with_recursive<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
    ) -> PendingCte {
        self.recursive = true;
        self.with(name, columns)
    }

    pub fn len(&self) -> usize {
        self.ctes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ctes.is_empty()
    }

    // ==================== Main statement ====================

    pub fn select<T: Into<Token>>(self, cols: impl IntoIterator<Item = T>) -> Select {
        Select::new().with_clause(self).columns(cols)
    }

    pub fn insert_into(self, table: impl Into<Token>) -> Insert {
        Insert::new(table).with_clause(self)
    }

    pub fn update(self, table: impl Into<Token>) -> Update {
        Update::new(table).with_clause(self)
    }

    pub fn update_only(self, table: impl Into<Token>) -> Update {
        Update::new(table).only().with_clause(self)
    }

    pub fn delete_from(self, table: impl Into<Token>) -> Delete {
        Delete::new(table).with_clause(self)
    }

    pub fn delete_from_only(self, table: impl Into<Token>) -> Delete {
        Delete::new(table).only().with_clause(self)
    }

    pub(crate) fn write_to(&self, tree: &mut Tree) {
        if self.ctes.is_empty() {
            return;
        }
        tree.start_node(if self.recursive {
            NodeKind::WithRecursive
        } else {
            NodeKind::With
        });
        for cte in &self.ctes {
            tree.start_node(NodeKind::Empty).add_leaf(as_name(cte.name.as_str()));
            if !cte.columns.is_empty() {
                tree.add_leaf(as_list(cte.columns.iter().map(String::as_str)));
            }
            tree.add_leaf(as_name("AS"))
                .add_leaf(Token::new(TokenKind::SubQuery(Box::new(cte.query.clone()))))
                .end_node();
        }
        tree.end_node();
    }
}
