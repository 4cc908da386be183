//! INSERT statement builder.

use crate::ast::{NodeKind, Tree};
use crate::condition::{Conditions, Connective, condition};
use crate::stmt::{
    Assignment, Statement, With, collect_tokens, impl_display, write_assignments, write_list,
};
use crate::token::{IntoOperand, Token, as_list, as_name};

/// `OVERRIDING { SYSTEM | USER } VALUE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overriding {
    SystemValue,
    UserValue,
}

#[derive(Debug, Clone, PartialEq)]
enum Source {
    None,
    DefaultValues,
    Values(Vec<Vec<Token>>),
    Query(Tree),
}

#[derive(Debug, Clone, PartialEq)]
enum ConflictTarget {
    Any,
    Columns(Vec<Token>),
    Constraint(Token),
}

/// `DO UPDATE SET` wins over `DO NOTHING` when assignments exist.
#[derive(Debug, Clone, PartialEq)]
struct OnConflict {
    target: ConflictTarget,
    do_nothing: bool,
    update_set: Vec<Assignment>,
    update_where: Conditions,
}

/// INSERT statement builder.
///
/// Plain Rust values passed to [`values`](Insert::values) and
/// [`do_update_set`](Insert::do_update_set) bind as parameters in prepared output.
///
/// ```ignore
/// let q = insert_into("book").columns(["name"]).values(["Dune"]).returning(["*"]);
/// assert_eq!(q.prepared().sql, "INSERT INTO book (name) VALUES (?) RETURNING *");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    with: Option<With>,
    table: Token,
    columns: Vec<Token>,
    overriding: Option<Overriding>,
    source: Source,
    on_conflict: Option<OnConflict>,
    returning: Vec<Token>,
}

impl Insert {
    pub fn new(table: impl Into<Token>) -> Self {
        Self {
            with: None,
            table: table.into(),
            columns: Vec::new(),
            overriding: None,
            source: Source::None,
            on_conflict: None,
            returning: Vec::new(),
        }
    }

    pub(crate) fn with_clause(mut self, with: With) -> Self {
        self.with = Some(with);
        self
    }

    /// `INSERT INTO table AS alias`
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.table = self.table.alias(alias);
        self
    }

    /// Target column list.
    pub fn columns<T: Into<Token>>(mut self, cols: impl IntoIterator<Item = T>) -> Self {
        self.columns.extend(collect_tokens(cols));
        self
    }

    pub fn overriding(mut self, overriding: Overriding) -> Self {
        self.overriding = Some(overriding);
        self
    }

    /// `OVERRIDING SYSTEM VALUE`
    pub fn overriding_system_value(self) -> Self {
        self.overriding(Overriding::SystemValue)
    }

    /// `OVERRIDING USER VALUE`
    pub fn overriding_user_value(self) -> Self {
        self.overriding(Overriding::UserValue)
    }

    // ==================== Source ====================

    /// `DEFAULT VALUES`
    pub fn default_values(mut self) -> Self {
        self.source = Source::DefaultValues;
        self
    }

    /// Append one `VALUES` row. Call repeatedly for multi-row inserts.
    pub fn values<V: IntoOperand>(mut self, row: impl IntoIterator<Item = V>) -> Self {
        let row: Vec<Token> = row.into_iter().map(IntoOperand::into_operand).collect();
        match &mut self.source {
            Source::Values(rows) => rows.push(row),
            _ => self.source = Source::Values(vec![row]),
        }
        self
    }

    /// Insert the rows of a query. The query is snapshotted now.
    pub fn query(mut self, query: impl Statement) -> Self {
        self.source = Source::Query(query.tree());
        self
    }

    // ==================== ON CONFLICT ====================

    fn conflict(&mut self) -> &mut OnConflict {
        self.on_conflict.get_or_insert_with(|| OnConflict {
            target: ConflictTarget::Any,
            do_nothing: false,
            update_set: Vec::new(),
            update_where: Conditions::new(),
        })
    }

    /// `ON CONFLICT` with no conflict target.
    pub fn on_conflict(mut self) -> Self {
        self.conflict().target = ConflictTarget::Any;
        self
    }

    /// `ON CONFLICT (cols)`
    pub fn on_conflict_columns<T: Into<Token>>(mut self, cols: impl IntoIterator<Item = T>) -> Self {
        self.conflict().target = ConflictTarget::Columns(collect_tokens(cols));
        self
    }

    /// `ON CONFLICT ON CONSTRAINT name`
    pub fn on_conflict_constraint(mut self, name: impl Into<Token>) -> Self {
        self.conflict().target = ConflictTarget::Constraint(name.into());
        self
    }

    /// `DO NOTHING`
    pub fn do_nothing(mut self) -> Self {
        let conflict = self.conflict();
        conflict.do_nothing = true;
        conflict.update_set.clear();
        self
    }

    /// `DO UPDATE SET column = value`; repeat for more columns.
    pub fn do_update_set(mut self, column: impl Into<Token>, value: impl IntoOperand) -> Self {
        let conflict = self.conflict();
        conflict.do_nothing = false;
        conflict.update_set.push(Assignment::new(column, value));
        self
    }

    /// `DO UPDATE SET column = EXCLUDED.column`
    pub fn do_update_set_excluded(self, column: &str) -> Self {
        let excluded = as_name(format!("EXCLUDED.{column}"));
        self.do_update_set(column, excluded)
    }

    /// `WHERE left op right` for the conflict clause, joined with `AND` when repeated.
    ///
    /// With `DO UPDATE SET` it filters the update. Otherwise it is the index
    /// predicate of a column conflict target, `ON CONFLICT (cols) WHERE ...`,
    /// and it is ignored for a constraint or missing target.
    pub fn do_update_where(
        mut self,
        left: impl Into<Token>,
        op: impl Into<Token>,
        right: impl Into<Token>,
    ) -> Self {
        let conflict = self.conflict();
        conflict.update_where =
            std::mem::take(&mut conflict.update_where).push(Connective::And, condition(left, op, right));
        self
    }

    // ==================== RETURNING ====================

    pub fn returning<T: Into<Token>>(mut self, cols: impl IntoIterator<Item = T>) -> Self {
        self.returning.extend(collect_tokens(cols));
        self
    }

    // ==================== Assembly ====================

    fn write_on_conflict(&self, tree: &mut Tree) {
        let Some(conflict) = &self.on_conflict else {
            return;
        };
        let updates = !conflict.update_set.is_empty();
        tree.start_node(NodeKind::OnConflict);
        match &conflict.target {
            ConflictTarget::Any => {}
            ConflictTarget::Columns(cols) => {
                tree.add_leaf(as_list(cols.iter().cloned()));
                if !updates {
                    conflict.update_where.write_clause(tree, NodeKind::Where);
                }
            }
            ConflictTarget::Constraint(name) => {
                tree.start_node(NodeKind::OnConstraint)
                    .add_leaf(name.clone())
                    .end_node();
            }
        }
        if updates {
            write_assignments(tree, NodeKind::DoUpdateSet, &conflict.update_set);
            conflict.update_where.write_clause(tree, NodeKind::Where);
        } else if conflict.do_nothing {
            tree.start_node(NodeKind::DoNothing).end_node();
        }
        tree.end_node();
    }
}

impl Statement for Insert {
    fn assemble(&self, tree: &mut Tree) {
        if let Some(with) = &self.with {
            with.write_to(tree);
        }
        tree.start_node(NodeKind::InsertInto)
            .add_leaf(self.table.clone());
        if !self.columns.is_empty() {
            tree.add_leaf(as_list(self.columns.iter().cloned()));
        }
        tree.end_node();

        if let Some(overriding) = self.overriding {
            let text = match overriding {
                Overriding::SystemValue => "SYSTEM VALUE",
                Overriding::UserValue => "USER VALUE",
            };
            tree.start_node(NodeKind::Overriding)
                .add_leaf(as_name(text))
                .end_node();
        }

        match &self.source {
            Source::None => {}
            Source::DefaultValues => {
                tree.start_node(NodeKind::DefaultValues).end_node();
            }
            Source::Values(rows) => {
                tree.start_node(NodeKind::Values);
                for row in rows {
                    tree.add_leaf(as_list(row.iter().cloned()));
                }
                tree.end_node();
            }
            Source::Query(query) => {
                tree.add_leaf(Token::statement(query.clone()));
            }
        }

        self.write_on_conflict(tree);
        write_list(tree, NodeKind::Returning, &self.returning);
    }
}

impl_display!(Insert);
