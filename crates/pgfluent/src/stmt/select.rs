//! SELECT statement builder.

use crate::ast::{NodeKind, Tree};
use crate::condition::{Conditions, Connective, Filter, condition, exists};
use crate::stmt::from::{FromItem, Join, JoinKind, write_from};
use crate::stmt::order_by::{OrderBy, write_order_by};
use crate::stmt::{Statement, With, collect_tokens, impl_display, write_list};
use crate::token::{Token, as_constant, as_list, as_name};

#[derive(Debug, Clone, PartialEq)]
enum Quantifier {
    Plain,
    All,
    Distinct,
    DistinctOn(Vec<Token>),
}

/// Set operations combining two queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    Union,
    UnionAll,
    UnionDistinct,
    Intersect,
    IntersectAll,
    IntersectDistinct,
    Except,
    ExceptAll,
    ExceptDistinct,
}

impl SetOperator {
    fn node_kind(self) -> NodeKind {
        match self {
            SetOperator::Union => NodeKind::Union,
            SetOperator::UnionAll => NodeKind::UnionAll,
            SetOperator::UnionDistinct => NodeKind::UnionDistinct,
            SetOperator::Intersect => NodeKind::Intersect,
            SetOperator::IntersectAll => NodeKind::IntersectAll,
            SetOperator::IntersectDistinct => NodeKind::IntersectDistinct,
            SetOperator::Except => NodeKind::Except,
            SetOperator::ExceptAll => NodeKind::ExceptAll,
            SetOperator::ExceptDistinct => NodeKind::ExceptDistinct,
        }
    }
}

/// Row-level lock strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lock {
    Update,
    NoKeyUpdate,
    Share,
    KeyShare,
}

impl Lock {
    fn node_kind(self) -> NodeKind {
        match self {
            Lock::Update => NodeKind::ForUpdate,
            Lock::NoKeyUpdate => NodeKind::ForNoKeyUpdate,
            Lock::Share => NodeKind::ForShare,
            Lock::KeyShare => NodeKind::ForKeyShare,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Locking {
    strength: Lock,
    of: Vec<Token>,
    wait: Option<&'static str>,
}

/// Which condition clause `and*` / `or*` extend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Where,
    Having,
    Join,
}

/// SELECT statement builder.
///
/// Clauses render in the order WITH, SELECT, FROM, JOIN, WHERE, GROUP BY,
/// HAVING, set operations, ORDER BY, LIMIT, OFFSET, locking, whatever order
/// the methods were called in.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    with: Option<With>,
    quantifier: Quantifier,
    columns: Vec<Token>,
    from: Vec<FromItem>,
    joins: Vec<Join>,
    where_: Conditions,
    group_by: Vec<Token>,
    having: Conditions,
    set_ops: Vec<(SetOperator, Tree)>,
    order_by: Vec<OrderBy>,
    limit: Option<Token>,
    offset: Option<Token>,
    locking: Option<Locking>,
    target: Target,
}

impl Select {
    /// An empty `SELECT`.
    pub fn new() -> Self {
        Self {
            with: None,
            quantifier: Quantifier::Plain,
            columns: Vec::new(),
            from: Vec::new(),
            joins: Vec::new(),
            where_: Conditions::new(),
            group_by: Vec::new(),
            having: Conditions::new(),
            set_ops: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            locking: None,
            target: Target::Where,
        }
    }

    pub(crate) fn with_clause(mut self, with: With) -> Self {
        self.with = Some(with);
        self
    }

    // ==================== SELECT list ====================

    /// Append output columns.
    pub fn columns<T: Into<Token>>(mut self, cols: impl IntoIterator<Item = T>) -> Self {
        self.columns.extend(collect_tokens(cols));
        self
    }

    /// Append one output column.
    pub fn column(mut self, col: impl Into<Token>) -> Self {
        self.columns.push(col.into());
        self
    }

    /// `SELECT ALL`
    pub fn all(mut self) -> Self {
        self.quantifier = Quantifier::All;
        self
    }

    /// `SELECT DISTINCT`
    pub fn distinct(mut self) -> Self {
        self.quantifier = Quantifier::Distinct;
        self
    }

    /// `SELECT DISTINCT ON (exprs)`
    pub fn distinct_on<T: Into<Token>>(mut self, exprs: impl IntoIterator<Item = T>) -> Self {
        self.quantifier = Quantifier::DistinctOn(collect_tokens(exprs));
        self
    }

    // ==================== FROM ====================

    /// Append a FROM item.
    pub fn from(mut self, item: impl Into<FromItem>) -> Self {
        self.from.push(item.into());
        self
    }

    /// Append several FROM items.
    pub fn from_items<T: Into<FromItem>>(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.from.extend(items.into_iter().map(Into::into));
        self
    }

    /// Append `ONLY source` to FROM.
    pub fn from_only(self, source: impl Into<Token>) -> Self {
        self.from(FromItem::only(source))
    }

    // ==================== JOIN ====================

    fn push_join(mut self, kind: JoinKind, source: impl Into<FromItem>) -> Self {
        self.joins.push(Join::new(kind, source.into()));
        self.target = Target::Join;
        self
    }

    /// `JOIN source`
    pub fn join(self, source: impl Into<FromItem>) -> Self {
        self.push_join(JoinKind::Join, source)
    }

    /// `INNER JOIN source`
    pub fn inner_join(self, source: impl Into<FromItem>) -> Self {
        self.push_join(JoinKind::Inner, source)
    }

    /// `LEFT JOIN source`
    pub fn left_join(self, source: impl Into<FromItem>) -> Self {
        self.push_join(JoinKind::Left, source)
    }

    /// `RIGHT JOIN source`
    pub fn right_join(self, source: impl Into<FromItem>) -> Self {
        self.push_join(JoinKind::Right, source)
    }

    /// `FULL JOIN source`
    pub fn full_join(self, source: impl Into<FromItem>) -> Self {
        self.push_join(JoinKind::Full, source)
    }

    /// `CROSS JOIN source`
    pub fn cross_join(self, source: impl Into<FromItem>) -> Self {
        self.push_join(JoinKind::Cross, source)
    }

    /// `NATURAL JOIN source`
    pub fn natural_join(self, source: impl Into<FromItem>) -> Self {
        self.push_join(JoinKind::Natural, source)
    }

    /// Extend the ON conditions of the last join. Ignored when there is no join.
    fn push_on(mut self, other: Conditions) -> Self {
        if let Some(join) = self.joins.last_mut() {
            join.on = std::mem::take(&mut join.on).push(Connective::And, other);
            self.target = Target::Join;
        }
        self
    }

    /// `ON left op right` for the last join.
    pub fn on(self, left: impl Into<Token>, op: impl Into<Token>, right: impl Into<Token>) -> Self {
        self.push_on(condition(left, op, right))
    }

    /// `ON (true)` / `ON (false)`
    pub fn on_bool(self, value: bool) -> Self {
        self.push_on(Conditions::predicate([as_list([value])]))
    }

    /// `ON (group)`, parenthesized when the group has more than one term.
    pub fn on_group(self, group: Conditions) -> Self {
        self.push_on(Conditions::new().push(Connective::And, group))
    }

    /// `ON conditions` without parentheses.
    pub fn on_conditions(mut self, conditions: Conditions) -> Self {
        if let Some(join) = self.joins.last_mut() {
            join.on = if join.on.is_empty() {
                conditions
            } else {
                std::mem::take(&mut join.on).push(Connective::And, conditions)
            };
            self.target = Target::Join;
        }
        self
    }

    /// `ON EXISTS (statement)`
    pub fn on_exists(self, stmt: &impl Statement) -> Self {
        self.push_on(exists(stmt))
    }

    /// `USING (cols)` for the last join.
    pub fn using<T: Into<Token>>(mut self, cols: impl IntoIterator<Item = T>) -> Self {
        if let Some(join) = self.joins.last_mut() {
            join.using.extend(collect_tokens(cols));
        }
        self
    }

    // ==================== GROUP BY / HAVING ====================

    /// Append GROUP BY elements; see [`rollup`](crate::rollup) and [`cube`](crate::cube).
    pub fn group_by<T: Into<Token>>(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.group_by.extend(collect_tokens(items));
        self
    }

    fn push_having(mut self, connective: Connective, other: Conditions) -> Self {
        self.having = std::mem::take(&mut self.having).push(connective, other);
        self.target = Target::Having;
        self
    }

    /// `HAVING left op right`; later `and*` / `or*` calls extend HAVING.
    pub fn having(self, left: impl Into<Token>, op: impl Into<Token>, right: impl Into<Token>) -> Self {
        self.push_having(Connective::And, condition(left, op, right))
    }

    /// `HAVING (group)`
    pub fn having_group(self, group: Conditions) -> Self {
        self.push_having(Connective::And, group)
    }

    /// Use `conditions` as the top-level HAVING sequence.
    pub fn having_conditions(mut self, conditions: Conditions) -> Self {
        if self.having.is_empty() {
            self.having = conditions;
            self.target = Target::Having;
            self
        } else {
            self.push_having(Connective::And, conditions)
        }
    }

    /// `HAVING EXISTS (statement)`
    pub fn having_exists(self, stmt: &impl Statement) -> Self {
        self.push_having(Connective::And, exists(stmt))
    }

    // ==================== Set operations ====================

    /// Combine with another query. The other query is snapshotted now.
    pub fn set_operation(mut self, op: SetOperator, other: impl Statement) -> Self {
        self.set_ops.push((op, other.tree()));
        self
    }

    pub fn union(self, other: impl Statement) -> Self {
        self.set_operation(SetOperator::Union, other)
    }

    pub fn union_all(self, other: impl Statement) -> Self {
        self.set_operation(SetOperator::UnionAll, other)
    }

    pub fn union_distinct(self, other: impl Statement) -> Self {
        self.set_operation(SetOperator::UnionDistinct, other)
    }

    pub fn intersect(self, other: impl Statement) -> Self {
        self.set_operation(SetOperator::Intersect, other)
    }

    pub fn intersect_all(self, other: impl Statement) -> Self {
        self.set_operation(SetOperator::IntersectAll, other)
    }

    pub fn intersect_distinct(self, other: impl Statement) -> Self {
        self.set_operation(SetOperator::IntersectDistinct, other)
    }

    pub fn except(self, other: impl Statement) -> Self {
        self.set_operation(SetOperator::Except, other)
    }

    pub fn except_all(self, other: impl Statement) -> Self {
        self.set_operation(SetOperator::ExceptAll, other)
    }

    pub fn except_distinct(self, other: impl Statement) -> Self {
        self.set_operation(SetOperator::ExceptDistinct, other)
    }

    // ==================== ORDER BY / LIMIT / OFFSET ====================

    /// Append an ORDER BY term: a name, `(expr, direction)`,
    /// `(expr, direction, nulls)` or an [`OrderBy`].
    pub fn order_by(mut self, term: impl Into<OrderBy>) -> Self {
        self.order_by.push(term.into());
        self
    }

    /// `LIMIT n`, bound as a parameter in prepared output.
    pub fn limit(mut self, n: i64) -> Self {
        self.limit = Some(as_constant(n));
        self
    }

    /// `LIMIT ALL`
    pub fn limit_all(mut self) -> Self {
        self.limit = Some(as_name("ALL"));
        self
    }

    /// `OFFSET n`, bound as a parameter in prepared output.
    pub fn offset(mut self, n: i64) -> Self {
        self.offset = Some(as_constant(n));
        self
    }

    // ==================== Locking ====================

    pub fn lock(mut self, strength: Lock) -> Self {
        self.locking = Some(Locking {
            strength,
            of: Vec::new(),
            wait: None,
        });
        self
    }

    /// `FOR UPDATE`
    pub fn for_update(self) -> Self {
        self.lock(Lock::Update)
    }

    /// `FOR SHARE`
    pub fn for_share(self) -> Self {
        self.lock(Lock::Share)
    }

    /// `OF tables` for the locking clause. Ignored without one.
    pub fn lock_of<T: Into<Token>>(mut self, tables: impl IntoIterator<Item = T>) -> Self {
        if let Some(locking) = &mut self.locking {
            locking.of.extend(collect_tokens(tables));
        }
        self
    }

    /// `NOWAIT` for the locking clause.
    pub fn nowait(mut self) -> Self {
        if let Some(locking) = &mut self.locking {
            locking.wait = Some("NOWAIT");
        }
        self
    }

    /// `SKIP LOCKED` for the locking clause.
    pub fn skip_locked(mut self) -> Self {
        if let Some(locking) = &mut self.locking {
            locking.wait = Some("SKIP LOCKED");
        }
        self
    }

    // ==================== Assembly ====================

    fn write_select_list(&self, tree: &mut Tree) {
        match &self.quantifier {
            Quantifier::Plain => {
                tree.start_node(NodeKind::Select);
            }
            Quantifier::All => {
                tree.start_node(NodeKind::SelectAll);
            }
            Quantifier::Distinct => {
                tree.start_node(NodeKind::SelectDistinct);
            }
            Quantifier::DistinctOn(on) => {
                tree.start_node(NodeKind::SelectDistinctOn);
                write_list(tree, NodeKind::DistinctOn, on);
                tree.start_node(NodeKind::Items)
                    .add_leaves(self.columns.iter().cloned())
                    .end_node()
                    .end_node();
                return;
            }
        }
        tree.add_leaves(self.columns.iter().cloned()).end_node();
    }

    fn write_locking(&self, tree: &mut Tree) {
        let Some(locking) = &self.locking else {
            return;
        };
        tree.start_node(locking.strength.node_kind());
        if !locking.of.is_empty() {
            tree.add_leaf(as_name("OF"));
            write_list(tree, NodeKind::Items, &locking.of);
        }
        if let Some(wait) = locking.wait {
            tree.add_leaf(as_name(wait));
        }
        tree.end_node();
    }
}

impl Default for Select {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for Select {
    fn where_mut(&mut self) -> &mut Conditions {
        self.target = Target::Where;
        &mut self.where_
    }

    fn active_mut(&mut self) -> &mut Conditions {
        match self.target {
            Target::Where => &mut self.where_,
            Target::Having => &mut self.having,
            Target::Join => match self.joins.last_mut() {
                Some(join) => &mut join.on,
                None => &mut self.where_,
            },
        }
    }
}

impl Statement for Select {
    fn assemble(&self, tree: &mut Tree) {
        if let Some(with) = &self.with {
            with.write_to(tree);
        }
        self.write_select_list(tree);
        write_from(tree, NodeKind::From, &self.from);
        for join in &self.joins {
            join.write_to(tree);
        }
        self.where_.write_clause(tree, NodeKind::Where);
        write_list(tree, NodeKind::GroupBy, &self.group_by);
        self.having.write_clause(tree, NodeKind::Having);
        for (op, other) in &self.set_ops {
            tree.start_node(op.node_kind())
                .add_leaf(Token::statement(other.clone()))
                .end_node();
        }
        write_order_by(tree, &self.order_by);
        if let Some(limit) = &self.limit {
            tree.start_node(NodeKind::Limit)
                .add_leaf(limit.clone())
                .end_node();
        }
        if let Some(offset) = &self.offset {
            tree.start_node(NodeKind::Offset)
                .add_leaf(offset.clone())
                .end_node();
        }
        self.write_locking(tree);
    }
}

impl_display!(Select);
