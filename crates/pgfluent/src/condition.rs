//! Predicate groups for WHERE, HAVING, JOIN ... ON and ON CONFLICT.
//!
//! [`Conditions`] is a plain value: build it with [`condition`], [`between`],
//! [`exists`] and combine with `and` / `or` / `and_not` / `or_not`. A nested
//! group is parenthesized only when it holds more than one term, and the
//! top-level sequence under a clause keyword never is.
//!
//! ```ignore
//! use pgfluent::condition;
//!
//! let c = condition("id", "=", 1)
//!     .and_group(condition("name", "=", "timur").and("phone", "is", "null"));
//! assert_eq!(c.to_string(), "id = 1 AND (name = timur AND phone is null)");
//! ```

use std::fmt;
use std::mem;

use crate::ast::{NodeKind, Tree};
use crate::stmt::Statement;
use crate::token::{Token, as_name, as_sub_query};

/// How a term attaches to the terms before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    And,
    Or,
    AndNot,
    OrNot,
}

impl Connective {
    fn node_kind(self) -> NodeKind {
        match self {
            Connective::And => NodeKind::And,
            Connective::Or => NodeKind::Or,
            Connective::AndNot => NodeKind::AndNot,
            Connective::OrNot => NodeKind::OrNot,
        }
    }

    fn is_negated(self) -> bool {
        matches!(self, Connective::AndNot | Connective::OrNot)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Term {
    /// Tokens joined by spaces: `id = 1`, `id BETWEEN 1 AND 2`.
    Predicate(Vec<Token>),
    Group(Conditions),
}

impl Term {
    fn write_to(&self, tree: &mut Tree) {
        match self {
            Term::Predicate(tokens) => {
                tree.start_node(NodeKind::Empty)
                    .add_leaves(tokens.iter().cloned())
                    .end_node();
            }
            Term::Group(group) => {
                tree.start_node(NodeKind::Group);
                group.write_to(tree);
                tree.end_node();
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Item {
    /// `None` for a plain leading term, `Not` for a negated one.
    link: Option<NodeKind>,
    term: Term,
}

/// An ordered sequence of predicates and nested groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conditions {
    items: Vec<Item>,
}

impl Conditions {
    /// An empty set; the first pushed term becomes the leading term.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single predicate made of the given tokens joined by spaces.
    pub fn predicate<T: Into<Token>>(tokens: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: vec![Item {
                link: None,
                term: Term::Predicate(tokens.into_iter().map(Into::into).collect()),
            }],
        }
    }

    /// Number of top-level terms.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn into_term(mut self) -> Term {
        if self.items.len() == 1 && self.items[0].link.is_none() {
            if let Some(item) = self.items.pop() {
                return item.term;
            }
        }
        Term::Group(self)
    }

    /// Append `other` with the given connective.
    ///
    /// A single plain predicate is appended as is; anything larger becomes a
    /// nested group. On an empty set the connective is dropped, except that a
    /// negated one leads with `NOT`.
    pub fn push(mut self, connective: Connective, other: Conditions) -> Self {
        if other.is_empty() {
            return self;
        }
        let link = if self.items.is_empty() {
            connective.is_negated().then_some(NodeKind::Not)
        } else {
            Some(connective.node_kind())
        };
        self.items.push(Item {
            link,
            term: other.into_term(),
        });
        self
    }

    // ==================== Predicates ====================

    /// `AND left op right`
    pub fn and(self, left: impl Into<Token>, op: impl Into<Token>, right: impl Into<Token>) -> Self {
        self.push(Connective::And, condition(left, op, right))
    }

    /// `AND NOT left op right`
    pub fn and_not(self, left: impl Into<Token>, op: impl Into<Token>, right: impl Into<Token>) -> Self {
        self.push(Connective::AndNot, condition(left, op, right))
    }

    /// `OR left op right`
    pub fn or(self, left: impl Into<Token>, op: impl Into<Token>, right: impl Into<Token>) -> Self {
        self.push(Connective::Or, condition(left, op, right))
    }

    /// `OR NOT left op right`
    pub fn or_not(self, left: impl Into<Token>, op: impl Into<Token>, right: impl Into<Token>) -> Self {
        self.push(Connective::OrNot, condition(left, op, right))
    }

    // ==================== Groups ====================

    pub fn and_group(self, group: Conditions) -> Self {
        self.push(Connective::And, group)
    }

    pub fn and_not_group(self, group: Conditions) -> Self {
        self.push(Connective::AndNot, group)
    }

    pub fn or_group(self, group: Conditions) -> Self {
        self.push(Connective::Or, group)
    }

    pub fn or_not_group(self, group: Conditions) -> Self {
        self.push(Connective::OrNot, group)
    }

    // ==================== EXISTS ====================

    pub fn and_exists(self, stmt: &impl Statement) -> Self {
        self.push(Connective::And, exists(stmt))
    }

    pub fn and_not_exists(self, stmt: &impl Statement) -> Self {
        self.push(Connective::AndNot, exists(stmt))
    }

    pub fn or_exists(self, stmt: &impl Statement) -> Self {
        self.push(Connective::Or, exists(stmt))
    }

    pub fn or_not_exists(self, stmt: &impl Statement) -> Self {
        self.push(Connective::OrNot, exists(stmt))
    }

    /// Write every term into the currently open node of `tree`.
    pub fn write_to(&self, tree: &mut Tree) {
        for item in &self.items {
            if let Some(kind) = item.link {
                tree.start_node(kind);
            }
            item.term.write_to(tree);
            if item.link.is_some() {
                tree.end_node();
            }
        }
    }

    /// Write `keyword` followed by the terms, or nothing when empty.
    pub(crate) fn write_clause(&self, tree: &mut Tree, keyword: NodeKind) {
        if self.is_empty() {
            return;
        }
        tree.start_node(keyword);
        self.write_to(tree);
        tree.end_node();
    }
}

impl fmt::Display for Conditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tree = Tree::new();
        self.write_to(&mut tree);
        fmt::Display::fmt(&tree, f)
    }
}

/// `left op right`
pub fn condition(left: impl Into<Token>, op: impl Into<Token>, right: impl Into<Token>) -> Conditions {
    Conditions::predicate([left.into(), op.into(), right.into()])
}

/// `field BETWEEN from AND to`
pub fn between(field: impl Into<Token>, from: impl Into<Token>, to: impl Into<Token>) -> Conditions {
    Conditions::predicate([
        field.into(),
        as_name("BETWEEN"),
        from.into(),
        as_name("AND"),
        to.into(),
    ])
}

/// `field NOT BETWEEN from AND to`
pub fn not_between(field: impl Into<Token>, from: impl Into<Token>, to: impl Into<Token>) -> Conditions {
    Conditions::predicate([
        field.into(),
        as_name("NOT BETWEEN"),
        from.into(),
        as_name("AND"),
        to.into(),
    ])
}

/// `EXISTS (statement)`
pub fn exists(stmt: &impl Statement) -> Conditions {
    Conditions::predicate([as_name("EXISTS"), as_sub_query(stmt)])
}

/// `NOT EXISTS (statement)`
pub fn not_exists(stmt: &impl Statement) -> Conditions {
    Conditions::predicate([as_name("NOT EXISTS"), as_sub_query(stmt)])
}

/// `NOT group`, parenthesized when the group has more than one term.
pub fn not(group: Conditions) -> Conditions {
    Conditions::new().push(Connective::AndNot, group)
}

/// Conditions shared by statements that have a WHERE clause.
///
/// `where_*` methods extend the WHERE clause and make it the target of
/// subsequent `and*` / `or*` calls. Statements with other condition clauses
/// (HAVING, JOIN ... ON) redirect the target when those clauses are started.
pub trait Filter: Sized {
    /// The WHERE conditions. Implementations make WHERE the active target.
    fn where_mut(&mut self) -> &mut Conditions;

    /// The conditions `and*` / `or*` currently extend.
    fn active_mut(&mut self) -> &mut Conditions;

    #[doc(hidden)]
    fn push_where(mut self, connective: Connective, other: Conditions) -> Self {
        let slot = self.where_mut();
        *slot = mem::take(slot).push(connective, other);
        self
    }

    #[doc(hidden)]
    fn push_active(mut self, connective: Connective, other: Conditions) -> Self {
        let slot = self.active_mut();
        *slot = mem::take(slot).push(connective, other);
        self
    }

    // ==================== WHERE ====================

    /// `WHERE left op right` (joined with `AND` if WHERE already has terms).
    fn where_(self, left: impl Into<Token>, op: impl Into<Token>, right: impl Into<Token>) -> Self {
        self.push_where(Connective::And, condition(left, op, right))
    }

    /// `WHERE (group)`, parenthesized when the group has more than one term.
    fn where_group(self, group: Conditions) -> Self {
        self.push_where(Connective::And, group)
    }

    /// Use `conditions` as the top-level WHERE sequence, without parentheses.
    fn where_conditions(mut self, conditions: Conditions) -> Self {
        let slot = self.where_mut();
        *slot = if slot.is_empty() {
            conditions
        } else {
            mem::take(slot).push(Connective::And, conditions)
        };
        self
    }

    /// `WHERE EXISTS (statement)`
    fn where_exists(self, stmt: &impl Statement) -> Self {
        self.push_where(Connective::And, exists(stmt))
    }

    /// `WHERE NOT EXISTS (statement)`
    fn where_not_exists(self, stmt: &impl Statement) -> Self {
        self.push_where(Connective::And, not_exists(stmt))
    }

    // ==================== Continuation ====================

    fn and(self, left: impl Into<Token>, op: impl Into<Token>, right: impl Into<Token>) -> Self {
        self.push_active(Connective::And, condition(left, op, right))
    }

    fn and_not(self, left: impl Into<Token>, op: impl Into<Token>, right: impl Into<Token>) -> Self {
        self.push_active(Connective::AndNot, condition(left, op, right))
    }

    fn or(self, left: impl Into<Token>, op: impl Into<Token>, right: impl Into<Token>) -> Self {
        self.push_active(Connective::Or, condition(left, op, right))
    }

    fn or_not(self, left: impl Into<Token>, op: impl Into<Token>, right: impl Into<Token>) -> Self {
        self.push_active(Connective::OrNot, condition(left, op, right))
    }

    fn and_group(self, group: Conditions) -> Self {
        self.push_active(Connective::And, group)
    }

    fn and_not_group(self, group: Conditions) -> Self {
        self.push_active(Connective::AndNot, group)
    }

    fn or_group(self, group: Conditions) -> Self {
        self.push_active(Connective::Or, group)
    }

    fn or_not_group(self, group: Conditions) -> Self {
        self.push_active(Connective::OrNot, group)
    }

    fn and_exists(self, stmt: &impl Statement) -> Self {
        self.push_active(Connective::And, exists(stmt))
    }

    fn and_not_exists(self, stmt: &impl Statement) -> Self {
        self.push_active(Connective::AndNot, exists(stmt))
    }

    fn or_exists(self, stmt: &impl Statement) -> Self {
        self.push_active(Connective::Or, exists(stmt))
    }

    fn or_not_exists(self, stmt: &impl Statement) -> Self {
        self.push_active(Connective::OrNot, exists(stmt))
    }
}
