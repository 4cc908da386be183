//! CREATE SEQUENCE builder.
//!
//! Numbers are emitted as literals in both output modes: utility statements
//! such as CREATE SEQUENCE cannot take bind parameters in PostgreSQL.

use crate::ast::{NodeKind, Tree};
use crate::stmt::{Statement, impl_display};
use crate::token::{Token, as_name, as_number};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Limit {
    Value(i64),
    None,
}

/// CREATE SEQUENCE statement builder.
///
/// Options render in the order AS, INCREMENT, MINVALUE, MAXVALUE, START,
/// CACHE, CYCLE, OWNED BY.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSequence {
    temp: bool,
    if_not_exists: bool,
    name: Token,
    data_type: Option<Token>,
    increment: Option<(NodeKind, i64)>,
    min_value: Option<Limit>,
    max_value: Option<Limit>,
    start: Option<(NodeKind, i64)>,
    cache: Option<i64>,
    cycle: Option<bool>,
    owned_by: Option<Token>,
}

impl CreateSequence {
    pub fn new(name: impl Into<Token>) -> Self {
        Self {
            temp: false,
            if_not_exists: false,
            name: name.into(),
            data_type: None,
            increment: None,
            min_value: None,
            max_value: None,
            start: None,
            cache: None,
            cycle: None,
            owned_by: None,
        }
    }

    /// `CREATE TEMP SEQUENCE`
    pub fn temp(mut self) -> Self {
        self.temp = true;
        self
    }

    /// `IF NOT EXISTS`
    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    /// `AS data_type`
    pub fn as_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = Some(as_name(data_type.into()));
        self
    }

    /// `INCREMENT n`
    pub fn increment(mut self, n: i64) -> Self {
        self.increment = Some((NodeKind::Increment, n));
        self
    }

    /// `INCREMENT BY n`
    pub fn increment_by(mut self, n: i64) -> Self {
        self.increment = Some((NodeKind::IncrementBy, n));
        self
    }

    /// `MINVALUE n`
    pub fn min_value(mut self, n: i64) -> Self {
        self.min_value = Some(Limit::Value(n));
        self
    }

    /// `NO MINVALUE`
    pub fn no_min_value(mut self) -> Self {
        self.min_value = Some(Limit::None);
        self
    }

    /// `MAXVALUE n`
    pub fn max_value(mut self, n: i64) -> Self {
        self.max_value = Some(Limit::Value(n));
        self
    }

    /// `NO MAXVALUE`
    pub fn no_max_value(mut self) -> Self {
        self.max_value = Some(Limit::None);
        self
    }

    /// `START n`
    pub fn start(mut self, n: i64) -> Self {
        self.start = Some((NodeKind::Start, n));
        self
    }

    /// `START WITH n`
    pub fn start_with(mut self, n: i64) -> Self {
        self.start = Some((NodeKind::StartWith, n));
        self
    }

    /// `CACHE n`
    pub fn cache(mut self, n: i64) -> Self {
        self.cache = Some(n);
        self
    }

    /// `CYCLE`
    pub fn cycle(mut self) -> Self {
        self.cycle = Some(true);
        self
    }

    /// `NO CYCLE`
    pub fn no_cycle(mut self) -> Self {
        self.cycle = Some(false);
        self
    }

    /// `OWNED BY table.column`
    pub fn owned_by(mut self, column: impl Into<Token>) -> Self {
        self.owned_by = Some(column.into());
        self
    }

    /// `OWNED BY NONE`
    pub fn owned_by_none(mut self) -> Self {
        self.owned_by = Some(as_name("NONE"));
        self
    }
}

fn option(tree: &mut Tree, kind: NodeKind, value: Option<Token>) {
    tree.start_node(kind).add_leaves(value).end_node();
}

fn limit(tree: &mut Tree, limit: Option<Limit>, set: NodeKind, unset: NodeKind) {
    match limit {
        Some(Limit::Value(n)) => option(tree, set, Some(as_number(n))),
        Some(Limit::None) => option(tree, unset, None),
        None => {}
    }
}

impl Statement for CreateSequence {
    fn assemble(&self, tree: &mut Tree) {
        tree.start_node(if self.temp {
            NodeKind::CreateTempSequence
        } else {
            NodeKind::CreateSequence
        });
        if self.if_not_exists {
            tree.add_leaf(as_name("IF NOT EXISTS"));
        }
        tree.add_leaf(self.name.clone()).end_node();

        if let Some(data_type) = &self.data_type {
            option(tree, NodeKind::As, Some(data_type.clone()));
        }
        if let Some((kind, n)) = self.increment {
            option(tree, kind, Some(as_number(n)));
        }
        limit(tree, self.min_value, NodeKind::MinValue, NodeKind::NoMinValue);
        limit(tree, self.max_value, NodeKind::MaxValue, NodeKind::NoMaxValue);
        if let Some((kind, n)) = self.start {
            option(tree, kind, Some(as_number(n)));
        }
        if let Some(n) = self.cache {
            option(tree, NodeKind::Cache, Some(as_number(n)));
        }
        match self.cycle {
            Some(true) => option(tree, NodeKind::Cycle, None),
            Some(false) => option(tree, NodeKind::NoCycle, None),
            None => {}
        }
        if let Some(owner) = &self.owned_by {
            option(tree, NodeKind::OwnedBy, Some(owner.clone()));
        }
    }
}

impl_display!(CreateSequence);
