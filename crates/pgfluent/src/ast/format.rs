//! Tree rendering in literal and prepared modes.
//!
//! Both modes share one walk. For each node the keyword is emitted, the
//! non-empty children are joined with the node separator (or a single space
//! for children that glue with a space), and the result is wrapped in
//! parentheses as the node's [`Parens`] rule says. Only leaf rendering differs:
//! in prepared mode every prepared constant binds itself into the
//! [`ParameterMap`] and renders a placeholder.

use super::node::{Glue, Parens};
use super::tree::{Child, NodeId, Tree};
use crate::config::RenderOptions;
use crate::token::ident::{write_dollar_quoted, write_quoted_ident};
use crate::token::{Token, TokenKind, Value};

/// Ordered bindings of a prepared render, keyed by 1-based position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterMap {
    tokens: Vec<Token>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token at position `len() + 1` and return that position.
    pub fn push(&mut self, token: Token) -> usize {
        self.tokens.push(token);
        self.tokens.len()
    }

    /// The token bound at a 1-based position.
    pub fn get(&self, position: usize) -> Option<&Token> {
        position
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
    }

    /// The value bound at a 1-based position.
    pub fn value(&self, position: usize) -> Option<&Value> {
        self.get(position).and_then(Token::value)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// `(position, token)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Token)> {
        self.tokens.iter().enumerate().map(|(i, t)| (i + 1, t))
    }

    /// Bound values in binding order. Tokens without a value yield `NULL`.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.tokens.iter().map(|t| t.value().unwrap_or(&NULL))
    }

    /// Get all values as references for tokio-postgres.
    #[cfg(feature = "postgres")]
    pub fn as_refs(&self) -> Vec<&(dyn tokio_postgres::types::ToSql + Sync)> {
        self.values()
            .map(|v| v as &(dyn tokio_postgres::types::ToSql + Sync))
            .collect()
    }
}

static NULL: Value = Value::Null;

/// Output of a prepared render.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSql {
    pub sql: String,
    pub params: ParameterMap,
}

impl PreparedSql {
    /// Parameters ready for `client.query(&prepared.sql, &prepared.params_ref())`.
    ///
    /// Render with [`RenderOptions::numbered`] so placeholders are `$n`.
    #[cfg(feature = "postgres")]
    pub fn params_ref(&self) -> Vec<&(dyn tokio_postgres::types::ToSql + Sync)> {
        self.params.as_refs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Literal,
    Prepared,
}

/// Renders finished trees.
#[derive(Debug, Clone, Default)]
pub struct TreeFormatter {
    options: RenderOptions,
}

impl TreeFormatter {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Literal SQL with every value inlined.
    pub fn literal(&self, tree: &Tree) -> String {
        let mut cx = RenderContext::new(RenderMode::Literal, &self.options);
        let sql = cx.tree(tree);
        log_render(RenderMode::Literal, &sql, 0);
        sql
    }

    /// SQL with placeholders, plus the bindings in placeholder order.
    pub fn prepared(&self, tree: &Tree) -> PreparedSql {
        let mut cx = RenderContext::new(RenderMode::Prepared, &self.options);
        let sql = cx.tree(tree);
        let params = cx.into_params();
        log_render(RenderMode::Prepared, &sql, params.len());
        PreparedSql { sql, params }
    }
}

#[cfg(feature = "tracing")]
fn log_render(mode: RenderMode, sql: &str, param_count: usize) {
    tracing::debug!(
        target: "pgfluent.sql",
        mode = ?mode,
        param_count,
        sql = %sql,
        "rendered statement"
    );
}

#[cfg(not(feature = "tracing"))]
fn log_render(_mode: RenderMode, _sql: &str, _param_count: usize) {}

/// State of one render pass: the mode and the bindings collected so far.
pub(crate) struct RenderContext<'a> {
    mode: RenderMode,
    options: &'a RenderOptions,
    params: ParameterMap,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(mode: RenderMode, options: &'a RenderOptions) -> Self {
        Self {
            mode,
            options,
            params: ParameterMap::new(),
        }
    }

    pub(crate) fn into_params(self) -> ParameterMap {
        self.params
    }

    /// Render a whole tree, trimmed.
    pub(crate) fn tree(&mut self, tree: &Tree) -> String {
        self.node(tree, NodeId::ROOT).trim().to_string()
    }

    fn node(&mut self, tree: &Tree, id: NodeId) -> String {
        let node = tree.node(id);
        let meta = node.kind.meta();

        let mut body = String::new();
        let mut rendered = 0;
        for child in &node.children {
            let (fragment, glue) = match child {
                Child::Leaf(token) => (self.token(token), Glue::Separator),
                Child::Node(child_id) => (
                    self.node(tree, *child_id),
                    tree.node(*child_id).kind.meta().glue,
                ),
            };
            if fragment.is_empty() {
                continue;
            }
            if rendered > 0 {
                match glue {
                    Glue::Separator => body.push_str(meta.separator),
                    Glue::Space => body.push(' '),
                }
            }
            body.push_str(&fragment);
            rendered += 1;
        }

        let wrap = match meta.parens {
            Parens::Never => false,
            Parens::Always => true,
            Parens::WhenMany => rendered > 1,
        };
        if wrap {
            body = format!("({body})");
        }

        match (meta.keyword.is_empty(), body.is_empty()) {
            (true, _) => body,
            (false, true) => meta.keyword.to_string(),
            (false, false) => format!("{} {}", meta.keyword, body),
        }
    }

    fn join(&mut self, tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(|t| self.token(t))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render one leaf, binding prepared constants in prepared mode.
    pub(crate) fn token(&mut self, token: &Token) -> String {
        let mut out = String::new();
        match token.kind() {
            TokenKind::Name(name) => out.push_str(name),
            TokenKind::QuotedName(name) => write_quoted_ident(name, &mut out),
            TokenKind::Constant { value, prepared } => {
                if *prepared && self.mode == RenderMode::Prepared {
                    let position = token.bind(&mut self.params);
                    out.push_str(&self.options.placeholder.render(position));
                } else {
                    value.write_sql(&mut out);
                }
            }
            TokenKind::DollarString { body, tag } => {
                write_dollar_quoted(body, tag.as_deref(), &mut out)
            }
            TokenKind::Array(items) => {
                out.push_str("ARRAY[");
                out.push_str(&self.join(items));
                out.push(']');
            }
            TokenKind::List(items) => {
                out.push('(');
                out.push_str(&self.join(items));
                out.push(')');
            }
            TokenKind::Func { name, arg } => {
                out.push_str(name);
                match arg {
                    Some(arg) if matches!(arg.kind(), TokenKind::List(_)) => {
                        out.push_str(&self.token(arg))
                    }
                    Some(arg) => {
                        out.push('(');
                        out.push_str(&self.token(arg));
                        out.push(')');
                    }
                    None => out.push_str("()"),
                }
            }
            TokenKind::Operator { symbol, operand } => {
                out.push_str(symbol);
                if let Some(operand) = operand {
                    out.push_str(&self.token(operand));
                }
            }
            TokenKind::SubQuery(tree) => {
                out.push('(');
                out.push_str(&self.tree(tree));
                out.push(')');
            }
            TokenKind::Statement(tree) => out.push_str(&self.tree(tree)),
            TokenKind::Values(rows) => {
                out.push_str("(VALUES");
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push('(');
                    out.push_str(&self.join(row));
                    out.push(')');
                }
                out.push(')');
            }
        }

        if let Some(cast) = token.cast_type() {
            out.push_str("::");
            out.push_str(cast);
        }
        if let Some(alias) = token.alias_name() {
            out.push_str(" AS ");
            out.push_str(&alias.name);
            if !alias.columns.is_empty() {
                out.push('(');
                out.push_str(&alias.columns.join(", "));
                out.push(')');
            }
        }
        out
    }
}
