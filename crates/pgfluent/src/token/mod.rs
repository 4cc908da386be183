//! Leaf tokens of the statement tree.
//!
//! A [`Token`] is a closed set of leaf kinds ([`TokenKind`]) plus an optional
//! `::type` cast and an optional `AS alias`. Its literal text is a pure function
//! of those fields and never depends on where the token sits in a tree.
//!
//! Raw strings are trusted verbatim. The only escaping performed is identifier
//! quoting, single-quote doubling and dollar-quote tag placement.
//!
//! # Example
//!
//! ```ignore
//! use pgfluent::{as_func, as_list, as_name, as_sub_query, select};
//!
//! assert_eq!(as_func("concat", as_list(["a", "b"])).name(), "concat(a, b)");
//! assert_eq!(as_func("min", as_name("price")).alias("min").name(), "min(price) AS min");
//! assert_eq!(as_sub_query(&select(["max(sum)"])).alias("sum").name(), "(SELECT max(sum)) AS sum");
//! ```

pub(crate) mod ident;
mod operator;
mod value;

pub use operator::Operator;
pub use value::Value;

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use uuid::Uuid;

use crate::ast::{ParameterMap, RenderContext, RenderMode, Tree};
use crate::config::RenderOptions;
use crate::stmt::Statement;

/// The kind of a leaf token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Verbatim SQL text: identifiers, expressions, keywords, `*`.
    Name(String),
    /// Identifier whose dotted parts are each double-quoted.
    QuotedName(String),
    /// A typed value. Prepared constants become placeholders in prepared output.
    Constant { value: Value, prepared: bool },
    /// `$$body$$` or `$tag$body$tag$`.
    DollarString { body: String, tag: Option<String> },
    /// `ARRAY[a, b]`
    Array(Vec<Token>),
    /// `(a, b)`
    List(Vec<Token>),
    /// `name(arg)`. A list argument supplies its own parentheses.
    Func { name: String, arg: Option<Box<Token>> },
    /// An operator keyword, optionally followed directly by its operand.
    Operator {
        symbol: String,
        operand: Option<Box<Token>>,
    },
    /// `(statement)`
    SubQuery(Box<Tree>),
    /// A statement embedded without parentheses (set-operation operand).
    Statement(Box<Tree>),
    /// `(VALUES(1, 2), (3, 4))`
    Values(Vec<Vec<Token>>),
}

/// Output alias: ` AS name` or ` AS name(c1, c2)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub name: String,
    pub columns: Vec<String>,
}

/// A leaf of the statement tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    cast: Option<String>,
    alias: Option<Alias>,
}

impl Token {
    /// Create a token of the given kind with no cast or alias.
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            cast: None,
            alias: None,
        }
    }

    pub(crate) fn statement(tree: Tree) -> Self {
        Self::new(TokenKind::Statement(Box::new(tree)))
    }

    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// The `::type` suffix, if any.
    pub fn cast_type(&self) -> Option<&str> {
        self.cast.as_deref()
    }

    pub fn alias_name(&self) -> Option<&Alias> {
        self.alias.as_ref()
    }

    /// Append `::ty` to this token.
    pub fn cast(mut self, ty: impl Into<String>) -> Self {
        self.cast = Some(ty.into());
        self
    }

    /// Append ` AS name` to this token.
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.alias = Some(Alias {
            name: name.into(),
            columns: Vec::new(),
        });
        self
    }

    /// Append ` AS name(c1, c2, ...)` to this token.
    pub fn alias_with_columns<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
    ) -> Self {
        self.alias = Some(Alias {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Turn a constant into a prepared constant. Other kinds are unchanged.
    pub fn prepared(mut self) -> Self {
        if let TokenKind::Constant { prepared, .. } = &mut self.kind {
            *prepared = true;
        }
        self
    }

    /// Whether this token binds a value in prepared output.
    pub fn is_prepared(&self) -> bool {
        matches!(self.kind, TokenKind::Constant { prepared: true, .. })
    }

    /// The typed value of a constant token.
    pub fn value(&self) -> Option<&Value> {
        match &self.kind {
            TokenKind::Constant { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Insert this token into `params` at position `len() + 1` and return that position.
    pub fn bind(&self, params: &mut ParameterMap) -> usize {
        params.push(self.clone())
    }

    /// Literal SQL text of this token.
    pub fn name(&self) -> String {
        let options = RenderOptions::default();
        RenderContext::new(RenderMode::Literal, &options).token(self)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

// ==================== Conversions ====================

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        as_name(s)
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        as_name(s)
    }
}

impl From<&String> for Token {
    fn from(s: &String) -> Self {
        as_name(s.as_str())
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Self {
        as_name(op.as_str())
    }
}

impl From<Value> for Token {
    fn from(value: Value) -> Self {
        as_number(value)
    }
}

macro_rules! token_from_literal {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Token {
                fn from(v: $ty) -> Self {
                    as_number(v)
                }
            }
        )*
    };
}

token_from_literal!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64);

/// Conversion into a right-hand operand that binds as a parameter.
///
/// Plain Rust values become prepared constants, so `set("name", "test")`
/// renders `name = 'test'` literally and `name = ?` when prepared. Pass a
/// [`Token`] (e.g. [`as_name`]) to emit raw SQL instead.
pub trait IntoOperand {
    fn into_operand(self) -> Token;
}

impl IntoOperand for Token {
    fn into_operand(self) -> Token {
        self
    }
}

impl<T: IntoOperand> IntoOperand for Option<T> {
    fn into_operand(self) -> Token {
        match self {
            Some(v) => v.into_operand(),
            None => as_constant(Value::Null),
        }
    }
}

macro_rules! operand_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoOperand for $ty {
                fn into_operand(self) -> Token {
                    as_constant(self)
                }
            }
        )*
    };
}

operand_from_value!(
    Value,
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    &str,
    String,
    &String,
    Vec<u8>,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    DateTime<Utc>,
    Uuid,
    serde_json::Value,
);

#[cfg(feature = "rust_decimal")]
operand_from_value!(rust_decimal::Decimal);

// ==================== Factories ====================

/// Verbatim SQL text: `book.id`, `max(sum)`, `*`.
pub fn as_name(name: impl Into<String>) -> Token {
    Token::new(TokenKind::Name(name.into()))
}

/// Double-quoted identifier: `as_quoted_name("table.id")` renders `"table"."id"`.
pub fn as_quoted_name(name: impl Into<String>) -> Token {
    Token::new(TokenKind::QuotedName(name.into()))
}

/// Prepared text value: `'text'` literally, a placeholder when prepared.
pub fn as_string(s: impl Into<String>) -> Token {
    as_constant(Value::Text(s.into()))
}

/// Literal constant that is never replaced by a placeholder.
pub fn as_number(v: impl Into<Value>) -> Token {
    Token::new(TokenKind::Constant {
        value: v.into(),
        prepared: false,
    })
}

/// Prepared constant: literal text in literal output, a placeholder when prepared.
pub fn as_constant(v: impl Into<Value>) -> Token {
    Token::new(TokenKind::Constant {
        value: v.into(),
        prepared: true,
    })
}

/// Literal `NULL`.
pub fn null() -> Token {
    as_number(Value::Null)
}

pub fn as_date(date: NaiveDate) -> Token {
    as_constant(date)
}

pub fn as_time(time: NaiveTime) -> Token {
    as_constant(time)
}

pub fn as_timestamp(ts: NaiveDateTime) -> Token {
    as_constant(ts)
}

/// `$$body$$`
pub fn as_dollar_string(body: impl Into<String>) -> Token {
    Token::new(TokenKind::DollarString {
        body: body.into(),
        tag: None,
    })
}

/// `$tag$body$tag$`
pub fn as_dollar_string_tagged(body: impl Into<String>, tag: impl Into<String>) -> Token {
    Token::new(TokenKind::DollarString {
        body: body.into(),
        tag: Some(tag.into()),
    })
}

/// `ARRAY[a, b, ...]`
pub fn as_array<T: Into<Token>>(items: impl IntoIterator<Item = T>) -> Token {
    Token::new(TokenKind::Array(items.into_iter().map(Into::into).collect()))
}

/// `(a, b, ...)`
pub fn as_list<T: Into<Token>>(items: impl IntoIterator<Item = T>) -> Token {
    Token::new(TokenKind::List(items.into_iter().map(Into::into).collect()))
}

/// `('a', 'b', ...)` with each item a literal string.
pub fn as_string_list<S: AsRef<str>>(items: impl IntoIterator<Item = S>) -> Token {
    as_list(items.into_iter().map(|s| as_number(s.as_ref())))
}

/// `name(arg)`. A list argument keeps its own parentheses: `concat(a, b)`.
pub fn as_func(name: impl Into<String>, arg: impl Into<Token>) -> Token {
    Token::new(TokenKind::Func {
        name: name.into(),
        arg: Some(Box::new(arg.into())),
    })
}

/// `name(a, b, ...)`
pub fn as_func_args<T: Into<Token>>(name: impl Into<String>, args: impl IntoIterator<Item = T>) -> Token {
    as_func(name, as_list(args))
}

/// `name()`
pub fn as_func_empty(name: impl Into<String>) -> Token {
    Token::new(TokenKind::Func {
        name: name.into(),
        arg: None,
    })
}

/// Bare operator keyword such as `EXISTS` or `NOT`.
pub fn operator(symbol: impl Into<String>) -> Token {
    Token::new(TokenKind::Operator {
        symbol: symbol.into(),
        operand: None,
    })
}

/// Prefix operator glued to its operand: `EXISTS(SELECT * FROM book)`.
pub fn as_operator(symbol: impl Into<String>, operand: impl Into<Token>) -> Token {
    Token::new(TokenKind::Operator {
        symbol: symbol.into(),
        operand: Some(Box::new(operand.into())),
    })
}

/// `(statement)`, snapshotting the statement as it is now.
pub fn as_sub_query(stmt: &impl Statement) -> Token {
    Token::new(TokenKind::SubQuery(Box::new(stmt.tree())))
}

/// `(VALUES(1, 2), (3, 4))`
pub fn values<R, T>(rows: impl IntoIterator<Item = R>) -> Token
where
    R: IntoIterator<Item = T>,
    T: Into<Token>,
{
    Token::new(TokenKind::Values(
        rows.into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect(),
    ))
}

/// `ROLLUP(a, b)` for GROUP BY.
pub fn rollup<T: Into<Token>>(items: impl IntoIterator<Item = T>) -> Token {
    as_func_args("ROLLUP", items)
}

/// `CUBE(a, b)` for GROUP BY.
pub fn cube<T: Into<Token>>(items: impl IntoIterator<Item = T>) -> Token {
    as_func_args("CUBE", items)
}
