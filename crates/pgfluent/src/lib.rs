//! # pgfluent
//!
//! A fluent statement builder for PostgreSQL.
//!
//! ## Features
//!
//! - **Fluent builders**: SELECT, INSERT, UPDATE, DELETE, CREATE SEQUENCE and WITH
//! - **Two output modes**: literal SQL, or SQL with placeholders plus ordered bindings
//! - **Fixed clause order**: clauses render in grammatical order whatever the call order
//! - **First-class conditions**: predicate groups combine with and / or / and-not / or-not
//! - **PostgreSQL syntax**: quoted identifiers, `RETURNING`, `DISTINCT ON`,
//!   `TABLESAMPLE`, dollar-quoted strings, `ARRAY[...]`, `::type` casts
//!
//! Nothing here opens a connection. With the default `postgres` feature the
//! bound values implement `tokio_postgres::types::ToSql`, so prepared output
//! can be handed to a client directly.
//!
//! ```ignore
//! use pgfluent::prelude::*;
//!
//! let q = select(["id", "name"])
//!     .from("book")
//!     .where_("author_id", "=", as_constant(7))
//!     .and_group(condition("price", "<", 10).or("price", ">", 100))
//!     .order_by(("name", "desc", "nulls last"));
//!
//! assert_eq!(
//!     q.sql(),
//!     "SELECT id, name FROM book WHERE author_id = 7 AND (price < 10 OR price > 100) \
//!      ORDER BY name desc nulls last"
//! );
//!
//! let prepared = q.prepared_with(&RenderOptions::numbered());
//! let rows = client.query(&prepared.sql, &prepared.params_ref()).await?;
//! ```
//!
//! ## Building trees by hand
//!
//! The builders are thin layers over [`ast::Tree`]; anything they cannot
//! express can be assembled with `start_node` / `add_leaf` / `end_node` and
//! rendered with [`ast::Tree::render`].

pub mod ast;
pub mod condition;
pub mod config;
pub mod error;
pub mod prelude;
pub mod stmt;
pub mod token;

pub use ast::{ParameterMap, PreparedSql, Tree, TreeFormatter};
pub use condition::{
    Conditions, Connective, Filter, between, condition, exists, not, not_between, not_exists,
};
pub use config::{Placeholder, RenderOptions};
pub use error::{BuildError, BuildResult};
pub use stmt::{
    CreateSequence, Delete, FromItem, Insert, Lock, Nulls, OrderBy, Overriding, PendingCte,
    Select, SetOperator, Statement, Update, With, create_sequence, create_sequence_if_not_exists,
    create_temp_sequence, create_temp_sequence_if_not_exists, delete_from, delete_from_only,
    insert_into, select, select_all, select_distinct, select_distinct_on, update, update_only,
    with, with_recursive,
};
pub use token::{
    IntoOperand, Operator, Token, TokenKind, Value, as_array, as_constant, as_date,
    as_dollar_string, as_dollar_string_tagged, as_func, as_func_args, as_func_empty, as_list,
    as_name, as_number, as_operator, as_quoted_name, as_string, as_string_list, as_sub_query,
    as_time, as_timestamp, cube, null, operator, rollup, values,
};
