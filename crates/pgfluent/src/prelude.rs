//! Convenient imports for typical `pgfluent` usage.
//!
//! ```ignore
//! use pgfluent::prelude::*;
//! ```

pub use crate::{
    Conditions, Filter, FromItem, Nulls, OrderBy, PreparedSql, RenderOptions, Statement, Token,
    Value,
};
pub use crate::{
    as_array, as_constant, as_func, as_func_args, as_list, as_name, as_number, as_quoted_name,
    as_string, as_sub_query, between, condition, exists, not_exists, null,
};
pub use crate::{delete_from, insert_into, select, update, update_only, with, with_recursive};
