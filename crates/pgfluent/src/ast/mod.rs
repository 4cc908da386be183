//! The statement tree and its renderer.
//!
//! Statement builders drive a [`Tree`] through `start_node` / `add_leaf` /
//! `end_node` in clause order; [`TreeFormatter`] walks the finished tree once
//! and produces either literal SQL or [`PreparedSql`].

mod format;
mod node;
mod tree;

pub use format::{ParameterMap, PreparedSql, RenderMode, TreeFormatter};
pub use node::{Glue, NodeKind, NodeMeta, Parens};
pub use tree::{Child, Node, NodeId, Tree};

pub(crate) use format::RenderContext;
