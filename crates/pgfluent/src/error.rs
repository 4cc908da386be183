//! Error types for pgfluent

use thiserror::Error;

/// Result type alias for tree building and strict rendering.
pub type BuildResult<T> = Result<T, BuildError>;

/// Structural misuse of a [`Tree`](crate::ast::Tree).
///
/// These are programmer errors: a statement assembler opened and closed nodes
/// in the wrong order, or asked for output before assembling anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// `end_node` was called while only the root node was open.
    #[error("end_node called with only the root node open")]
    UnbalancedEnd,

    /// A strict render was requested while nodes were still open.
    #[error("cannot render: {open} node(s) still open")]
    UnclosedNodes { open: usize },

    /// A strict render was requested before any clause was assembled.
    #[error("cannot render: the tree has no clauses")]
    EmptyTree,
}

impl BuildError {
    /// Create an unclosed-nodes error.
    pub fn unclosed(open: usize) -> Self {
        Self::UnclosedNodes { open }
    }

    /// Whether this error was caused by unbalanced `start_node`/`end_node` calls.
    pub fn is_unbalanced(&self) -> bool {
        matches!(self, Self::UnbalancedEnd | Self::UnclosedNodes { .. })
    }
}
