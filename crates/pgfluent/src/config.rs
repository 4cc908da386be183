//! Rendering configuration.

/// Placeholder style used for prepared values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placeholder {
    /// `?` for every bound value.
    #[default]
    Question,
    /// `$1`, `$2`, ... as expected by the PostgreSQL wire protocol.
    Dollar,
}

impl Placeholder {
    /// Render the placeholder for the given 1-based position.
    pub fn render(self, position: usize) -> String {
        match self {
            Placeholder::Question => "?".to_string(),
            Placeholder::Dollar => format!("${position}"),
        }
    }
}

/// Options for [`TreeFormatter`](crate::ast::TreeFormatter).
///
/// By default prepared values render as `?`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Placeholder style for prepared values.
    pub placeholder: Placeholder,
}

impl RenderOptions {
    /// Create options with defaults (`?` placeholders).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder style.
    pub fn with_placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Shortcut for `$n` placeholders, the form tokio-postgres accepts.
    pub fn numbered() -> Self {
        Self::new().with_placeholder(Placeholder::Dollar)
    }
}
