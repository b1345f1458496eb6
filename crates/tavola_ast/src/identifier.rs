//! Identifiers, used both as keys and as constant names

use std::fmt::{Display, Formatter};
use tavola_tokens::spanned::{Span, Spanned};

/// An identifier with the span it was lexed from
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    name: String,
    span: Span,
}

impl Identifier {
    /// Creates a new identifier
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Gets the name of this identifier
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Unwraps this identifier into its name
    pub fn into_string(self) -> String {
        self.name
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Spanned for Identifier {
    fn span(&self) -> Span {
        self.span
    }
}
