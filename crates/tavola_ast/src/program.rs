//! The root of a parsed source file

use crate::statement::Statement;

/// An entire parsed source file
///
/// Statements are kept in source order; the resolver depends on that order
/// for forward-only constant visibility.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    statements: Vec<Statement>,
}

impl Program {
    /// Creates a new program from its statements
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    /// Gets the statements of this program, in source order
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

impl IntoIterator for Program {
    type Item = Statement;
    type IntoIter = std::vec::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}
