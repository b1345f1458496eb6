//! Value expressions

use crate::identifier::Identifier;
use crate::statement::DictEntry;
use tavola_tokens::spanned::{Span, Spanned};

/// A value expression
///
/// The only value forms in the language: a binary integer literal, a
/// `table([...])` expression, or a `.(name).` constant reference.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueExpr {
    Number(NumberLit),
    Table(TableExpr),
    ConstRef(Identifier),
}

impl Spanned for ValueExpr {
    fn span(&self) -> Span {
        match self {
            ValueExpr::Number(n) => n.span(),
            ValueExpr::Table(t) => t.span(),
            ValueExpr::ConstRef(id) => id.span(),
        }
    }
}

/// A binary integer literal, kept as its raw digits
///
/// The literal is not evaluated here; the resolver performs the base-2
/// conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLit {
    digits: String,
    span: Span,
}

impl NumberLit {
    /// Creates a new number literal from the digits after the `0b` prefix
    pub fn new(digits: impl Into<String>, span: Span) -> Self {
        Self {
            digits: digits.into(),
            span,
        }
    }

    /// Gets the raw binary digits of this literal
    pub fn digits(&self) -> &str {
        &self.digits
    }
}

impl Spanned for NumberLit {
    fn span(&self) -> Span {
        self.span
    }
}

/// A `table '(' '[' DictEntry* ']' ')'` expression
#[derive(Debug, Clone, PartialEq)]
pub struct TableExpr {
    entries: Vec<DictEntry>,
    span: Span,
}

impl TableExpr {
    /// Creates a new table expression
    pub fn new(entries: Vec<DictEntry>, span: Span) -> Self {
        Self { entries, span }
    }

    /// Gets the entries of this table, in source order
    pub fn entries(&self) -> &[DictEntry] {
        &self.entries
    }
}

impl Spanned for TableExpr {
    fn span(&self) -> Span {
        self.span
    }
}
