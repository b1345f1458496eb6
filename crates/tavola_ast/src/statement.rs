//! Top-level statements

use crate::expr::ValueExpr;
use crate::identifier::Identifier;
use tavola_tokens::spanned::{Span, Spanned};

/// A statement, either a constant declaration or a dictionary entry
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Const(ConstDecl),
    Entry(DictEntry),
}

impl Spanned for Statement {
    fn span(&self) -> Span {
        match self {
            Statement::Const(decl) => decl.span(),
            Statement::Entry(entry) => entry.span(),
        }
    }
}

/// A constant declaration: `name ':' value ';'`
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    name: Identifier,
    value: ValueExpr,
}

impl ConstDecl {
    /// Creates a new constant declaration
    pub fn new(name: Identifier, value: ValueExpr) -> Self {
        Self { name, value }
    }

    /// Gets the declared name
    pub fn name(&self) -> &Identifier {
        &self.name
    }

    /// Gets the declared value expression
    pub fn value(&self) -> &ValueExpr {
        &self.value
    }
}

impl Spanned for ConstDecl {
    fn span(&self) -> Span {
        self.name.span().join(self.value.span())
    }
}

/// A dictionary entry: `key '=' value` with an optional trailing separator
#[derive(Debug, Clone, PartialEq)]
pub struct DictEntry {
    key: Identifier,
    value: ValueExpr,
}

impl DictEntry {
    /// Creates a new dictionary entry
    pub fn new(key: Identifier, value: ValueExpr) -> Self {
        Self { key, value }
    }

    /// Gets the key of this entry
    pub fn key(&self) -> &Identifier {
        &self.key
    }

    /// Gets the value expression of this entry
    pub fn value(&self) -> &ValueExpr {
        &self.value
    }
}

impl Spanned for DictEntry {
    fn span(&self) -> Span {
        self.key.span().join(self.value.span())
    }
}
