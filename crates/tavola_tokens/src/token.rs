//! A lexical token from a source file

use crate::spanned::{Span, Spanned};
use std::fmt::{Debug, Display, Formatter};

/// A lexical token from a source file
#[derive(Clone)]
pub struct Token {
    span: Span,
    kind: TokenKind,
}

impl Token {
    /// Creates a new token
    pub fn new(span: Span, kind: TokenKind) -> Self {
        Self { span, kind }
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Unwraps this token into its kind
    pub fn into_kind(self) -> TokenKind {
        self.kind
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.kind, f)
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

/// The kind for this token
///
/// There is no keyword kind. `table` has the same shape as any other
/// identifier and lexes as [TokenKind::Ident]; the parser recognizes it as
/// the table keyword only in table-head position.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// one or more lowercase ascii letters
    Ident(String),
    /// the digits of a `0b`/`0B` binary literal, prefix stripped
    BinNumber(String),

    /// `:`
    Colon,
    /// `=`
    Assign,
    /// `,`
    Comma,
    /// `;`
    SemiColon,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `.(`, opens a constant reference
    ConstOpen,
    /// `).`, closes a constant reference
    ConstClose,

    /// EOF, will only appear at the end of a token stream
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Ident(id) => write!(f, "{id}"),
            TokenKind::BinNumber(digits) => write!(f, "0b{digits}"),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Assign => write!(f, "="),
            TokenKind::Comma => write!(f, ","),
            TokenKind::SemiColon => write!(f, ";"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::ConstOpen => write!(f, ".("),
            TokenKind::ConstClose => write!(f, ")."),
            TokenKind::Eof => write!(f, "<eof>"),
        }
    }
}
