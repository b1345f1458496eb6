//! Creates the syntax tree from a token stream.
//!
//! The grammar needs exactly one token of lookahead: after the identifier
//! that opens a statement, `:` selects a constant declaration and `=` selects
//! a dictionary entry. No other ambiguity exists, so the parser never
//! backtracks and the first unexpected token is fatal.

use crate::lexer::{Lexer, LexingError};
use std::fmt::{Display, Formatter};
use std::result;
use tavola_ast::{
    ConstDecl, DictEntry, Identifier, NumberLit, Program, Statement, TableExpr, ValueExpr,
};
use tavola_tokens::spanned::{Span, Spanned};
use tavola_tokens::token::{Token, TokenKind};
use thiserror::Error;
use tracing::trace;

/// The name `table` takes on in table-head position
const TABLE_KEYWORD: &str = "table";

type Result<T, E = SyntaxError> = result::Result<T, E>;

/// Parses a full source text into a [Program]
pub fn parse(source: &str) -> Result<Program> {
    Parser::new(source).parse_program()
}

/// The recursive-descent parser over the token stream of a [Lexer]
#[derive(Debug)]
pub struct Parser<'s> {
    lexer: Lexer<'s>,
    lookahead: Option<Token>,
}

impl<'s> Parser<'s> {
    /// Creates a new parser over a full source text
    pub fn new(source: &'s str) -> Self {
        Self {
            lexer: Lexer::new(source),
            lookahead: None,
        }
    }

    /// Parses `Statement* EOF`
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut statements = vec![];
        while self.peek()?.kind() != &TokenKind::Eof {
            statements.push(self.parse_statement()?);
        }
        trace!("parsed program with {} statements", statements.len());
        Ok(Program::new(statements))
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        let name = self.eat_ident()?;
        match self.peek()?.kind() {
            TokenKind::Colon => {
                self.consume()?;
                let value = self.parse_value()?;
                self.eat(TokenKind::SemiColon)?;
                Ok(Statement::Const(ConstDecl::new(name, value)))
            }
            TokenKind::Assign => Ok(Statement::Entry(self.parse_entry_rest(name)?)),
            _ => Err(self.expected_token([":", "="])),
        }
    }

    /// Parses the remainder of a dictionary entry once its key is known
    fn parse_entry_rest(&mut self, key: Identifier) -> Result<DictEntry> {
        self.eat(TokenKind::Assign)?;
        let value = self.parse_value()?;
        // the optional trailing separator is pure punctuation
        if matches!(
            self.peek()?.kind(),
            TokenKind::Comma | TokenKind::SemiColon
        ) {
            self.consume()?;
        }
        Ok(DictEntry::new(key, value))
    }

    fn parse_value(&mut self) -> Result<ValueExpr> {
        match self.peek()?.kind() {
            TokenKind::BinNumber(_) => {
                let token = self.consume()?;
                let span = token.span();
                let TokenKind::BinNumber(digits) = token.into_kind() else {
                    unreachable!()
                };
                Ok(ValueExpr::Number(NumberLit::new(digits, span)))
            }
            TokenKind::Ident(name) if name == TABLE_KEYWORD => {
                Ok(ValueExpr::Table(self.parse_table()?))
            }
            TokenKind::ConstOpen => {
                self.consume()?;
                let name = self.eat_ident()?;
                self.eat(TokenKind::ConstClose)?;
                Ok(ValueExpr::ConstRef(name))
            }
            _ => Err(self.expected_token(["binary literal", "table", ".("])),
        }
    }

    /// Parses `'table' '(' '[' DictEntry* ']' ')'`, with the head `table`
    /// identifier still unconsumed
    fn parse_table(&mut self) -> Result<TableExpr> {
        let head = self.consume()?;
        self.eat(TokenKind::LParen)?;
        self.eat(TokenKind::LBracket)?;
        let mut entries = vec![];
        while self.peek()?.kind() != &TokenKind::RBracket {
            let key = self.eat_ident()?;
            entries.push(self.parse_entry_rest(key)?);
        }
        self.eat(TokenKind::RBracket)?;
        let close = self.eat(TokenKind::RParen)?;
        Ok(TableExpr::new(entries, head.span().join(close.span())))
    }

    fn peek(&mut self) -> Result<&Token> {
        if self.lookahead.is_none() {
            let token = self.next_token()?;
            self.lookahead = Some(token);
        }
        Ok(self.lookahead.as_ref().expect("lookahead was just filled"))
    }

    fn consume(&mut self) -> Result<Token> {
        self.peek()?;
        Ok(self.lookahead.take().expect("lookahead was just filled"))
    }

    /// Consumes the lookahead if it has exactly the given kind
    fn eat(&mut self, kind: TokenKind) -> Result<Token> {
        if self.peek()?.kind() == &kind {
            self.consume()
        } else {
            Err(self.expected_token([kind.to_string()]))
        }
    }

    fn eat_ident(&mut self) -> Result<Identifier> {
        match self.peek()?.kind() {
            TokenKind::Ident(_) => {
                let token = self.consume()?;
                let span = token.span();
                let TokenKind::Ident(name) = token.into_kind() else {
                    unreachable!()
                };
                Ok(Identifier::new(name, span))
            }
            _ => Err(self.expected_token(["identifier"])),
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        match self.lexer.next() {
            Some(Ok(token)) => Ok(token),
            Some(Err(e)) => Err(self.lexing_error(e)),
            // the lexer fuses after its eof token
            None => Ok(Token::new(
                Span::new(self.lexer.source().len(), 0),
                TokenKind::Eof,
            )),
        }
    }

    /// Builds an expected-token error from the current lookahead
    fn expected_token<I, S>(&self, expected: I) -> SyntaxError
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (found, span) = match &self.lookahead {
            Some(token) => (token.kind().clone(), token.span()),
            None => (TokenKind::Eof, Span::new(self.lexer.source().len(), 0)),
        };
        SyntaxError::new(
            ErrorKind::expected_token(expected, found),
            Location::new(span, self.lexer.source()),
        )
    }

    fn lexing_error(&self, e: LexingError) -> SyntaxError {
        let span = Span::new(e.offset(), 0);
        SyntaxError::new(ErrorKind::Lex(e), Location::new(span, self.lexer.source()))
    }
}

/// Represents a fatal error occurring during lexing or parsing
#[derive(Debug, Error)]
pub struct SyntaxError {
    kind: ErrorKind,
    location: Option<Location>,
}

impl SyntaxError {
    /// Creates a new error
    pub fn new(kind: ErrorKind, location: impl Into<Option<Location>>) -> Self {
        Self {
            kind,
            location: location.into(),
        }
    }

    /// Gets the kind of this error
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Gets where this error occurred, if known
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(location) = &self.location {
            write!(f, " at line {}, column {}", location.line, location.col)?;
        }
        Ok(())
    }
}

/// A span resolved to its line and column within the source text
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Location {
    pub span: Span,
    pub line: usize,
    pub col: usize,
}

impl Location {
    /// Creates a new location by resolving `span` against `source`
    pub fn new(span: Span, source: &str) -> Self {
        let (line, col) = span.line_col(source);
        Self { span, line, col }
    }
}

/// [SyntaxError] kind
#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("expected one of {0:?}, got {1}")]
    ExpectedToken(Vec<String>, TokenKind),
    #[error(transparent)]
    Lex(#[from] LexingError),
}

impl ErrorKind {
    pub fn expected_token<I, S>(expected: I, found: TokenKind) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::ExpectedToken(
            expected
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
            found,
        )
    }
}
