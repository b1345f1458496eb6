//! Responsible with converting source text into a token stream

use nom::error::{VerboseError, VerboseErrorKind};
use tavola_tokens::spanned::Span;
use tavola_tokens::token::{Token, TokenKind};
use thiserror::Error;
use tracing::trace;

mod token_parsing;

use token_parsing::{parse_token, BIN_NUMBER_CONTEXT, COMMENT_CONTEXT};

/// Responsible with converting source text into a token stream.
///
/// The stream is terminated by a single [TokenKind::Eof] token. Lexing is a
/// pure function of the source string, so a fresh lexer over the same text
/// always produces the same stream.
#[derive(Debug)]
pub struct Lexer<'s> {
    source: &'s str,
    offset: usize,
    fused: bool,
}

impl<'s> Lexer<'s> {
    /// Creates a new lexer over a full source text
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            offset: 0,
            fused: false,
        }
    }

    /// Gets the source text this lexer reads from
    pub fn source(&self) -> &'s str {
        self.source
    }

    fn next_token(&mut self) -> LexResult<Option<Token>> {
        if self.fused {
            return Ok(None);
        }
        let rest = &self.source[self.offset..];
        match parse_token(rest) {
            Ok((_, (skipped, len, kind))) => {
                let offset = self.offset + skipped;
                self.offset = offset + len;
                let span = Span::new(offset, len);
                if kind == TokenKind::Eof {
                    self.fused = true;
                }
                trace!("lexed {kind:?} at {span:?}");
                Ok(Some(Token::new(span, kind)))
            }
            Err(nom::Err::Error(e)) => Err(self.soft_error(e)),
            Err(nom::Err::Failure(e)) => Err(self.hard_error(e)),
            Err(nom::Err::Incomplete(_)) => {
                unreachable!("only complete combinators are used")
            }
        }
    }

    /// No token matched at the error position
    fn soft_error(&self, e: VerboseError<&str>) -> LexingError {
        let offset = self.error_offset(&e);
        match self.source[offset..].chars().next() {
            Some(found) => LexingError::InvalidChar { found, offset },
            None => LexingError::UnexpectedEof { offset },
        }
    }

    /// A `cut` fired after a committed prefix
    fn hard_error(&self, e: VerboseError<&str>) -> LexingError {
        let offset = self.error_offset(&e);
        // errors are deepest-first, so this finds the innermost context
        let context = e.errors.iter().find_map(|(_, kind)| match kind {
            VerboseErrorKind::Context(ctx) => Some(*ctx),
            _ => None,
        });
        match context {
            Some(COMMENT_CONTEXT) => LexingError::UnterminatedComment { offset },
            Some(BIN_NUMBER_CONTEXT) => LexingError::MissingBinaryDigits { offset },
            _ => match self.source[offset..].chars().next() {
                Some(found) => LexingError::InvalidChar { found, offset },
                None => LexingError::UnexpectedEof { offset },
            },
        }
    }

    fn error_offset(&self, e: &VerboseError<&str>) -> usize {
        e.errors
            .first()
            .map(|(rest, _)| self.source.len() - rest.len())
            .unwrap_or(self.offset)
    }
}

impl<'s> Iterator for Lexer<'s> {
    type Item = Result<Token, LexingError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(option) => option.map(Ok),
            Err(e) => Some(Err(e)),
        }
    }
}

type LexResult<T> = Result<T, LexingError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexingError {
    /// a character that cannot start any token
    #[error("invalid character {found:?}")]
    InvalidChar { found: char, offset: usize },
    #[error("unterminated block comment")]
    UnterminatedComment { offset: usize },
    #[error("binary literal is missing digits")]
    MissingBinaryDigits { offset: usize },
    #[error("unexpected EOF")]
    UnexpectedEof { offset: usize },
}

impl LexingError {
    /// Gets the byte offset the error occurred at
    pub fn offset(&self) -> usize {
        match *self {
            LexingError::InvalidChar { offset, .. }
            | LexingError::UnterminatedComment { offset }
            | LexingError::MissingBinaryDigits { offset }
            | LexingError::UnexpectedEof { offset } => offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tavola_tokens::spanned::Spanned;
    use test_log::test;

    fn lex(src: &str) -> Result<Vec<Token>, LexingError> {
        Lexer::new(src).collect()
    }

    #[test]
    fn test_lexer() {
        let tokens = lex("port = 0b1000 , db : .(x). ;").expect("could not get tokens");
        let kinds = tokens.iter().map(|t| t.kind().clone()).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident("port".to_string()),
                TokenKind::Assign,
                TokenKind::BinNumber("1000".to_string()),
                TokenKind::Comma,
                TokenKind::Ident("db".to_string()),
                TokenKind::Colon,
                TokenKind::ConstOpen,
                TokenKind::Ident("x".to_string()),
                TokenKind::ConstClose,
                TokenKind::SemiColon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_spans() {
        let tokens = lex("ab = 0b1").unwrap();
        assert_eq!(tokens[0].span(), Span::new(0, 2));
        assert_eq!(tokens[1].span(), Span::new(3, 1));
        assert_eq!(tokens[2].span(), Span::new(5, 3));
        // eof is an empty span at the end of input
        assert_eq!(tokens[3].span(), Span::new(8, 0));
    }

    #[test]
    fn test_lexer_skips_comments_and_whitespace() {
        let tokens = lex("a --[[ b = 0b1 ]] = \n\t 0b1").unwrap();
        let kinds = tokens.iter().map(|t| t.kind().clone()).collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident("a".to_string()),
                TokenKind::Assign,
                TokenKind::BinNumber("1".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_is_fused_after_eof() {
        let mut lexer = Lexer::new("");
        assert_eq!(
            lexer.next().unwrap().unwrap().kind(),
            &TokenKind::Eof
        );
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_invalid_character() {
        let err = lex("a = 5").unwrap_err();
        assert_eq!(
            err,
            LexingError::InvalidChar {
                found: '5',
                offset: 4
            }
        );
    }

    #[test]
    fn test_uppercase_identifier_rejected() {
        let err = lex("Port = 0b1").unwrap_err();
        assert!(matches!(err, LexingError::InvalidChar { found: 'P', .. }));
    }

    #[test]
    fn test_unterminated_comment() {
        let err = lex("a = 0b1 --[[ oops").unwrap_err();
        assert!(matches!(err, LexingError::UnterminatedComment { .. }));
    }

    #[test]
    fn test_missing_binary_digits() {
        let err = lex("a = 0b;").unwrap_err();
        assert!(matches!(err, LexingError::MissingBinaryDigits { .. }));
    }
}
