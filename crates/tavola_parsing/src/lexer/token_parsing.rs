use nom::branch::alt;
use nom::bytes::complete::{tag, take_until, take_while1};
use nom::character::complete::{char, multispace1};
use nom::combinator::{consumed, cut, eof, map, recognize, value};
use nom::error::{context, VerboseError};
use nom::multi::many0;
use nom::sequence::{preceded, terminated, tuple};
use nom::IResult;
use tavola_tokens::token::TokenKind;

type Result<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Context label used for the comment terminator cut
pub const COMMENT_CONTEXT: &str = "block comment";
/// Context label used for the binary digit cut
pub const BIN_NUMBER_CONTEXT: &str = "binary literal";

/// Parses a single token off the front of `src`, skipping any insignificant
/// input before it.
///
/// On success yields `(skipped, len, kind)` where `skipped` is the number of
/// bytes of whitespace/comments consumed before the token and `len` is the
/// byte length of the token itself.
pub fn parse_token(src: &str) -> Result<'_, (usize, usize, TokenKind)> {
    let mut main_parser = context(
        "token",
        map(
            tuple((consumed(parse_insignificant), consumed(_parse_token))),
            |((skipped, ()), (lexeme, kind))| (skipped.len(), lexeme.len(), kind),
        ),
    );
    (main_parser)(src)
}

fn _parse_token(src: &str) -> Result<'_, TokenKind> {
    alt((parse_eof, parse_bin_number, parse_ident, parse_punctuation))(src)
}

fn parse_eof(src: &str) -> Result<'_, TokenKind> {
    context("eof", value(TokenKind::Eof, eof))(src)
}

fn parse_ident(src: &str) -> Result<'_, TokenKind> {
    // `table` is deliberately not split off as a keyword here, the grammar
    // disambiguates it by position
    context(
        "identifier",
        map(take_while1(|c: char| c.is_ascii_lowercase()), |id: &str| {
            TokenKind::Ident(id.to_string())
        }),
    )(src)
}

fn parse_bin_number(src: &str) -> Result<'_, TokenKind> {
    context(
        BIN_NUMBER_CONTEXT,
        map(
            preceded(
                alt((tag("0b"), tag("0B"))),
                cut(take_while1(|c: char| c == '0' || c == '1')),
            ),
            |digits: &str| TokenKind::BinNumber(digits.to_string()),
        ),
    )(src)
}

fn parse_punctuation(src: &str) -> Result<'_, TokenKind> {
    // the two-character delimiters must come before their one-character
    // prefixes for maximal munch
    context(
        "punctuation",
        alt((
            value(TokenKind::ConstOpen, tag(".(")),
            value(TokenKind::ConstClose, tag(").")),
            value(TokenKind::Colon, char(':')),
            value(TokenKind::Assign, char('=')),
            value(TokenKind::Comma, char(',')),
            value(TokenKind::SemiColon, char(';')),
            value(TokenKind::LParen, char('(')),
            value(TokenKind::RParen, char(')')),
            value(TokenKind::LBracket, char('[')),
            value(TokenKind::RBracket, char(']')),
        )),
    )(src)
}

fn parse_insignificant(src: &str) -> Result<'_, ()> {
    context(
        "insignificant",
        value(
            (),
            many0(alt((
                context("whitespace", multispace1),
                context(
                    COMMENT_CONTEXT,
                    recognize(preceded(
                        tag("--[["),
                        cut(terminated(take_until("]]"), tag("]]"))),
                    )),
                ),
            ))),
        ),
    )(src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::combinator::all_consuming;

    #[test]
    fn test_insignificant() {
        let (rest, ()) = all_consuming(parse_insignificant)(" \t\r\n ").unwrap();
        assert_eq!(rest, "");
        let (rest, ()) = all_consuming(parse_insignificant)("--[[ anything ]]").unwrap();
        assert_eq!(rest, "");
        let (rest, ()) = parse_insignificant("--[[ a ]] x").unwrap();
        assert_eq!(rest, "x");
    }

    #[test]
    fn test_comment_is_non_greedy() {
        // stops at the *first* `]]`
        let (rest, ()) = parse_insignificant("--[[ a ]] ]]").unwrap();
        assert_eq!(rest, "]]");
    }

    #[test]
    fn test_unterminated_comment_is_failure() {
        let err = parse_insignificant("--[[ never closed").unwrap_err();
        assert!(matches!(err, nom::Err::Failure(_)));
    }

    #[test]
    fn test_parse_bin_number() {
        let (rest, kind) = parse_bin_number("0b101,").unwrap();
        assert_eq!(rest, ",");
        assert_eq!(kind, TokenKind::BinNumber("101".to_string()));
        let (_, kind) = parse_bin_number("0B11").unwrap();
        assert_eq!(kind, TokenKind::BinNumber("11".to_string()));
    }

    #[test]
    fn test_bin_number_requires_digits() {
        let err = parse_bin_number("0b;").unwrap_err();
        assert!(matches!(err, nom::Err::Failure(_)));
    }

    #[test]
    fn test_maximal_munch_const_delimiters() {
        let (rest, kind) = parse_punctuation(".(x).").unwrap();
        assert_eq!(kind, TokenKind::ConstOpen);
        assert_eq!(rest, "x).");
        let (rest, kind) = parse_punctuation(").").unwrap();
        assert_eq!(kind, TokenKind::ConstClose);
        assert_eq!(rest, "");
        let (rest, kind) = parse_punctuation(") .").unwrap();
        assert_eq!(kind, TokenKind::RParen);
        assert_eq!(rest, " .");
    }

    #[test]
    fn test_parse_token_skips_leading_trivia() {
        let (rest, (skipped, len, kind)) = parse_token("  --[[ c ]] name").unwrap();
        assert_eq!(rest, "");
        assert_eq!(skipped, 12);
        assert_eq!(len, 4);
        assert_eq!(kind, TokenKind::Ident("name".to_string()));
    }

    #[test]
    fn test_parse_token_eof() {
        let (_, (_, len, kind)) = parse_token("  ").unwrap();
        assert_eq!(len, 0);
        assert_eq!(kind, TokenKind::Eof);
    }

    #[test]
    fn test_uppercase_is_not_an_identifier() {
        let err = parse_token("Ident").unwrap_err();
        assert!(matches!(err, nom::Err::Error(_)));
    }
}
