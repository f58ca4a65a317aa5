//! Numeric token filler: number, percentage and dimension.

use mincss_util::{Result, Span};

use crate::classify::{is_digit, starts_ident};
use crate::cursor::Cursor;
use crate::token::{Token, TokenFlag, TokenKind};

use super::escape::consume_name;

/// Consumes a numeric token; the caller verified `starts_number`.
///
/// The flag records whether the token stayed integral: a fraction or an
/// exponent switches it from `Integer` to `Number`. A trailing ident start
/// turns the token into a dimension (unit recorded in `info`), a trailing
/// `%` into a percentage.
pub(super) fn fill_number(cur: &mut Cursor) -> Result<Token> {
    let start = cur.pos();
    let mut flag = TokenFlag::Integer;

    if cur.current() == b'+' || cur.current() == b'-' {
        cur.advance()?;
    }
    while is_digit(cur.current()) {
        cur.advance()?;
    }

    if cur.current() == b'.' && is_digit(cur.peek(1)) {
        cur.advance()?;
        flag = TokenFlag::Number;
        while is_digit(cur.current()) {
            cur.advance()?;
        }
    }

    if cur.current() == b'e' || cur.current() == b'E' {
        if is_digit(cur.peek(1)) {
            cur.advance()?;
            flag = TokenFlag::Number;
            while is_digit(cur.current()) {
                cur.advance()?;
            }
        } else if (cur.peek(1) == b'+' || cur.peek(1) == b'-') && is_digit(cur.peek(2)) {
            cur.advance()?;
            cur.advance()?;
            flag = TokenFlag::Number;
            while is_digit(cur.current()) {
                cur.advance()?;
            }
        }
    }

    let kind;
    let mut info = Span::EMPTY;
    if starts_ident(cur.window()) {
        kind = TokenKind::Dimension;
        let unit_start = cur.pos();
        consume_name(cur)?;
        info = Span::new(unit_start, cur.pos());
    } else if cur.current() == b'%' {
        kind = TokenKind::Percentage;
        let pct = cur.pos();
        cur.advance()?;
        info = Span::new(pct, cur.pos());
    } else {
        kind = TokenKind::Number;
    }

    let mut token = Token::new(kind, Span::new(start, cur.pos()));
    token.flag = flag;
    token.info = info;
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(src: &str) -> (Token, Cursor) {
        let mut cur = Cursor::new(src.as_bytes().to_vec()).unwrap();
        let token = fill_number(&mut cur).unwrap();
        (token, cur)
    }

    #[test]
    fn test_integer() {
        let (t, cur) = fill("42;");
        assert_eq!(t.kind, TokenKind::Number);
        assert_eq!(t.flag, TokenFlag::Integer);
        assert_eq!(t.data.of(cur.buf()), b"42");
    }

    #[test]
    fn test_signed() {
        let (t, cur) = fill("-17 ");
        assert_eq!(t.data.of(cur.buf()), b"-17");
        let (t, cur) = fill("+3 ");
        assert_eq!(t.data.of(cur.buf()), b"+3");
        assert_eq!(t.flag, TokenFlag::Integer);
    }

    #[test]
    fn test_fraction() {
        let (t, cur) = fill("0.50 ");
        assert_eq!(t.kind, TokenKind::Number);
        assert_eq!(t.flag, TokenFlag::Number);
        assert_eq!(t.data.of(cur.buf()), b"0.50");
    }

    #[test]
    fn test_leading_dot() {
        let (t, cur) = fill(".5;");
        assert_eq!(t.data.of(cur.buf()), b".5");
        assert_eq!(t.flag, TokenFlag::Number);
    }

    #[test]
    fn test_exponent() {
        let (t, cur) = fill("1e3 ");
        assert_eq!(t.data.of(cur.buf()), b"1e3");
        assert_eq!(t.flag, TokenFlag::Number);
        let (t, cur) = fill("2E-2 ");
        assert_eq!(t.data.of(cur.buf()), b"2E-2");
        assert_eq!(t.flag, TokenFlag::Number);
    }

    #[test]
    fn test_dimension() {
        let (t, cur) = fill("1.5px;");
        assert_eq!(t.kind, TokenKind::Dimension);
        assert_eq!(t.data.of(cur.buf()), b"1.5px");
        assert_eq!(t.info.of(cur.buf()), b"px");
    }

    #[test]
    fn test_percentage() {
        let (t, cur) = fill("100%;");
        assert_eq!(t.kind, TokenKind::Percentage);
        assert_eq!(t.data.of(cur.buf()), b"100%");
        assert_eq!(t.info.of(cur.buf()), b"%");
    }

    #[test]
    fn test_dimension_with_escaped_unit() {
        let (t, cur) = fill("5\\31x ");
        assert_eq!(t.kind, TokenKind::Dimension);
        assert_eq!(t.data.of(cur.buf()), b"5\\31x");
        assert_eq!(t.info.of(cur.buf()), b"\\31x");
    }

    #[test]
    fn test_number_then_dot_without_digit() {
        // "5." is a number followed by a delim.
        let (t, cur) = fill("5.a");
        assert_eq!(t.kind, TokenKind::Number);
        assert_eq!(t.data.of(cur.buf()), b"5");
        assert_eq!(cur.current(), b'.');
    }

    #[test]
    fn test_e_not_exponent_is_dimension() {
        // "3em" - the e starts a unit, not an exponent.
        let (t, cur) = fill("3em;");
        assert_eq!(t.kind, TokenKind::Dimension);
        assert_eq!(t.info.of(cur.buf()), b"em");
        assert_eq!(t.flag, TokenFlag::Integer);
    }
}
