//! String token filler.

use mincss_util::{Result, Span};

use crate::classify::starts_valid_escape;
use crate::cursor::Cursor;
use crate::token::{Token, TokenFlag, TokenKind};

use super::escape::consume_escaped;

/// Consumes a string token; the cursor sits on the opening quote.
///
/// The token becomes `BadString` when a bare LF appears before the closing
/// quote; the LF itself is not consumed. `\` followed by LF is a line
/// continuation and is consumed. A valid escape runs the escape consumer,
/// which already leaves the cursor past the escape, so the position is not
/// advanced a second time.
pub(super) fn fill_string(cur: &mut Cursor) -> Result<Token> {
    let start = cur.pos();
    let quote = cur.current();
    cur.advance()?;

    let mut kind = TokenKind::String;
    loop {
        let b = cur.current();
        if b == quote || b == 0 {
            if b != 0 {
                cur.advance()?;
            }
            break;
        } else if b == b'\n' {
            kind = TokenKind::BadString;
            break;
        } else if b == b'\\' {
            let after = cur.peek(1);
            if after == 0 {
                cur.advance()?;
                break;
            } else if after == b'\n' {
                // Line continuation: the backslash here, the LF below.
                cur.advance()?;
            } else if starts_valid_escape(cur.window()) {
                consume_escaped(cur)?;
                continue;
            }
        }
        cur.advance()?;
    }

    let mut token = Token::new(kind, Span::new(start, cur.pos()));
    token.flag = TokenFlag::String;
    token.info = Span::new(start, start + 1);
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(src: &str) -> (Token, Cursor) {
        let mut cur = Cursor::new(src.as_bytes().to_vec()).unwrap();
        let token = fill_string(&mut cur).unwrap();
        (token, cur)
    }

    #[test]
    fn test_simple_string() {
        let (t, cur) = fill("\"hello\" x");
        assert_eq!(t.kind, TokenKind::String);
        assert_eq!(t.data.of(cur.buf()), b"\"hello\"");
        assert_eq!(t.info.of(cur.buf()), b"\"");
        assert_eq!(t.flag, TokenFlag::String);
    }

    #[test]
    fn test_single_quotes() {
        let (t, cur) = fill("'a\"b' x");
        assert_eq!(t.kind, TokenKind::String);
        assert_eq!(t.data.of(cur.buf()), b"'a\"b'");
        assert_eq!(t.info.of(cur.buf()), b"'");
    }

    #[test]
    fn test_bad_string_on_newline() {
        let (t, cur) = fill("\"abc\ndef\"");
        assert_eq!(t.kind, TokenKind::BadString);
        // The LF is left for the next (whitespace) token.
        assert_eq!(t.data.of(cur.buf()), b"\"abc");
        assert_eq!(cur.current(), b'\n');
    }

    #[test]
    fn test_line_continuation() {
        let (t, cur) = fill("\"a\\\nb\"");
        assert_eq!(t.kind, TokenKind::String);
        assert_eq!(t.data.of(cur.buf()), b"\"a\\\nb\"");
    }

    #[test]
    fn test_escaped_quote() {
        let (t, cur) = fill("\"a\\\"b\"");
        assert_eq!(t.kind, TokenKind::String);
        assert_eq!(t.data.of(cur.buf()), b"\"a\\\"b\"");
    }

    #[test]
    fn test_hex_escape_inside_string() {
        let (t, cur) = fill("\"line\\ABreak\"");
        assert_eq!(t.kind, TokenKind::String);
        assert_eq!(t.data.of(cur.buf()), b"\"line\\ABreak\"");
    }

    #[test]
    fn test_unterminated_at_eof() {
        let (t, cur) = fill("\"abc");
        assert_eq!(t.kind, TokenKind::String);
        assert_eq!(t.data.of(cur.buf()), b"\"abc");
    }

    #[test]
    fn test_backslash_at_eof() {
        let (t, _) = fill("\"abc\\");
        assert_eq!(t.kind, TokenKind::String);
    }
}
