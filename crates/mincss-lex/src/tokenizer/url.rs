//! Url token filler.

use mincss_util::{Result, Span};

use crate::classify::{is_non_printable, is_ws, starts_valid_escape};
use crate::cursor::Cursor;
use crate::token::{Token, TokenFlag, TokenKind};

use super::escape::{consume_bad_url_remnants, consume_escaped};
use super::string::fill_string;

/// Consumes a url token. The cursor sits on the `(` after the name; `start`
/// is where the name began, so the token's `data` covers the whole
/// `url( .. )` construct.
///
/// The quoted form delegates to the string filler and records the quote in
/// `info` with the `String` flag. Any structural violation (stray quote,
/// `(`, non-printable byte, invalid escape, or junk after the string)
/// degrades the token to `BadUrl` after consuming the remnants.
pub(super) fn fill_url(cur: &mut Cursor, start: usize) -> Result<Token> {
    cur.advance()?; // the '('

    while is_ws(cur.current()) {
        cur.advance()?;
    }

    let mut kind = TokenKind::Url;
    let mut flag = TokenFlag::None;
    let mut info = Span::EMPTY;

    match cur.current() {
        0 => {}
        b'"' | b'\'' => {
            let inner = fill_string(cur)?;
            if inner.kind == TokenKind::BadString {
                kind = TokenKind::BadUrl;
                consume_bad_url_remnants(cur)?;
            } else {
                flag = TokenFlag::String;
                info = inner.info;

                while is_ws(cur.current()) {
                    cur.advance()?;
                }
                if cur.current() == b')' || cur.current() == 0 {
                    cur.advance()?;
                } else {
                    kind = TokenKind::BadUrl;
                    consume_bad_url_remnants(cur)?;
                }
            }
        }
        _ => loop {
            let b = cur.current();
            if b == b')' || b == 0 {
                cur.advance()?;
                break;
            } else if is_ws(b) {
                while is_ws(cur.current()) {
                    cur.advance()?;
                }
                if cur.current() == b')' || cur.current() == 0 {
                    cur.advance()?;
                } else {
                    kind = TokenKind::BadUrl;
                    consume_bad_url_remnants(cur)?;
                }
                break;
            } else if b == b'"' || b == b'\'' || b == b'(' || is_non_printable(b) {
                kind = TokenKind::BadUrl;
                consume_bad_url_remnants(cur)?;
                break;
            } else if b == b'\\' {
                if starts_valid_escape(cur.window()) {
                    consume_escaped(cur)?;
                } else {
                    kind = TokenKind::BadUrl;
                    consume_bad_url_remnants(cur)?;
                    break;
                }
            } else {
                cur.advance()?;
            }
        },
    }

    let mut token = Token::new(kind, Span::new(start, cur.pos()));
    token.flag = flag;
    token.info = info;
    Ok(token)
}
