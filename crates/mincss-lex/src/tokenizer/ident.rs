//! Ident-like, at-keyword, hash and unicode-range fillers.

use mincss_util::{Result, Span};

use crate::classify::{is_hex, starts_ident};
use crate::cursor::Cursor;
use crate::token::{Token, TokenFlag, TokenKind};

use super::escape::consume_name;
use super::url::fill_url;

/// Consumes an ident-like token; the caller verified `starts_ident`.
///
/// A name directly followed by `(` becomes a function token unless the name
/// is `url` (matched case-insensitively), which switches to url-token
/// consumption. The function token's `data` includes the `(`.
pub(super) fn fill_ident_like(cur: &mut Cursor) -> Result<Token> {
    let start = cur.pos();
    consume_name(cur)?;

    if cur.current() == b'(' {
        let is_url = cur.buf()[start..cur.pos()].eq_ignore_ascii_case(b"url");
        if is_url {
            return fill_url(cur, start);
        }
        cur.advance()?;
        return Ok(Token::new(TokenKind::Function, Span::new(start, cur.pos())));
    }

    Ok(Token::new(TokenKind::Ident, Span::new(start, cur.pos())))
}

/// Consumes an at-keyword; the cursor sits on `@` and the caller verified
/// that an identifier follows.
pub(super) fn fill_at_keyword(cur: &mut Cursor) -> Result<Token> {
    let start = cur.pos();
    consume_name(cur)?;
    Ok(Token::new(TokenKind::AtKeyword, Span::new(start, cur.pos())))
}

/// Consumes a hash token; the cursor sits on `#` and the caller verified
/// that a name or valid escape follows.
pub(super) fn fill_hash(cur: &mut Cursor) -> Result<Token> {
    let start = cur.pos();
    let flag = if starts_ident(cur.window_from(1)) {
        TokenFlag::Id
    } else {
        TokenFlag::Unrestricted
    };
    consume_name(cur)?;
    let mut token = Token::new(TokenKind::Hash, Span::new(start, cur.pos()));
    token.flag = flag;
    Ok(token)
}

/// Consumes a unicode-range token; the cursor sits on `u`/`U` and the
/// caller verified the `+hex` / `+?` prefix.
///
/// Interpreting the range endpoints is out of scope; only the textual
/// extent is consumed.
pub(super) fn fill_unicode_range(cur: &mut Cursor) -> Result<Token> {
    let start = cur.pos();
    cur.advance()?; // u
    cur.advance()?; // +

    let mut questions = 0;
    for _ in 0..6 {
        if !is_hex(cur.current()) {
            if cur.current() == b'?' {
                questions += 1;
            } else {
                break;
            }
        }
        cur.advance()?;
    }

    if questions == 0 && cur.current() == b'-' && is_hex(cur.peek(1)) {
        cur.advance()?;
        for _ in 0..6 {
            if !is_hex(cur.current()) {
                break;
            }
            cur.advance()?;
        }
    }

    Ok(Token::new(
        TokenKind::UnicodeRange,
        Span::new(start, cur.pos()),
    ))
}
