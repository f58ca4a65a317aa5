//! Comment token filler.

use mincss_util::{Result, Span};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Consumes a comment; the cursor sits on the `/` of `/*`.
///
/// An unterminated comment is accepted and runs to end of input.
pub(super) fn fill_comment(cur: &mut Cursor) -> Result<Token> {
    let start = cur.pos();
    cur.advance()?; // '/'
    cur.advance()?; // '*'

    while cur.current() != 0 && !(cur.current() == b'*' && cur.peek(1) == b'/') {
        cur.advance()?;
    }

    if cur.current() != 0 {
        cur.advance()?; // '*'
        if cur.current() != 0 {
            cur.advance()?; // '/'
        }
    }

    Ok(Token::new(TokenKind::Comment, Span::new(start, cur.pos())))
}
