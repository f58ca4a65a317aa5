//! Escape and name consumers.

use mincss_util::Result;

use crate::classify::{is_hex, is_name, is_ws, starts_valid_escape};
use crate::cursor::Cursor;

/// Largest code point an escape may produce.
const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Consumes an escaped code point; the cursor sits on the backslash.
///
/// Up to six hex digits and one trailing whitespace are consumed. If the
/// digits decode to NUL, a surrogate half or a value above U+10FFFF, the
/// consumed bytes are overwritten in place with U+FFFD; otherwise the
/// original escape text stays in the buffer untouched.
pub(super) fn consume_escaped(cur: &mut Cursor) -> Result<()> {
    cur.advance()?; // the backslash

    if !is_hex(cur.current()) {
        // Escaped verbatim character; consume it and be done.
        cur.advance()?;
        return Ok(());
    }

    let mut value: u32 = 0;
    let mut consumed = 0;
    while consumed < 6 && is_hex(cur.current()) {
        let digit = (cur.current() as char).to_digit(16).unwrap_or(0);
        value = value * 16 + digit;
        consumed += 1;
        cur.advance()?;
    }

    if is_ws(cur.current()) {
        cur.advance()?;
        consumed += 1;
    }

    let surrogate = (0xD800..=0xDFFF).contains(&value);
    if value == 0 || value > MAX_CODE_POINT || surrogate {
        cur.replace_before_reader(consumed)?;
    }

    Ok(())
}

/// Consumes a name; the cursor sits on its already-validated first byte.
pub(super) fn consume_name(cur: &mut Cursor) -> Result<()> {
    cur.advance()?;
    loop {
        if is_name(cur.current()) {
            cur.advance()?;
        } else if starts_valid_escape(cur.window()) {
            consume_escaped(cur)?;
        } else {
            return Ok(());
        }
    }
}

/// Consumes the remnants of a bad url, up to and including the closing `)`.
pub(super) fn consume_bad_url_remnants(cur: &mut Cursor) -> Result<()> {
    loop {
        let b = cur.current();
        if b == b')' || b == 0 {
            return cur.advance();
        }
        if starts_valid_escape(cur.window()) {
            consume_escaped(cur)?;
        } else {
            cur.advance()?;
        }
    }
}
