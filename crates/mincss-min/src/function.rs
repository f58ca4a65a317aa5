//! Collapse of legacy `rgb()` / `rgba()` calls to hash colors.

use mincss_lex::classify::starts_ident;
use mincss_lex::{Frame, ModifyCx, Token, TokenFlag, TokenId, TokenKind};
use mincss_util::{Result, Span};

use crate::{color, trivia};

/// Runs at the end of a declaration (`;`, `}` or end of input) and collapses
/// every valid `rgb()`/`rgba()` call in the value to a hash color.
pub(crate) fn collapse_declaration(cx: &mut ModifyCx<'_>) -> Result<()> {
    if !matches!(cx.ctxt.top(), Some(Frame::Declaration { .. })) {
        return Ok(());
    }
    let Some((first, _)) = cx.ctxt.declaration() else {
        return Ok(());
    };

    let mut walk = Some(first);
    while let Some(id) = walk {
        if id == cx.current {
            break;
        }
        if cx.list.get(id).kind == TokenKind::Function {
            let name = cx.list.get(id).data.of(cx.buf);
            let name = &name[..name.len().saturating_sub(1)];
            if name.eq_ignore_ascii_case(b"rgb") || name.eq_ignore_ascii_case(b"rgba") {
                let channels = if name.len() == 4 { 4 } else { 3 };
                try_collapse(cx, id, channels)?;
            }
        }
        walk = cx.list.next(id);
    }

    Ok(())
}

/// Argument-walk state: a value is expected at the start and after each
/// comma; a comma or the closing paren is valid only after a value.
///
/// Returns whether the call collapsed; `Err` only on arena growth failure.
fn try_collapse(cx: &mut ModifyCx<'_>, function: TokenId, channels: usize) -> Result<bool> {
    let mut values: Vec<u8> = Vec::with_capacity(channels);
    let mut expect_value = true;
    let mut percentages = 0u32;
    let mut numbers = 0u32;
    let mut close = None;

    let mut walk = cx.list.next(function);
    while let Some(id) = walk {
        if id == cx.current {
            return Ok(false); // unterminated call
        }
        let token = cx.list.get(id);
        match token.kind {
            TokenKind::RoundClose => {
                close = Some(id);
                break;
            }
            TokenKind::Number | TokenKind::Percentage => {
                if !expect_value || values.len() >= channels {
                    return Ok(false);
                }
                let Some(v) = numeric_value(token.data.of(cx.buf), token.kind) else {
                    return Ok(false);
                };
                if v < 0.0 {
                    return Ok(false);
                }
                let scaled = if values.len() == 3 {
                    // The alpha channel is a plain number in 0..1.
                    if token.kind != TokenKind::Number || v > 1.0 {
                        return Ok(false);
                    }
                    (v * 255.0).round()
                } else if token.kind == TokenKind::Percentage {
                    if v > 100.0 || v.fract() != 0.0 {
                        return Ok(false);
                    }
                    percentages += 1;
                    (v * 2.55).round()
                } else {
                    if v > 255.0 || v.fract() != 0.0 {
                        return Ok(false);
                    }
                    numbers += 1;
                    v
                };
                // Color channels must not mix numbers and percentages.
                if percentages > 0 && numbers > 0 {
                    return Ok(false);
                }
                values.push(scaled as u8);
                expect_value = false;
            }
            TokenKind::Comma => {
                if expect_value {
                    return Ok(false);
                }
                expect_value = true;
            }
            TokenKind::Ws | TokenKind::Comment => {}
            _ => return Ok(false),
        }
        walk = cx.list.next(id);
    }

    let Some(close) = close else {
        return Ok(false);
    };
    if expect_value || values.len() != channels {
        return Ok(false);
    }

    // A fully opaque alpha drops back to the six-digit form.
    if channels == 4 && values[3] == 0xFF {
        values.truncate(3);
    }

    let mut text = String::with_capacity(1 + values.len() * 2);
    text.push('#');
    for v in &values {
        text.push_str(&format!("{v:02x}"));
    }
    if let Some(short) = color::shorten(&text) {
        text = short;
    }
    if let Some(name) = color::name_for(&text) {
        text = name.to_string();
    }

    log::debug!(target: "mincss::min", "rgb collapse -> {}", text);
    retype_function(cx, function, text);

    // Unlink the argument range back to front, repairing the declaration
    // view whenever it points into the deleted range.
    let mut cur = close;
    while cur != function {
        let prev = match cx.list.prev(cur) {
            Some(p) => p,
            None => break,
        };
        if cx.ctxt.declaration().map(|(_, last)| last) == Some(cur) {
            cx.ctxt.set_declaration_last(prev);
        }
        cx.list.release(cur);
        cur = prev;
    }

    bridge_separation(cx, function)?;
    Ok(true)
}

/// Rewrites the function token into the collapsed color.
fn retype_function(cx: &mut ModifyCx<'_>, function: TokenId, text: String) {
    let token = cx.list.get_mut(function);
    if text.starts_with('#') {
        token.kind = TokenKind::Hash;
        token.flag = if starts_ident(&text.as_bytes()[1..]) {
            TokenFlag::Id
        } else {
            TokenFlag::Unrestricted
        };
    } else {
        // Substituted color name.
        token.kind = TokenKind::Ident;
        token.flag = TokenFlag::None;
    }
    token.user = Some(text);
}

/// Keeps the collapsed color separated from what followed the closing paren.
///
/// The deleted `)` used to end the token; if the first rendered token after
/// the new color would now merge with it, one space survives (reusing an
/// emptied whitespace token when one is available).
fn bridge_separation(cx: &mut ModifyCx<'_>, function: TokenId) -> Result<()> {
    let last = match cx.list.get(function).user.as_deref() {
        Some(text) => match text.as_bytes().last() {
            Some(&b) => b,
            None => return Ok(()),
        },
        None => return Ok(()),
    };

    let mut reusable_ws = None;
    let mut walk = cx.list.next(function);
    while let Some(id) = walk {
        let token = cx.list.get(id);
        let eff = token.effective(cx.buf);
        if eff.is_empty() {
            if token.kind == TokenKind::Ws && reusable_ws.is_none() {
                reusable_ws = Some(id);
            }
            walk = cx.list.next(id);
            continue;
        }
        if trivia::joins(last, eff[0]) {
            match reusable_ws {
                Some(ws) => cx.list.get_mut(ws).user = Some(" ".to_string()),
                None => {
                    let mut ws = Token::new(TokenKind::Ws, Span::EMPTY);
                    ws.user = Some(" ".to_string());
                    cx.list.insert_after(function, ws)?;
                }
            }
        }
        break;
    }

    Ok(())
}

/// Numeric value of a number or percentage token's raw text.
fn numeric_value(data: &[u8], kind: TokenKind) -> Option<f64> {
    let digits = if kind == TokenKind::Percentage {
        &data[..data.len().saturating_sub(1)]
    } else {
        data
    };
    std::str::from_utf8(digits).ok()?.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_value() {
        assert_eq!(numeric_value(b"255", TokenKind::Number), Some(255.0));
        assert_eq!(numeric_value(b"+3", TokenKind::Number), Some(3.0));
        assert_eq!(numeric_value(b".5", TokenKind::Number), Some(0.5));
        assert_eq!(numeric_value(b"100%", TokenKind::Percentage), Some(100.0));
        assert_eq!(numeric_value(b"1e2", TokenKind::Number), Some(100.0));
    }
}
