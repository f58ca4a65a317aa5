//! Whitespace, comment and semicolon elision.

use mincss_lex::classify::{is_digit, is_name};
use mincss_lex::{ModifyCx, Token, TokenKind};
use mincss_util::{Result, Span};

/// True if `prev_last` and `next_first` would merge into (or extend) a
/// single token when re-tokenized without a separator between them.
///
/// This is the constructive form of the redundancy rule: whitespace may be
/// removed exactly when this returns false for the bytes it separates.
pub(crate) fn joins(prev_last: u8, next_first: u8) -> bool {
    // ident/number/dimension tails flowing into names, escapes or an open
    // paren (`and (` must not become a function token)
    if is_name(prev_last) && (is_name(next_first) || next_first == b'\\' || next_first == b'(') {
        return true;
    }
    // digit meeting a fraction or percent sign
    if is_digit(prev_last) && (next_first == b'.' || next_first == b'%') {
        return true;
    }
    // sign or dot starting a number
    if matches!(prev_last, b'+' | b'-' | b'.') && (is_digit(next_first) || next_first == b'.') {
        return true;
    }
    // `#`/`@` picking up a name
    if matches!(prev_last, b'#' | b'@') && (is_name(next_first) || next_first == b'\\') {
        return true;
    }
    // two-byte match operators and the column token
    if matches!(prev_last, b'$' | b'*' | b'^' | b'~' | b'|') && next_first == b'=' {
        return true;
    }
    if prev_last == b'|' && next_first == b'|' {
        return true;
    }
    // comment opener, CDO, unicode-range
    if prev_last == b'/' && next_first == b'*' {
        return true;
    }
    if prev_last == b'<' && next_first == b'!' {
        return true;
    }
    if matches!(prev_last, b'u' | b'U') && next_first == b'+' {
        return true;
    }
    false
}

/// Empties a freshly emitted comment unless it is a bang comment.
pub(crate) fn elide_comment(cx: &mut ModifyCx<'_>) {
    let token = cx.list.get(cx.current);
    if !token.data.of(cx.buf).starts_with(b"/*!") {
        cx.list.get_mut(cx.current).user = Some(String::new());
    }
}

/// Settles the trivia run in front of the current (non-trivia) token.
///
/// Walks back over the whitespace and comments directly preceding the
/// current token. At most one single-space separator survives, and only when
/// dropping the run entirely would merge the surrounding tokens; a kept bang
/// comment already separates them. When the neighbours became adjacent
/// through earlier rewrites and no trivia is available, a synthetic space is
/// inserted.
pub(crate) fn settle_run(cx: &mut ModifyCx<'_>) -> Result<()> {
    let mut chain = Vec::new();
    let mut walk = cx.list.prev(cx.current);
    while let Some(id) = walk {
        if !cx.list.get(id).kind.is_trivia() {
            break;
        }
        chain.push(id);
        walk = cx.list.prev(id);
    }
    chain.reverse();

    // Effective last byte of the nearest rendered predecessor.
    let mut prev_last = None;
    let mut behind = walk;
    while let Some(id) = behind {
        let eff = cx.list.get(id).effective(cx.buf);
        if let Some(&b) = eff.last() {
            prev_last = Some(b);
            break;
        }
        behind = cx.list.prev(id);
    }

    let next_first = cx.list.get(cx.current).effective(cx.buf).first().copied();
    let needed = match (prev_last, next_first) {
        (Some(p), Some(n)) => joins(p, n),
        _ => false,
    };

    let has_bang = chain.iter().any(|&id| {
        let t = cx.list.get(id);
        t.kind == TokenKind::Comment && !t.effective(cx.buf).is_empty()
    });

    let mut separated = has_bang;
    for &id in &chain {
        let token = cx.list.get(id);
        if token.kind != TokenKind::Ws {
            continue;
        }
        if needed && !separated {
            if token.data.of(cx.buf) != b" " {
                cx.list.get_mut(id).user = Some(" ".to_string());
            }
            separated = true;
        } else {
            cx.list.get_mut(id).user = Some(String::new());
        }
    }

    if needed && !separated {
        let mut ws = Token::new(TokenKind::Ws, Span::EMPTY);
        ws.user = Some(" ".to_string());
        cx.list.insert_before(cx.current, ws)?;
    }

    Ok(())
}

/// Drops a semicolon that directly follows `{`, `}`, another semicolon or
/// the start of input.
pub(crate) fn elide_duplicate_semicolon(cx: &mut ModifyCx<'_>) {
    let redundant = match cx.list.prev_rendered(cx.current, cx.buf) {
        Some(prev) => matches!(
            cx.list.get(prev).kind,
            TokenKind::Semicolon | TokenKind::CurlyOpen | TokenKind::CurlyClose
        ),
        None => true,
    };
    if redundant {
        log::debug!(target: "mincss::min", "eliding redundant semicolon");
        cx.list.get_mut(cx.current).user = Some(String::new());
    }
}

/// Drops the semicolon terminating the last declaration before `}`.
pub(crate) fn elide_trailing_semicolon(cx: &mut ModifyCx<'_>) {
    if let Some(prev) = cx.list.prev_rendered(cx.current, cx.buf) {
        if cx.list.get(prev).kind == TokenKind::Semicolon {
            cx.list.get_mut(prev).user = Some(String::new());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joins_names_and_numbers() {
        assert!(joins(b'x', b'0')); // px 0 -> px0
        assert!(joins(b'0', b'0')); // 0 0 -> 00
        assert!(joins(b'a', b'b'));
        assert!(joins(b'0', b'.')); // 0 .5 -> 0.5
        assert!(joins(b'0', b'%'));
        assert!(joins(b'-', b'5'));
        assert!(joins(b'a', b'(')); // and ( -> and(
        assert!(joins(b'a', b'\\'));
    }

    #[test]
    fn test_joins_operators() {
        assert!(joins(b'$', b'='));
        assert!(joins(b'|', b'|'));
        assert!(joins(b'/', b'*'));
        assert!(joins(b'<', b'!'));
        assert!(joins(b'u', b'+'));
        assert!(joins(b'#', b'a'));
        assert!(joins(b'@', b'm'));
    }

    #[test]
    fn test_non_joining_pairs() {
        assert!(!joins(b'a', b'{'));
        assert!(!joins(b';', b'}'));
        assert!(!joins(b',', b'0'));
        assert!(!joins(b':', b'.'));
        assert!(!joins(b')', b'u'));
        assert!(!joins(b'"', b'"'));
        assert!(!joins(b'a', b'>'));
        assert!(!joins(b'>', b'a'));
    }
}
