//! Numeric token trimming.

use std::sync::OnceLock;

use mincss_lex::classify::is_digit;
use mincss_lex::{ModifyCx, TokenFlag, TokenKind};
use mincss_util::{FxHashSet, Span};

/// Length units a zero value may drop without changing computed values.
/// Time, angle and frequency units, and `%`, keep their suffix.
fn droppable_units() -> &'static FxHashSet<&'static str> {
    static UNITS: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    UNITS.get_or_init(|| {
        [
            "px", "em", "rem", "vh", "vw", "pt", "pc", "in", "cm", "mm", "ex", "ch", "q",
        ]
        .into_iter()
        .collect()
    })
}

/// Rewrites the current numeric token to its shortest equivalent spelling.
pub(crate) fn trim(cx: &mut ModifyCx<'_>) {
    let token = cx.list.get(cx.current);
    let data = token.data.of(cx.buf);
    let suffix_len = match token.kind {
        TokenKind::Dimension => token.info.len(),
        TokenKind::Percentage => 1,
        _ => 0,
    };
    let (num, suffix) = data.split_at(data.len() - suffix_len);

    let minimized = minimize(num, suffix, token.kind);
    if minimized.as_bytes() != data {
        log::debug!(
            target: "mincss::min",
            "number {:?} -> {:?}",
            String::from_utf8_lossy(data),
            minimized,
        );
        let kind = token.kind;
        let token = cx.list.get_mut(cx.current);
        if kind == TokenKind::Dimension && minimized == "0" {
            // The unit is gone; the token re-tokenizes as a plain number.
            token.kind = TokenKind::Number;
            token.flag = TokenFlag::Integer;
            token.info = Span::EMPTY;
        }
        token.user = Some(minimized);
    }
}

/// Shortest spelling of `num` + `suffix`:
/// the `+` sign and leading integer zeros go, trailing fraction zeros and a
/// dangling decimal point go, and a zero value drops sign, exponent and -
/// for safe length units - the unit itself.
fn minimize(num: &[u8], suffix: &[u8], kind: TokenKind) -> String {
    let mut i = 0;
    let negative = match num.first() {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };

    let int_start = i;
    while i < num.len() && is_digit(num[i]) {
        i += 1;
    }
    let int_part = &num[int_start..i];

    let frac_part = if num.get(i) == Some(&b'.') {
        let start = i + 1;
        i = start;
        while i < num.len() && is_digit(num[i]) {
            i += 1;
        }
        &num[start..i]
    } else {
        &[][..]
    };

    // Exponent (and anything else) verbatim from here on.
    let exponent = &num[i..];

    let int_trimmed = {
        let nz = int_part.iter().position(|&b| b != b'0');
        nz.map(|p| &int_part[p..]).unwrap_or(&[])
    };
    let frac_trimmed = {
        let nz = frac_part.iter().rposition(|&b| b != b'0');
        nz.map(|p| &frac_part[..=p]).unwrap_or(&[])
    };

    if int_trimmed.is_empty() && frac_trimmed.is_empty() {
        // Zero: one digit, no sign, no exponent.
        let unit = String::from_utf8_lossy(suffix).to_ascii_lowercase();
        if kind == TokenKind::Dimension && droppable_units().contains(unit.as_str()) {
            return "0".to_string();
        }
        let mut out = String::with_capacity(1 + suffix.len());
        out.push('0');
        out.push_str(&String::from_utf8_lossy(suffix));
        return out;
    }

    let mut out = String::with_capacity(num.len() + suffix.len());
    if negative {
        out.push('-');
    }
    out.push_str(&String::from_utf8_lossy(int_trimmed));
    if !frac_trimmed.is_empty() {
        out.push('.');
        out.push_str(&String::from_utf8_lossy(frac_trimmed));
    }
    out.push_str(&String::from_utf8_lossy(exponent));
    out.push_str(&String::from_utf8_lossy(suffix));
    out
}
