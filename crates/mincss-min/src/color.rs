//! Hash color shortening and color-name substitution.

use std::sync::OnceLock;

use mincss_lex::{ModifyCx, TokenFlag};
use mincss_util::FxHashMap;

/// Named colors that spell shorter than their hex form. Keys are the
/// lowercase minimal hex spelling (pair-shortened where possible).
fn color_names() -> &'static FxHashMap<&'static str, &'static str> {
    static NAMES: OnceLock<FxHashMap<&'static str, &'static str>> = OnceLock::new();
    NAMES.get_or_init(|| {
        [
            ("#f00", "red"),
            ("#d2b48c", "tan"),
            ("#f0ffff", "azure"),
            ("#f5f5dc", "beige"),
            ("#ffe4c4", "bisque"),
            ("#a52a2a", "brown"),
            ("#ff7f50", "coral"),
            ("#ffd700", "gold"),
            ("#808080", "gray"),
            ("#008000", "green"),
            ("#4b0082", "indigo"),
            ("#fffff0", "ivory"),
            ("#f0e68c", "khaki"),
            ("#faf0e6", "linen"),
            ("#800000", "maroon"),
            ("#000080", "navy"),
            ("#808000", "olive"),
            ("#ffa500", "orange"),
            ("#da70d6", "orchid"),
            ("#cd853f", "peru"),
            ("#ffc0cb", "pink"),
            ("#dda0dd", "plum"),
            ("#800080", "purple"),
            ("#fa8072", "salmon"),
            ("#a0522d", "sienna"),
            ("#c0c0c0", "silver"),
            ("#fffafa", "snow"),
            ("#008080", "teal"),
            ("#ff6347", "tomato"),
            ("#ee82ee", "violet"),
            ("#f5deb3", "wheat"),
        ]
        .into_iter()
        .collect()
    })
}

/// Pair-shortens `#aabbcc` to `#abc` and `#aabbccdd` to `#abcd`,
/// lowercasing the digits. Returns `None` when the pairs do not match or
/// the text is not a plain hex color.
pub(crate) fn shorten(text: &str) -> Option<String> {
    let hex = text.strip_prefix('#')?;
    if hex.len() != 6 && hex.len() != 8 {
        return None;
    }
    let lower = hex.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    if !bytes.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    if !bytes.chunks(2).all(|pair| pair[0] == pair[1]) {
        return None;
    }
    let mut out = String::with_capacity(1 + bytes.len() / 2);
    out.push('#');
    for pair in bytes.chunks(2) {
        out.push(pair[0] as char);
    }
    Some(out)
}

/// A color name strictly shorter than the given lowercase hex spelling.
pub(crate) fn name_for(hex: &str) -> Option<&'static str> {
    color_names()
        .get(hex)
        .copied()
        .filter(|name| name.len() < hex.len())
}

/// Rewrites the current hash token to its shortest color spelling.
///
/// Runs only in declaration-value position: a hash in selector position is
/// an ID selector and renaming it would change what it matches.
pub(crate) fn rewrite_hash(cx: &mut ModifyCx<'_>) {
    if !cx.ctxt.in_declaration() {
        return;
    }

    let token = cx.list.get(cx.current);
    let original = String::from_utf8_lossy(token.data.of(cx.buf)).into_owned();
    let mut text = original.clone();

    if token.flag == TokenFlag::Id {
        if let Some(short) = shorten(&text) {
            text = short;
        }
    }

    let lower = text.to_ascii_lowercase();
    if lower.as_bytes()[1..].iter().all(u8::is_ascii_hexdigit) {
        if let Some(name) = name_for(&lower) {
            text = name.to_string();
        }
    }

    if text != original {
        log::debug!(target: "mincss::min", "hash {} -> {}", original, text);
        cx.list.get_mut(cx.current).user = Some(text);
    }
}
