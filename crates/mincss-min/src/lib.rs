//! mincss-min - Built-in CSS minifier.
//!
//! The minifier is a [`Modifier`] installed into the tokenizer; it rewrites
//! the token stream as tokens are emitted and never destroys information it
//! cannot prove redundant: when a precondition of a rewrite fails, the
//! original tokens stay untouched and serialize as they were.
//!
//! Rewrites, in the order they apply to each emission:
//!
//! - comments are elided, except bang comments (`/*! .. */`);
//! - whitespace runs collapse to at most one space, kept only where removing
//!   it would merge the neighbouring tokens on a re-parse;
//! - numeric tokens are trimmed (`+.50px` → `.5px`, `0px` → `0`);
//! - hash colors in value position shorten (`#aabbcc` → `#abc`) and fall
//!   back to a shorter color name when one exists (`#ff0000` → `red`);
//! - at the end of each declaration, `rgb()`/`rgba()` calls with legacy
//!   comma arguments collapse to a hash color;
//! - the semicolon closing the last declaration of a block is dropped, as
//!   are duplicated semicolons.

mod color;
mod function;
mod number;
mod trivia;

use mincss_lex::{DumpMode, Modifier, ModifyCx, TokenKind, Tokenizer};
use mincss_util::Result;

/// The built-in minifying modifier.
#[derive(Default)]
pub struct Minifier;

impl Minifier {
    pub fn new() -> Self {
        Minifier
    }
}

impl Modifier for Minifier {
    fn on_token(&mut self, cx: &mut ModifyCx<'_>) -> Result<()> {
        let kind = cx.list.get(cx.current).kind;

        match kind {
            TokenKind::Comment => trivia::elide_comment(cx),
            TokenKind::Number | TokenKind::Percentage | TokenKind::Dimension => number::trim(cx),
            TokenKind::Hash => color::rewrite_hash(cx),
            _ => {}
        }

        if !kind.is_trivia() {
            trivia::settle_run(cx)?;
        }

        match kind {
            TokenKind::Semicolon => {
                function::collapse_declaration(cx)?;
                trivia::elide_duplicate_semicolon(cx);
            }
            TokenKind::CurlyClose => {
                function::collapse_declaration(cx)?;
                trivia::elide_trailing_semicolon(cx);
            }
            TokenKind::Eof => function::collapse_declaration(cx)?,
            _ => {}
        }

        Ok(())
    }
}

/// Minifies a stylesheet.
pub fn minify(css: &str) -> Result<String> {
    let mut tokenizer = Tokenizer::new();
    tokenizer.set_input(css.as_bytes().to_vec());
    tokenizer.set_modifier(Box::new(Minifier::new()));
    tokenizer.tokenize()?;
    Ok(String::from_utf8_lossy(&tokenizer.dump(DumpMode::Minify)).into_owned())
}

/// Tokenizes and re-serializes a stylesheet without rewrites; the output is
/// the input after stream preprocessing (newline normalization, U+0000
/// replacement).
pub fn preserve(css: &str) -> Result<String> {
    let mut tokenizer = Tokenizer::new();
    tokenizer.set_input(css.as_bytes().to_vec());
    tokenizer.tokenize()?;
    Ok(String::from_utf8_lossy(&tokenizer.dump(DumpMode::Preserve)).into_owned())
}
