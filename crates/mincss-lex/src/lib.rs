//! mincss-lex - Streaming CSS tokenizer.
//!
//! This crate turns a CSS source buffer into a doubly-linked sequence of
//! classified tokens whose concatenated raw text reproduces the
//! (preprocessed) input. It follows the tokenization algorithm of CSS Syntax
//! Module Level 3:
//!
//! - the preprocessing [`Cursor`] normalizes newlines, replaces U+0000 and
//!   keeps a five-character look-ahead window ahead of the read position;
//! - one filler routine per token family consumes characters and produces a
//!   [`Token`] backed by byte spans into the working buffer;
//! - every emitted token updates a [`ContextStack`] describing the structural
//!   position (block, at-rule prelude, declaration, parenthesized group);
//! - a registered [`Modifier`] observes each emission and may rewrite the
//!   token stream in place, which is how the minifier in `mincss-min` hooks
//!   in.
//!
//! Malformed CSS never fails tokenization; it produces `BadString`/`BadUrl`
//! or `Delim` tokens and the stream always ends with a single `Eof` token.

pub mod classify;
mod context;
mod cursor;
mod edge_cases;
mod modifier;
mod token;
mod tokenizer;

pub use context::{ContextStack, Frame};
pub use cursor::Cursor;
pub use modifier::{Modifier, ModifyCx};
pub use token::{DumpMode, Ids, Token, TokenFlag, TokenId, TokenKind, TokenList};
pub use tokenizer::Tokenizer;

pub use mincss_util::{Error, Result, Span};
