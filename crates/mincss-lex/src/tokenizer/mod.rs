//! Tokenizer module.
//!
//! The tokenizer is split into focused components:
//! - `core` - the `Tokenizer` struct, dispatch and token emission
//! - `escape` - escape and name consumers shared by several fillers
//! - `string` - string tokens
//! - `number` - number, percentage and dimension tokens
//! - `ident` - ident-like, at-keyword, hash and unicode-range tokens
//! - `url` - url tokens (quoted and unquoted)
//! - `comment` - comment tokens

mod comment;
mod core;
mod escape;
mod ident;
mod number;
mod string;
mod url;

pub use self::core::Tokenizer;
