//! mincss-util - Foundation types shared across the mincss pipeline.
//!
//! This crate holds the small building blocks the tokenizer and the minifier
//! both depend on: the error type, byte spans into the working buffer, and
//! the typed-index vector used by the token arena.

mod error;
mod index;
mod span;

pub use error::{Error, Result};
pub use index::{Idx, IndexVec};
pub use span::Span;

// Re-export commonly used collection types
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
