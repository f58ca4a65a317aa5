//! Core error types for the mincss pipeline.

use std::collections::TryReserveError;

use thiserror::Error;

/// Resource-level failures of the engine.
///
/// CSS-level problems are not errors: a malformed string or url produces a
/// `BadString`/`BadUrl` token and tokenization continues to the end of the
/// input. Only the two conditions below abort a run.
#[derive(Debug, Error)]
pub enum Error {
    /// A buffer or the token arena could not grow.
    #[error("out of memory while growing an internal buffer")]
    OutOfMemory,

    /// `tokenize` was called before any input was installed.
    #[error("no input installed")]
    NullInput,
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::OutOfMemory
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
