//! Errors used throughout the crate.
//!
//! Parsing and engine failures are recoverable and carry enough context to be
//! shown to a user. Out-of-range square indices handed to the infallible
//! square helpers are programming errors and panic instead of landing here.

use std::io;

/// Unified error type for board, notation and engine operations.
#[derive(Debug, thiserror::Error)]
pub enum BoardLabError {
    /// The FEN text could not be decoded.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A coordinate such as `e4` or a move such as `e2e4` was malformed.
    #[error("invalid algebraic notation: {0}")]
    InvalidAlgebraic(String),

    /// A square index outside `0..=63` reached a fallible lookup.
    #[error("square index out of range: {0}")]
    SquareOutOfRange(u8),

    /// Reading from or writing to the external engine failed.
    #[error("engine I/O failed: {0}")]
    EngineIo(#[from] io::Error),

    /// The external engine is not running or not ready.
    #[error("engine unavailable: {0}")]
    EngineUnavailable(String),

    /// A configuration file or flag could not be used.
    #[error("configuration error: {0}")]
    Config(String),
}

pub type BoardLabResult<T> = Result<T, BoardLabError>;
