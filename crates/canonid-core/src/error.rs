//! Error types for canonid core.

use thiserror::Error;

/// Errors raised when a value cannot be put into canonical form.
///
/// Canonicalization is deterministic, so none of these are retryable: the
/// same input fails the same way every time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodingError {
    #[error("encoding error: non-finite number {0}")]
    NonFiniteNumber(f64),

    #[error("encoding error: cycle")]
    Cycle,

    #[error("encoding error: nesting depth exceeds limit of {0}")]
    DepthExceeded(usize),

    #[error("encoding error: unsupported value: {0}")]
    Unsupported(String),

    #[error("encoding error: invalid JSON: {0}")]
    InvalidJson(String),
}

/// Errors raised by mutating accessors on containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("container is frozen")]
    Frozen,

    #[error("index {index} out of bounds for sequence of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}
