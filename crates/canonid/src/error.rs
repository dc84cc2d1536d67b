//! Error types for identifier generation.

use canonid_core::EncodingError;
use thiserror::Error;

/// An identifier prefix outside the allowed character set.
///
/// Prefixes are 1 to 32 characters: an ASCII lowercase letter followed by
/// ASCII lowercase letters, digits or `-`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefixError {
    #[error("prefix is empty")]
    Empty,

    #[error("prefix is {len} characters, maximum is {max}")]
    TooLong { len: usize, max: usize },

    #[error("prefix must start with a lowercase ASCII letter, found {0:?}")]
    InvalidStart(char),

    #[error("invalid prefix character {ch:?} at position {position}")]
    InvalidChar { ch: char, position: usize },
}

/// A string that does not match `<prefix>_<32 lowercase hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier has no '_' separator")]
    MissingSeparator,

    #[error("invalid identifier prefix: {0}")]
    Prefix(#[from] PrefixError),

    #[error("identifier digest must be 32 lowercase hex characters, got {0:?}")]
    InvalidDigest(String),
}

/// Errors that can occur while canonicalizing, hashing or naming a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Prefix(#[from] PrefixError),

    #[error(transparent)]
    Identifier(#[from] IdentifierError),
}

/// Result type for canonid operations.
pub type Result<T> = std::result::Result<T, Error>;
