//! # canonid
//!
//! Deterministic content addressing for in-memory records: canonical
//! encoding, content digests, content-derived identifiers, and freezing.
//!
//! ## Overview
//!
//! - **Canonical form**: whitespace-free JSON with keys sorted by code point,
//!   so logically equal values always produce the same bytes
//! - **Digest**: SHA-256 over the canonical bytes, as 64 lowercase hex
//! - **Identifier**: `<prefix>_<first 32 hex of the digest>`
//! - **Freeze**: seals a value graph so the hashed content can never drift
//!
//! ## Usage
//!
//! ```rust
//! use canonid::{canonicalize, digest, freeze, identifier, Value};
//!
//! let record = Value::object([("b", 2), ("a", 1)]);
//! assert_eq!(canonicalize(&record).unwrap(), r#"{"a":1,"b":2}"#);
//!
//! let id = identifier("rec", &record).unwrap();
//! assert_eq!(id.prefix(), "rec");
//! assert_eq!(id.digest_hex(), &digest(&record).unwrap().to_hex()[..32]);
//!
//! let record = freeze(record);
//! assert!(record.as_object().unwrap().insert("c", Value::from(3)).is_err());
//! ```
//!
//! ## Re-exports
//!
//! - `canonid::core` - value model, canonical encoder, freezing

pub mod digest;
pub mod error;
pub mod generator;
pub mod hasher;
pub mod identifier;

pub use canonid_core as core;

pub use digest::{digest, same_content, verify, Digest, DIGEST_HEX_LEN};
pub use error::{Error, IdentifierError, PrefixError, Result};
pub use generator::{GeneratorConfig, IdGenerator};
pub use hasher::{Blake3Hasher, ContentHasher, Sha256Hasher};
pub use identifier::{
    identifier, validate_prefix, Identifier, ID_HEX_LEN, MAX_PREFIX_LEN, SEPARATOR,
};

pub use canonid_core::{
    canonical_bytes, canonicalize, canonicalize_with, deep_clone, freeze, is_deeply_frozen,
    CanonicalConfig, EncodingError, Mapping, MutationError, Number, Sequence, Value,
};
