//! # canonid core
//!
//! Pure primitives for canonid: the value model, canonical encoding, and
//! freezing.
//!
//! This crate contains no I/O and no hashing. It is pure computation over
//! value graphs.
//!
//! ## Key Types
//!
//! - [`Value`] - Closed tagged union over null, bool, number, string, array, object
//! - [`Number`] - Integer or finite floating-point number
//! - [`Sequence`] / [`Mapping`] - Shared container handles with a sealed flag
//!
//! ## Canonicalization
//!
//! All values are encoded as whitespace-free JSON with ordinally sorted keys.
//! See the [`canonical`] module.
//!
//! ## Immutability
//!
//! [`freeze`] seals a value graph in place; [`deep_clone`] derives a new,
//! independently mutable copy. See the [`immutable`] module.

pub mod canonical;
pub mod container;
pub mod convert;
pub mod error;
pub mod immutable;
pub mod number;
pub mod value;

pub use canonical::{canonical_bytes, canonicalize, canonicalize_with, CanonicalConfig};
pub use container::{Mapping, Sequence};
pub use error::{EncodingError, MutationError};
pub use immutable::{deep_clone, freeze, is_deeply_frozen};
pub use number::Number;
pub use value::Value;
