//! Hash functions behind a trait.
//!
//! The digest component never calls a hash function directly; it goes through
//! a [`ContentHasher`] supplied to the [`IdGenerator`](crate::IdGenerator).
//! SHA-256 is the default and the one every persisted digest and identifier
//! uses.
//!
//! **Why SHA-256 by default?**
//! - Every language and platform ships it, so other implementations can
//!   reproduce identifiers without extra dependencies
//! - Hardware acceleration is common (Intel SHA-NI, ARM SHA)

use std::sync::Arc;

use sha2::{Digest as _, Sha256};

/// A stateless 256-bit hash function.
pub trait ContentHasher: Send + Sync {
    /// Short algorithm name, e.g. `"sha256"`.
    fn algorithm(&self) -> &'static str;

    /// Hash `data` to 32 bytes.
    fn hash(&self, data: &[u8]) -> [u8; 32];
}

/// SHA-256 (FIPS 180-4).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hasher;

impl ContentHasher for Sha256Hasher {
    fn algorithm(&self) -> &'static str {
        "sha256"
    }

    fn hash(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }
}

/// BLAKE3 with 256-bit output.
///
/// Digests from this hasher are not interchangeable with the SHA-256 ones;
/// only use it where every reader agrees on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake3Hasher;

impl ContentHasher for Blake3Hasher {
    fn algorithm(&self) -> &'static str {
        "blake3"
    }

    fn hash(&self, data: &[u8]) -> [u8; 32] {
        *blake3::hash(data).as_bytes()
    }
}

impl<H: ContentHasher + ?Sized> ContentHasher for &H {
    fn algorithm(&self) -> &'static str {
        (**self).algorithm()
    }

    fn hash(&self, data: &[u8]) -> [u8; 32] {
        (**self).hash(data)
    }
}

impl<H: ContentHasher + ?Sized> ContentHasher for Arc<H> {
    fn algorithm(&self) -> &'static str {
        (**self).algorithm()
    }

    fn hash(&self, data: &[u8]) -> [u8; 32] {
        (**self).hash(data)
    }
}
