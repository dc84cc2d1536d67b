//! The digest and identifier generator.

use canonid_core::{canonicalize_with, CanonicalConfig, Value};

use crate::digest::Digest;
use crate::error::Result;
use crate::hasher::{ContentHasher, Sha256Hasher};
use crate::identifier::{validate_prefix, Identifier};

/// Configuration for an [`IdGenerator`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// Limits applied while canonicalizing.
    pub canonical: CanonicalConfig,
}

/// Derives digests and identifiers from values with an injected hasher.
///
/// Stateless apart from its configuration; one generator may be shared by any
/// number of threads.
///
/// ```
/// use canonid::{Blake3Hasher, IdGenerator, Value};
///
/// let sha = IdGenerator::new();
/// let blake = IdGenerator::with_hasher(Blake3Hasher);
/// let v = Value::object([("holder", "alice")]);
///
/// assert_ne!(sha.digest(&v).unwrap(), blake.digest(&v).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct IdGenerator<H = Sha256Hasher> {
    hasher: H,
    config: GeneratorConfig,
}

impl IdGenerator<Sha256Hasher> {
    /// A SHA-256 generator with default configuration.
    pub fn new() -> Self {
        Self::with_hasher(Sha256Hasher)
    }
}

impl Default for IdGenerator<Sha256Hasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ContentHasher> IdGenerator<H> {
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_config(hasher, GeneratorConfig::default())
    }

    pub fn with_config(hasher: H, config: GeneratorConfig) -> Self {
        Self { hasher, config }
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Canonical form of `value` under this generator's limits.
    pub fn canonicalize(&self, value: &Value) -> Result<String> {
        Ok(canonicalize_with(value, &self.config.canonical)?)
    }

    pub fn digest(&self, value: &Value) -> Result<Digest> {
        let canonical = self.canonicalize(value)?;
        Ok(self.digest_canonical(&canonical))
    }

    /// Hash text that is already in canonical form.
    pub fn digest_canonical(&self, canonical: &str) -> Digest {
        Digest::from_bytes(self.hasher.hash(canonical.as_bytes()))
    }

    /// `prefix` + `_` + the first 32 hex characters of the digest.
    ///
    /// The prefix is validated before the value is encoded.
    pub fn identifier(&self, prefix: &str, value: &Value) -> Result<Identifier> {
        validate_prefix(prefix)?;
        let digest = self.digest(value)?;
        let id = Identifier::from_parts(prefix, &digest.to_hex());
        tracing::trace!(
            algorithm = self.hasher.algorithm(),
            id = %id,
            "derived identifier"
        );
        Ok(id)
    }

    pub fn verify(&self, value: &Value, expected: &Digest) -> Result<bool> {
        Ok(self.digest(value)? == *expected)
    }

    pub fn same_content(&self, a: &Value, b: &Value) -> Result<bool> {
        Ok(self.digest(a)? == self.digest(b)?)
    }
}
