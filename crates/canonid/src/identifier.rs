//! Content-derived identifiers.
//!
//! An identifier is `<prefix>_<hex>`: a caller-chosen category tag, an
//! underscore, and the first 32 lowercase hex characters (128 bits) of the
//! value's digest. The prefix alphabet excludes `_`, so the last underscore
//! always splits an identifier unambiguously.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use canonid_core::Value;

use crate::error::{IdentifierError, PrefixError, Result};
use crate::generator::IdGenerator;

/// Hex characters kept from the digest.
pub const ID_HEX_LEN: usize = 32;

/// Maximum prefix length in characters.
pub const MAX_PREFIX_LEN: usize = 32;

/// Separator between prefix and digest.
pub const SEPARATOR: char = '_';

/// Check that `prefix` is 1 to 32 characters of `[a-z0-9-]`, starting with
/// `[a-z]`.
pub fn validate_prefix(prefix: &str) -> std::result::Result<(), PrefixError> {
    let mut chars = prefix.chars();
    let first = chars.next().ok_or(PrefixError::Empty)?;

    let len = prefix.chars().count();
    if len > MAX_PREFIX_LEN {
        return Err(PrefixError::TooLong {
            len,
            max: MAX_PREFIX_LEN,
        });
    }
    if !first.is_ascii_lowercase() {
        return Err(PrefixError::InvalidStart(first));
    }
    for (i, ch) in chars.enumerate() {
        if !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-') {
            return Err(PrefixError::InvalidChar {
                ch,
                position: i + 1,
            });
        }
    }
    Ok(())
}

/// A validated `<prefix>_<32 hex>` identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Parse and validate an identifier string.
    pub fn parse(s: &str) -> std::result::Result<Self, IdentifierError> {
        let (prefix, hex) = s
            .rsplit_once(SEPARATOR)
            .ok_or(IdentifierError::MissingSeparator)?;
        validate_prefix(prefix)?;
        if hex.len() != ID_HEX_LEN || !hex.bytes().all(is_lower_hex) {
            return Err(IdentifierError::InvalidDigest(hex.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Assemble from a validated prefix and a full digest hex string.
    pub(crate) fn from_parts(prefix: &str, digest_hex: &str) -> Self {
        let mut s = String::with_capacity(prefix.len() + 1 + ID_HEX_LEN);
        s.push_str(prefix);
        s.push(SEPARATOR);
        s.push_str(&digest_hex[..ID_HEX_LEN]);
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The category tag before the separator.
    pub fn prefix(&self) -> &str {
        &self.0[..self.0.len() - ID_HEX_LEN - 1]
    }

    /// The 32 hex characters after the separator.
    pub fn digest_hex(&self) -> &str {
        &self.0[self.0.len() - ID_HEX_LEN..]
    }

    /// Whether `value` would be assigned this identifier under SHA-256.
    pub fn matches(&self, value: &Value) -> Result<bool> {
        let id = IdGenerator::new().identifier(self.prefix(), value)?;
        Ok(&id == self)
    }
}

fn is_lower_hex(b: u8) -> bool {
    b.is_ascii_digit() || (b'a'..=b'f').contains(&b)
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// SHA-256 identifier for `value` under `prefix`.
///
/// # Example
///
/// ```
/// use canonid::{identifier, Value};
///
/// let id = identifier("cred", &Value::from("alice")).unwrap();
/// assert_eq!(id.as_str(), "cred_0a50500b2a3435fe7472877eb22d48d4");
/// ```
pub fn identifier(prefix: &str, value: &Value) -> Result<Identifier> {
    IdGenerator::new().identifier(prefix, value)
}
