//! Canonical JSON encoding for deterministic hashing.
//!
//! Rules:
//! - No whitespace anywhere
//! - Object keys sorted by code point (ordinal, never locale collation)
//! - Array order preserved
//! - Numbers per [`crate::number`]; NaN and infinities rejected
//! - Strings escaped like `JSON.stringify`: `\"`, `\\`, `\b`, `\t`, `\n`,
//!   `\f`, `\r`, other controls as `\u00xx`; everything else raw UTF-8
//! - A container reachable from itself is rejected, never truncated
//!
//! **CRITICAL**: This encoding is FROZEN. Any change alters every digest and
//! identifier derived from it.

use std::collections::HashSet;

use crate::error::EncodingError;
use crate::value::Value;

/// Default limit on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Options for the canonical encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalConfig {
    /// Maximum number of nested containers on any path.
    pub max_depth: usize,
}

impl Default for CanonicalConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Encode a value to its canonical string.
pub fn canonicalize(value: &Value) -> Result<String, EncodingError> {
    canonicalize_with(value, &CanonicalConfig::default())
}

/// Encode a value to its canonical UTF-8 bytes.
pub fn canonical_bytes(value: &Value) -> Result<Vec<u8>, EncodingError> {
    canonicalize(value).map(String::into_bytes)
}

/// Encode a value to its canonical string with explicit options.
pub fn canonicalize_with(value: &Value, config: &CanonicalConfig) -> Result<String, EncodingError> {
    let mut encoder = Encoder::new(config.max_depth);
    if let Err(e) = encoder.value(value) {
        tracing::debug!(error = %e, kind = value.kind(), "value rejected by canonical encoder");
        return Err(e);
    }
    Ok(encoder.out)
}

/// Depth-first encoder tracking the containers on the current path.
struct Encoder {
    out: String,
    path: HashSet<usize>,
    max_depth: usize,
}

impl Encoder {
    fn new(max_depth: usize) -> Self {
        Self {
            out: String::new(),
            path: HashSet::new(),
            max_depth,
        }
    }

    fn value(&mut self, value: &Value) -> Result<(), EncodingError> {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(true) => self.out.push_str("true"),
            Value::Bool(false) => self.out.push_str("false"),
            Value::Number(n) => n.write_canonical(&mut self.out)?,
            Value::String(s) => encode_string(&mut self.out, s)?,
            Value::Array(seq) => {
                self.enter(seq.identity())?;
                let items = seq.to_vec();
                self.out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.value(item)?;
                }
                self.out.push(']');
                self.leave(seq.identity());
            }
            Value::Object(map) => {
                self.enter(map.identity())?;
                let mut entries = map.entries();
                // str ordering is UTF-8 byte order, which is code point order.
                entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
                self.out.push('{');
                for (i, (key, item)) in entries.iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    encode_string(&mut self.out, key)?;
                    self.out.push(':');
                    self.value(item)?;
                }
                self.out.push('}');
                self.leave(map.identity());
            }
        }
        Ok(())
    }

    fn enter(&mut self, identity: usize) -> Result<(), EncodingError> {
        if self.path.len() >= self.max_depth {
            return Err(EncodingError::DepthExceeded(self.max_depth));
        }
        if !self.path.insert(identity) {
            return Err(EncodingError::Cycle);
        }
        Ok(())
    }

    fn leave(&mut self, identity: usize) {
        self.path.remove(&identity);
    }
}

/// Encode a JSON string literal. serde_json's escaping matches `JSON.stringify`.
fn encode_string(out: &mut String, s: &str) -> Result<(), EncodingError> {
    let quoted =
        serde_json::to_string(s).map_err(|e| EncodingError::Unsupported(e.to_string()))?;
    out.push_str(&quoted);
    Ok(())
}
