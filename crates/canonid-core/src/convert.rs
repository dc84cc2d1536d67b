//! Conversions between [`Value`] and `serde_json`.
//!
//! Inbound conversions are checked at the boundary: JSON text that does not
//! parse and numbers that fit none of the [`Number`] variants are rejected with
//! [`EncodingError`]. Outbound conversion detects cycles and non-finite numbers.

use std::collections::HashSet;

use serde_json::Value as Json;

use crate::canonical::CanonicalConfig;
use crate::error::EncodingError;
use crate::number::Number;
use crate::value::Value;

impl Value {
    /// Parse JSON text into a fresh, mutable value.
    pub fn parse_json(text: &str) -> Result<Self, EncodingError> {
        let json: Json =
            serde_json::from_str(text).map_err(|e| EncodingError::InvalidJson(e.to_string()))?;
        Value::try_from(json)
    }

    /// Convert to a `serde_json::Value` under the default nesting limit, the
    /// same one [`canonicalize`](crate::canonicalize) applies.
    pub fn to_json(&self) -> Result<Json, EncodingError> {
        self.to_json_with(&CanonicalConfig::default())
    }

    /// Convert to a `serde_json::Value` under `config`'s nesting limit.
    pub fn to_json_with(&self, config: &CanonicalConfig) -> Result<Json, EncodingError> {
        JsonBuilder {
            path: HashSet::new(),
            max_depth: config.max_depth,
        }
        .value(self)
    }
}

impl TryFrom<Json> for Value {
    type Error = EncodingError;

    fn try_from(json: Json) -> Result<Self, Self::Error> {
        Ok(match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(number_from_json(&n)?),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>, _>>()?
                    .into_iter()
                    .collect(),
            ),
            Json::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| Ok((k, Value::try_from(v)?)))
                    .collect::<Result<Vec<(String, Value)>, EncodingError>>()?
                    .into_iter()
                    .collect(),
            ),
        })
    }
}

impl TryFrom<&Value> for Json {
    type Error = EncodingError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.to_json()
    }
}

fn number_from_json(n: &serde_json::Number) -> Result<Number, EncodingError> {
    if let Some(i) = n.as_i64() {
        Ok(Number::Int(i))
    } else if let Some(u) = n.as_u64() {
        Ok(Number::UInt(u))
    } else if let Some(f) = n.as_f64() {
        Ok(Number::Float(f))
    } else {
        Err(EncodingError::Unsupported(format!("number {}", n)))
    }
}

fn number_to_json(n: &Number) -> Result<serde_json::Number, EncodingError> {
    match n {
        Number::Int(i) => Ok((*i).into()),
        Number::UInt(u) => Ok((*u).into()),
        Number::Float(f) => {
            serde_json::Number::from_f64(*f).ok_or(EncodingError::NonFiniteNumber(*f))
        }
    }
}

struct JsonBuilder {
    path: HashSet<usize>,
    max_depth: usize,
}

impl JsonBuilder {
    fn value(&mut self, value: &Value) -> Result<Json, EncodingError> {
        Ok(match value {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => Json::Number(number_to_json(n)?),
            Value::String(s) => Json::String(s.clone()),
            Value::Array(seq) => {
                self.enter(seq.identity())?;
                let items = seq
                    .to_vec()
                    .iter()
                    .map(|item| self.value(item))
                    .collect::<Result<Vec<_>, _>>()?;
                self.path.remove(&seq.identity());
                Json::Array(items)
            }
            Value::Object(map) => {
                self.enter(map.identity())?;
                let mut out = serde_json::Map::new();
                for (key, item) in map.entries() {
                    out.insert(key, self.value(&item)?);
                }
                self.path.remove(&map.identity());
                Json::Object(out)
            }
        })
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
}
