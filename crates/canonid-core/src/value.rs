//! The value model.
//!
//! [`Value`] is a closed tagged union. Containers are shared handles (see
//! [`crate::container`]), so `Value::clone` is shallow: it copies the handle,
//! not the graph. Use [`Value::deep_clone`] for an independent copy.

use std::collections::HashSet;

use crate::canonical;
use crate::container::{Mapping, Sequence};
use crate::error::EncodingError;
use crate::immutable;
use crate::number::Number;

/// A structured value.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Sequence),
    Object(Mapping),
}

impl Value {
    /// Build an object from key/value pairs.
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(entries.into_iter().collect())
    }

    /// Build an array from items.
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(items.into_iter().collect())
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Sequence> {
        match self {
            Value::Array(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Mapping> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Whether this value itself is immutable.
    ///
    /// Primitives always are. For containers this checks only the top-level
    /// seal; see [`immutable::is_deeply_frozen`] for the whole graph.
    pub fn is_frozen(&self) -> bool {
        match self {
            Value::Array(seq) => seq.is_frozen(),
            Value::Object(map) => map.is_frozen(),
            _ => true,
        }
    }

    /// Seal this value and everything reachable from it. See [`immutable::freeze`].
    pub fn freeze(self) -> Self {
        immutable::freeze(self)
    }

    /// Independent, mutable deep copy. See [`immutable::deep_clone`].
    pub fn deep_clone(&self) -> Self {
        immutable::deep_clone(self)
    }

    /// Canonical string of this value. See [`canonical::canonicalize`].
    pub fn canonical(&self) -> Result<String, EncodingError> {
        canonical::canonicalize(self)
    }
}

/// Structural equality.
///
/// Mapping insertion order is ignored and numbers compare by canonical text.
/// Cyclic graphs compare by bisimulation: a pair of containers already under
/// comparison is assumed equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        Equality::default().values(self, other)
    }
}

pub(crate) fn sequences_equal(a: &Sequence, b: &Sequence) -> bool {
    Equality::default().values(&Value::Array(a.clone()), &Value::Array(b.clone()))
}

pub(crate) fn mappings_equal(a: &Mapping, b: &Mapping) -> bool {
    Equality::default().values(&Value::Object(a.clone()), &Value::Object(b.clone()))
}

/// Worklist comparison; nesting depth never reaches the call stack.
#[derive(Default)]
struct Equality {
    assumed: HashSet<(usize, usize)>,
    pending: Vec<(Value, Value)>,
}

impl Equality {
    fn values(&mut self, a: &Value, b: &Value) -> bool {
        self.pending.push((a.clone(), b.clone()));
        while let Some((a, b)) = self.pending.pop() {
            let same = match (&a, &b) {
                (Value::Null, Value::Null) => true,
                (Value::Bool(x), Value::Bool(y)) => x == y,
                (Value::Number(x), Value::Number(y)) => x == y,
                (Value::String(x), Value::String(y)) => x == y,
                (Value::Array(x), Value::Array(y)) => self.sequences(x, y),
                (Value::Object(x), Value::Object(y)) => self.mappings(x, y),
                _ => false,
            };
            if !same {
                return false;
            }
        }
        true
    }

    /// Queue the items of two sequences. `false` on a length mismatch.
    fn sequences(&mut self, a: &Sequence, b: &Sequence) -> bool {
        if a.ptr_eq(b) || !self.assumed.insert((a.identity(), b.identity())) {
            return true;
        }
        let (xs, ys) = (a.to_vec(), b.to_vec());
        if xs.len() != ys.len() {
            return false;
        }
        self.pending.extend(xs.into_iter().zip(ys));
        true
    }

    /// Queue the values of two mappings by key. `false` on a key mismatch.
    fn mappings(&mut self, a: &Mapping, b: &Mapping) -> bool {
        if a.ptr_eq(b) || !self.assumed.insert((a.identity(), b.identity())) {
            return true;
        }
        let entries = a.entries();
        if entries.len() != b.len() {
            return false;
        }
        for (key, x) in entries {
            match b.get(&key) {
                Some(y) => self.pending.push((x, y)),
                None => return false,
            }
        }
        true
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_number {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Number(Number::from(n))
            }
        })*
    };
}

from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Sequence> for Value {
    fn from(seq: Sequence) -> Self {
        Value::Array(seq)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Object(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::array(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}
