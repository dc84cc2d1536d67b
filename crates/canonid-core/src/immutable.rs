//! Freezing and deep cloning of value graphs.
//!
//! A record store freezes a value as soon as it accepts it, so the bytes that
//! were hashed can never drift from what is later read back. Deriving the next
//! version of a record goes through [`deep_clone`], which yields an
//! independent, mutable copy.
//!
//! Both walks are iterative and keyed by container identity, so cycles and
//! very deep graphs terminate without growing the call stack.

use std::collections::{HashMap, HashSet};

use crate::container::{Mapping, Sequence};
use crate::value::Value;

/// Seal `value` and every container reachable from it, then return it.
///
/// The returned value is the same handle. Any mutation through it, or through
/// any handle obtained earlier, fails with
/// [`MutationError::Frozen`](crate::MutationError::Frozen) and leaves content
/// unchanged. Freezing never changes observable content.
pub fn freeze(value: Value) -> Value {
    let mut visited = HashSet::new();
    let mut stack = vec![value.clone()];
    let mut newly_sealed = 0usize;

    while let Some(current) = stack.pop() {
        match current {
            Value::Array(seq) => {
                if !visited.insert(seq.identity()) {
                    continue;
                }
                // Seal before reading, so the children we walk are final.
                if seq.seal() {
                    newly_sealed += 1;
                }
                stack.extend(seq.to_vec().into_iter().filter(is_container));
            }
            Value::Object(map) => {
                if !visited.insert(map.identity()) {
                    continue;
                }
                if map.seal() {
                    newly_sealed += 1;
                }
                stack.extend(
                    map.entries()
                        .into_iter()
                        .map(|(_, v)| v)
                        .filter(is_container),
                );
            }
            _ => {}
        }
    }

    tracing::debug!(
        containers = visited.len(),
        newly_sealed,
        "froze value graph"
    );
    value
}

/// Whether every container reachable from `value` is sealed.
pub fn is_deeply_frozen(value: &Value) -> bool {
    let mut visited = HashSet::new();
    let mut stack = vec![value.clone()];

    while let Some(current) = stack.pop() {
        match current {
            Value::Array(seq) => {
                if !visited.insert(seq.identity()) {
                    continue;
                }
                if !seq.is_frozen() {
                    return false;
                }
                stack.extend(seq.to_vec().into_iter().filter(is_container));
            }
            Value::Object(map) => {
                if !visited.insert(map.identity()) {
                    continue;
                }
                if !map.is_frozen() {
                    return false;
                }
                stack.extend(
                    map.entries()
                        .into_iter()
                        .map(|(_, v)| v)
                        .filter(is_container),
                );
            }
            _ => {}
        }
    }
    true
}

/// Produce a fully independent, mutable deep copy of `value`.
///
/// Primitives are copied as-is. Every container is rebuilt; none of the
/// copy's containers is shared with the source, and none is sealed, even when
/// the source is frozen. Aliasing inside the source (the same container
/// reachable twice, including cycles) is reproduced inside the copy.
pub fn deep_clone(value: &Value) -> Value {
    let mut cloner = Cloner::default();
    let root = cloner.shell(value);

    while let Some((source, target)) = cloner.pending.pop() {
        match (source, target) {
            (Value::Array(src), Value::Array(dst)) => {
                let items = src.to_vec().iter().map(|item| cloner.shell(item)).collect();
                dst.fill(items);
            }
            (Value::Object(src), Value::Object(dst)) => {
                let entries = src
                    .entries()
                    .into_iter()
                    .map(|(key, item)| {
                        let copy = cloner.shell(&item);
                        (key, copy)
                    })
                    .collect();
                dst.fill(entries);
            }
            _ => {}
        }
    }
    root
}

/// Memo of source container identity to its (possibly unfilled) copy.
#[derive(Default)]
struct Cloner {
    copies: HashMap<usize, Value>,
    pending: Vec<(Value, Value)>,
}

impl Cloner {
    /// Copy a primitive, or return the empty copy of a container and queue it
    /// for filling the first time it is seen.
    fn shell(&mut self, source: &Value) -> Value {
        let (identity, empty) = match source {
            Value::Array(seq) => (seq.identity(), Value::Array(Sequence::new())),
            Value::Object(map) => (map.identity(), Value::Object(Mapping::new())),
            primitive => return primitive.clone(),
        };
        if let Some(copy) = self.copies.get(&identity) {
            return copy.clone();
        }
        self.copies.insert(identity, empty.clone());
        self.pending.push((source.clone(), empty.clone()));
        empty
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}
