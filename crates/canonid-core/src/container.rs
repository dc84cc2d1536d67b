//! Shared container handles: [`Sequence`] and [`Mapping`].
//!
//! A container is a reference-counted node holding lock-protected storage and
//! a sealed flag. Cloning a handle shares the node, so aliasing and cycles are
//! representable. Every mutating accessor takes the write lock and checks the
//! sealed flag under it; sealing takes the same lock, so a mutation is either
//! fully applied before the seal or rejected after it.
//!
//! Handles are strong references. A cycle of handles keeps itself alive after
//! the last outside handle is dropped; break it with `clear` or `remove`
//! before letting go of a cyclic graph (a frozen cycle is never freed).
//! Dropping an acyclic graph never recurses, however deep it is.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use crate::error::MutationError;
use crate::value::{self, Value};

/// Container storage whose nested values can be moved out.
trait Contents {
    /// Move every nested container into `stack`.
    fn drain_into(&mut self, stack: &mut Vec<Value>);
}

impl Contents for Vec<Value> {
    fn drain_into(&mut self, stack: &mut Vec<Value>) {
        stack.extend(self.drain(..).filter(is_container));
    }
}

impl Contents for IndexMap<String, Value> {
    fn drain_into(&mut self, stack: &mut Vec<Value>) {
        stack.extend(self.drain(..).map(|(_, v)| v).filter(is_container));
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

/// Lock-protected storage with a sealed flag.
struct Node<T: Contents> {
    sealed: AtomicBool,
    data: RwLock<T>,
}

impl<T: Contents> Node<T> {
    fn new(data: T) -> Self {
        Self {
            sealed: AtomicBool::new(false),
            data: RwLock::new(data),
        }
    }

    // Writers never leave the data half-updated, so a poisoned lock is safe to reuse.
    fn read(&self) -> RwLockReadGuard<'_, T> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, T>, MutationError> {
        let guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        if self.sealed.load(Ordering::Acquire) {
            return Err(MutationError::Frozen);
        }
        Ok(guard)
    }

    /// Seal the node. Returns `true` if it was not sealed before.
    fn seal(&self) -> bool {
        let _guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        !self.sealed.swap(true, Ordering::AcqRel)
    }

    fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }
}

/// Children are unlinked onto a heap stack instead of being dropped in place.
/// A child whose node is still shared elsewhere only loses one reference.
impl<T: Contents> Drop for Node<T> {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        contents(&mut self.data).drain_into(&mut stack);
        while let Some(value) = stack.pop() {
            match value {
                Value::Array(mut seq) => {
                    if let Some(node) = Arc::get_mut(&mut seq.0) {
                        contents(&mut node.data).drain_into(&mut stack);
                    }
                }
                Value::Object(mut map) => {
                    if let Some(node) = Arc::get_mut(&mut map.0) {
                        contents(&mut node.data).drain_into(&mut stack);
                    }
                }
                _ => {}
            }
        }
    }
}

fn contents<T>(data: &mut RwLock<T>) -> &mut T {
    data.get_mut().unwrap_or_else(PoisonError::into_inner)
}

/// An ordered sequence of values behind a shared handle.
///
/// See the module docs on cycles: a sequence that reaches itself is only
/// freed once the cycle is broken with [`clear`](Sequence::clear) or
/// [`remove`](Sequence::remove).
#[derive(Clone)]
pub struct Sequence(Arc<Node<Vec<Value>>>);

impl Sequence {
    /// Create a new empty, mutable sequence.
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create a mutable sequence owning the given items.
    pub fn from_vec(items: Vec<Value>) -> Self {
        Self(Arc::new(Node::new(items)))
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Get the item at `index` (a shared handle for containers).
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.read().get(index).cloned()
    }

    /// Snapshot of the current items.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.read().clone()
    }

    pub fn push(&self, value: Value) -> Result<(), MutationError> {
        self.0.write()?.push(value);
        Ok(())
    }

    pub fn insert(&self, index: usize, value: Value) -> Result<(), MutationError> {
        let mut items = self.0.write()?;
        if index > items.len() {
            return Err(MutationError::IndexOutOfBounds {
                index,
                len: items.len(),
            });
        }
        items.insert(index, value);
        Ok(())
    }

    /// Replace the item at `index`, returning the previous one.
    pub fn set(&self, index: usize, value: Value) -> Result<Value, MutationError> {
        let mut items = self.0.write()?;
        let len = items.len();
        match items.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(MutationError::IndexOutOfBounds { index, len }),
        }
    }

    pub fn remove(&self, index: usize) -> Result<Value, MutationError> {
        let mut items = self.0.write()?;
        if index >= items.len() {
            return Err(MutationError::IndexOutOfBounds {
                index,
                len: items.len(),
            });
        }
        Ok(items.remove(index))
    }

    pub fn pop(&self) -> Result<Option<Value>, MutationError> {
        Ok(self.0.write()?.pop())
    }

    pub fn extend<I>(&self, values: I) -> Result<(), MutationError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.0.write()?.extend(values);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), MutationError> {
        self.0.write()?.clear();
        Ok(())
    }

    /// Whether this sequence (not necessarily its items) is sealed.
    pub fn is_frozen(&self) -> bool {
        self.0.is_sealed()
    }

    /// Whether both handles point at the same sequence.
    pub fn ptr_eq(&self, other: &Sequence) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    pub(crate) fn seal(&self) -> bool {
        self.0.seal()
    }

    /// Replace the contents of a sequence that is still under construction.
    pub(crate) fn fill(&self, items: Vec<Value>) {
        *self.0.data.write().unwrap_or_else(PoisonError::into_inner) = items;
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Into<Value>> FromIterator<V> for Sequence {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().map(Into::into).collect())
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        value::sequences_equal(self, other)
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_guarded(self.identity(), f, |f| {
            f.debug_list().entries(self.to_vec().iter()).finish()
        })
    }
}

/// A string-keyed mapping behind a shared handle.
///
/// Keys are unique. Insertion order is kept for iteration; the canonical form
/// sorts keys independently of it. Like [`Sequence`], a mapping that reaches
/// itself is only freed once the cycle is broken with
/// [`clear`](Mapping::clear) or [`remove`](Mapping::remove).
#[derive(Clone)]
pub struct Mapping(Arc<Node<IndexMap<String, Value>>>);

impl Mapping {
    /// Create a new empty, mutable mapping.
    pub fn new() -> Self {
        Self(Arc::new(Node::new(IndexMap::new())))
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Get the value under `key` (a shared handle for containers).
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.read().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.read().contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.0.read().keys().cloned().collect()
    }

    /// Snapshot of the current entries in insertion order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Insert or replace, returning the previous value under `key`.
    ///
    /// Replacing keeps the key's original position.
    pub fn insert(
        &self,
        key: impl Into<String>,
        value: Value,
    ) -> Result<Option<Value>, MutationError> {
        Ok(self.0.write()?.insert(key.into(), value))
    }

    pub fn remove(&self, key: &str) -> Result<Option<Value>, MutationError> {
        Ok(self.0.write()?.shift_remove(key))
    }

    pub fn extend<I, K, V>(&self, entries: I) -> Result<(), MutationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let entries: Vec<(String, Value)> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.0.write()?.extend(entries);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), MutationError> {
        self.0.write()?.clear();
        Ok(())
    }

    /// Whether this mapping (not necessarily its values) is sealed.
    pub fn is_frozen(&self) -> bool {
        self.0.is_sealed()
    }

    /// Whether both handles point at the same mapping.
    pub fn ptr_eq(&self, other: &Mapping) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    pub(crate) fn seal(&self) -> bool {
        self.0.seal()
    }

    /// Replace the contents of a mapping that is still under construction.
    pub(crate) fn fill(&self, entries: Vec<(String, Value)>) {
        *self.0.data.write().unwrap_or_else(PoisonError::into_inner) =
            entries.into_iter().collect();
    }
}

impl Default for Mapping {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map: IndexMap<String, Value> = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self(Arc::new(Node::new(map)))
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        value::mappings_equal(self, other)
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_guarded(self.identity(), f, |f| {
            f.debug_map()
                .entries(self.entries().iter().map(|(k, v)| (k, v)))
                .finish()
        })
    }
}

thread_local! {
    /// Containers currently being formatted on this thread.
    static DEBUG_PATH: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());
}

/// Format a container, printing `<cycle>` instead of re-entering it.
fn debug_guarded(
    identity: usize,
    f: &mut fmt::Formatter<'_>,
    body: impl FnOnce(&mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    let entered = DEBUG_PATH.with(|path| path.borrow_mut().insert(identity));
    if !entered {
        return f.write_str("<cycle>");
    }
    let result = body(f);
    DEBUG_PATH.with(|path| path.borrow_mut().remove(&identity));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_mutation() {
        let seq = Sequence::new();
        seq.push(Value::from(1)).unwrap();
        seq.push(Value::from(3)).unwrap();
        seq.insert(1, Value::from(2)).unwrap();
        assert_eq!(seq.to_vec(), vec![Value::from(1), Value::from(2), Value::from(3)]);

        let old = seq.set(0, Value::from("one")).unwrap();
        assert_eq!(old, Value::from(1));
        assert_eq!(seq.remove(2).unwrap(), Value::from(3));
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn test_sequence_out_of_bounds() {
        let seq: Sequence = vec![1, 2].into_iter().collect();
        assert_eq!(
            seq.set(5, Value::Null),
            Err(MutationError::IndexOutOfBounds { index: 5, len: 2 })
        );
        assert!(matches!(
            seq.insert(3, Value::Null),
            Err(MutationError::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            seq.remove(2),
            Err(MutationError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_handles_share_storage() {
        let a = Sequence::new();
        let b = a.clone();
        a.push(Value::from(true)).unwrap();
        assert_eq!(b.len(), 1);
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&Sequence::new()));
    }

    #[test]
    fn test_mapping_keeps_insertion_order() {
        let map = Mapping::new();
        map.insert("b", Value::from(2)).unwrap();
        map.insert("a", Value::from(1)).unwrap();
        map.insert("c", Value::from(3)).unwrap();
        assert_eq!(map.keys(), vec!["b", "a", "c"]);

        // Replacing keeps position; removing shifts.
        map.insert("b", Value::from(20)).unwrap();
        map.remove("a").unwrap();
        assert_eq!(map.keys(), vec!["b", "c"]);
        assert_eq!(map.get("b"), Some(Value::from(20)));
    }

    #[test]
    fn test_sealed_rejects_every_mutation() {
        let seq: Sequence = vec![1, 2, 3].into_iter().collect();
        assert!(seq.seal());
        assert!(!seq.seal());

        assert_eq!(seq.push(Value::Null), Err(MutationError::Frozen));
        assert_eq!(seq.insert(0, Value::Null), Err(MutationError::Frozen));
        assert_eq!(seq.set(0, Value::Null), Err(MutationError::Frozen));
        assert_eq!(seq.remove(0), Err(MutationError::Frozen));
        assert_eq!(seq.pop(), Err(MutationError::Frozen));
        assert_eq!(seq.extend([4]), Err(MutationError::Frozen));
        assert_eq!(seq.clear(), Err(MutationError::Frozen));
        assert_eq!(seq.len(), 3);

        let map: Mapping = [("k", 1)].into_iter().collect();
        map.seal();
        assert_eq!(map.insert("k", Value::Null), Err(MutationError::Frozen));
        assert_eq!(map.remove("k"), Err(MutationError::Frozen));
        assert_eq!(map.extend([("z", 0)]), Err(MutationError::Frozen));
        assert_eq!(map.clear(), Err(MutationError::Frozen));
        assert_eq!(map.get("k"), Some(Value::from(1)));
    }

    #[test]
    fn test_drop_deep_chain_without_recursion() {
        let mut v = Value::Null;
        for i in 0..200_000 {
            v = if i % 2 == 0 {
                Value::array([v])
            } else {
                Value::object([("next", v)])
            };
        }
        drop(v);
    }

    #[test]
    fn test_drop_keeps_shared_children_alive() {
        let shared: Sequence = vec![1, 2].into_iter().collect();
        let outer = Value::array([Value::Array(shared.clone())]);
        drop(outer);
        assert_eq!(shared.to_vec(), vec![Value::from(1), Value::from(2)]);
    }

    #[test]
    fn test_clear_breaks_cycle() {
        let map = Mapping::new();
        map.insert("self", Value::Object(map.clone())).unwrap();
        assert_eq!(Arc::strong_count(&map.0), 2);
        map.clear().unwrap();
        assert_eq!(Arc::strong_count(&map.0), 1);
    }

    #[test]
    fn test_debug_stops_at_cycles() {
        let seq = Sequence::new();
        seq.push(Value::from(1)).unwrap();
        seq.push(Value::Array(seq.clone())).unwrap();
        assert_eq!(format!("{:?}", seq), "[Number(Int(1)), Array(<cycle>)]");
    }
}
