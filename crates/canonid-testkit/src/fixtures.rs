//! Test fixtures and helpers.
//!
//! Record shapes used across integration tests and benchmarks.

use canonid_core::{Mapping, Sequence, Value};

/// An audit-log entry, linked to its predecessor by identifier.
pub fn audit_entry(seq: u64, actor: &str, action: &str, prev: Option<&str>) -> Value {
    Value::object([
        ("seq", Value::from(seq)),
        ("actor", Value::from(actor)),
        ("action", Value::from(action)),
        ("prev", Value::from(prev)),
        ("tags", Value::array(["audit"])),
    ])
}

/// A credential record with nested claims.
pub fn credential(holder: &str, issuer: &str, role: &str, level: i64) -> Value {
    Value::object([
        ("issuer", Value::from(issuer)),
        ("holder", Value::from(holder)),
        (
            "claims",
            Value::object([("role", Value::from(role)), ("level", Value::from(level))]),
        ),
    ])
}

/// A mapping that reaches itself through a sequence: `m -> s -> m`.
///
/// The cycle keeps both containers alive; call [`break_cycle`] when done.
pub fn cyclic_graph() -> Value {
    let map = Mapping::new();
    let seq = Sequence::new();
    // Fresh containers are never frozen.
    let _ = seq.push(Value::Object(map.clone()));
    let _ = map.insert("name", Value::from("loop"));
    let _ = map.insert("children", Value::Array(seq));
    Value::Object(map)
}

/// Clear the mapping built by [`cyclic_graph`] so its containers are freed.
pub fn break_cycle(graph: &Value) {
    if let Value::Object(map) = graph {
        // A frozen graph cannot be cleared and stays alive.
        let _ = map.clear();
    }
}

/// A diamond: two keys alias one shared, acyclic sub-record.
pub fn shared_graph() -> Value {
    let shared = Value::object([("k", 1)]);
    Value::object([("left", shared.clone()), ("right", shared)])
}

/// `depth` arrays nested inside one another around a zero.
pub fn deep_chain(depth: usize) -> Value {
    let mut v = Value::from(0);
    for _ in 0..depth {
        v = Value::array([v]);
    }
    v
}

/// A wide record with `n` fields in reverse key order, for benchmarks.
pub fn wide_record(n: usize) -> Value {
    Value::object((0..n).rev().map(|i| {
        (
            format!("field-{:04}", i),
            credential(&format!("holder-{}", i), "seal-hub", "member", i as i64),
        )
    }))
}
