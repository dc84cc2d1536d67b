//! Proptest generators for property-based testing.

use proptest::prelude::*;

use canonid_core::{Mapping, Number, Sequence, Value};

/// Generate a finite float.
pub fn finite_f64() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("finite", |f| f.is_finite())
}

/// Generate a number across all representations.
pub fn number() -> impl Strategy<Value = Number> {
    prop_oneof![
        any::<i64>().prop_map(Number::Int),
        any::<u64>().prop_map(Number::from),
        finite_f64().prop_map(Number::Float),
    ]
}

/// Generate a primitive value.
pub fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        number().prop_map(Value::Number),
        any::<String>().prop_map(Value::String),
    ]
}

/// Generate an object key, mixing ASCII, control and non-BMP characters.
pub fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z_][a-zA-Z0-9_]{0,7}".prop_map(String::from),
        any::<String>(),
        Just(String::new()),
        Just("\u{ffff}".to_string()),
        Just("\u{10000}".to_string()),
    ]
}

/// Generate a tree-shaped value up to four levels deep.
pub fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::array),
            prop::collection::vec((key(), inner), 0..8).prop_map(Value::object),
        ]
    })
}

/// A strategy for `value` rebuilt with every object's entries permuted.
///
/// Generated values are logically equal to the input but share no
/// containers with it. Shrinking moves toward the original key order. Only
/// tree-shaped input is supported.
pub fn shuffled_keys(value: &Value) -> BoxedStrategy<Value> {
    match value {
        Value::Array(seq) => seq
            .to_vec()
            .iter()
            .map(shuffled_keys)
            .collect::<Vec<_>>()
            .prop_map(|items| Value::Array(items.into_iter().collect::<Sequence>()))
            .boxed(),
        Value::Object(map) => {
            let (keys, values): (Vec<String>, Vec<Value>) = map.entries().into_iter().unzip();
            values
                .iter()
                .map(shuffled_keys)
                .collect::<Vec<_>>()
                .prop_map(move |values| keys.iter().cloned().zip(values).collect::<Vec<_>>())
                .prop_shuffle()
                .prop_map(|entries| Value::Object(entries.into_iter().collect::<Mapping>()))
                .boxed()
        }
        primitive => Just(primitive.clone()).boxed(),
    }
}

/// Generate a value together with a key-shuffled rebuild of it.
pub fn value_and_shuffled() -> impl Strategy<Value = (Value, Value)> {
    value().prop_flat_map(|v| {
        let shuffled = shuffled_keys(&v);
        (Just(v), shuffled)
    })
}
