//! Legacy "cast to array" coercion
//!
//! Kept apart from the container so the rule can be changed or dropped on
//! its own. Arrays and objects pass through, null becomes an empty array and
//! any other scalar is wrapped in a one-element array.

use serde_json::Value;

/// Coerce a value to array-or-object form
pub fn to_array(value: Value) -> Value {
    match value {
        Value::Array(_) | Value::Object(_) => value,
        Value::Null => Value::Array(Vec::new()),
        scalar => Value::Array(vec![scalar]),
    }
}

/// Coerce a value and list it as named entries, in order.
///
/// Object members keep their names; array elements are named by index.
pub fn entries(value: Value) -> Vec<(String, Value)> {
    match to_array(value) {
        Value::Object(map) => map.into_iter().collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        // to_array only yields arrays and objects
        _ => Vec::new(),
    }
}
