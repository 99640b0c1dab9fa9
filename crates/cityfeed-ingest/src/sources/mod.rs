//! Source transformers
//!
//! One module per known source shape. Every transformer is a pure function
//! of `(parsed body, parameters)` returning normalized measurement records,
//! and degrades gracefully on missing fields: a field that cannot be
//! extracted is skipped, never aborts the record set.

pub mod ckan;
pub mod csv_table;
pub mod solar;
pub mod telemetry;

use serde_json::Value;

/// Read a numeric field, tolerating numbers encoded as strings
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// First present key out of `keys`, for sources that rename fields
pub(crate) fn first_field<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| {
        let value = record.get(key)?;
        if value.is_null() {
            None
        } else {
            Some(value)
        }
    })
}

/// A record timestamp, kept in its source representation (string or number)
pub(crate) fn timestamp_of(record: &Value, key: &str) -> Option<Value> {
    match record.get(key) {
        Some(Value::Null) | None => None,
        Some(value) => Some(value.clone()),
    }
}
