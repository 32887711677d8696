// src/utils/json.rs

//! Safe field access over untyped JSON values.

use serde_json::Value;

/// Read a field from a JSON object as a string, defaulting to empty.
///
/// Numbers and booleans are rendered with their canonical text form;
/// missing fields and nulls become the empty string.
pub fn str_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Read a field as an optional string: `None` when absent or empty.
pub fn opt_field(value: &Value, key: &str) -> Option<String> {
    let s = str_field(value, key);
    if s.is_empty() { None } else { Some(s) }
}
