//! Small helpers for picking apart loosely-typed wire JSON.

use serde_json::Value;

/// Treats JSON `null` as absent.
pub(crate) fn present(data: Option<&Value>) -> Option<&Value> {
    data.filter(|v| !v.is_null())
}

/// A non-empty string under `key`.
pub(crate) fn str_at(data: &Value, key: &str) -> Option<String> {
    match data.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// An unsigned id that may arrive as a number or a numeric string.
pub(crate) fn as_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A float that may arrive as a number or a numeric string.
pub(crate) fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// An empty JSON object, the store's "clear this column" value.
pub(crate) fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}
