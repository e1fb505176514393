//! Lenient serde adapters for hand-edited JSON documents.
//!
//! The persisted documents are plain files an operator may edit by hand, so
//! every field accepts whatever shape it reasonably could have been written
//! in and coerces it to the record's type instead of failing the whole load.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Strings accept JSON strings, numbers and booleans; anything else is empty.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(string_from_value(&value))
}

pub fn string_from_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        _ => String::new(),
    }
}

/// Booleans accept `true`, non-zero numbers and the usual truthy words.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(bool_from_value(&value))
}

pub fn bool_from_value(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => is_truthy(s),
        _ => false,
    }
}

/// Truthiness of a form or JSON string value.
pub fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Nested records fall back to their default when the value is not an object.
pub fn lenient_record<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(record_from_value(value).unwrap_or_default())
}

pub fn record_from_value<T: DeserializeOwned>(value: Value) -> Option<T> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}

/// Parses a JSON array of records, skipping entries that are not objects.
///
/// Returns `None` when the document itself is not an array.
pub fn collection_from_value<T: DeserializeOwned>(value: Value) -> Option<Vec<T>> {
    match value {
        Value::Array(entries) => Some(entries.into_iter().filter_map(record_from_value).collect()),
        _ => None,
    }
}
