//! Permissive field deserializers.
//!
//! Profiles are hand-edited or machine-generated, so a wrong type in one
//! slot must not reject the whole document. Each helper accepts any JSON
//! value and coerces it into the slot's type, logging what it dropped.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerces a scalar into text. Numbers and booleans keep their JSON form;
/// `null`, arrays and objects become `None`.
pub fn coerce_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        other => {
            tracing::warn!(kind = kind_of(&other), "expected a string, dropping value");
            None
        }
    }
}

/// Coerces a value into a list of strings. A lone scalar becomes a
/// one-element list; items that are not scalars are skipped.
pub fn coerce_strings(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.into_iter().filter_map(coerce_string).collect(),
        Value::Null => Vec::new(),
        Value::Object(_) => {
            tracing::warn!("expected a list of strings, found an object");
            Vec::new()
        }
        scalar => coerce_string(scalar).into_iter().collect(),
    }
}

/// Coerces a value into a list of records. Non-object items are skipped.
pub fn coerce_records<T: DeserializeOwned>(value: Value) -> Vec<T> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                Value::Object(_) => match serde_json::from_value(item) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!(index, error = %e, "skipping unreadable list entry");
                        None
                    }
                },
                other => {
                    tracing::warn!(index, kind = kind_of(&other), "skipping list entry that is not an object");
                    None
                }
            })
            .collect(),
        Value::Null => Vec::new(),
        other => {
            tracing::warn!(kind = kind_of(&other), "expected a list, treating as empty");
            Vec::new()
        }
    }
}

/// Coerces a value into a nested object, falling back to its default.
pub fn coerce_object<T: DeserializeOwned + Default>(value: Value) -> T {
    match value {
        Value::Object(_) => serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "unreadable object, using defaults");
            T::default()
        }),
        Value::Null => T::default(),
        other => {
            tracing::warn!(kind = kind_of(&other), "expected an object, using defaults");
            T::default()
        }
    }
}

pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(coerce_string)
}

pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(coerce_strings)
}

pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Value::deserialize(deserializer).map(coerce_records)
}

pub fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Value::deserialize(deserializer).map(coerce_object)
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
