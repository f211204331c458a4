//! Defaulted field access over provider JSON
//!
//! The provider does not guarantee that any field is populated, and several
//! endpoints disagree on which ones are. Every read of a raw document goes
//! through [`Fields`] with an explicit default at the call site. A JSON
//! `null` is treated the same as an absent key.

use serde_json::{Map, Value};

/// Read-only view over one JSON object.
///
/// Non-object values produce an empty view, so nested lookups never fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fields<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Fields<'a> {
    /// View a raw value; anything other than an object is empty
    pub fn of(value: &'a Value) -> Self {
        Self {
            map: value.as_object(),
        }
    }

    /// True when the underlying value was not an object or had no keys
    pub fn is_empty(&self) -> bool {
        self.map.map_or(true, Map::is_empty)
    }

    /// Raw value for `key`, skipping explicit nulls
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map
            .and_then(|map| map.get(key))
            .filter(|value| !value.is_null())
    }

    /// String field; numbers and booleans are rendered as text
    pub fn str_or(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => default.to_string(),
        }
    }

    /// Scalar field with its provider type kept; anything else is the
    /// `default` string
    pub fn scalar_or(&self, key: &str, default: &str) -> Value {
        match self.get(key) {
            Some(value @ (Value::String(_) | Value::Number(_) | Value::Bool(_))) => value.clone(),
            _ => Value::String(default.to_string()),
        }
    }

    /// String field as a borrowed slice, for micro-format parsing
    pub fn opt_str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Non-negative integer counter.
    ///
    /// Accepts integers, floats (truncated) and numeric strings. Negative or
    /// unparseable values fall back to `default`.
    pub fn u64_or(&self, key: &str, default: u64) -> u64 {
        match self.get(key) {
            Some(Value::Number(n)) => n
                .as_u64()
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| f.is_finite() && *f >= 0.0)
                        .map(|f| f.trunc() as u64)
                })
                .unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// Nested object view; missing or non-object yields an empty view
    pub fn nested(&self, key: &str) -> Fields<'a> {
        self.get(key).map(Fields::of).unwrap_or_default()
    }

    /// Array field; missing or non-array yields an empty slice
    pub fn list(&self, key: &str) -> &'a [Value] {
        self.get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
