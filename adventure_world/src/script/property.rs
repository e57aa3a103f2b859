//! Node property bag with safe-default accessors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single authored property value.
///
/// Serialized untagged: `true`, `3`, `"text"` and `{"id": "guard"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Id { id: String },
}

impl PropertyValue {
    /// Reference to another world entity by id.
    pub fn id(id: impl Into<String>) -> Self {
        PropertyValue::Id { id: id.into() }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Number(value as f64)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Number(value as f64)
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> Self {
        PropertyValue::Number(value as f64)
    }
}

/// String-keyed property bag of a node.
///
/// Every accessor resolves a missing key, or a value of another kind, to the
/// type's zero value instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Properties {
    values: BTreeMap<String, PropertyValue>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Text or id value, `""` otherwise.
    pub fn text(&self, key: &str) -> &str {
        match self.values.get(key) {
            Some(PropertyValue::Text(text)) => text,
            Some(PropertyValue::Id { id }) => id,
            _ => "",
        }
    }

    /// Id reference. Plain text is accepted as an id.
    pub fn id(&self, key: &str) -> &str {
        self.text(key)
    }

    /// Text value, or `None` when missing or empty.
    pub fn optional_text(&self, key: &str) -> Option<&str> {
        Some(self.text(key)).filter(|text| !text.is_empty())
    }

    pub fn number(&self, key: &str) -> f64 {
        match self.values.get(key) {
            Some(PropertyValue::Number(number)) => *number,
            _ => 0.0,
        }
    }

    /// Number truncated towards zero.
    pub fn int(&self, key: &str) -> i64 {
        self.number(key) as i64
    }

    /// Number truncated towards zero, or `default` when not authored as a number.
    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        match self.values.get(key) {
            Some(PropertyValue::Number(number)) => *number as i64,
            _ => default,
        }
    }

    pub fn bool(&self, key: &str) -> bool {
        self.bool_or(key, false)
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(PropertyValue::Bool(value)) => *value,
            _ => default,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<PropertyValue>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Properties::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}
