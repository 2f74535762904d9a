//! Attribute Values
//!
//! Closed value model for the free-form attribute maps that cross the bridge.
//!
//! Hosts hand over loosely-typed maps (usually decoded from JSON). Before any
//! value reaches the native SDK it is narrowed to [`AttributeValue`], so the
//! native side never sees an open/dynamic type.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Attribute map as accepted by every bridge entry point.
pub type AttributeMap = HashMap<String, AttributeValue>;

/// A single attribute value.
///
/// Anything that is not a boolean, number, string or null (arrays, objects)
/// is kept as [`AttributeValue::Other`] holding its string representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Other(String),
}

impl AttributeValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Returns the string slice for `String` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric view of the value, for `Int` and `Float` only.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Int(value) => Some(*value as f64),
            AttributeValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// String conversion used when a typed field expects a string.
    ///
    /// `Null` maps to `None` instead of the literal `"null"`.
    pub fn to_string_lossy(&self) -> Option<String> {
        match self {
            AttributeValue::Null => None,
            AttributeValue::String(value) | AttributeValue::Other(value) => Some(value.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => f.write_str("null"),
            AttributeValue::Bool(value) => write!(f, "{}", value),
            AttributeValue::Int(value) => write!(f, "{}", value),
            AttributeValue::Float(value) => write!(f, "{}", value),
            AttributeValue::String(value) | AttributeValue::Other(value) => f.write_str(value),
        }
    }
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => AttributeValue::Null,
            Value::Bool(value) => AttributeValue::Bool(value),
            Value::Number(number) => match number.as_i64() {
                Some(value) => AttributeValue::Int(value),
                None => AttributeValue::Float(number.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(value) => AttributeValue::String(value),
            other => AttributeValue::Other(other.to_string()),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Int(value as i64)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(AttributeValue::Null)
    }
}

/// Convert a JSON object into an [`AttributeMap`].
///
/// Non-object values produce an empty map.
pub fn attributes_from_json(value: Value) -> AttributeMap {
    match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| (key, AttributeValue::from(value)))
            .collect(),
        _ => AttributeMap::new(),
    }
}

/// Typed span tag value.
///
/// Produced from an [`AttributeValue`] by [`TagValue::coerce`]: booleans,
/// numbers and strings keep their native type, `Null` stays a null tag and
/// everything else becomes its string representation.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl TagValue {
    pub fn coerce(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Null => TagValue::Null,
            AttributeValue::Bool(value) => TagValue::Bool(*value),
            AttributeValue::Int(value) => TagValue::Int(*value),
            AttributeValue::Float(value) => TagValue::Float(*value),
            AttributeValue::String(value) | AttributeValue::Other(value) => {
                TagValue::String(value.clone())
            }
        }
    }
}
