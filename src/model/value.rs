//! Dynamically-typed parameter values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named parameters of a context, or the entries of a struct value
pub type Parameters = BTreeMap<String, ParamValue>;

/// Dynamic value carried by context parameters and diagnostic info.
///
/// Mirrors the protobuf `Value` well-known type: numbers are always `f64`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<ParamValue>),
    Struct(Parameters),
}

impl ParamValue {
    /// Variant name, used in error messages
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Struct(_) => "struct",
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_struct(&self) -> Option<&Parameters> {
        match self {
            Self::Struct(map) => Some(map),
            _ => None,
        }
    }

    /// Build a struct value from `(name, value)` pairs
    #[must_use]
    pub fn structure<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<ParamValue>,
    {
        Self::Struct(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<Vec<ParamValue>> for ParamValue {
    fn from(items: Vec<ParamValue>) -> Self {
        Self::List(items)
    }
}

impl From<Parameters> for ParamValue {
    fn from(map: Parameters) -> Self {
        Self::Struct(map)
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Struct(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<ParamValue> for serde_json::Value {
    fn from(value: ParamValue) -> Self {
        match value {
            ParamValue::Null => Self::Null,
            ParamValue::Bool(b) => Self::Bool(b),
            // NaN and infinities have no JSON form
            ParamValue::Number(n) => serde_json::Number::from_f64(n).map_or(Self::Null, Self::Number),
            ParamValue::String(s) => Self::String(s),
            ParamValue::List(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            ParamValue::Struct(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}
