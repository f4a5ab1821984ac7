//! Contract models for the settings container

use serde_json::Value;
use std::fmt;

/// Runtime shape of a setting value, reported in errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
    /// A Rust value that could not be turned into a JSON value at all
    Native(&'static str),
}

impl ValueKind {
    /// Classify a JSON value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Kind for a native value of type `T`
    pub fn native<T: ?Sized>() -> Self {
        Self::Native(std::any::type_name::<T>())
    }

    /// Whether a value of this kind can be materialized as nested settings
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool => f.write_str("bool"),
            Self::Number => f.write_str("number"),
            Self::String => f.write_str("string"),
            Self::Array => f.write_str("array"),
            Self::Object => f.write_str("object"),
            Self::Native(type_name) => f.write_str(type_name),
        }
    }
}
