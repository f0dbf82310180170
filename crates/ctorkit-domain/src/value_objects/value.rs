//! Dynamic values
//!
//! The five value shapes that can travel in an activation payload or be
//! bound as a context variable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value Object: dynamically shaped value
///
/// Variables and activation arguments carry one of five shapes. The
/// untagged serde form maps each shape to its natural JSON/TOML type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// `true` / `false`
    Boolean(bool),
    /// Whole number
    Integer(i64),
    /// Real number
    Real(f64),
    /// Text
    Text(String),
    /// List of strings (composite selections)
    Strings(Vec<String>),
}

/// Shape tag of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueShape {
    Boolean,
    Integer,
    Real,
    Text,
    Strings,
}

impl ValueShape {
    /// Lowercase name used in error messages
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Text => "string",
            Self::Strings => "strings",
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// Shape of this value
    pub fn shape(&self) -> ValueShape {
        match self {
            Self::Boolean(_) => ValueShape::Boolean,
            Self::Integer(_) => ValueShape::Integer,
            Self::Real(_) => ValueShape::Real,
            Self::Text(_) => ValueShape::Text,
            Self::Strings(_) => ValueShape::Strings,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::Strings(v) => f.write_str(&v.join(",")),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Self::Strings(value)
    }
}

/// Typed extraction from a [`Value`]
///
/// Returns `None` when the stored shape is not assignable to `Self`.
/// Integers widen to `f64`; no other conversion is performed.
pub trait FromValue: Sized {
    /// Type name reported in mismatch errors
    const EXPECTED: &'static str;

    /// Extract `Self` from a value of a compatible shape
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    const EXPECTED: &'static str = "value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "real";

    #[allow(clippy::cast_precision_loss)]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Real(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FromValue for Vec<String> {
    const EXPECTED: &'static str = "strings";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Strings(v) => Some(v.clone()),
            _ => None,
        }
    }
}
