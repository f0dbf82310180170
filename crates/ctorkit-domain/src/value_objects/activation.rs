//! Activation records
//!
//! An activation names a target and carries values for its exposed
//! parameters. On the wire each argument is tagged by a `kind` of
//! `boolean`, `number`, `string` or `strings`.

use crate::error::Result;
use crate::value_objects::{TargetKey, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value Object: named argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ArgumentRepr", into = "ArgumentRepr")]
pub struct Argument {
    /// Declared name of the exposed parameter
    pub name: String,
    /// Supplied value
    pub value: Value,
}

impl Argument {
    /// Create a named argument
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Wire form of an argument
#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum ArgumentRepr {
    Boolean { name: String, value: bool },
    Number { name: String, value: Number },
    String { name: String, value: String },
    Strings { name: String, value: Vec<String> },
}

/// Numbers keep integers integral; anything with a fraction or exponent
/// decodes as real.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Number {
    Integer(i64),
    Real(f64),
}

impl From<ArgumentRepr> for Argument {
    fn from(repr: ArgumentRepr) -> Self {
        match repr {
            ArgumentRepr::Boolean { name, value } => Self::new(name, value),
            ArgumentRepr::Number {
                name,
                value: Number::Integer(value),
            } => Self::new(name, value),
            ArgumentRepr::Number {
                name,
                value: Number::Real(value),
            } => Self::new(name, value),
            ArgumentRepr::String { name, value } => Self::new(name, value),
            ArgumentRepr::Strings { name, value } => Self::new(name, value),
        }
    }
}

impl From<Argument> for ArgumentRepr {
    fn from(argument: Argument) -> Self {
        let name = argument.name;
        match argument.value {
            Value::Boolean(value) => Self::Boolean { name, value },
            Value::Integer(value) => Self::Number {
                name,
                value: Number::Integer(value),
            },
            Value::Real(value) => Self::Number {
                name,
                value: Number::Real(value),
            },
            Value::Text(value) => Self::String { name, value },
            Value::Strings(value) => Self::Strings { name, value },
        }
    }
}

/// Value Object: activation payload
///
/// ## Example
///
/// ```rust
/// use ctorkit_domain::value_objects::{Activation, Argument};
///
/// let activation = Activation::new("Moving Average")
///     .with_discriminator("simple")
///     .with_argument(Argument::new("Period", 14_i64));
/// assert_eq!(activation.key().to_string(), "Moving Average[simple]");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activation {
    /// Target display name
    pub name: String,
    /// Target discriminator, empty when unused
    #[serde(default)]
    pub discriminator: String,
    /// Ordered argument list
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

impl Activation {
    /// Create an activation for the named target with no arguments
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            discriminator: String::new(),
            arguments: Vec::new(),
        }
    }

    /// Set the discriminator
    pub fn with_discriminator(mut self, discriminator: impl Into<String>) -> Self {
        self.discriminator = discriminator.into();
        self
    }

    /// Append an argument
    pub fn with_argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Key of the target this activation refers to
    pub fn key(&self) -> TargetKey {
        TargetKey::new(self.name.clone()).with_discriminator(self.discriminator.clone())
    }

    /// Reduce the argument list to a name → value map
    ///
    /// A name supplied more than once resolves to its last value.
    pub fn argument_map(&self) -> HashMap<&str, &Value> {
        self.arguments
            .iter()
            .map(|argument| (argument.name.as_str(), &argument.value))
            .collect()
    }

    /// Encode as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
