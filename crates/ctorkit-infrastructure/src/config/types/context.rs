//! Activation context configuration types
//!
//! The file form of configuration sources and registered fields:
//!
//! ```toml
//! [context]
//! development = false
//!
//! [[context.sources]]
//! name = "Limits"
//! split_names = true
//!
//! [context.sources.values]
//! MaxCount = 10
//! Threshold = 0.5
//!
//! [[context.fields]]
//! name = "Mode"
//! value = "live"
//! constant = false
//! ```

use ctorkit_domain::value_objects::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn constant_by_default() -> bool {
    true
}

/// Flags and variable sources of the activation context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Permit development-only targets, sources and fields
    pub development: bool,

    /// Experimental mode, reported to hosts
    pub experimental: bool,

    /// Groups of variables
    pub sources: Vec<SourceConfig>,

    /// Individually registered variables
    pub fields: Vec<FieldConfig>,
}

/// A group of variables sharing flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source name, used in log output
    pub name: String,

    /// Insert spaces at case boundaries of value names
    #[serde(default)]
    pub split_names: bool,

    /// Only load in development contexts
    #[serde(default)]
    pub development_only: bool,

    /// Whether the variables reject later `set` calls
    #[serde(default = "constant_by_default")]
    pub constant: bool,

    /// Variable values by field name
    #[serde(default)]
    pub values: BTreeMap<String, Value>,
}

/// One individually registered variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Variable name
    pub name: String,

    /// Variable value
    pub value: Value,

    /// Whether the variable rejects later `set` calls
    #[serde(default = "constant_by_default")]
    pub constant: bool,

    /// Only load in development contexts
    #[serde(default)]
    pub development_only: bool,
}
