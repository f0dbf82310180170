//! Target metadata records
//!
//! Immutable, serializable descriptions of a target's input requirements.
//! Field names are stable camelCase so UI layers in any language can
//! consume them.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One of the six parameter classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainKind {
    Toggle,
    Count,
    Quantity,
    Label,
    SingleSelection,
    CompositeSelection,
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toggle => "toggle",
            Self::Count => "count",
            Self::Quantity => "quantity",
            Self::Label => "label",
            Self::SingleSelection => "single-selection",
            Self::CompositeSelection => "composite-selection",
        })
    }
}

/// Fields shared by every parameter description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterInfo {
    /// Declared parameter name
    pub name: String,
    /// Declared description, empty when undeclared
    #[serde(default)]
    pub description: String,
    /// `false` when the parameter accepts an absent value
    pub is_required: bool,
}

/// Boolean parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleParameter {
    #[serde(flatten)]
    pub info: ParameterInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

/// Bounded integer parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountParameter {
    #[serde(flatten)]
    pub info: ParameterInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<i64>,
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

/// Bounded real parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityParameter {
    #[serde(flatten)]
    pub info: ParameterInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<f64>,
    pub min: f64,
    pub max: f64,
    /// Number of decimal places
    pub precision: u32,
}

/// Bounded-length string parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelParameter {
    #[serde(flatten)]
    pub info: ParameterInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Minimum length in characters
    pub min: u32,
    /// Maximum length in characters
    pub max: u32,
    /// Regular expression the value should match, absent when unconstrained
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// One identifier out of a finite set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleSelectionParameter {
    #[serde(flatten)]
    pub info: ParameterInfo,
    pub default: String,
    pub values: Vec<String>,
}

/// A subset of identifiers out of a finite set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeSelectionParameter {
    #[serde(flatten)]
    pub info: ParameterInfo,
    pub default: Vec<String>,
    pub values: Vec<String>,
}

/// A parameter description of any domain kind
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterDescription {
    Toggle(ToggleParameter),
    Count(CountParameter),
    Quantity(QuantityParameter),
    Label(LabelParameter),
    SingleSelection(SingleSelectionParameter),
    CompositeSelection(CompositeSelectionParameter),
}

impl ParameterDescription {
    /// Domain kind of this description
    pub fn kind(&self) -> DomainKind {
        match self {
            Self::Toggle(_) => DomainKind::Toggle,
            Self::Count(_) => DomainKind::Count,
            Self::Quantity(_) => DomainKind::Quantity,
            Self::Label(_) => DomainKind::Label,
            Self::SingleSelection(_) => DomainKind::SingleSelection,
            Self::CompositeSelection(_) => DomainKind::CompositeSelection,
        }
    }

    /// Shared fields
    pub fn info(&self) -> &ParameterInfo {
        match self {
            Self::Toggle(p) => &p.info,
            Self::Count(p) => &p.info,
            Self::Quantity(p) => &p.info,
            Self::Label(p) => &p.info,
            Self::SingleSelection(p) => &p.info,
            Self::CompositeSelection(p) => &p.info,
        }
    }
}

/// Value Object: target metadata
///
/// Snapshot of one target (or of a group of targets sharing a name) that
/// UI layers render as an input form.
///
/// ## Business Rules
///
/// - `is_parameterized` is true iff at least one parameter list is non-empty
/// - a composite carries the properties shared identically by all of its
///   children; each child keeps only the properties that differ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetMetadata {
    pub name: String,
    #[serde(default)]
    pub discriminator: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_development: bool,
    #[serde(default)]
    pub is_experimental: bool,
    #[serde(default)]
    pub is_composite: bool,
    #[serde(default)]
    pub is_parameterized: bool,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub toggles: Vec<ToggleParameter>,
    #[serde(default)]
    pub counts: Vec<CountParameter>,
    #[serde(default)]
    pub quantities: Vec<QuantityParameter>,
    #[serde(default)]
    pub labels: Vec<LabelParameter>,
    #[serde(default)]
    pub single_selections: Vec<SingleSelectionParameter>,
    #[serde(default)]
    pub composite_selections: Vec<CompositeSelectionParameter>,
    /// Variants grouped under a composite, empty otherwise
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TargetMetadata>,
}

impl TargetMetadata {
    /// Create metadata with no parameters
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            discriminator: String::new(),
            description: String::new(),
            is_development: false,
            is_experimental: false,
            is_composite: false,
            is_parameterized: false,
            properties: BTreeMap::new(),
            toggles: Vec::new(),
            counts: Vec::new(),
            quantities: Vec::new(),
            labels: Vec::new(),
            single_selections: Vec::new(),
            composite_selections: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append a parameter description to the list of its kind
    pub fn push_parameter(&mut self, parameter: ParameterDescription) {
        match parameter {
            ParameterDescription::Toggle(p) => self.toggles.push(p),
            ParameterDescription::Count(p) => self.counts.push(p),
            ParameterDescription::Quantity(p) => self.quantities.push(p),
            ParameterDescription::Label(p) => self.labels.push(p),
            ParameterDescription::SingleSelection(p) => self.single_selections.push(p),
            ParameterDescription::CompositeSelection(p) => self.composite_selections.push(p),
        }
        self.is_parameterized = true;
    }

    /// Total number of parameters across the six lists
    pub fn parameter_count(&self) -> usize {
        self.toggles.len()
            + self.counts.len()
            + self.quantities.len()
            + self.labels.len()
            + self.single_selections.len()
            + self.composite_selections.len()
    }

    /// Encode as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encode as indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
