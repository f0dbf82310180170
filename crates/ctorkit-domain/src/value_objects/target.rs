//! Target identity
//!
//! Every activatable target is identified by its display name plus an
//! optional discriminator that separates variants sharing one name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value Object: target key
///
/// `(name, discriminator)` is unique among the targets of one catalog.
/// An empty discriminator means the target has no variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetKey {
    /// Display name shared by all variants
    pub name: String,
    /// Variant discriminator, empty when unused
    #[serde(default)]
    pub discriminator: String,
}

impl TargetKey {
    /// Create a key without a discriminator
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            discriminator: String::new(),
        }
    }

    /// Set the discriminator
    pub fn with_discriminator(mut self, discriminator: impl Into<String>) -> Self {
        self.discriminator = discriminator.into();
        self
    }
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.discriminator.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}[{}]", self.name, self.discriminator)
        }
    }
}

/// Value Object: declarative description of a target type
///
/// ## Business Rules
///
/// - `development` targets are only compiled and activated in a
///   development context
/// - `experimental` is advisory and carried into metadata only
/// - `permanent` targets are instantiated by the bulk activation even when
///   no activation names them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetInfo {
    /// Identity of the target
    #[serde(flatten)]
    pub key: TargetKey,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Only available in development contexts
    #[serde(default)]
    pub development: bool,
    /// Flagged as experimental
    #[serde(default)]
    pub experimental: bool,
    /// Always instantiated by the permanent bulk activation
    #[serde(default)]
    pub permanent: bool,
}

impl TargetInfo {
    /// Create target info with the given display name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            key: TargetKey::new(name),
            description: String::new(),
            development: false,
            experimental: false,
            permanent: false,
        }
    }

    /// Set the discriminator
    pub fn with_discriminator(mut self, discriminator: impl Into<String>) -> Self {
        self.key.discriminator = discriminator.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark as development-only
    pub fn development(mut self) -> Self {
        self.development = true;
        self
    }

    /// Mark as experimental
    pub fn experimental(mut self) -> Self {
        self.experimental = true;
        self
    }

    /// Mark as permanent
    pub fn permanent(mut self) -> Self {
        self.permanent = true;
        self
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.key.name
    }

    /// Whether this target may be used in a context with the given
    /// development flag
    pub fn is_permitted(&self, development_context: bool) -> bool {
        !self.development || development_context
    }
}
