//! Context variables and their population sources
//!
//! Variables are seeded at context construction from configuration
//! sources (groups of fields, optionally with case-split names) and from
//! individually registered fields. Later definitions go through
//! [`Context::define_variable`](super::Context::define_variable).

use ctorkit_domain::value_objects::Value;

/// A named value held by the context
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Stored value
    pub value: Value,
    /// Constant variables reject `set`
    pub constant: bool,
}

/// One field of a [`ConfigurationSource`]
#[derive(Debug, Clone, PartialEq)]
pub struct SourceField {
    pub name: String,
    pub value: Value,
    pub constant: bool,
}

/// A group of fields contributing variables
///
/// ```rust
/// use ctorkit_application::context::ConfigurationSource;
///
/// let source = ConfigurationSource::new("Limits")
///     .split_names()
///     .field("MaxCount", 10_i64)
///     .mutable_field("Threshold", 0.5);
/// assert_eq!(source.fields.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigurationSource {
    /// Source name, used in log output only
    pub name: String,
    /// Insert spaces at case boundaries of field names
    pub split_names: bool,
    /// Skip the whole source outside development contexts
    pub development_only: bool,
    pub fields: Vec<SourceField>,
}

impl ConfigurationSource {
    /// Create an empty source
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Derive variable names by splitting field names on case boundaries
    pub fn split_names(mut self) -> Self {
        self.split_names = true;
        self
    }

    /// Only load this source in development contexts
    pub fn development_only(mut self) -> Self {
        self.development_only = true;
        self
    }

    /// Add a constant field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push(SourceField {
            name: name.into(),
            value: value.into(),
            constant: true,
        });
        self
    }

    /// Add a field that may later be overwritten with `set`
    pub fn mutable_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push(SourceField {
            name: name.into(),
            value: value.into(),
            constant: false,
        });
        self
    }

    /// `(variable name, variable)` pairs this source contributes
    pub(crate) fn variables(&self) -> impl Iterator<Item = (String, Variable)> + '_ {
        self.fields.iter().map(move |field| {
            let name = if self.split_names {
                split_words(&field.name)
            } else {
                field.name.clone()
            };
            (
                name,
                Variable {
                    value: field.value.clone(),
                    constant: field.constant,
                },
            )
        })
    }
}

/// An individually registered variable
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSource {
    pub name: String,
    pub value: Value,
    pub constant: bool,
    /// Skip this field outside development contexts
    pub development_only: bool,
}

impl FieldSource {
    /// Create a constant field
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            constant: true,
            development_only: false,
        }
    }

    /// Allow `set` on this variable
    pub fn mutable(mut self) -> Self {
        self.constant = false;
        self
    }

    /// Only load this field in development contexts
    pub fn development_only(mut self) -> Self {
        self.development_only = true;
        self
    }
}

/// Insert a space at every case boundary of `name`
///
/// `MaxCount` becomes `Max Count` and `HTTPTimeout` becomes `HTTP Timeout`.
pub fn split_words(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut words = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                words.push(' ');
            }
        }
        words.push(c);
    }
    words
}
