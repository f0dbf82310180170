//! Constructor parameter schema
//!
//! Declarative description of one constructor parameter: its role, its
//! declared value type, and the descriptors the classifier reads to build
//! a parameter description.

use crate::context::Context;
use ctorkit_domain::error::{Error, Result};
use ctorkit_domain::value_objects::{FromValue, Value};
use std::any::{type_name, TypeId};

/// Declared value type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Boolean,
    Integer,
    Real,
    Text,
    /// Any other type, named for diagnostics
    Opaque(&'static str),
}

/// Role of a parameter in its constructor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterRole {
    /// User-facing input, bound by name from the activation
    Exposed { name: String, description: String },
    /// Resolved from the context by type
    Dependency {
        type_id: TypeId,
        type_name: &'static str,
    },
    /// The activation context itself
    Context,
    /// Neither exposed nor a dependency; rejected when the constructor is used
    Unmarked,
}

/// A literal, or a variable name resolved in the context
///
/// ```rust
/// use ctorkit_application::schema::ValueSource;
///
/// let fixed: ValueSource<i64> = 5.into();
/// let deferred = ValueSource::named_or("Max Count", 10_i64);
/// assert!(matches!(fixed, ValueSource::Fixed(5)));
/// assert!(matches!(deferred, ValueSource::Named { .. }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSource<T> {
    Fixed(T),
    Named { name: String, fallback: Option<T> },
}

impl<T> ValueSource<T> {
    /// Defer to the variable `name`, failing when it is unbound
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            fallback: None,
        }
    }

    /// Defer to the variable `name`, using `fallback` when it is unbound
    pub fn named_or(name: impl Into<String>, fallback: T) -> Self {
        Self::Named {
            name: name.into(),
            fallback: Some(fallback),
        }
    }
}

impl<T> From<T> for ValueSource<T> {
    fn from(value: T) -> Self {
        Self::Fixed(value)
    }
}

impl From<i32> for ValueSource<i64> {
    fn from(value: i32) -> Self {
        Self::Fixed(i64::from(value))
    }
}

impl<T: FromValue + Clone> ValueSource<T> {
    /// Resolve against `context`
    ///
    /// An unbound name with no fallback fails with [`Error::NotFound`]; a
    /// bound name of the wrong shape fails with [`Error::TypeMismatch`].
    pub fn resolve(&self, context: &Context) -> Result<T> {
        match self {
            Self::Fixed(value) => Ok(value.clone()),
            Self::Named { name, fallback } => {
                if context.contains(name) {
                    return context.get::<T>(name);
                }
                fallback
                    .clone()
                    .ok_or_else(|| Error::not_found(format!("variable '{name}'")))
            }
        }
    }
}

impl ValueSource<Value> {
    /// Resolve an untyped source as `T`
    ///
    /// `parameter` names the parameter in mismatch errors for literals.
    pub fn resolve_as<T: FromValue>(&self, context: &Context, parameter: &str) -> Result<T> {
        let convert = |value: &Value| {
            T::from_value(value).ok_or_else(|| {
                Error::type_mismatch(parameter, T::EXPECTED, value.shape().as_str())
            })
        };
        match self {
            Self::Fixed(value) => convert(value),
            Self::Named { name, fallback } => {
                if context.contains(name) {
                    return context.get::<T>(name);
                }
                match fallback {
                    Some(value) => convert(value),
                    None => Err(Error::not_found(format!("variable '{name}'"))),
                }
            }
        }
    }
}

/// Kind-specific bound descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum Bounds {
    Count {
        min: ValueSource<i64>,
        max: ValueSource<i64>,
        step: i64,
    },
    Quantity {
        min: ValueSource<f64>,
        max: ValueSource<f64>,
        precision: u32,
    },
    Label {
        min: u32,
        max: u32,
        pattern: Option<String>,
    },
}

/// Entity converter backing a selection parameter, by registered name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Single(String),
    Composite(String),
}

/// One constructor parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub role: ParameterRole,
    pub value_type: ValueType,
    /// `false` for parameters that accept an absent value
    pub required: bool,
    pub bounds: Option<Bounds>,
    pub default: Option<ValueSource<Value>>,
    pub selection: Option<Selection>,
}

impl Parameter {
    fn with_role(role: ParameterRole, value_type: ValueType) -> Self {
        Self {
            role,
            value_type,
            required: true,
            bounds: None,
            default: None,
            selection: None,
        }
    }

    /// Exposed parameter of the given declared type
    pub fn exposed(name: impl Into<String>, value_type: ValueType) -> Self {
        Self::with_role(
            ParameterRole::Exposed {
                name: name.into(),
                description: String::new(),
            },
            value_type,
        )
    }

    /// Exposed boolean parameter
    pub fn toggle(name: impl Into<String>) -> Self {
        Self::exposed(name, ValueType::Boolean)
    }

    /// Exposed integer parameter
    pub fn count(name: impl Into<String>) -> Self {
        Self::exposed(name, ValueType::Integer)
    }

    /// Exposed real parameter
    pub fn quantity(name: impl Into<String>) -> Self {
        Self::exposed(name, ValueType::Real)
    }

    /// Exposed string parameter
    pub fn label(name: impl Into<String>) -> Self {
        Self::exposed(name, ValueType::Text)
    }

    /// Exposed parameter backed by the single entity converter `converter`
    pub fn single(name: impl Into<String>, converter: impl Into<String>) -> Self {
        let mut parameter = Self::exposed(name, ValueType::Opaque("entity"));
        parameter.selection = Some(Selection::Single(converter.into()));
        parameter
    }

    /// Exposed parameter backed by the composite entity converter `converter`
    pub fn composite(name: impl Into<String>, converter: impl Into<String>) -> Self {
        let mut parameter = Self::exposed(name, ValueType::Opaque("entities"));
        parameter.selection = Some(Selection::Composite(converter.into()));
        parameter
    }

    /// Parameter resolved from the context's dependencies under key `D`
    pub fn dependency<D: ?Sized + 'static>() -> Self {
        Self::with_role(
            ParameterRole::Dependency {
                type_id: TypeId::of::<D>(),
                type_name: type_name::<D>(),
            },
            ValueType::Opaque(type_name::<D>()),
        )
    }

    /// Parameter receiving the activation context
    pub fn context() -> Self {
        Self::with_role(ParameterRole::Context, ValueType::Opaque("context"))
    }

    /// Parameter carrying no role marker
    pub fn unmarked(value_type: ValueType) -> Self {
        Self::with_role(ParameterRole::Unmarked, value_type)
    }

    /// Set the description of an exposed parameter
    pub fn description(mut self, text: impl Into<String>) -> Self {
        if let ParameterRole::Exposed { description, .. } = &mut self.role {
            *description = text.into();
        }
        self
    }

    /// Accept an absent value
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Literal default value
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(ValueSource::Fixed(value.into()));
        self
    }

    /// Default taken from the context variable `name`
    pub fn default_named(mut self, name: impl Into<String>) -> Self {
        self.default = Some(ValueSource::named(name));
        self
    }

    /// Default taken from the context variable `name`, or `fallback`
    pub fn default_named_or(mut self, name: impl Into<String>, fallback: impl Into<Value>) -> Self {
        self.default = Some(ValueSource::named_or(name, fallback.into()));
        self
    }

    /// Bounds and step of a count parameter
    pub fn count_bounds(
        mut self,
        min: impl Into<ValueSource<i64>>,
        max: impl Into<ValueSource<i64>>,
        step: i64,
    ) -> Self {
        self.bounds = Some(Bounds::Count {
            min: min.into(),
            max: max.into(),
            step,
        });
        self
    }

    /// Bounds and precision of a quantity parameter
    pub fn quantity_bounds(
        mut self,
        min: impl Into<ValueSource<f64>>,
        max: impl Into<ValueSource<f64>>,
        precision: u32,
    ) -> Self {
        self.bounds = Some(Bounds::Quantity {
            min: min.into(),
            max: max.into(),
            precision,
        });
        self
    }

    /// Length limits of a label parameter
    pub fn label_bounds(mut self, min: u32, max: u32) -> Self {
        let pattern = match self.bounds.take() {
            Some(Bounds::Label { pattern, .. }) => pattern,
            _ => None,
        };
        self.bounds = Some(Bounds::Label { min, max, pattern });
        self
    }

    /// Regular expression a label parameter should match
    pub fn pattern(mut self, regex: impl Into<String>) -> Self {
        let (min, max) = match self.bounds.take() {
            Some(Bounds::Label { min, max, .. }) => (min, max),
            _ => (
                ctorkit_domain::constants::LABEL_DEFAULT_MIN_LENGTH,
                ctorkit_domain::constants::LABEL_DEFAULT_MAX_LENGTH,
            ),
        };
        self.bounds = Some(Bounds::Label {
            min,
            max,
            pattern: Some(regex.into()),
        });
        self
    }

    /// Declared name, for exposed parameters
    pub fn exposed_name(&self) -> Option<&str> {
        match &self.role {
            ParameterRole::Exposed { name, .. } => Some(name),
            _ => None,
        }
    }
}
