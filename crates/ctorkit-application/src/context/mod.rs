//! Activation Context
//!
//! The runtime environment shared by metadata compilation and activation:
//!
//! - named [`Variable`]s, used to resolve deferred defaults and bounds
//! - type-keyed [`Dependency`] instances, injected into constructor
//!   parameters marked as dependencies
//! - the `development` / `experimental` flags fixed at construction
//!
//! A context is created once per activation session and passed by
//! reference into every compiler and activator call. It performs no
//! locking; use one context per thread.

pub mod dependencies;
pub mod variables;

pub use dependencies::Dependency;
pub use variables::{split_words, ConfigurationSource, FieldSource, SourceField, Variable};

use ctorkit_domain::error::{Error, Result};
use ctorkit_domain::value_objects::{FromValue, Value};
use dependencies::DependencyView;
use std::any::{type_name, Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Flags fixed for the lifetime of a context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContextOptions {
    /// Permit development-only targets, sources and fields
    pub development: bool,
    /// Experimental mode, reported to hosts
    pub experimental: bool,
}

impl ContextOptions {
    /// Production options: neither development nor experimental
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable development mode
    pub fn development(mut self) -> Self {
        self.development = true;
        self
    }

    /// Enable experimental mode
    pub fn experimental(mut self) -> Self {
        self.experimental = true;
        self
    }
}

/// Activation context
pub struct Context {
    options: ContextOptions,
    variables: BTreeMap<String, Variable>,
    dependencies: HashMap<TypeId, DependencyView>,
}

impl Context {
    /// Create a context with no variables and no dependencies
    pub fn new(options: ContextOptions) -> Self {
        Self {
            options,
            variables: BTreeMap::new(),
            dependencies: HashMap::new(),
        }
    }

    /// Create a context seeded from configuration sources and fields
    ///
    /// Development-only sources and fields are skipped unless `options`
    /// enables development mode. A variable name produced twice aborts
    /// construction with [`Error::DuplicateKey`].
    pub fn with_sources<S, F>(options: ContextOptions, sources: S, fields: F) -> Result<Self>
    where
        S: IntoIterator<Item = ConfigurationSource>,
        F: IntoIterator<Item = FieldSource>,
    {
        let mut context = Self::new(options);

        for source in sources {
            if source.development_only && !options.development {
                debug!(source = %source.name, "Skipping development-only configuration source");
                continue;
            }
            for (name, variable) in source.variables() {
                context.insert_variable(name, variable)?;
            }
        }

        for field in fields {
            if field.development_only && !options.development {
                debug!(field = %field.name, "Skipping development-only field");
                continue;
            }
            context.insert_variable(
                field.name,
                Variable {
                    value: field.value,
                    constant: field.constant,
                },
            )?;
        }

        Ok(context)
    }

    /// Whether development-only targets are permitted
    pub fn is_development(&self) -> bool {
        self.options.development
    }

    /// Whether the context runs in experimental mode
    pub fn is_experimental(&self) -> bool {
        self.options.experimental
    }

    /// Flags of this context
    pub fn options(&self) -> ContextOptions {
        self.options
    }

    // ========================================================================
    // Variables
    // ========================================================================

    /// Bind a new variable
    ///
    /// Fails with [`Error::DuplicateKey`] when `name` is already bound.
    pub fn define_variable(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
        constant: bool,
    ) -> Result<()> {
        self.insert_variable(
            name.into(),
            Variable {
                value: value.into(),
                constant,
            },
        )
    }

    /// Whether a variable named `name` is bound
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Read a variable as `T`
    ///
    /// Fails with [`Error::NotFound`] when unbound and
    /// [`Error::TypeMismatch`] when the stored value is not assignable to `T`.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T> {
        let variable = self
            .variables
            .get(name)
            .ok_or_else(|| Error::not_found(format!("variable '{name}'")))?;
        T::from_value(&variable.value).ok_or_else(|| {
            Error::type_mismatch(name, T::EXPECTED, variable.value.shape().as_str())
        })
    }

    /// Replace the value of an existing, non-constant variable
    ///
    /// The binding becomes non-constant. Returns the new value.
    pub fn set<T: Into<Value> + Clone>(&mut self, name: &str, value: T) -> Result<T> {
        let variable = self
            .variables
            .get_mut(name)
            .ok_or_else(|| Error::not_found(format!("variable '{name}'")))?;
        if variable.constant {
            return Err(Error::immutable(name));
        }
        *variable = Variable {
            value: value.clone().into(),
            constant: false,
        };
        Ok(value)
    }

    /// All variables, sorted by name
    pub fn variables(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.variables
            .iter()
            .map(|(name, variable)| (name.as_str(), variable))
    }

    fn insert_variable(&mut self, name: String, variable: Variable) -> Result<()> {
        if self.variables.contains_key(&name) {
            return Err(Error::duplicate_key(format!("variable '{name}'")));
        }
        debug!(name = %name, constant = variable.constant, "Defined context variable");
        self.variables.insert(name, variable);
        Ok(())
    }

    // ========================================================================
    // Dependencies
    // ========================================================================

    /// Register a dependency under every key of its view set
    ///
    /// Fails with [`Error::DuplicateKey`] if any key is already taken; the
    /// context is left unchanged in that case.
    pub fn add_dependency(&mut self, dependency: Dependency) -> Result<()> {
        for (i, view) in dependency.views.iter().enumerate() {
            let repeated = dependency.views[..i]
                .iter()
                .any(|other| other.type_id == view.type_id);
            if repeated || self.dependencies.contains_key(&view.type_id) {
                return Err(Error::duplicate_key(format!(
                    "dependency '{}'",
                    view.type_name
                )));
            }
        }
        debug!(
            dependency = dependency.type_name,
            keys = ?dependency.keys(),
            "Registered dependency"
        );
        for view in dependency.views {
            self.dependencies.insert(view.type_id, view);
        }
        Ok(())
    }

    /// Resolve the dependency registered under `T`
    pub fn get_dependency<T: ?Sized + 'static>(&self) -> Result<Arc<T>> {
        let shared = self.get_dependency_by_type(TypeId::of::<T>(), type_name::<T>())?;
        shared
            .downcast::<Arc<T>>()
            .map(|value| *value)
            .map_err(|_| Error::not_found(format!("dependency '{}'", type_name::<T>())))
    }

    /// Resolve a dependency by key, returned as a boxed `Arc` of the key type
    pub fn get_dependency_by_type(&self, key: TypeId, key_name: &str) -> Result<Box<dyn Any>> {
        self.dependencies
            .get(&key)
            .and_then(DependencyView::shared)
            .ok_or_else(|| Error::not_found(format!("dependency '{key_name}'")))
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("options", &self.options)
            .field("variables", &self.variables)
            .field("dependencies", &self.dependencies.len())
            .finish()
    }
}
