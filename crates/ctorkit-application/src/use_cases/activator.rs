//! Activator Use Case
//!
//! Instantiates targets from activation payloads. Each call runs the same
//! pipeline:
//!
//! ```text
//! locate ──► validate ──► bind ──► invoke
//!   │           │          │         │
//!   │           │          │         └─ TargetFailure (constructor body)
//!   │           │          └─ KeyNotFound / InvalidArgument / NotFound
//!   │           └─ InvalidArgument / InvalidDefinition
//!   └─ InvalidTarget / InvalidDefinition
//! ```

use crate::context::Context;
use crate::domain_services::{classify, EntityResolver};
use crate::ports::registry::Catalog;
use crate::schema::{
    Arguments, Bound, ErasedConstructor, Parameter, ParameterRole, Selection, TargetSchema,
};
use ctorkit_domain::error::{Error, Result};
use ctorkit_domain::value_objects::{Activation, DomainKind, TargetKey, Value};
use std::any::{type_name, Any};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Activates targets against one catalog and context
#[derive(Debug, Clone, Copy)]
pub struct Activator<'a> {
    catalog: &'a Catalog,
    context: &'a Context,
}

impl<'a> Activator<'a> {
    pub fn new(catalog: &'a Catalog, context: &'a Context) -> Self {
        Self { catalog, context }
    }

    /// Instantiate the target named by `activation`, viewed as `B`
    ///
    /// Only targets assignable to `B` are searched. Arguments are matched to
    /// exposed parameters by name; a name supplied more than once resolves
    /// to its last value. Declared bounds are not enforced here.
    pub fn activate<B: ?Sized + 'static>(&self, activation: &Activation) -> Result<Box<B>> {
        let key = activation.key();
        let schema = self.locate::<B>(&key)?;

        let constructor = schema.activation_constructor()?;
        let target = key.to_string();
        constructor.validate(&target)?;

        let supplied = activation.argument_map();
        let bound = constructor
            .parameters()
            .iter()
            .map(|parameter| self.bind(&target, parameter, &supplied))
            .collect::<Result<Vec<_>>>()?;

        let instance = self.invoke(&target, constructor, bound)?;
        info!(target_key = %key, "Activated target");
        schema.cast::<B>(instance)
    }

    /// Instantiate every permanent target assignable to `B` that
    /// `activations` does not already name
    ///
    /// A permanent target is built through its first constructor taking no
    /// parameters or only the context; a target without one fails with
    /// [`Error::InvalidDefinition`]. Development-only targets are skipped
    /// outside development mode.
    pub fn activate_permanent<B: ?Sized + 'static>(
        &self,
        activations: &[Activation],
    ) -> Result<Vec<Box<B>>> {
        let requested: HashSet<TargetKey> = activations.iter().map(Activation::key).collect();
        let development = self.context.is_development();
        let mut instances = Vec::new();

        for schema in self.catalog.assignable_to::<B>() {
            let info = schema.info();
            if !info.permanent || requested.contains(&info.key) {
                continue;
            }
            if !info.is_permitted(development) {
                debug!(target_key = %info.key, "Skipping development-only permanent target");
                continue;
            }

            let target = info.key.to_string();
            let constructor = schema
                .constructors()
                .iter()
                .find(|constructor| constructor.is_context_only())
                .ok_or_else(|| {
                    Error::invalid_definition(format!(
                        "permanent target '{target}' needs a constructor taking nothing or only the context"
                    ))
                })?;
            let bound = constructor
                .parameters()
                .iter()
                .map(|_| Bound::Context)
                .collect();

            let instance = self.invoke(&target, constructor, bound)?;
            info!(target_key = %info.key, "Activated permanent target");
            instances.push(schema.cast::<B>(instance)?);
        }

        Ok(instances)
    }

    fn locate<B: ?Sized + 'static>(&self, key: &TargetKey) -> Result<&'a TargetSchema> {
        let mut matches = self
            .catalog
            .assignable_to::<B>()
            .filter(|schema| schema.info().key == *key);
        let schema = match (matches.next(), matches.next()) {
            (Some(schema), None) => schema,
            (None, _) => {
                return Err(Error::invalid_target(format!(
                    "no target '{key}' is assignable to {}",
                    type_name::<B>()
                )))
            }
            (Some(_), Some(_)) => {
                return Err(Error::invalid_target(format!(
                    "more than one target is registered as '{key}'"
                )))
            }
        };

        if !schema.info().is_permitted(self.context.is_development()) {
            return Err(Error::invalid_target(format!(
                "target '{key}' is development-only and the context is not in development mode"
            )));
        }
        Ok(schema)
    }

    fn bind(
        &self,
        target: &str,
        parameter: &Parameter,
        supplied: &HashMap<&str, &Value>,
    ) -> Result<Bound> {
        match &parameter.role {
            ParameterRole::Exposed { name, .. } => {
                let value = supplied
                    .get(name.as_str())
                    .copied()
                    .ok_or_else(|| Error::key_not_found(name.as_str()))?;
                debug!(target_key = target, parameter = %name, value = %value, "Binding argument");
                self.bind_exposed(target, name, parameter, value)
            }
            ParameterRole::Dependency {
                type_id,
                type_name,
            } => self
                .context
                .get_dependency_by_type(*type_id, type_name)
                .map(Bound::Dependency),
            ParameterRole::Context => Ok(Bound::Context),
            ParameterRole::Unmarked => Err(Error::invalid_definition(format!(
                "target '{target}' has a parameter that is neither exposed nor a dependency"
            ))),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn bind_exposed(
        &self,
        target: &str,
        name: &str,
        parameter: &Parameter,
        value: &Value,
    ) -> Result<Bound> {
        let mismatch = |expected: &str| {
            Error::invalid_argument(format!(
                "argument '{name}' of target '{target}' expects {expected}, got {}",
                value.shape()
            ))
        };
        let resolver = EntityResolver::new(self.catalog, self.context);

        match (classify(parameter)?, &parameter.selection, value) {
            (DomainKind::SingleSelection, Some(Selection::Single(converter)), Value::Text(id)) => {
                resolver.single(converter)?.entity(id).map(Bound::Entity)
            }
            (DomainKind::SingleSelection, _, _) => Err(mismatch("a string identifier")),
            (
                DomainKind::CompositeSelection,
                Some(Selection::Composite(converter)),
                Value::Strings(ids),
            ) => resolver
                .composite(converter)?
                .entities(ids)
                .map(Bound::Entities),
            (DomainKind::CompositeSelection, _, _) => Err(mismatch("a list of string identifiers")),
            (DomainKind::Toggle, _, Value::Boolean(_))
            | (DomainKind::Count, _, Value::Integer(_))
            | (DomainKind::Quantity, _, Value::Real(_))
            | (DomainKind::Label, _, Value::Text(_)) => Ok(Bound::Value(value.clone())),
            (DomainKind::Quantity, _, Value::Integer(integer)) => {
                Ok(Bound::Value(Value::Real(*integer as f64)))
            }
            (DomainKind::Toggle, _, _) => Err(mismatch("a boolean")),
            (DomainKind::Count, _, _) => Err(mismatch("an integer")),
            (DomainKind::Quantity, _, _) => Err(mismatch("a number")),
            (DomainKind::Label, _, _) => Err(mismatch("a string")),
        }
    }

    /// Run the constructor body
    ///
    /// Argument accessor misuse is a definition error; any other error the
    /// body raised becomes [`Error::TargetFailure`] carrying it as cause.
    fn invoke(
        &self,
        target: &str,
        constructor: &ErasedConstructor,
        bound: Vec<Bound>,
    ) -> Result<Box<dyn Any>> {
        let mut arguments = Arguments::new(target, self.context, bound);
        let result = constructor.invoke(&mut arguments);
        result.map_err(|source| match arguments.take_misuse() {
            Some(message) => Error::invalid_definition(message),
            None => Error::target_failure(target, source),
        })
    }
}
