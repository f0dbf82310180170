//! Metadata Compiler Use Case
//!
//! Derives [`TargetMetadata`] from registered target schemas. Every call
//! re-walks the schema and re-instantiates entity converters; results are
//! value snapshots the caller may cache.

use crate::context::Context;
use crate::domain_services::ParameterClassifier;
use crate::ports::registry::Catalog;
use crate::schema::{ParameterRole, TargetSchema};
use ctorkit_domain::error::{Error, Result};
use ctorkit_domain::value_objects::TargetMetadata;
use std::any::{type_name, Any, TypeId};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Compiles target metadata against one catalog and context
#[derive(Debug, Clone, Copy)]
pub struct MetadataCompiler<'a> {
    catalog: &'a Catalog,
    context: &'a Context,
}

impl<'a> MetadataCompiler<'a> {
    pub fn new(catalog: &'a Catalog, context: &'a Context) -> Self {
        Self { catalog, context }
    }

    /// Metadata of target type `T`
    pub fn compile_singleton<T: Any>(&self) -> Result<TargetMetadata> {
        self.compile_type(TypeId::of::<T>(), type_name::<T>())
    }

    /// Metadata of the target registered for `type_id`
    ///
    /// Fails with [`Error::InvalidTarget`] when the type is not a
    /// registered target, or is development-only and the context is not in
    /// development mode.
    pub fn compile_type(&self, type_id: TypeId, type_name: &str) -> Result<TargetMetadata> {
        let schema = self.catalog.target(type_id).ok_or_else(|| {
            Error::invalid_target(format!("type {type_name} is not a registered target"))
        })?;
        self.compile_schema(schema)
    }

    /// Metadata of one schema
    pub fn compile_schema(&self, schema: &TargetSchema) -> Result<TargetMetadata> {
        let info = schema.info();
        if !info.is_permitted(self.context.is_development()) {
            return Err(Error::invalid_target(format!(
                "target '{}' is development-only and the context is not in development mode",
                info.key
            )));
        }

        let constructor = schema.activation_constructor()?;
        constructor.validate(&info.key.to_string())?;

        let mut metadata = TargetMetadata::new(info.key.name.clone());
        metadata.discriminator = info.key.discriminator.clone();
        metadata.description = info.description.clone();
        metadata.is_development = info.development;
        metadata.is_experimental = info.experimental;
        metadata.properties = schema.properties().clone();

        let classifier = ParameterClassifier::new(self.catalog, self.context);
        for parameter in constructor.parameters() {
            if let ParameterRole::Exposed { .. } = parameter.role {
                metadata.push_parameter(classifier.describe(parameter)?);
            }
        }

        debug!(
            key = %info.key,
            parameters = metadata.parameter_count(),
            "Compiled target metadata"
        );
        Ok(metadata)
    }

    /// Group metadata sharing one name under a composite
    ///
    /// The composite carries the properties every child holds with the same
    /// value; those keys are removed from the children. A child with a
    /// different name fails with [`Error::InvalidArgument`].
    pub fn compile_composite(
        name: impl Into<String>,
        children: Vec<TargetMetadata>,
    ) -> Result<TargetMetadata> {
        let name = name.into();
        if let Some(stray) = children.iter().find(|child| child.name != name) {
            return Err(Error::invalid_argument(format!(
                "composite '{name}' cannot group target '{}'",
                stray.name
            )));
        }

        let mut composite = TargetMetadata::new(name);
        composite.is_composite = true;
        composite.is_development =
            !children.is_empty() && children.iter().all(|c| c.is_development);
        composite.is_experimental =
            !children.is_empty() && children.iter().all(|c| c.is_experimental);

        let mut shared = children
            .first()
            .map(|first| first.properties.clone())
            .unwrap_or_default();
        for child in children.iter().skip(1) {
            shared.retain(|key, value| child.properties.get(key) == Some(value));
        }

        composite.children = children
            .into_iter()
            .map(|mut child| {
                child.properties.retain(|key, _| !shared.contains_key(key));
                child
            })
            .collect();
        composite.properties = shared;
        Ok(composite)
    }

    /// Metadata of every permitted target assignable to `B`
    ///
    /// Targets sharing a name form one composite, in order of first
    /// registration; a name owned by a single target compiles as a
    /// singleton. Two targets sharing a full key fail the listing with
    /// [`Error::InvalidTarget`].
    pub fn compile_for<B: ?Sized + 'static>(&self) -> Result<Vec<TargetMetadata>> {
        self.compile_group(self.catalog.assignable_to::<B>())
    }

    /// Metadata of every permitted target in the catalog
    pub fn compile_all(&self) -> Result<Vec<TargetMetadata>> {
        self.compile_group(self.catalog.targets())
    }

    fn compile_group<'s>(
        &self,
        schemas: impl Iterator<Item = &'s TargetSchema>,
    ) -> Result<Vec<TargetMetadata>> {
        let development = self.context.is_development();
        let mut groups: Vec<(&str, Vec<&TargetSchema>)> = Vec::new();
        let mut keys = HashSet::new();

        for schema in schemas {
            let info = schema.info();
            if !info.is_permitted(development) {
                warn!(key = %info.key, "Skipping development-only target");
                continue;
            }
            if !keys.insert(&info.key) {
                return Err(Error::invalid_target(format!(
                    "more than one target is registered as '{}'",
                    info.key
                )));
            }
            match groups.iter_mut().find(|(name, _)| *name == info.name()) {
                Some((_, members)) => members.push(schema),
                None => groups.push((info.name(), vec![schema])),
            }
        }

        groups
            .into_iter()
            .map(|(name, members)| match members.as_slice() {
                [single] => self.compile_schema(single),
                _ => {
                    let children = members
                        .iter()
                        .map(|schema| self.compile_schema(schema))
                        .collect::<Result<Vec<_>>>()?;
                    Self::compile_composite(name, children)
                }
            })
            .collect()
    }
}
