//! Entity resolution
//!
//! Looks up the converter a selection parameter refers to and instantiates
//! it from the context. Converters are rebuilt on every call; nothing is
//! cached.

use crate::context::Context;
use crate::ports::converters::{
    ConverterFactory, DynCompositeEntityConverter, DynEntityConverter,
};
use crate::ports::registry::Catalog;
use ctorkit_domain::error::{Error, Result};
use tracing::trace;

/// Instantiates registered entity converters against one context
#[derive(Debug, Clone, Copy)]
pub struct EntityResolver<'a> {
    catalog: &'a Catalog,
    context: &'a Context,
}

impl<'a> EntityResolver<'a> {
    pub fn new(catalog: &'a Catalog, context: &'a Context) -> Self {
        Self { catalog, context }
    }

    /// Fresh instance of the single entity converter `name`
    ///
    /// An unregistered name, or a converter registered as composite, fails
    /// with [`Error::InvalidDefinition`].
    pub fn single(&self, name: &str) -> Result<Box<dyn DynEntityConverter>> {
        let entry = self
            .catalog
            .converter(name)
            .ok_or_else(|| Self::unregistered(name))?;
        match entry.factory {
            ConverterFactory::Single(make) => {
                trace!(converter = name, "Instantiating entity converter");
                make(self.context)
            }
            ConverterFactory::Composite(_) => Err(Error::invalid_definition(format!(
                "entity converter '{name}' is composite, a single converter is required"
            ))),
        }
    }

    /// Fresh instance of the composite entity converter `name`
    pub fn composite(&self, name: &str) -> Result<Box<dyn DynCompositeEntityConverter>> {
        let entry = self
            .catalog
            .converter(name)
            .ok_or_else(|| Self::unregistered(name))?;
        match entry.factory {
            ConverterFactory::Composite(make) => {
                trace!(converter = name, "Instantiating composite entity converter");
                make(self.context)
            }
            ConverterFactory::Single(_) => Err(Error::invalid_definition(format!(
                "entity converter '{name}' is single, a composite converter is required"
            ))),
        }
    }

    fn unregistered(name: &str) -> Error {
        Error::invalid_definition(format!("entity converter '{name}' is not registered"))
    }
}
