//! Entity Converter Ports
//!
//! Converters are registered by name in the [`Catalog`](super::Catalog)
//! and instantiated from the current context on every use. The
//! `FromContext` bound is the only constructor shape accepted.

use crate::context::Context;
use ctorkit_domain::error::{Error, Result};
use ctorkit_domain::ports::{CompositeEntityConverter, EntityConverter};
use std::any::Any;
use std::fmt;

/// Construction from the activation context
pub trait FromContext: Sized {
    fn from_context(context: &Context) -> Result<Self>;
}

/// Object-safe view of an [`EntityConverter`]
pub trait DynEntityConverter {
    fn identifiers(&self) -> Vec<String>;
    fn default_identifier(&self) -> String;
    /// Boxed entity for `id`; unknown identifiers fail with `NotFound`
    fn entity(&self, id: &str) -> Result<Box<dyn Any>>;
}

impl<C: EntityConverter> DynEntityConverter for C {
    fn identifiers(&self) -> Vec<String> {
        EntityConverter::identifiers(self)
    }

    fn default_identifier(&self) -> String {
        EntityConverter::default_identifier(self)
    }

    fn entity(&self, id: &str) -> Result<Box<dyn Any>> {
        EntityConverter::entity(self, id)
            .map(|entity| Box::new(entity) as Box<dyn Any>)
            .ok_or_else(|| Error::not_found(format!("entity '{id}'")))
    }
}

/// Object-safe view of a [`CompositeEntityConverter`]
pub trait DynCompositeEntityConverter {
    fn identifiers(&self) -> Vec<String>;
    fn default_identifiers(&self) -> Vec<String>;
    /// Boxed `Vec` of entities for `ids`
    fn entities(&self, ids: &[String]) -> Result<Box<dyn Any>>;
}

impl<C: CompositeEntityConverter> DynCompositeEntityConverter for C {
    fn identifiers(&self) -> Vec<String> {
        CompositeEntityConverter::identifiers(self)
    }

    fn default_identifiers(&self) -> Vec<String> {
        CompositeEntityConverter::default_identifiers(self)
    }

    fn entities(&self, ids: &[String]) -> Result<Box<dyn Any>> {
        let entities = CompositeEntityConverter::entities(self, ids)?;
        Ok(Box::new(entities))
    }
}

/// Which converter contract a registration fulfils
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterRole {
    Single,
    Composite,
}

impl fmt::Display for ConverterRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Single => "single",
            Self::Composite => "composite",
        })
    }
}

pub(crate) type SingleFactory = fn(&Context) -> Result<Box<dyn DynEntityConverter>>;
pub(crate) type CompositeFactory = fn(&Context) -> Result<Box<dyn DynCompositeEntityConverter>>;

#[derive(Clone, Copy)]
pub(crate) enum ConverterFactory {
    Single(SingleFactory),
    Composite(CompositeFactory),
}

fn make_single<C>(context: &Context) -> Result<Box<dyn DynEntityConverter>>
where
    C: EntityConverter + FromContext + 'static,
{
    Ok(Box::new(C::from_context(context)?))
}

fn make_composite<C>(context: &Context) -> Result<Box<dyn DynCompositeEntityConverter>>
where
    C: CompositeEntityConverter + FromContext + 'static,
{
    Ok(Box::new(C::from_context(context)?))
}

/// Registry entry for an entity converter
#[derive(Clone)]
pub struct ConverterEntry {
    /// Unique converter name referenced by selection parameters
    pub name: String,
    /// Human-readable description
    pub description: String,
    pub(crate) factory: ConverterFactory,
}

impl ConverterEntry {
    /// Entry for a single entity converter
    pub fn single<C>(name: impl Into<String>, description: impl Into<String>) -> Self
    where
        C: EntityConverter + FromContext + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            factory: ConverterFactory::Single(make_single::<C>),
        }
    }

    /// Entry for a composite entity converter
    pub fn composite<C>(name: impl Into<String>, description: impl Into<String>) -> Self
    where
        C: CompositeEntityConverter + FromContext + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            factory: ConverterFactory::Composite(make_composite::<C>),
        }
    }

    /// Contract this converter fulfils
    pub fn role(&self) -> ConverterRole {
        match self.factory {
            ConverterFactory::Single(_) => ConverterRole::Single,
            ConverterFactory::Composite(_) => ConverterRole::Composite,
        }
    }
}

impl fmt::Debug for ConverterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("role", &self.role())
            .finish()
    }
}
