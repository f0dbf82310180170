//! Target Registry
//!
//! The [`Catalog`] is the searched universe: every registered target
//! schema, keyed by type, plus every entity converter, keyed by name.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Target Registration Flow                     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Host defines:     #[linkme::distributed_slice(TARGETS)]     │
//! │                       static ENTRY: TargetRegistration = ...    │
//! │                              ↓                                  │
//! │  2. Registry declares: #[linkme::distributed_slice]             │
//! │                        pub static TARGETS: [Entry] = [..]       │
//! │                              ↓                                  │
//! │  3. Discovery:        Catalog::discover()                       │
//! │                              ↓                                  │
//! │  4. Compiler/activator query the catalog by type or by key      │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalogs can also be assembled explicitly with [`CatalogBuilder`],
//! which is what tests do.
//!
//! ### Registering a Target
//!
//! ```ignore
//! use ctorkit_application::ports::registry::{TargetRegistration, TARGETS};
//!
//! #[linkme::distributed_slice(TARGETS)]
//! static SIMPLE_AVERAGE: TargetRegistration = TargetRegistration {
//!     name: "simple-average",
//!     register: |catalog| catalog.target::<SimpleAverage>(),
//! };
//! ```

use super::converters::{ConverterEntry, FromContext};
use crate::schema::{Target, TargetSchema};
use ctorkit_domain::error::{Error, Result};
use ctorkit_domain::ports::{CompositeEntityConverter, EntityConverter};
use std::any::TypeId;
use std::collections::{BTreeMap, HashMap};
use tracing::info;

/// Registry entry contributing one or more targets
pub struct TargetRegistration {
    /// Registration name, used in log output
    pub name: &'static str,
    /// Adds the target schemas to the catalog under construction
    pub register: fn(CatalogBuilder) -> CatalogBuilder,
}

/// Registry entry contributing one or more entity converters
pub struct ConverterRegistration {
    /// Registration name, used in log output
    pub name: &'static str,
    /// Adds the converters to the catalog under construction
    pub register: fn(CatalogBuilder) -> CatalogBuilder,
}

// Auto-collection via linkme distributed slices - hosts submit entries at compile time
#[linkme::distributed_slice]
pub static TARGETS: [TargetRegistration] = [..];

#[linkme::distributed_slice]
pub static ENTITY_CONVERTERS: [ConverterRegistration] = [..];

/// Builder for [`Catalog`]
#[derive(Default)]
pub struct CatalogBuilder {
    targets: Vec<TargetSchema>,
    converters: Vec<ConverterEntry>,
}

impl CatalogBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register target type `T`
    pub fn target<T: Target>(self) -> Self {
        self.schema(T::schema())
    }

    /// Register a target schema built without the [`Target`] trait
    pub fn schema(mut self, schema: TargetSchema) -> Self {
        self.targets.push(schema);
        self
    }

    /// Register a single entity converter under `name`
    pub fn entity_converter<C>(mut self, name: &str, description: &str) -> Self
    where
        C: EntityConverter + FromContext + 'static,
    {
        self.converters
            .push(ConverterEntry::single::<C>(name, description));
        self
    }

    /// Register a composite entity converter under `name`
    pub fn composite_converter<C>(mut self, name: &str, description: &str) -> Self
    where
        C: CompositeEntityConverter + FromContext + 'static,
    {
        self.converters
            .push(ConverterEntry::composite::<C>(name, description));
        self
    }

    /// Apply every registration submitted to [`TARGETS`] and
    /// [`ENTITY_CONVERTERS`]
    pub fn registered(self) -> Self {
        let builder = ENTITY_CONVERTERS
            .iter()
            .fold(self, |builder, entry| (entry.register)(builder));
        TARGETS
            .iter()
            .fold(builder, |builder, entry| (entry.register)(builder))
    }

    /// Finish the catalog
    ///
    /// A type registered twice or a converter name used twice fails with
    /// [`Error::DuplicateKey`].
    pub fn build(self) -> Result<Catalog> {
        let mut index = HashMap::with_capacity(self.targets.len());
        for (position, schema) in self.targets.iter().enumerate() {
            if index.insert(schema.type_id(), position).is_some() {
                return Err(Error::duplicate_key(format!(
                    "target type '{}'",
                    schema.type_name()
                )));
            }
        }

        let mut converters = BTreeMap::new();
        for entry in self.converters {
            if converters.contains_key(&entry.name) {
                return Err(Error::duplicate_key(format!(
                    "entity converter '{}'",
                    entry.name
                )));
            }
            converters.insert(entry.name.clone(), entry);
        }

        Ok(Catalog {
            targets: self.targets,
            index,
            converters,
        })
    }
}

/// The searched universe of targets and entity converters
pub struct Catalog {
    targets: Vec<TargetSchema>,
    index: HashMap<TypeId, usize>,
    converters: BTreeMap<String, ConverterEntry>,
}

impl Catalog {
    /// Catalog of everything submitted to the linkme registries
    pub fn discover() -> Result<Self> {
        let catalog = CatalogBuilder::new().registered().build()?;
        info!(
            targets = catalog.targets.len(),
            converters = catalog.converters.len(),
            "Discovered registered targets"
        );
        Ok(catalog)
    }

    /// All targets, in registration order
    pub fn targets(&self) -> impl Iterator<Item = &TargetSchema> {
        self.targets.iter()
    }

    /// Schema of type `type_id`, if registered
    pub fn target(&self, type_id: TypeId) -> Option<&TargetSchema> {
        self.index.get(&type_id).map(|&position| &self.targets[position])
    }

    /// Targets whose instances can be viewed as `B`, in registration order
    pub fn assignable_to<B: ?Sized + 'static>(&self) -> impl Iterator<Item = &TargetSchema> {
        self.targets
            .iter()
            .filter(|schema| schema.is_assignable_to::<B>())
    }

    /// All converters, sorted by name
    pub fn converters(&self) -> impl Iterator<Item = &ConverterEntry> {
        self.converters.values()
    }

    /// Converter registered under `name`
    pub fn converter(&self, name: &str) -> Option<&ConverterEntry> {
        self.converters.get(name)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("targets", &self.targets)
            .field("converters", &self.converters)
            .finish()
    }
}
