//! Application Ports
//!
//! Seams between the engine and host code:
//!
//! - [`converters`]: context-constructed entity converters and their
//!   object-safe views
//! - [`registry`]: the [`Catalog`] of targets and converters, assembled
//!   explicitly or from linkme registration slices

/// Entity converter construction and erasure
pub mod converters;
/// Target and converter catalog
pub mod registry;

pub use converters::{
    ConverterEntry, ConverterRole, DynCompositeEntityConverter, DynEntityConverter, FromContext,
};
pub use registry::{
    Catalog, CatalogBuilder, ConverterRegistration, TargetRegistration, ENTITY_CONVERTERS,
    TARGETS,
};
