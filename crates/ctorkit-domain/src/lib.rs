//! Domain Layer - ctorkit
//!
//! Core types shared by every layer of the metadata compiler and activator:
//!
//! - [`error`]: the error taxonomy surfaced by compilation and activation
//! - [`value_objects`]: serializable records (target metadata, activations,
//!   argument values) with stable camelCase field names
//! - [`ports`]: entity converter contracts implemented by host code
//! - [`constants`]: defaults for parameters without bound descriptors
//!
//! This crate has no knowledge of how targets are registered or invoked;
//! that lives in `ctorkit-application`.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{BoxError, Error, Result};
pub use ports::{CompositeEntityConverter, EntityConverter};
pub use value_objects::*;
