//! # ctorkit
//!
//! Derive parameter metadata for registered targets and activate them
//! from JSON activation records.
//!
//! ## Example
//!
//! ```ignore
//! use ctorkit::application::{Activator, Catalog, Context, ContextOptions};
//! use ctorkit::domain::value_objects::{Activation, Argument};
//! use ctorkit::samples::Filter;
//!
//! let catalog = Catalog::discover()?;
//! let context = Context::new(ContextOptions::new());
//! let activation = Activation::new("Moving Average")
//!     .with_discriminator("simple")
//!     .with_argument(Argument::new("Period", 3_i64));
//! let filter = Activator::new(&catalog, &context).activate::<dyn Filter>(&activation)?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - errors, values, activation and metadata records
//! - `application` - context, catalog, classifier, compiler, activator
//! - `infrastructure` - configuration, logging, context bootstrap
//! - [`samples`] - signal filters registered into the catalog
//! - [`cli`] - the `ctorkit` command line

/// Domain layer - records and error taxonomy
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use ctorkit_domain::*;
}

/// Application layer - metadata compiler and activator
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use ctorkit_application::*;
}

/// Infrastructure layer - configuration, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use ctorkit_infrastructure::*;
}

pub mod cli;
pub mod samples;

pub use domain::error::{Error, Result};
pub use domain::value_objects::{Activation, Argument, TargetMetadata};
