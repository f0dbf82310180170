//! Application Layer - ctorkit
//!
//! The metadata-derivation and activation engine.
//!
//! ## Architecture
//!
//! ```text
//!                ┌──────────────┐
//!  Activation ──►│  Activator   │──► Box<dyn Base>
//!                └──────┬───────┘
//!                       │ locate / bind
//!  ┌─────────┐   ┌──────▼───────┐   ┌──────────────────┐
//!  │ Context │──►│   Catalog    │◄──│ linkme TARGETS / │
//!  └────┬────┘   │ (schemas +   │   │ ENTITY_CONVERTERS│
//!       │        │  converters) │   └──────────────────┘
//!       │        └──────┬───────┘
//!       │               │ classify / describe
//!       │        ┌──────▼───────┐
//!       └───────►│  Metadata    │──► TargetMetadata (JSON)
//!                │  Compiler    │
//!                └──────────────┘
//! ```
//!
//! - [`context`]: variables, type-keyed dependencies and mode flags
//! - [`schema`]: explicit registration descriptors for targets, their
//!   constructors and parameters
//! - [`ports`]: entity converter erasure and the target catalog
//! - [`domain_services`]: parameter classification and entity resolution
//! - [`use_cases`]: the metadata compiler and the activator
//!
//! All operations are synchronous. A context is not internally
//! synchronized; use one per thread.
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `ctorkit-domain`: error taxonomy, records and converter ports
//! - `tracing`, `regex` and `linkme`

pub mod context;
pub mod domain_services;
pub mod ports;
pub mod schema;
pub mod use_cases;

pub use context::{Context, ContextOptions, Dependency};
pub use domain_services::{classify, EntityResolver, ParameterClassifier};
pub use ports::{Catalog, CatalogBuilder, FromContext};
pub use schema::{Constructor, Parameter, Target, TargetSchema};
pub use use_cases::{Activator, MetadataCompiler};
