//! Domain Services
//!
//! Building blocks shared by the metadata compiler and the activator.
//!
//! | Service | Description |
//! |---------|-------------|
//! | [`classify`] | Pure mapping from a parameter schema to its domain kind |
//! | [`ParameterClassifier`] | Builds parameter descriptions against a context |
//! | [`EntityResolver`] | Instantiates registered entity converters |

/// Parameter classification and description
pub mod classifier;
/// Entity converter resolution
pub mod entities;

pub use classifier::{classify, ParameterClassifier};
pub use entities::EntityResolver;
