//! Use Cases
//!
//! | Use Case | Description |
//! |----------|-------------|
//! | [`MetadataCompiler`] | Derives serializable metadata from target schemas |
//! | [`Activator`] | Instantiates targets from activation payloads |

/// Target activation
pub mod activator;
/// Metadata compilation
pub mod metadata_compiler;

pub use activator::Activator;
pub use metadata_compiler::MetadataCompiler;
