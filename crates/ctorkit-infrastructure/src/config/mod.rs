//! Configuration management
//!
//! Layered configuration with Figment: defaults, then a TOML file, then
//! `CTORKIT_`-prefixed environment variables (`CTORKIT_CONTEXT__DEVELOPMENT=true`).

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, ContextConfig, FieldConfig, LoggingConfig, SourceConfig};
