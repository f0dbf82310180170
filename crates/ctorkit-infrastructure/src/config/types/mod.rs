//! Configuration types

pub mod app;
pub mod context;
pub mod logging;

pub use app::AppConfig;
pub use context::{ContextConfig, FieldConfig, SourceConfig};
pub use logging::LoggingConfig;
