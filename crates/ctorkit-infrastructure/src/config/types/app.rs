//! Application configuration root

use super::context::ContextConfig;
use super::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Activation context configuration
    pub context: ContextConfig,
}
