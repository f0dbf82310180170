//! # Infrastructure Layer
//!
//! Configuration loading, logging setup and context bootstrap for
//! ctorkit hosts.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | figment-based configuration (defaults, TOML file, `CTORKIT_` environment) |
//! | [`logging`] | tracing subscriber installation |
//! | [`bootstrap`] | `[context]` section to [`Context`](ctorkit_application::context::Context) |
//! | [`error_ext`] | context messages for foreign errors |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::{build_context, context_options};
pub use config::{AppConfig, ConfigLoader, ContextConfig, LoggingConfig};
pub use error_ext::ErrorContext;
pub use logging::init_logging;
