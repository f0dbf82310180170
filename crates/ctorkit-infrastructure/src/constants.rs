//! Infrastructure layer constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Configuration file looked up when no path is given
pub const DEFAULT_CONFIG_FILENAME: &str = "ctorkit.toml";

/// Directory holding the configuration file under the user config dir
pub const DEFAULT_CONFIG_DIR: &str = "ctorkit";

/// Prefix of environment variables overriding configuration keys
pub const CONFIG_ENV_PREFIX: &str = "CTORKIT";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV: &str = "CTORKIT_LOG";

/// Rotated log files kept on disk
pub const LOG_MAX_FILES: usize = 5;

/// File name prefix of log files
pub const LOG_FILE_PREFIX: &str = "ctorkit";
