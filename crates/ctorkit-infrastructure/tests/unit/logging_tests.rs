//! Logging setup tests

use ctorkit_infrastructure::logging::{init_logging, log_config_loaded, parse_log_level};
use ctorkit_infrastructure::LoggingConfig;
use std::path::Path;
use tempfile::TempDir;
use tracing::Level;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("Error").unwrap(), Level::ERROR);
    assert!(parse_log_level("verbose").is_err());
}

#[test]
fn test_default_logging_config() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, "info");
    assert!(!config.json_format);
    assert!(config.file_output.is_none());
    assert_eq!(config.max_files, 5);
}

#[test]
fn test_invalid_level_fails_before_installing() {
    let config = LoggingConfig {
        level: "chatty".to_string(),
        ..Default::default()
    };
    assert!(init_logging(&config).is_err());
}

// The global subscriber can be installed once per process, so this is the
// only test that succeeds in doing it.
#[test]
fn test_init_with_file_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = LoggingConfig {
        level: "debug".to_string(),
        json_format: true,
        file_output: Some(temp_dir.path().join("ctorkit.log")),
        max_files: 2,
    };
    init_logging(&config).unwrap();
    log_config_loaded(Path::new("ctorkit.toml"), true);
    log_config_loaded(Path::new("absent.toml"), false);
}
