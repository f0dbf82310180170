//! Configuration loader tests
//!
//! Tests touching the environment or the working directory run inside a
//! `figment::Jail`, which serializes them and restores state afterwards.

use ctorkit_domain::error::Error;
use ctorkit_domain::value_objects::Value;
use ctorkit_infrastructure::config::{AppConfig, ConfigLoader, FieldConfig, SourceConfig};
use figment::Jail;
use std::collections::BTreeMap;
use tempfile::TempDir;

const SAMPLE: &str = r#"
[logging]
level = "debug"

[context]
development = true

[[context.sources]]
name = "Limits"
split_names = true

[context.sources.values]
MaxCount = 10
Threshold = 0.5

[[context.fields]]
name = "Mode"
value = "live"
constant = false
"#;

#[test]
fn test_defaults_without_any_file() {
    Jail::expect_with(|_jail| {
        let config = ConfigLoader::new()
            .load()
            .map_err(|e| e.to_string())?;
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.logging.level, "info");
        assert!(!config.context.development);
        Ok(())
    });
}

#[test]
fn test_file_in_working_directory_is_discovered() {
    Jail::expect_with(|jail| {
        jail.create_file("ctorkit.toml", SAMPLE)?;

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;
        assert_eq!(config.logging.level, "debug");
        assert!(config.context.development);

        let limits = &config.context.sources[0];
        assert_eq!(limits.name, "Limits");
        assert!(limits.split_names);
        assert!(limits.constant);
        assert_eq!(limits.values["MaxCount"], Value::Integer(10));
        assert_eq!(limits.values["Threshold"], Value::Real(0.5));

        let mode = &config.context.fields[0];
        assert_eq!(mode.value, Value::Text("live".to_string()));
        assert!(!mode.constant);
        Ok(())
    });
}

#[test]
fn test_environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("custom.toml", SAMPLE)?;
        jail.set_env("CTORKIT_CONTEXT__DEVELOPMENT", "false");
        jail.set_env("CTORKIT_LOGGING__JSON_FORMAT", "true");

        let config = ConfigLoader::new()
            .with_config_path("custom.toml")
            .load()
            .map_err(|e| e.to_string())?;
        assert!(!config.context.development);
        assert!(config.logging.json_format);
        assert_eq!(config.logging.level, "debug");
        Ok(())
    });
}

#[test]
fn test_custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("HOST_CONTEXT__EXPERIMENTAL", "true");
        jail.set_env("CTORKIT_CONTEXT__DEVELOPMENT", "true");

        let config = ConfigLoader::new()
            .with_env_prefix("HOST")
            .load()
            .map_err(|e| e.to_string())?;
        assert!(config.context.experimental);
        assert!(!config.context.development);
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    Jail::expect_with(|_jail| {
        let loader = ConfigLoader::new().with_config_path("absent.toml");
        assert_eq!(
            loader.config_path().and_then(|p| p.to_str()),
            Some("absent.toml")
        );
        let config = loader.load().map_err(|e| e.to_string())?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    });
}

#[test]
fn test_empty_source_name_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "ctorkit.toml",
            r#"
            [[context.sources]]
            name = " "
            "#,
        )?;

        let result = ConfigLoader::new().load();
        assert!(matches!(result, Err(Error::Configuration { .. })));
        Ok(())
    });
}

#[test]
fn test_repeated_source_name_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "ctorkit.toml",
            r#"
            [[context.sources]]
            name = "Limits"

            [[context.sources]]
            name = "Limits"
            "#,
        )?;

        let error = ConfigLoader::new().load().unwrap_err();
        assert!(error.to_string().contains("more than once"));
        Ok(())
    });
}

#[test]
fn test_invalid_log_level_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("CTORKIT_LOGGING__LEVEL", "loud");
        let result = ConfigLoader::new().load();
        assert!(matches!(result, Err(Error::Configuration { .. })));
        Ok(())
    });
}

#[test]
fn test_malformed_file_is_a_configuration_error() {
    Jail::expect_with(|jail| {
        jail.create_file("ctorkit.toml", "[context]\ndevelopment = \"often\"\n")?;
        let error = ConfigLoader::new().load().unwrap_err();
        assert!(matches!(error, Error::Configuration { .. }));
        assert!(error.to_string().contains("Failed to extract configuration"));
        Ok(())
    });
}

#[test]
fn test_save_and_reload_round_trip() {
    Jail::expect_with(|_jail| {
        let temp_dir = TempDir::new().map_err(|e| e.to_string())?;
        let path = temp_dir.path().join("saved.toml");

        let mut config = AppConfig::default();
        config.context.experimental = true;
        config.context.sources.push(SourceConfig {
            name: "Limits".to_string(),
            split_names: false,
            development_only: true,
            constant: false,
            values: BTreeMap::from([("Count".to_string(), Value::Integer(3))]),
        });
        config.context.fields.push(FieldConfig {
            name: "Symbols".to_string(),
            value: Value::Strings(vec!["AAA".to_string(), "BBB".to_string()]),
            constant: true,
            development_only: false,
        });

        let loader = ConfigLoader::new().with_config_path(&path);
        loader
            .save_to_file(&config, &path)
            .map_err(|e| e.to_string())?;
        let reloaded = loader.load().map_err(|e| e.to_string())?;

        assert_eq!(reloaded, config);
        Ok(())
    });
}
