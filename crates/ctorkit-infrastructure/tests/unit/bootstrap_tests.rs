//! Context bootstrap tests

use ctorkit_domain::error::Error;
use ctorkit_domain::value_objects::Value;
use ctorkit_infrastructure::bootstrap::{build_context, context_options};
use ctorkit_infrastructure::config::{ContextConfig, FieldConfig, SourceConfig};
use std::collections::BTreeMap;

fn source(name: &str, values: &[(&str, Value)]) -> SourceConfig {
    SourceConfig {
        name: name.to_string(),
        split_names: false,
        development_only: false,
        constant: true,
        values: values
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn field(name: &str, value: Value) -> FieldConfig {
    FieldConfig {
        name: name.to_string(),
        value,
        constant: true,
        development_only: false,
    }
}

#[test]
fn test_sources_and_fields_become_variables() {
    let mut limits = source("Limits", &[("MaxCount", Value::Integer(10))]);
    limits.split_names = true;
    let mut mode = field("Mode", Value::Text("live".to_string()));
    mode.constant = false;

    let config = ContextConfig {
        sources: vec![limits],
        fields: vec![mode],
        ..Default::default()
    };
    let mut context = build_context(&config).unwrap();

    assert_eq!(context.get::<i64>("Max Count").unwrap(), 10);
    assert!(!context.contains("MaxCount"));
    assert!(matches!(
        context.set("Max Count", 11_i64),
        Err(Error::Immutable { .. })
    ));
    assert_eq!(context.set("Mode", "replay".to_string()).unwrap(), "replay");
}

#[test]
fn test_development_entries_follow_the_mode() {
    let mut debug_source = source("Debug", &[("Trace", Value::Boolean(true))]);
    debug_source.development_only = true;
    let mut debug_field = field("Seed", Value::Integer(42));
    debug_field.development_only = true;

    let mut config = ContextConfig {
        sources: vec![debug_source],
        fields: vec![debug_field],
        ..Default::default()
    };

    let production = build_context(&config).unwrap();
    assert!(!production.is_development());
    assert!(!production.contains("Trace"));
    assert!(!production.contains("Seed"));

    config.development = true;
    let development = build_context(&config).unwrap();
    assert!(development.is_development());
    assert!(development.get::<bool>("Trace").unwrap());
    assert_eq!(development.get::<i64>("Seed").unwrap(), 42);
}

#[test]
fn test_name_clash_between_source_and_field_is_duplicate() {
    let config = ContextConfig {
        sources: vec![source("Limits", &[("Count", Value::Integer(1))])],
        fields: vec![field("Count", Value::Integer(2))],
        ..Default::default()
    };
    assert!(matches!(
        build_context(&config),
        Err(Error::DuplicateKey { .. })
    ));
}

#[test]
fn test_context_options_mirror_flags() {
    let config = ContextConfig {
        development: false,
        experimental: true,
        ..Default::default()
    };
    let options = context_options(&config);
    assert!(options.experimental);
    assert!(!options.development);
}
