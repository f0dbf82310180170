//! Unit tests for the activation context

use ctorkit_application::context::{
    ConfigurationSource, Context, ContextOptions, Dependency, FieldSource,
};
use ctorkit_domain::error::Error;
use ctorkit_domain::value_objects::Value;
use std::fmt::Debug;
use std::sync::Arc;

fn context() -> Context {
    Context::new(ContextOptions::new())
}

#[test]
fn test_define_variable_twice_fails() {
    let mut context = context();
    context.define_variable("Count", 10_i64, true).unwrap();

    let result = context.define_variable("Count", 11_i64, true);
    assert!(matches!(result, Err(Error::DuplicateKey { .. })));
    assert_eq!(context.get::<i64>("Count").unwrap(), 10);
}

#[test]
fn test_get_with_right_type_returns_stored_value() {
    let mut context = context();
    context.define_variable("Name", "fast", true).unwrap();
    context.define_variable("Ratio", 0.25, true).unwrap();

    assert_eq!(context.get::<String>("Name").unwrap(), "fast");
    assert_eq!(context.get::<f64>("Ratio").unwrap(), 0.25);
    assert_eq!(
        context.get::<Value>("Name").unwrap(),
        Value::Text("fast".to_string())
    );
}

#[test]
fn test_get_with_wrong_type_fails() {
    let mut context = context();
    context.define_variable("Name", "fast", true).unwrap();

    let result = context.get::<i64>("Name");
    assert!(matches!(result, Err(Error::TypeMismatch { .. })));
}

#[test]
fn test_integer_variable_reads_as_real() {
    let mut context = context();
    context.define_variable("Count", 3_i64, true).unwrap();

    assert_eq!(context.get::<f64>("Count").unwrap(), 3.0);
}

#[test]
fn test_get_missing_variable_fails() {
    let result = context().get::<bool>("Missing");
    assert!(matches!(result, Err(Error::NotFound { .. })));
}

#[test]
fn test_set_constant_variable_fails() {
    let mut context = context();
    context.define_variable("Count", 10_i64, true).unwrap();

    let result = context.set("Count", 11_i64);
    assert!(matches!(result, Err(Error::Immutable { .. })));
}

#[test]
fn test_set_missing_variable_fails() {
    let result = context().set("Missing", true);
    assert!(matches!(result, Err(Error::NotFound { .. })));
}

#[test]
fn test_set_replaces_mutable_variable() {
    let mut context = context();
    context.define_variable("Ratio", 0.5, false).unwrap();

    assert_eq!(context.set("Ratio", 0.75).unwrap(), 0.75);
    assert_eq!(context.get::<f64>("Ratio").unwrap(), 0.75);
    let (_, variable) = context
        .variables()
        .find(|(name, _)| *name == "Ratio")
        .unwrap();
    assert!(!variable.constant);
}

#[test]
fn test_sources_seed_variables() {
    let context = Context::with_sources(
        ContextOptions::new(),
        [ConfigurationSource::new("Limits")
            .split_names()
            .field("MaxCount", 10_i64)
            .mutable_field("Threshold", 0.5)],
        [FieldSource::new("Mode", "live")],
    )
    .unwrap();

    let names: Vec<&str> = context.variables().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["Max Count", "Mode", "Threshold"]);
    assert_eq!(context.get::<i64>("Max Count").unwrap(), 10);
}

#[test]
fn test_development_only_sources_are_skipped_in_production() {
    let sources = || {
        [ConfigurationSource::new("Debug")
            .development_only()
            .field("Verbose", true)]
    };
    let fields = || [FieldSource::new("Trace", true).development_only()];

    let production = Context::with_sources(ContextOptions::new(), sources(), fields()).unwrap();
    assert!(!production.contains("Verbose"));
    assert!(!production.contains("Trace"));

    let development =
        Context::with_sources(ContextOptions::new().development(), sources(), fields()).unwrap();
    assert!(development.contains("Verbose"));
    assert!(development.contains("Trace"));
}

#[test]
fn test_duplicate_names_across_sources_abort_construction() {
    let result = Context::with_sources(
        ContextOptions::new(),
        [ConfigurationSource::new("Limits").field("Count", 1_i64)],
        [FieldSource::new("Count", 2_i64)],
    );
    assert!(matches!(result, Err(Error::DuplicateKey { .. })));
}

trait Clock: Debug {
    fn now(&self) -> u64;
}

#[derive(Debug)]
struct FixedClock(u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

#[test]
fn test_dependency_resolves_under_every_view() {
    let mut context = context();
    let clock = Arc::new(FixedClock(7));
    context
        .add_dependency(Dependency::new(clock.clone()).with_view(clock as Arc<dyn Clock>))
        .unwrap();

    assert_eq!(context.get_dependency::<FixedClock>().unwrap().now(), 7);
    assert_eq!(context.get_dependency::<dyn Clock>().unwrap().now(), 7);
}

#[test]
fn test_dependency_keys_must_be_disjoint() {
    let mut context = context();
    let first = Arc::new(FixedClock(1));
    let second = Arc::new(FixedClock(2));
    context
        .add_dependency(Dependency::new(first.clone()).with_view(first as Arc<dyn Clock>))
        .unwrap();

    let result = context.add_dependency(Dependency::new(second as Arc<dyn Clock>));
    assert!(matches!(result, Err(Error::DuplicateKey { .. })));
    assert_eq!(context.get_dependency::<dyn Clock>().unwrap().now(), 1);
}

#[test]
fn test_any_view_is_not_a_key() {
    let mut context = context();
    let clock = Arc::new(FixedClock(3));
    let dependency = Dependency::new(clock.clone())
        .with_view(clock as Arc<dyn std::any::Any>);
    assert_eq!(dependency.keys().len(), 1);
    context.add_dependency(dependency).unwrap();

    let other = Arc::new(5_u32);
    context
        .add_dependency(Dependency::new(other.clone()).with_view(other as Arc<dyn std::any::Any>))
        .unwrap();
}

#[test]
fn test_missing_dependency_fails() {
    let result = context().get_dependency::<dyn Clock>();
    assert!(matches!(result, Err(Error::NotFound { .. })));
}

#[test]
fn test_flags_are_fixed_at_construction() {
    let context = Context::new(ContextOptions::new().development().experimental());
    assert!(context.is_development());
    assert!(context.is_experimental());
}
