//! Unit tests for the activator

use crate::fixtures::{self, Blend, Color, ExponentialAverage, Indicator, Threshold};
use ctorkit_application::use_cases::Activator;
use ctorkit_domain::error::Error;
use ctorkit_domain::value_objects::{Activation, Argument};
use std::error::Error as _;

fn average(discriminator: &str) -> Activation {
    Activation::new("Moving Average").with_discriminator(discriminator)
}

#[test]
fn test_activate_variant_by_discriminator() {
    let (catalog, context) = (fixtures::catalog(), fixtures::context());
    let activator = Activator::new(&catalog, &context);

    let simple = activator
        .activate::<dyn Indicator>(
            &average("simple").with_argument(Argument::new("Period", 20_i64)),
        )
        .unwrap();
    assert_eq!(simple.describe(), "sma 20");

    let exponential = activator
        .activate::<dyn Indicator>(
            &average("exponential")
                .with_argument(Argument::new("Period", 9_i64))
                .with_argument(Argument::new("Adjust", true)),
        )
        .unwrap();
    assert_eq!(exponential.describe(), "ema 9 true");
}

#[test]
fn test_activate_as_concrete_type() {
    let (catalog, context) = (fixtures::catalog(), fixtures::context());
    let threshold = Activator::new(&catalog, &context)
        .activate::<Threshold>(
            &Activation::new("Threshold").with_argument(Argument::new("i", 4_i64)),
        )
        .unwrap();
    assert_eq!(threshold.level, 4);
}

#[test]
fn test_target_outside_requested_base_is_not_found() {
    let (catalog, context) = (fixtures::catalog(), fixtures::context());
    let result = Activator::new(&catalog, &context).activate::<ExponentialAverage>(
        &average("simple").with_argument(Argument::new("Period", 20_i64)),
    );
    assert!(matches!(result, Err(Error::InvalidTarget { .. })));
}

#[test]
fn test_unknown_key_is_an_invalid_target() {
    let (catalog, context) = (fixtures::catalog(), fixtures::context());
    let result =
        Activator::new(&catalog, &context).activate::<dyn Indicator>(&average("weighted"));
    assert!(matches!(result, Err(Error::InvalidTarget { .. })));
}

#[test]
fn test_development_target_is_gated() {
    let catalog = fixtures::catalog();
    let probe = Activation::new("Probe");

    let production = fixtures::context();
    let result = Activator::new(&catalog, &production).activate::<dyn Indicator>(&probe);
    assert!(matches!(result, Err(Error::InvalidTarget { .. })));

    let development = fixtures::development_context();
    let instance = Activator::new(&catalog, &development)
        .activate::<dyn Indicator>(&probe)
        .unwrap();
    assert_eq!(instance.describe(), "probe");
}

#[test]
fn test_missing_argument_is_key_not_found() {
    let (catalog, context) = (fixtures::catalog(), fixtures::context());
    let result = Activator::new(&catalog, &context).activate::<dyn Indicator>(
        &average("exponential").with_argument(Argument::new("Period", 9_i64)),
    );
    assert!(matches!(result, Err(Error::KeyNotFound { ref name }) if name == "Adjust"));
}

#[test]
fn test_shape_mismatch_is_an_argument_error() {
    let (catalog, context) = (fixtures::catalog(), fixtures::context());
    let activator = Activator::new(&catalog, &context);

    let strings_for_count = average("simple").with_argument(Argument::new(
        "Period",
        vec!["1".to_string(), "2".to_string()],
    ));
    assert!(matches!(
        activator.activate::<dyn Indicator>(&strings_for_count),
        Err(Error::InvalidArgument { .. })
    ));

    let real_for_count = average("simple").with_argument(Argument::new("Period", 2.5));
    assert!(matches!(
        activator.activate::<dyn Indicator>(&real_for_count),
        Err(Error::InvalidArgument { .. })
    ));

    let list_for_single = Activation::new("Test")
        .with_argument(Argument::new("E", vec!["X".to_string()]));
    assert!(matches!(
        activator.activate::<dyn Indicator>(&list_for_single),
        Err(Error::InvalidArgument { .. })
    ));
}

#[test]
fn test_last_duplicate_argument_wins() {
    let (catalog, context) = (fixtures::catalog(), fixtures::context());
    let instance = Activator::new(&catalog, &context)
        .activate::<dyn Indicator>(
            &average("simple")
                .with_argument(Argument::new("Period", 5_i64))
                .with_argument(Argument::new("Period", 30_i64)),
        )
        .unwrap();
    assert_eq!(instance.describe(), "sma 30");
}

#[test]
fn test_bounds_are_not_enforced() {
    let (catalog, context) = (fixtures::catalog(), fixtures::context());
    let threshold = Activator::new(&catalog, &context)
        .activate::<Threshold>(
            &Activation::new("Threshold").with_argument(Argument::new("i", 99_i64)),
        )
        .unwrap();
    assert_eq!(threshold.level, 99);
}

#[test]
fn test_composite_selection_dependency_and_integer_quantity() {
    let (catalog, context) = (fixtures::catalog(), fixtures::context());
    let blend = Activator::new(&catalog, &context)
        .activate::<Blend>(
            &Activation::new("Blend")
                .with_argument(Argument::new("Colors", vec!["Z".to_string(), "X".to_string()]))
                .with_argument(Argument::new("Weight", 2_i64)),
        )
        .unwrap();

    assert_eq!(blend.colors, vec![Color("blue"), Color("red")]);
    assert_eq!(blend.weight, 2.0);
    assert_eq!(blend.price, 101.5);
}

#[test]
fn test_missing_dependency_is_not_found() {
    let catalog = fixtures::catalog();
    let context = ctorkit_application::context::Context::new(Default::default());
    let result = Activator::new(&catalog, &context).activate::<Blend>(
        &Activation::new("Blend")
            .with_argument(Argument::new("Colors", vec!["Z".to_string()]))
            .with_argument(Argument::new("Weight", 1.0)),
    );
    assert!(matches!(result, Err(Error::NotFound { .. })));
}

#[test]
fn test_constructor_failure_keeps_its_cause() {
    let (catalog, context) = (fixtures::catalog(), fixtures::context());
    let error = Activator::new(&catalog, &context)
        .activate::<dyn Indicator>(&Activation::new("Faulty"))
        .err()
        .unwrap();

    assert!(matches!(error, Error::TargetFailure { ref target, .. } if target == "Faulty"));
    assert_eq!(error.source().unwrap().to_string(), "sensor offline");
}

#[test]
fn test_permanent_targets_are_activated_unless_requested() {
    let (catalog, context) = (fixtures::catalog(), fixtures::context());
    let activator = Activator::new(&catalog, &context);

    let permanent = activator.activate_permanent::<dyn Indicator>(&[]).unwrap();
    let described: Vec<String> = permanent.iter().map(|i| i.describe()).collect();
    assert_eq!(described, vec!["clock"]);

    let requested = activator
        .activate_permanent::<dyn Indicator>(&[Activation::new("Clock")])
        .unwrap();
    assert!(requested.is_empty());
}

#[test]
fn test_permanent_target_receives_context() {
    let catalog = fixtures::catalog();
    let context = fixtures::development_context();
    let clocks = Activator::new(&catalog, &context)
        .activate_permanent::<fixtures::Clock>(&[])
        .unwrap();

    assert_eq!(clocks.len(), 1);
    assert!(clocks[0].development);
}

#[test]
fn test_body_definition_error_is_a_target_failure() {
    let (catalog, context) = (fixtures::malformed_catalog(), fixtures::context());
    let error = Activator::new(&catalog, &context)
        .activate::<dyn Indicator>(&Activation::new("Strict"))
        .err()
        .unwrap();

    assert!(matches!(error, Error::TargetFailure { ref target, .. } if target == "Strict"));
    let cause = error.source().unwrap().downcast_ref::<Error>().unwrap();
    assert!(matches!(
        cause,
        Error::InvalidDefinition { message } if message == "calibration rejected"
    ));
}

#[test]
fn test_argument_read_twice_is_a_definition_error() {
    let (catalog, context) = (fixtures::malformed_catalog(), fixtures::context());
    let result = Activator::new(&catalog, &context).activate::<dyn Indicator>(
        &Activation::new("Sloppy").with_argument(Argument::new("Span", 2_i64)),
    );
    assert!(matches!(
        result,
        Err(Error::InvalidDefinition { ref message }) if message.contains("already taken")
    ));
}

#[test]
fn test_activation_constructor_count_is_checked() {
    let (catalog, context) = (fixtures::malformed_catalog(), fixtures::context());
    let activator = Activator::new(&catalog, &context);

    let two = activator.activate::<dyn Indicator>(&Activation::new("TwoMarked"));
    assert!(matches!(
        two,
        Err(Error::InvalidDefinition { ref message })
            if message.contains("more than one activation constructor")
    ));

    let none = activator.activate::<dyn Indicator>(&Activation::new("NoMarked"));
    assert!(matches!(
        none,
        Err(Error::InvalidDefinition { ref message })
            if message.contains("no activation constructor")
    ));
}

#[test]
fn test_parameter_without_role_is_a_definition_error() {
    let (catalog, context) = (fixtures::malformed_catalog(), fixtures::context());
    let result = Activator::new(&catalog, &context).activate::<dyn Indicator>(
        &Activation::new("Unmarked").with_argument(Argument::new("Span", 1_i64)),
    );
    assert!(matches!(
        result,
        Err(Error::InvalidDefinition { ref message }) if message.contains("parameter 1")
    ));
}

#[test]
fn test_shared_key_is_an_invalid_target() {
    let (catalog, context) = (fixtures::duplicate_key_catalog(), fixtures::context());
    let result =
        Activator::new(&catalog, &context).activate::<dyn Indicator>(&Activation::new("Dup"));
    assert!(matches!(
        result,
        Err(Error::InvalidTarget { ref message }) if message.contains("more than one target")
    ));
}

#[test]
fn test_permanent_target_needs_context_only_constructor() {
    let (catalog, context) = (fixtures::malformed_catalog(), fixtures::context());
    let activator = Activator::new(&catalog, &context);

    let result = activator.activate_permanent::<dyn Indicator>(&[]);
    assert!(matches!(
        result,
        Err(Error::InvalidDefinition { ref message }) if message.contains("BadPermanent")
    ));

    // Naming it explicitly skips the permanent pass
    let requested = activator
        .activate_permanent::<dyn Indicator>(&[Activation::new("BadPermanent")])
        .unwrap();
    assert!(requested.is_empty());
}
