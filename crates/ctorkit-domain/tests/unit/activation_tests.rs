//! Unit tests for activation records

use ctorkit_domain::value_objects::{Activation, Argument, Value};

#[test]
fn test_wire_format_uses_kind_tags() {
    let activation = Activation::new("Test")
        .with_argument(Argument::new("Enabled", true))
        .with_argument(Argument::new("Period", 14_i64))
        .with_argument(Argument::new("Factor", 0.5))
        .with_argument(Argument::new("Label", "fast"))
        .with_argument(Argument::new("Sources", vec!["a".to_string(), "b".to_string()]));

    let json: serde_json::Value = serde_json::from_str(&activation.to_json().unwrap()).unwrap();
    let kinds: Vec<&str> = json["arguments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|argument| argument["kind"].as_str().unwrap())
        .collect();

    assert_eq!(kinds, vec!["boolean", "number", "number", "string", "strings"]);
    assert_eq!(json["discriminator"], "");
}

#[test]
fn test_round_trip() {
    let activation = Activation::new("Moving Average")
        .with_discriminator("simple")
        .with_argument(Argument::new("Period", 20_i64))
        .with_argument(Argument::new("Weight", 2.0));

    let decoded = Activation::from_json(&activation.to_json().unwrap()).unwrap();
    assert_eq!(decoded, activation);
    assert_eq!(decoded.arguments[1].value, Value::Real(2.0));
}

#[test]
fn test_discriminator_defaults_to_empty() {
    let activation = Activation::from_json(
        r#"{"name":"Test","arguments":[{"kind":"string","name":"E","value":"Y"}]}"#,
    )
    .unwrap();

    assert_eq!(activation.discriminator, "");
    assert_eq!(activation.arguments[0].value, Value::Text("Y".to_string()));
}

#[test]
fn test_integral_number_decodes_as_integer() {
    let activation = Activation::from_json(
        r#"{"name":"T","arguments":[{"kind":"number","name":"a","value":3},{"kind":"number","name":"b","value":3.25}]}"#,
    )
    .unwrap();

    assert_eq!(activation.arguments[0].value, Value::Integer(3));
    assert_eq!(activation.arguments[1].value, Value::Real(3.25));
}

#[test]
fn test_argument_map_last_wins() {
    let activation = Activation::new("T")
        .with_argument(Argument::new("A", 1_i64))
        .with_argument(Argument::new("A", 2_i64));

    let map = activation.argument_map();
    assert_eq!(map.len(), 1);
    assert_eq!(map["A"], &Value::Integer(2));
}

#[test]
fn test_unknown_kind_is_rejected() {
    let result = Activation::from_json(
        r#"{"name":"T","arguments":[{"kind":"date","name":"a","value":"2020"}]}"#,
    );
    assert!(result.is_err());
}
