//! Unit tests for target metadata records

use ctorkit_domain::value_objects::{
    CountParameter, LabelParameter, ParameterDescription, ParameterInfo, QuantityParameter,
    SingleSelectionParameter, TargetMetadata,
};

fn info(name: &str) -> ParameterInfo {
    ParameterInfo {
        name: name.to_string(),
        description: String::new(),
        is_required: true,
    }
}

fn sample() -> TargetMetadata {
    let mut metadata = TargetMetadata::new("Moving Average");
    metadata.discriminator = "simple".to_string();
    metadata
        .properties
        .insert("category".to_string(), "trend".to_string());
    metadata.push_parameter(ParameterDescription::Count(CountParameter {
        info: info("Period"),
        default: Some(10),
        min: 0,
        max: 10,
        step: 2,
    }));
    metadata.push_parameter(ParameterDescription::Quantity(QuantityParameter {
        info: info("Factor"),
        default: None,
        min: f64::MIN,
        max: f64::MAX,
        precision: 3,
    }));
    metadata.push_parameter(ParameterDescription::Label(LabelParameter {
        info: info("Title"),
        default: Some("MA".to_string()),
        min: 0,
        max: 32,
        pattern: Some("^[A-Z]+$".to_string()),
    }));
    metadata.push_parameter(ParameterDescription::SingleSelection(
        SingleSelectionParameter {
            info: info("Source"),
            default: "close".to_string(),
            values: vec!["open".to_string(), "close".to_string()],
        },
    ));
    metadata
}

#[test]
fn test_stable_field_names() {
    let json: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();

    for field in [
        "name",
        "discriminator",
        "description",
        "isDevelopment",
        "isExperimental",
        "isComposite",
        "isParameterized",
        "properties",
        "toggles",
        "counts",
        "quantities",
        "labels",
        "singleSelections",
        "compositeSelections",
    ] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }

    let count = &json["counts"][0];
    assert_eq!(count["name"], "Period");
    assert_eq!(count["isRequired"], true);
    assert_eq!(count["default"], 10);
    assert_eq!(count["step"], 2);
    assert_eq!(json["labels"][0]["pattern"], "^[A-Z]+$");
    assert_eq!(json["singleSelections"][0]["values"][1], "close");
    assert!(json.get("children").is_none());
}

#[test]
fn test_round_trip_preserves_extreme_bounds() {
    let metadata = sample();
    let decoded = TargetMetadata::from_json(&metadata.to_json().unwrap()).unwrap();

    assert_eq!(decoded, metadata);
    assert_eq!(decoded.quantities[0].max, f64::MAX);
}

#[test]
fn test_push_parameter_marks_parameterized() {
    let metadata = sample();
    assert!(metadata.is_parameterized);
    assert_eq!(metadata.parameter_count(), 4);
    assert!(!TargetMetadata::new("Empty").is_parameterized);
}
