//! Tests for the target and converter registry
//!
//! Registers fixtures into the linkme slices from this test binary and
//! checks that `Catalog::discover` picks them up.

use crate::fixtures::{Colors, Indicator, Picker, SimpleAverage, Threshold};
use ctorkit_application::ports::registry::{
    Catalog, CatalogBuilder, ConverterRegistration, TargetRegistration, ENTITY_CONVERTERS,
    TARGETS,
};
use ctorkit_application::ports::ConverterRole;
use ctorkit_domain::error::Error;
use std::any::TypeId;

#[linkme::distributed_slice(TARGETS)]
static REGISTERED_PICKER: TargetRegistration = TargetRegistration {
    name: "picker",
    register: |catalog| catalog.target::<Picker>(),
};

#[linkme::distributed_slice(ENTITY_CONVERTERS)]
static REGISTERED_COLORS: ConverterRegistration = ConverterRegistration {
    name: "colors",
    register: |catalog| catalog.entity_converter::<Colors>("colors", "Primary colors"),
};

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_discover_includes_registered_entries() {
    let catalog = Catalog::discover().unwrap();

    assert!(
        TARGETS.iter().any(|entry| entry.name == "picker"),
        "linkme should collect the picker registration"
    );
    assert!(catalog.target(TypeId::of::<Picker>()).is_some());
    assert_eq!(
        catalog.converter("colors").map(|entry| entry.role()),
        Some(ConverterRole::Single)
    );
}

#[test]
fn test_registered_builder_extends_explicit_entries() {
    let catalog = CatalogBuilder::new()
        .target::<Threshold>()
        .registered()
        .build()
        .unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.assignable_to::<dyn Indicator>().count(), 2);
}

// ============================================================================
// Consistency
// ============================================================================

#[test]
fn test_duplicate_target_type_is_rejected() {
    let result = CatalogBuilder::new()
        .target::<SimpleAverage>()
        .target::<SimpleAverage>()
        .build();
    assert!(matches!(result, Err(Error::DuplicateKey { .. })));
}

#[test]
fn test_duplicate_converter_name_is_rejected() {
    let result = CatalogBuilder::new()
        .entity_converter::<Colors>("colors", "")
        .entity_converter::<Colors>("colors", "again")
        .build();
    assert!(matches!(result, Err(Error::DuplicateKey { .. })));
}

#[test]
fn test_converters_are_listed_by_name() {
    let catalog = CatalogBuilder::new()
        .entity_converter::<Colors>("shades", "")
        .entity_converter::<Colors>("colors", "")
        .build()
        .unwrap();

    let names: Vec<&str> = catalog.converters().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["colors", "shades"]);
}
