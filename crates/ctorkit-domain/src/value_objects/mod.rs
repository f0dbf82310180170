//! Domain Value Objects
//!
//! Immutable records exchanged between the compiler, the activator and
//! whatever sits on the other side of the wire.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Value`] | One of the five argument/variable shapes |
//! | [`TargetKey`] | `(name, discriminator)` identity of a target |
//! | [`TargetInfo`] | Declarative flags and description of a target |
//! | [`Activation`] | Named-argument payload selecting a target |
//! | [`TargetMetadata`] | Compiled description of a target's parameters |

/// Activation payloads
pub mod activation;
/// Compiled metadata records
pub mod metadata;
/// Target identity and flags
pub mod target;
/// Dynamic values
pub mod value;

pub use activation::{Activation, Argument};
pub use metadata::{
    CompositeSelectionParameter, CountParameter, DomainKind, LabelParameter, ParameterDescription,
    ParameterInfo, QuantityParameter, SingleSelectionParameter, TargetMetadata, ToggleParameter,
};
pub use target::{TargetInfo, TargetKey};
pub use value::{FromValue, Value, ValueShape};
