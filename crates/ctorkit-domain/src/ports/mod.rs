//! Domain Port Interfaces
//!
//! Contracts implemented by host code and consumed by the compiler and
//! activator.

/// Entity converters for selection parameters
pub mod converters;

pub use converters::{CompositeEntityConverter, EntityConverter};
