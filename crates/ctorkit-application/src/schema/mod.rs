//! Target Registration Schema
//!
//! Explicit descriptors attached to each target at registration time:
//!
//! ```text
//! TargetSchema
//! ├── TargetInfo (name, discriminator, description, flags)
//! ├── properties (key → canonical string)
//! ├── casts (base types the target is assignable to)
//! └── constructors
//!     └── Parameter (role, value type, bounds, default, selection)
//! ```

pub mod constructor;
pub mod parameter;
pub mod target;

pub(crate) use constructor::Bound;
pub use constructor::{Arguments, Constructor, ErasedConstructor};
pub use parameter::{Bounds, Parameter, ParameterRole, Selection, ValueSource, ValueType};
pub use target::{SchemaBuilder, Target, TargetSchema};
