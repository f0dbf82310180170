//! Entity Converter Ports
//!
//! Selection parameters expose a finite set of string identifiers to the
//! user and hand the matching domain values to the target constructor.
//! Converters are created fresh for every metadata build and activation.

use crate::error::{Error, Result};
use std::any::Any;

/// Maps identifiers to single domain values
///
/// # Example
///
/// ```rust
/// use ctorkit_domain::ports::EntityConverter;
///
/// struct Colors;
///
/// impl EntityConverter for Colors {
///     type Entity = u32;
///
///     fn identifiers(&self) -> Vec<String> {
///         vec!["red".into(), "green".into()]
///     }
///
///     fn default_identifier(&self) -> String {
///         "red".into()
///     }
///
///     fn entity(&self, id: &str) -> Option<u32> {
///         match id {
///             "red" => Some(0xff0000),
///             "green" => Some(0x00ff00),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait EntityConverter {
    /// Domain value produced for an identifier
    type Entity: Any;

    /// Every valid identifier, in display order
    fn identifiers(&self) -> Vec<String>;

    /// Identifier preselected in metadata
    fn default_identifier(&self) -> String;

    /// Value for `id`, `None` when `id` is not a valid identifier
    fn entity(&self, id: &str) -> Option<Self::Entity>;
}

/// Maps identifier subsets to collections of domain values
pub trait CompositeEntityConverter {
    /// Domain value produced for each identifier
    type Entity: Any;

    /// Every valid identifier, in display order
    fn identifiers(&self) -> Vec<String>;

    /// Identifiers preselected in metadata
    fn default_identifiers(&self) -> Vec<String>;

    /// Value for one identifier, `None` when invalid
    fn entity(&self, id: &str) -> Option<Self::Entity>;

    /// Values for `ids`, in order
    ///
    /// Fails with [`Error::NotFound`] on the first identifier outside the
    /// converter's universe.
    fn entities(&self, ids: &[String]) -> Result<Vec<Self::Entity>> {
        ids.iter()
            .map(|id| {
                self.entity(id)
                    .ok_or_else(|| Error::not_found(format!("entity '{id}'")))
            })
            .collect()
    }
}
