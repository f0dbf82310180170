//! Target schema
//!
//! The registration-time replacement for attribute reflection: each target
//! type describes its identity, properties, base-type views and
//! constructors once, and the compiler and activator read that description.

use super::constructor::{Constructor, ErasedConstructor};
use ctorkit_domain::error::{Error, Result};
use ctorkit_domain::value_objects::TargetInfo;
use std::any::{type_name, Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::marker::PhantomData;

/// Upcast from the erased constructor result to `Box<B>`
type Caster<B> = Box<dyn Fn(Box<dyn Any>) -> Option<Box<B>>>;

/// A type that can be registered as an activation target
///
/// ```rust
/// use ctorkit_application::schema::{Constructor, Parameter, Target, TargetSchema};
/// use ctorkit_domain::value_objects::TargetInfo;
///
/// struct Pause {
///     seconds: f64,
/// }
///
/// impl Target for Pause {
///     fn schema() -> TargetSchema {
///         TargetSchema::builder::<Self>(TargetInfo::new("Pause"))
///             .constructor(
///                 Constructor::activation(|args| Ok(Pause { seconds: args.quantity(0)? }))
///                     .parameter(Parameter::quantity("Seconds").default_value(1.5)),
///             )
///             .build()
///     }
/// }
///
/// assert_eq!(Pause::schema().info().name(), "Pause");
/// ```
pub trait Target: Any {
    /// Declarative description of this target
    fn schema() -> TargetSchema;
}

/// Type-erased description of one target type
pub struct TargetSchema {
    type_id: TypeId,
    type_name: &'static str,
    info: TargetInfo,
    properties: BTreeMap<String, String>,
    casts: HashMap<TypeId, Box<dyn Any>>,
    constructors: Vec<ErasedConstructor>,
}

impl TargetSchema {
    /// Start describing target type `T`
    ///
    /// `T` is always assignable to itself.
    pub fn builder<T: Any>(info: TargetInfo) -> SchemaBuilder<T> {
        SchemaBuilder {
            schema: Self {
                type_id: TypeId::of::<T>(),
                type_name: type_name::<T>(),
                info,
                properties: BTreeMap::new(),
                casts: HashMap::new(),
                constructors: Vec::new(),
            },
            _marker: PhantomData,
        }
        .implements::<T>(Box::new)
    }

    /// Concrete type described by this schema
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Rust name of the concrete type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Declarative identity and flags
    pub fn info(&self) -> &TargetInfo {
        &self.info
    }

    /// Property bag, values in canonical string form
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// All declared constructors
    pub fn constructors(&self) -> &[ErasedConstructor] {
        &self.constructors
    }

    /// Whether instances can be viewed as `B`
    pub fn is_assignable_to<B: ?Sized + 'static>(&self) -> bool {
        self.casts.contains_key(&TypeId::of::<B>())
    }

    /// The single constructor carrying the activation marker
    ///
    /// Zero or several marked constructors fail with
    /// [`Error::InvalidDefinition`].
    pub fn activation_constructor(&self) -> Result<&ErasedConstructor> {
        let mut marked = self.constructors.iter().filter(|c| c.is_marked());
        match (marked.next(), marked.next()) {
            (Some(constructor), None) => Ok(constructor),
            (None, _) => Err(Error::invalid_definition(format!(
                "target '{}' has no activation constructor",
                self.info.key
            ))),
            (Some(_), Some(_)) => Err(Error::invalid_definition(format!(
                "target '{}' has more than one activation constructor",
                self.info.key
            ))),
        }
    }

    /// View a constructed instance as `B`
    pub(crate) fn cast<B: ?Sized + 'static>(&self, instance: Box<dyn Any>) -> Result<Box<B>> {
        self.casts
            .get(&TypeId::of::<B>())
            .and_then(|caster| caster.downcast_ref::<Caster<B>>())
            .and_then(|caster| caster(instance))
            .ok_or_else(|| {
                Error::invalid_definition(format!(
                    "target '{}' cannot be viewed as {}",
                    self.info.key,
                    type_name::<B>()
                ))
            })
    }
}

impl std::fmt::Debug for TargetSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetSchema")
            .field("type_name", &self.type_name)
            .field("info", &self.info)
            .field("properties", &self.properties)
            .field("constructors", &self.constructors.len())
            .finish_non_exhaustive()
    }
}

/// Typed builder for [`TargetSchema`]
pub struct SchemaBuilder<T> {
    schema: TargetSchema,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any> SchemaBuilder<T> {
    /// Add a property; the value is stored in its `Display` form
    pub fn property(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.schema.properties.insert(key.into(), value.to_string());
        self
    }

    /// Make instances resolvable as `B`, typically a trait object
    pub fn implements<B: ?Sized + 'static>(mut self, cast: fn(T) -> Box<B>) -> Self {
        let caster: Caster<B> = Box::new(move |instance: Box<dyn Any>| {
            instance.downcast::<T>().ok().map(|value| cast(*value))
        });
        self.schema.casts.insert(TypeId::of::<B>(), Box::new(caster));
        self
    }

    /// Declare a constructor
    pub fn constructor(mut self, constructor: Constructor<T>) -> Self {
        self.schema.constructors.push(constructor.erase());
        self
    }

    pub fn build(self) -> TargetSchema {
        self.schema
    }
}
