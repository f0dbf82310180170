//! Constructor schema and bound arguments
//!
//! A constructor is an ordered parameter list plus a closure that builds
//! the target from positional [`Arguments`]. Exactly one constructor per
//! target carries the activation marker.

use super::parameter::{Parameter, ParameterRole};
use crate::context::Context;
use ctorkit_domain::error::{BoxError, Error, Result};
use ctorkit_domain::value_objects::Value;
use std::any::{type_name, Any};
use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::Arc;

type Invoke<T> = Box<dyn Fn(&mut Arguments<'_>) -> std::result::Result<T, BoxError>>;

/// Typed constructor declaration
///
/// ```rust
/// use ctorkit_application::schema::{Constructor, Parameter};
///
/// struct Window {
///     size: i64,
/// }
///
/// let constructor = Constructor::activation(|args| Ok(Window { size: args.count(0)? }))
///     .parameter(Parameter::count("Size").count_bounds(1, 100, 1));
/// assert!(constructor.is_marked());
/// ```
pub struct Constructor<T> {
    marked: bool,
    parameters: Vec<Parameter>,
    invoke: Invoke<T>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Constructor<T> {
    /// Constructor carrying the activation marker
    pub fn activation<F>(invoke: F) -> Self
    where
        F: Fn(&mut Arguments<'_>) -> std::result::Result<T, BoxError> + 'static,
    {
        Self {
            marked: true,
            parameters: Vec::new(),
            invoke: Box::new(invoke),
            _marker: PhantomData,
        }
    }

    /// Constructor without the activation marker
    pub fn plain<F>(invoke: F) -> Self
    where
        F: Fn(&mut Arguments<'_>) -> std::result::Result<T, BoxError> + 'static,
    {
        Self {
            marked: false,
            ..Self::activation(invoke)
        }
    }

    /// Append a parameter
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Whether this constructor carries the activation marker
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    pub(crate) fn erase(self) -> ErasedConstructor {
        let invoke = self.invoke;
        ErasedConstructor {
            marked: self.marked,
            parameters: self.parameters,
            invoke: Box::new(move |args: &mut Arguments<'_>| {
                invoke(args).map(|value| Box::new(value) as Box<dyn Any>)
            }),
        }
    }
}

/// Constructor with its result type erased
pub struct ErasedConstructor {
    pub(crate) marked: bool,
    pub(crate) parameters: Vec<Parameter>,
    invoke: Invoke<Box<dyn Any>>,
}

impl ErasedConstructor {
    /// Ordered parameter list
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Whether this constructor carries the activation marker
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    /// Check the parameter list before binding
    ///
    /// Two exposed parameters sharing a name fail with
    /// [`Error::InvalidArgument`]; an unmarked parameter fails with
    /// [`Error::InvalidDefinition`].
    pub fn validate(&self, target: &str) -> Result<()> {
        let mut names = HashSet::new();
        for (position, parameter) in self.parameters.iter().enumerate() {
            match &parameter.role {
                ParameterRole::Exposed { name, .. } => {
                    if !names.insert(name.as_str()) {
                        return Err(Error::invalid_argument(format!(
                            "target '{target}' declares parameter '{name}' more than once"
                        )));
                    }
                }
                ParameterRole::Unmarked => {
                    return Err(Error::invalid_definition(format!(
                        "parameter {position} of target '{target}' is neither exposed nor a dependency"
                    )));
                }
                ParameterRole::Dependency { .. } | ParameterRole::Context => {}
            }
        }
        Ok(())
    }

    /// Whether the constructor takes nothing, or only the context
    pub fn is_context_only(&self) -> bool {
        match self.parameters.as_slice() {
            [] => true,
            [only] => only.role == ParameterRole::Context,
            _ => false,
        }
    }

    pub(crate) fn invoke(
        &self,
        arguments: &mut Arguments<'_>,
    ) -> std::result::Result<Box<dyn Any>, BoxError> {
        (self.invoke)(arguments)
    }
}

/// A positional argument after binding
pub(crate) enum Bound {
    Value(Value),
    Entity(Box<dyn Any>),
    Entities(Box<dyn Any>),
    Dependency(Box<dyn Any>),
    Context,
}

impl Bound {
    fn describe(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Entity(_) => "entity",
            Self::Entities(_) => "entity list",
            Self::Dependency(_) => "dependency",
            Self::Context => "context",
        }
    }
}

/// Positional arguments handed to a constructor closure
///
/// Accessors take the value at `index` out of the argument list; each
/// index can be read once. The first accessor misuse is recorded so the
/// activator can report it as a definition error rather than a failure of
/// the constructor body.
pub struct Arguments<'a> {
    target: &'a str,
    context: &'a Context,
    values: Vec<Option<Bound>>,
    misuse: Option<String>,
}

impl<'a> Arguments<'a> {
    pub(crate) fn new(target: &'a str, context: &'a Context, values: Vec<Bound>) -> Self {
        Self {
            target,
            context,
            values: values.into_iter().map(Some).collect(),
            misuse: None,
        }
    }

    /// The activation context
    pub fn context(&self) -> &'a Context {
        self.context
    }

    /// Number of positional arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the constructor received no arguments
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn take(&mut self, index: usize, expected: &str) -> Result<Bound> {
        match self.values.get_mut(index).and_then(Option::take) {
            Some(bound) => Ok(bound),
            None => Err(self.misuse(format!(
                "target '{}' reads {expected} argument {index}, which is absent or already taken",
                self.target
            ))),
        }
    }

    fn mismatch(&mut self, index: usize, expected: &str, found: &str) -> Error {
        self.misuse(format!(
            "target '{}' reads argument {index} as {expected}, but it is a {found}",
            self.target
        ))
    }

    fn misuse(&mut self, message: String) -> Error {
        let error = Error::invalid_definition(message.clone());
        self.misuse.get_or_insert(message);
        error
    }

    /// First accessor misuse recorded during the call, if any
    pub(crate) fn take_misuse(&mut self) -> Option<String> {
        self.misuse.take()
    }

    fn value(&mut self, index: usize, expected: &str) -> Result<Value> {
        match self.take(index, expected)? {
            Bound::Value(value) => Ok(value),
            other => Err(self.mismatch(index, expected, other.describe())),
        }
    }

    /// Boolean argument
    pub fn toggle(&mut self, index: usize) -> Result<bool> {
        match self.value(index, "toggle")? {
            Value::Boolean(value) => Ok(value),
            other => Err(self.mismatch(index, "toggle", other.shape().as_str())),
        }
    }

    /// Integer argument
    pub fn count(&mut self, index: usize) -> Result<i64> {
        match self.value(index, "count")? {
            Value::Integer(value) => Ok(value),
            other => Err(self.mismatch(index, "count", other.shape().as_str())),
        }
    }

    /// Real argument
    pub fn quantity(&mut self, index: usize) -> Result<f64> {
        match self.value(index, "quantity")? {
            Value::Real(value) => Ok(value),
            other => Err(self.mismatch(index, "quantity", other.shape().as_str())),
        }
    }

    /// String argument
    pub fn label(&mut self, index: usize) -> Result<String> {
        match self.value(index, "label")? {
            Value::Text(value) => Ok(value),
            other => Err(self.mismatch(index, "label", other.shape().as_str())),
        }
    }

    /// Entity produced by a single entity converter
    pub fn entity<E: 'static>(&mut self, index: usize) -> Result<E> {
        match self.take(index, type_name::<E>())? {
            Bound::Entity(entity) => entity
                .downcast::<E>()
                .map(|entity| *entity)
                .map_err(|_| self.mismatch(index, type_name::<E>(), "entity of another type")),
            other => Err(self.mismatch(index, type_name::<E>(), other.describe())),
        }
    }

    /// Entities produced by a composite entity converter
    pub fn entities<E: 'static>(&mut self, index: usize) -> Result<Vec<E>> {
        match self.take(index, type_name::<Vec<E>>())? {
            Bound::Entities(entities) => entities
                .downcast::<Vec<E>>()
                .map(|entities| *entities)
                .map_err(|_| {
                    self.mismatch(index, type_name::<Vec<E>>(), "entity list of another type")
                }),
            other => Err(self.mismatch(index, type_name::<Vec<E>>(), other.describe())),
        }
    }

    /// Dependency resolved under key `D`
    pub fn dependency<D: ?Sized + 'static>(&mut self, index: usize) -> Result<Arc<D>> {
        match self.take(index, type_name::<D>())? {
            Bound::Dependency(dependency) => dependency
                .downcast::<Arc<D>>()
                .map(|dependency| *dependency)
                .map_err(|_| self.mismatch(index, type_name::<D>(), "dependency of another type")),
            other => Err(self.mismatch(index, type_name::<D>(), other.describe())),
        }
    }
}
