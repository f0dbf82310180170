//! Type-keyed dependencies
//!
//! A dependency is one shared instance reachable under several keys: its
//! own type plus every trait-object view it was registered with. Key sets
//! of different dependencies never overlap.

use std::any::{type_name, Any, TypeId};
use std::sync::Arc;

/// Clones the `Arc<V>` held in an erased slot into a fresh box
type ShareFn = fn(&dyn Any) -> Option<Box<dyn Any>>;

fn share<V: ?Sized + 'static>(slot: &dyn Any) -> Option<Box<dyn Any>> {
    slot.downcast_ref::<Arc<V>>()
        .map(|value| Box::new(Arc::clone(value)) as Box<dyn Any>)
}

/// One key under which a dependency can be resolved
pub(crate) struct DependencyView {
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) value: Box<dyn Any>,
    pub(crate) share: ShareFn,
}

impl DependencyView {
    fn of<V: ?Sized + 'static>(value: Arc<V>) -> Self {
        Self {
            type_id: TypeId::of::<V>(),
            type_name: type_name::<V>(),
            value: Box::new(value),
            share: share::<V>,
        }
    }

    /// Fresh `Box<Arc<V>>` for the view's key type
    pub(crate) fn shared(&self) -> Option<Box<dyn Any>> {
        (self.share)(&*self.value)
    }
}

/// A dependency ready to be added to a context
///
/// ```rust
/// use ctorkit_application::context::Dependency;
/// use std::fmt::Debug;
/// use std::sync::Arc;
///
/// let clock = Arc::new(42_u64);
/// let dependency = Dependency::new(clock.clone()).with_view(clock as Arc<dyn Debug>);
/// assert_eq!(dependency.keys().len(), 2);
/// ```
pub struct Dependency {
    pub(crate) type_name: &'static str,
    pub(crate) views: Vec<DependencyView>,
}

impl Dependency {
    /// Register `value` under its own type
    pub fn new<T: ?Sized + 'static>(value: Arc<T>) -> Self {
        Self {
            type_name: type_name::<T>(),
            views: vec![DependencyView::of(value)],
        }
    }

    /// Also make the dependency resolvable as `V`, typically a trait object
    /// the concrete type implements
    ///
    /// A `dyn Any` view is ignored: the universal base never keys a
    /// dependency.
    pub fn with_view<V: ?Sized + 'static>(mut self, view: Arc<V>) -> Self {
        if TypeId::of::<V>() != TypeId::of::<dyn Any>() {
            self.views.push(DependencyView::of(view));
        }
        self
    }

    /// Type names of every key
    pub fn keys(&self) -> Vec<&'static str> {
        self.views.iter().map(|view| view.type_name).collect()
    }
}

impl std::fmt::Debug for Dependency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dependency")
            .field("type_name", &self.type_name)
            .field("keys", &self.keys())
            .finish()
    }
}
