use std::any::{Any, TypeId, type_name};

use log::error;

use crate::{Dep, Updater};

/// Type ids a compute reads from.
///
/// A change to any of them marks the compute dirty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputeDeps {
    pub states: Vec<TypeId>,
    pub computes: Vec<TypeId>,
}

impl ComputeDeps {
    /// For caches that are only ever written by commands.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(states: Vec<TypeId>, computes: Vec<TypeId>) -> Self {
        Self { states, computes }
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.states.contains(&id) || self.computes.contains(&id)
    }
}

/// A cached value derived from other states/computes.
///
/// `compute` runs on the UI thread inside `StateCtx::run_computed` and must not
/// block or perform IO. It publishes its result through the `Updater`. Caches fed
/// by commands declare no deps and keep `compute` a no-op.
pub trait Compute: Any + Send {
    fn as_any(&self) -> &dyn Any;

    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater);

    /// Owned copy handed to commands.
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared `assign_box` body for computes.
pub fn assign_impl<T: Compute>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => error!("Update for compute {} carried a value of another type", type_name::<T>()),
    }
}
