use std::any::{Any, TypeId, type_name};
use std::fmt::Debug;

use crate::{Dep, Updater};

/// Dependencies of a compute: `(states, computes)`.
pub type ComputeDeps = (Vec<TypeId>, Vec<TypeId>);

/// A derived value that is recalculated when any of its dependencies change.
///
/// `compute` only reads through [`Dep`]; results are published with
/// [`Updater::set`] and land on the next sync.
pub trait Compute: Any + Debug {
    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater);

    fn as_any(&self) -> &dyn Any;

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared `assign_box` body for [`Compute`] implementations.
pub fn assign_impl<T: Compute>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => log::warn!("Dropped compute result with mismatched type for {}", type_name::<T>()),
    }
}
