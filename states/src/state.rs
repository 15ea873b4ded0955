use std::any::{Any, TypeId, type_name};
use std::fmt::Debug;

use flume::Sender;

/// A plain value held by [`StateCtx`](crate::StateCtx) and mutated by the UI.
///
/// Every state change marks the computes that depend on it as dirty.
pub trait State: Any + Debug {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Replace `self` with a value sent through an [`Updater`].
    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Shared `assign_box` body for [`State`] implementations.
pub fn state_assign_impl<T: State>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => log::warn!("Dropped update with mismatched type for {}", type_name::<T>()),
    }
}

/// Message carried from computes back to the context.
pub(crate) type UpdateMessage = (TypeId, Box<dyn Any + Send>);

/// Write handle handed to computes.
///
/// Values sent here are applied on the next [`StateCtx::sync_computes`](crate::StateCtx::sync_computes).
/// When several values for the same type are queued, the last one wins.
#[derive(Debug, Clone)]
pub struct Updater {
    send: Sender<UpdateMessage>,
}

impl Updater {
    pub(crate) fn new(send: Sender<UpdateMessage>) -> Self {
        Self { send }
    }

    pub fn set<T: Any + Send>(&self, value: T) {
        if self
            .send
            .send((TypeId::of::<T>(), Box::new(value)))
            .is_err()
        {
            log::warn!(
                "State context is gone, update for {} discarded",
                type_name::<T>()
            );
        }
    }
}
