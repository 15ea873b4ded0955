use std::any::{TypeId, type_name};

use crate::{Compute, Error, State, StateCtx};

/// Read-only view of the context given to a running compute.
#[derive(Clone, Copy)]
pub struct Dep<'a> {
    ctx: &'a StateCtx,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(ctx: &'a StateCtx) -> Self {
        Self { ctx }
    }

    pub fn get_state_ref<T: State>(&self) -> Result<&'a T, Error> {
        self.ctx
            .state_ref::<T>()
            .ok_or_else(|| Error::state_not_found(TypeId::of::<T>(), type_name::<T>()))
    }

    pub fn get_compute_ref<T: Compute>(&self) -> Result<&'a T, Error> {
        self.ctx
            .cached::<T>()
            .ok_or_else(|| Error::compute_not_found(TypeId::of::<T>(), type_name::<T>()))
    }
}
