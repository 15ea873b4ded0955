use std::any::{TypeId, type_name};
use std::collections::BTreeMap;

use crate::state::UpdateMessage;
use crate::{Compute, Dep, State, StateRuntime, StateSyncStatus, TopologyError, Updater};

#[derive(Debug)]
struct Slot<T: ?Sized> {
    value: Box<T>,
    status: StateSyncStatus,
    name: &'static str,
}

impl<T: ?Sized> Slot<T> {
    fn new(value: Box<T>, name: &'static str) -> Self {
        Self {
            value,
            status: StateSyncStatus::Init,
            name,
        }
    }
}

/// Owner of every state and compute in the app.
///
/// A frame runs `sync_computes` (apply queued results), then the UI reads and
/// updates states, then `run_computed` (re-run computes whose inputs changed).
#[derive(Debug, Default)]
pub struct StateCtx {
    runtime: StateRuntime,

    states: BTreeMap<TypeId, Slot<dyn State>>,
    computes: BTreeMap<TypeId, Slot<dyn Compute>>,

    order_stale: bool,
}

impl StateCtx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        let id = TypeId::of::<T>();
        self.states
            .insert(id, Slot::new(Box::new(state), type_name::<T>()));
        self.mark_dependents_dirty(id);
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        let (states, computes) = compute.deps();
        self.runtime.record(id, states.into_iter().chain(computes));
        self.computes
            .insert(id, Slot::new(Box::new(compute), type_name::<T>()));
        self.order_stale = true;
    }

    pub fn verify_deps(&mut self) -> Result<(), TopologyError<TypeId>> {
        self.runtime.verify_deps()?;
        self.order_stale = false;
        Ok(())
    }

    pub fn state_ref<T: State>(&self) -> Option<&T> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
    }

    /// Mutate a state in place and mark everything depending on it dirty.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        let id = TypeId::of::<T>();
        let Some(state) = self
            .states
            .get_mut(&id)
            .and_then(|slot| slot.value.as_any_mut().downcast_mut::<T>())
        else {
            log::warn!("Update for unregistered state {}", type_name::<T>());
            return;
        };
        f(state);
        self.mark_dependents_dirty(id);
    }

    /// Last synced value of a compute.
    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.value.as_any().downcast_ref::<T>())
    }

    pub fn compute_status<T: Compute>(&self) -> Option<StateSyncStatus> {
        self.computes
            .get(&TypeId::of::<T>())
            .map(|slot| slot.status)
    }

    pub fn updater(&self) -> Updater {
        self.runtime.updater()
    }

    pub fn runtime(&self) -> &StateRuntime {
        &self.runtime
    }

    pub fn has_pending_updates(&self) -> bool {
        self.runtime.has_pending_updates()
    }

    /// Apply every result queued through an [`Updater`].
    pub fn sync_computes(&mut self) {
        let updates: Vec<UpdateMessage> = self.runtime.receiver().try_iter().collect();

        for (id, value) in updates {
            if let Some(slot) = self.computes.get_mut(&id) {
                slot.value.assign_box(value);
                // a result from before the latest input change stays dirty
                if slot.status == StateSyncStatus::Pending {
                    slot.status = StateSyncStatus::Clean;
                }
                log::debug!("Synced compute {}", slot.name);
            } else if let Some(slot) = self.states.get_mut(&id) {
                slot.value.assign_box(value);
                log::debug!("Synced state {}", slot.name);
            } else {
                log::warn!("Update for unregistered type {id:?}");
                continue;
            }
            self.mark_dependents_dirty(id);
        }
    }

    /// Run every compute that has not run yet or whose dependencies changed.
    pub fn run_computed(&mut self) {
        if self.order_stale
            && let Err(err) = self.verify_deps()
        {
            log::error!("Compute dependencies are invalid: {err}");
            return;
        }

        let due: Vec<TypeId> = self
            .compute_order()
            .into_iter()
            .filter(|id| {
                self.computes
                    .get(id)
                    .is_some_and(|slot| slot.status.needs_run())
            })
            .collect();

        let updater = self.runtime.updater();
        for id in &due {
            if let Some(slot) = self.computes.get(id) {
                log::debug!("Running compute {}", slot.name);
                slot.value.compute(Dep::new(self), updater.clone());
            }
        }

        for id in due {
            if let Some(slot) = self.computes.get_mut(&id) {
                slot.status = StateSyncStatus::Pending;
            }
        }
    }

    fn compute_order(&self) -> Vec<TypeId> {
        let mut order: Vec<TypeId> = self
            .runtime
            .order()
            .iter()
            .filter(|id| self.computes.contains_key(id))
            .copied()
            .collect();
        let independent: Vec<TypeId> = self
            .computes
            .keys()
            .filter(|id| !order.contains(id))
            .copied()
            .collect();
        order.extend(independent);
        order
    }

    fn mark_dependents_dirty(&mut self, id: TypeId) {
        for dependent in self.runtime.dependents_of(id) {
            if let Some(slot) = self.computes.get_mut(&dependent)
                && slot.status != StateSyncStatus::Init
            {
                slot.status = StateSyncStatus::Dirty;
            }
        }
    }
}
