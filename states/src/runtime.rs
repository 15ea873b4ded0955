use std::any::TypeId;

use flume::{Receiver, Sender};

use crate::state::UpdateMessage;
use crate::{Graph, TopologyError, Updater};

/// Update channel plus the dependency graph between states and computes.
#[derive(Debug)]
pub struct StateRuntime {
    send: Sender<UpdateMessage>,
    recv: Receiver<UpdateMessage>,

    graph: Graph<TypeId>,
    order: Vec<TypeId>,
}

impl Default for StateRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRuntime {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            send,
            recv,
            graph: Graph::new(),
            order: Vec::new(),
        }
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    pub(crate) fn receiver(&self) -> &Receiver<UpdateMessage> {
        &self.recv
    }

    pub fn has_pending_updates(&self) -> bool {
        !self.recv.is_empty()
    }

    pub(crate) fn record(&mut self, compute_id: TypeId, deps: impl IntoIterator<Item = TypeId>) {
        for dep in deps {
            self.graph.route_to(dep, compute_id, ());
        }
    }

    /// Re-sort the graph, caching the evaluation order.
    pub fn verify_deps(&mut self) -> Result<&[TypeId], TopologyError<TypeId>> {
        self.order = self.graph.topology_sort()?;
        Ok(&self.order)
    }

    pub(crate) fn order(&self) -> &[TypeId] {
        &self.order
    }

    pub(crate) fn dependents_of(&mut self, id: TypeId) -> Vec<TypeId> {
        self.graph.connected(id).copied().collect()
    }
}
