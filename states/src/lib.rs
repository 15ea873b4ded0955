//! Small reactive runtime: states hold input values, computes derive values
//! from them and are re-run when an input they depend on changes.

mod compute;
mod ctx;
mod dep;
mod error;
mod graph;
mod runtime;
mod state;
mod state_sync_status;

pub use compute::{Compute, ComputeDeps, assign_impl};
pub use ctx::StateCtx;
pub use dep::Dep;
pub use error::Error;
pub use graph::{DepRoute, Graph, TopologyError};
pub use runtime::StateRuntime;
pub use state::{State, Updater, state_assign_impl};
pub use state_sync_status::StateSyncStatus;
