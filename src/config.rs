//! Global configurations: one snapshot of the whole system.
//!
//! A configuration is the pair (per-process current location, store value).
//! Two configurations are equal iff their location vectors agree for every
//! process and their stores are structurally equal; store equality is
//! delegated to the store's own [`Store`] contract, never to identity.
//!
//! Once a configuration has been inserted into the explored table it is
//! frozen: every transition produces a *new* configuration via clone plus
//! targeted writes, so configurations in the table never alias each other's
//! stores.

use crate::process::Process;
use crate::store::Store;
use crate::types::{Loc, ProcessId};

/// A snapshot of the system: per-process locations plus the shared store.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Config<S> {
    locs: Vec<Loc>,
    store: S,
}

impl<S: Store> Config<S> {
    /// The initial configuration: every process at its initial location.
    pub fn initial(processes: &[Process<S>], store: S) -> Self {
        Config {
            locs: processes.iter().map(|p| p.initial_loc()).collect(),
            store,
        }
    }

    pub fn loc(&self, process: ProcessId) -> Loc {
        self.locs[process.index()]
    }

    pub(crate) fn set_loc(&mut self, process: ProcessId, loc: Loc) {
        self.locs[process.index()] = loc;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn num_processes(&self) -> usize {
        self.locs.len()
    }

    /// Location part of the display label, e.g. `P0 Q1`.
    pub fn name(&self, processes: &[Process<S>]) -> String {
        assert_eq!(processes.len(), self.locs.len(), "process list does not match configuration");
        processes
            .iter()
            .zip(&self.locs)
            .map(|(p, &loc)| p.loc_label(loc))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
