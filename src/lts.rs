//! The explored labelled transition system of a shared-variable system.
//!
//! [`Lts`] is the deduplicated result table produced by the breadth-first
//! explorer: every reachable configuration appears exactly once, keyed by
//! structural equality, with a stable integer id assigned in first-insertion
//! order. Ids are for display and lookup only; equality of configurations is
//! never defined in terms of them.
//!
//! # Edge records
//!
//! Each state carries a list of incoming-edge records. The record written at
//! first insertion has [`Direction::Forward`]: the edge runs from the
//! recorded predecessor to this state. When a transition later reaches an
//! already-known target, the record is appended to the *source* state's list
//! with [`Direction::Reverse`]: the edge runs from the source to the recorded
//! (already inserted) target. Repeated rediscoveries append repeated records,
//! preserving edge multiplicities. The root state has no records.

use std::collections::HashMap;
use std::rc::Rc;

use crate::config::Config;
use crate::event::Event;
use crate::formula::{Formula, Verdict};
use crate::path::Path;
use crate::process::Process;
use crate::store::Store;
use crate::types::{ProcessId, StateId};

/// Orientation of an incoming-edge record relative to the state it is
/// stored on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    /// Edge from `other` to the state holding the record.
    Forward,
    /// Edge from the state holding the record to `other`.
    Reverse,
}

/// One edge record of the explored graph.
#[derive(Debug, Clone)]
pub struct EdgeRecord {
    pub other: StateId,
    pub process: ProcessId,
    pub label: Event,
    pub direction: Direction,
}

/// The deduplicated transition graph discovered by one exploration run.
#[derive(Debug)]
pub struct Lts<S> {
    states: Vec<Rc<Config<S>>>,
    index: HashMap<Rc<Config<S>>, StateId>,
    /// Location part of each state's label, e.g. `P1 Q0`.
    names: Vec<String>,
    process_names: Vec<String>,
    edges: Vec<Vec<EdgeRecord>>,
    deadlock: Vec<bool>,
    deadlock_traces: Vec<(StateId, Path<S>)>,
}

impl<S: Store> Lts<S> {
    pub(crate) fn new(root: Rc<Config<S>>, processes: &[Process<S>]) -> Self {
        let name = root.name(processes);
        let mut index = HashMap::new();
        index.insert(Rc::clone(&root), StateId::INITIAL);
        Lts {
            states: vec![root],
            index,
            names: vec![name],
            process_names: processes.iter().map(|p| p.name().to_string()).collect(),
            edges: vec![Vec::new()],
            deadlock: vec![true],
            deadlock_traces: Vec::new(),
        }
    }

    /// Insert a newly discovered configuration, recording its discovery edge.
    pub(crate) fn insert(
        &mut self,
        config: Rc<Config<S>>,
        from: StateId,
        process: ProcessId,
        label: Event,
        processes: &[Process<S>],
    ) -> StateId {
        debug_assert!(!self.index.contains_key(config.as_ref()), "duplicate insertion");
        let id = StateId::new(self.states.len() as u32);
        self.names.push(config.name(processes));
        self.index.insert(Rc::clone(&config), id);
        self.states.push(config);
        self.edges.push(vec![EdgeRecord {
            other: from,
            process,
            label,
            direction: Direction::Forward,
        }]);
        self.deadlock.push(true);
        id
    }

    /// Record an edge from `src` to the already-known `existing` target.
    pub(crate) fn add_reverse(&mut self, src: StateId, existing: StateId, process: ProcessId, label: Event) {
        self.edges[src.index()].push(EdgeRecord {
            other: existing,
            process,
            label,
            direction: Direction::Reverse,
        });
    }

    pub(crate) fn clear_deadlock(&mut self, id: StateId) {
        self.deadlock[id.index()] = false;
    }

    pub(crate) fn record_deadlock(&mut self, id: StateId, trace: Path<S>) {
        self.deadlock_traces.push((id, trace));
    }

    pub fn root(&self) -> StateId {
        StateId::INITIAL
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// All discovered configurations, in first-discovery order.
    pub fn all_configurations(&self) -> impl Iterator<Item = &Config<S>> {
        self.states.iter().map(|rc| rc.as_ref())
    }

    pub fn config(&self, id: StateId) -> &Config<S> {
        &self.states[id.index()]
    }

    /// Look up a configuration by structural equality.
    pub fn id_of(&self, config: &Config<S>) -> Option<StateId> {
        self.index.get(config).copied()
    }

    /// Incoming-edge records of `id` (see the module docs for orientation).
    pub fn incoming_edges(&self, id: StateId) -> &[EdgeRecord] {
        &self.edges[id.index()]
    }

    /// True iff no process had an enabled transition out of this state.
    pub fn is_deadlock(&self, id: StateId) -> bool {
        self.deadlock[id.index()]
    }

    /// Ids of all deadlocked states, in discovery order.
    pub fn deadlocks(&self) -> Vec<StateId> {
        (0..self.states.len())
            .filter(|&i| self.deadlock[i])
            .map(|i| StateId::new(i as u32))
            .collect()
    }

    /// Counterexample traces leading to each deadlocked state.
    pub fn deadlock_traces(&self) -> &[(StateId, Path<S>)] {
        &self.deadlock_traces
    }

    /// Location part of a state's label, e.g. `P1 Q0`.
    pub fn state_name(&self, id: StateId) -> &str {
        &self.names[id.index()]
    }

    /// One-line display label: locations plus store.
    pub fn display_label(&self, id: StateId) -> String {
        format!("{:8} {}", self.names[id.index()], self.config(id).store())
    }

    pub(crate) fn process_name(&self, process: ProcessId) -> &str {
        &self.process_names[process.index()]
    }

    /// Evaluate `formula` against every state's store, in discovery order.
    pub fn annotate(&self, formula: &Formula<S>) -> Vec<Verdict> {
        self.states.iter().map(|s| formula.check(s.store())).collect()
    }
}
