//! Per-process unfolding for the event-synchronization model.
//!
//! An [`EventProcess`] describes a sequential process as a transition
//! function over event-labelled states. [`unfold`] drives it breadth-first
//! from its initial state and records the result as an [`EventLts`]: states
//! in discovery order, successor adjacency, and one or more discovery paths
//! per state.
//!
//! State ids come from a [`StateGen`] owned by the unfolding run and passed
//! into the transition function, so the process description itself carries
//! no hidden mutable state. A transition function may return a previously
//! generated state to close a cycle; dedup is by state id, because ids are
//! unique within one run by construction.

use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::event::Event;
use crate::path::Trace;
use crate::types::StateId;

/// Monotonic state id generator, scoped to one unfolding or composition run.
pub struct StateGen {
    next: u32,
}

impl StateGen {
    pub fn new() -> Self {
        StateGen { next: 0 }
    }

    pub fn fresh(&mut self) -> StateId {
        let id = StateId::new(self.next);
        self.next += 1;
        id
    }
}

impl Default for StateGen {
    fn default() -> Self {
        StateGen::new()
    }
}

/// A state of an unfolded per-process transition system.
///
/// Carries a unique id, a human-readable location label, and the event that
/// produced it (`None` for the initial state).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EventState {
    id: StateId,
    label: String,
    event: Option<Event>,
}

impl EventState {
    pub fn new(id: StateId, label: impl Into<String>, event: Option<Event>) -> Self {
        EventState {
            id,
            label: label.into(),
            event,
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn event(&self) -> Option<&Event> {
        self.event.as_ref()
    }

    pub fn is_initial(&self) -> bool {
        self.id == StateId::INITIAL
    }
}

/// A sequential process described as a transition function.
pub trait EventProcess {
    fn name(&self) -> &str;

    /// Label of the initial location.
    fn initial_label(&self) -> String;

    /// Successor states of `state`. Fresh states must take their ids from
    /// `gen`; returning an already-generated state closes a cycle.
    fn transition(&self, state: &EventState, gen: &mut StateGen) -> Vec<EventState>;
}

/// Minimal interface the graph shell needs from a state type.
pub trait StateLike {
    fn id(&self) -> StateId;
    /// The event that produced this state (`None` for the initial state).
    fn event(&self) -> Option<&Event>;
    fn label(&self) -> &str;
}

impl StateLike for EventState {
    fn id(&self) -> StateId {
        self.id
    }
    fn event(&self) -> Option<&Event> {
        self.event.as_ref()
    }
    fn label(&self) -> &str {
        &self.label
    }
}

/// An unfolded transition system: states in discovery order, successor
/// adjacency, and deduplicated discovery paths per state.
///
/// Shared by per-process unfolding ([`ProcessLts`]) and synchronized
/// composition ([`CompositeLts`]).
///
/// [`CompositeLts`]: crate::compose::CompositeLts
pub struct EventLts<T> {
    name: String,
    states: Vec<T>,
    index: HashMap<StateId, usize>,
    succ: HashMap<StateId, Vec<StateId>>,
    paths: HashMap<StateId, Vec<Trace<StateId>>>,
}

/// The unfolded transition system of a single process.
pub type ProcessLts = EventLts<EventState>;

impl<T: StateLike + Clone> EventLts<T> {
    /// Breadth-first unfolding driven by `next`.
    ///
    /// Successors are deduplicated by id. The first discovery of a state
    /// records one path (shortest known path to the predecessor, extended by
    /// the state); rediscoveries add further paths only if the full sequence
    /// is not already present.
    pub(crate) fn bfs(name: String, initial: T, mut next: impl FnMut(&T) -> Vec<T>) -> Self {
        let mut lts = EventLts {
            name,
            states: vec![initial.clone()],
            index: HashMap::from([(initial.id(), 0)]),
            succ: HashMap::new(),
            paths: HashMap::from([(initial.id(), vec![Trace::root(initial.id())])]),
        };

        let mut queue = VecDeque::from([initial]);
        while let Some(s) = queue.pop_front() {
            for t in next(&s) {
                let outs = lts.succ.entry(s.id()).or_default();
                if !outs.contains(&t.id()) {
                    outs.push(t.id());
                }

                let candidate = lts
                    .shortest_path_to(s.id())
                    .expect("expanded state must have a recorded path")
                    .append(t.id());

                if let Some(existing) = lts.index.get(&t.id()) {
                    debug!("unfold {}: {} -> {} (known)", lts.name, s.id(), lts.states[*existing].id());
                    let entry = lts.paths.get_mut(&t.id()).expect("known state must have paths");
                    if !entry.contains(&candidate) {
                        entry.push(candidate);
                    }
                } else {
                    debug!("unfold {}: {} -> {} (new)", lts.name, s.id(), t.id());
                    lts.index.insert(t.id(), lts.states.len());
                    lts.paths.insert(t.id(), vec![candidate]);
                    lts.states.push(t.clone());
                    queue.push_back(t);
                }
            }
        }

        lts
    }

    fn shortest_path_to(&self, id: StateId) -> Option<&Trace<StateId>> {
        self.paths.get(&id)?.iter().min_by_key(|p| p.len())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial_state(&self) -> &T {
        &self.states[0]
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// All states, in first-discovery order.
    pub fn states(&self) -> &[T] {
        &self.states
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.index.contains_key(&id)
    }

    /// # Panics
    ///
    /// Panics if `id` was not discovered by this unfolding.
    pub fn state(&self, id: StateId) -> &T {
        let i = self.index.get(&id).unwrap_or_else(|| panic!("unknown state id {}", id));
        &self.states[*i]
    }

    /// Successor ids of `id`, in discovery order.
    pub fn next_ids(&self, id: StateId) -> &[StateId] {
        self.succ.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Successor states of `id`.
    pub fn next_states(&self, id: StateId) -> Vec<&T> {
        self.next_ids(id).iter().map(|&t| self.state(t)).collect()
    }

    /// Discovery paths to `id` (sequences of state ids, root first).
    pub fn paths_to(&self, id: StateId) -> &[Trace<StateId>] {
        self.paths.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True iff the state has no successor at all.
    pub fn is_stuck(&self, id: StateId) -> bool {
        self.next_ids(id).is_empty()
    }
}

/// Unfold a process breadth-first into its transition system.
pub fn unfold(process: &impl EventProcess) -> ProcessLts {
    let mut gen = StateGen::new();
    let s0 = EventState::new(gen.fresh(), process.initial_label(), None);
    assert_eq!(s0.id(), StateId::INITIAL, "generator must start at the initial id");
    EventLts::bfs(process.name().to_string(), s0, |s| process.transition(s, &mut gen))
}

/// A linear process that emits a fixed sequence of events.
///
/// The chain position is carried in the state label (`P0`, `P1`, ...), so
/// repeated event labels in the sequence are fine.
pub struct ChainProcess {
    name: String,
    events: Vec<Event>,
}

impl ChainProcess {
    pub fn new(name: impl Into<String>, events: impl IntoIterator<Item = Event>) -> Self {
        ChainProcess {
            name: name.into(),
            events: events.into_iter().collect(),
        }
    }

    /// # Panics
    ///
    /// Panics if `state` was not produced by this chain.
    fn position(&self, state: &EventState) -> usize {
        state
            .label()
            .strip_prefix(self.name.as_str())
            .and_then(|tail| tail.parse().ok())
            .unwrap_or_else(|| panic!("state {} does not belong to chain {}", state.label(), self.name))
    }
}

impl EventProcess for ChainProcess {
    fn name(&self) -> &str {
        &self.name
    }

    fn initial_label(&self) -> String {
        format!("{}0", self.name)
    }

    fn transition(&self, state: &EventState, gen: &mut StateGen) -> Vec<EventState> {
        let pos = self.position(state);
        match self.events.get(pos) {
            Some(event) => vec![EventState::new(
                gen.fresh(),
                format!("{}{}", self.name, pos + 1),
                Some(event.clone()),
            )],
            None => Vec::new(),
        }
    }
}
