//! The shared-variable process model: guarded-transition automata.
//!
//! A [`Process`] is a named automaton over a dense set of control locations.
//! Each location carries a list of outgoing [`Transition`]s; each transition
//! carries a label, a target location, a [`Guard`] (precondition over the
//! current global configuration) and an [`Action`] (store transformer fired
//! when the transition is taken).
//!
//! Guards receive the configuration by immutable borrow and actions receive
//! only the destination store (mutable) and the source store (immutable), so
//! freedom from side effects on the explored state is enforced by the borrow
//! checker, not by convention.

use std::rc::Rc;

use crate::config::Config;
use crate::event::Event;
use crate::store::Store;
use crate::types::{Loc, ProcessId};

/// User-supplied guard predicate: `(acting process, configuration) -> bool`.
pub type GuardFn<S> = Rc<dyn Fn(ProcessId, &Config<S>) -> bool>;

/// User-supplied action: `(destination store, source store)`.
///
/// The destination starts as a clone of the source with the acting process's
/// location already advanced; the action mutates only the store fields it
/// intends to change (an atomic read-modify-write of shared state).
pub type ActionFn<S> = Rc<dyn Fn(&mut S, &S)>;

/// Precondition gating whether a transition may fire.
pub enum Guard<S> {
    /// Always enabled.
    Always,
    /// Enabled iff the predicate holds for the current configuration.
    When(GuardFn<S>),
}

impl<S: Store> Guard<S> {
    pub fn when(pred: impl Fn(ProcessId, &Config<S>) -> bool + 'static) -> Self {
        Guard::When(Rc::new(pred))
    }

    pub fn eval(&self, process: ProcessId, config: &Config<S>) -> bool {
        match self {
            Guard::Always => true,
            Guard::When(pred) => pred(process, config),
        }
    }
}

impl<S> Clone for Guard<S> {
    fn clone(&self) -> Self {
        match self {
            Guard::Always => Guard::Always,
            Guard::When(pred) => Guard::When(Rc::clone(pred)),
        }
    }
}

/// Store transformation applied when a transition fires.
pub enum Action<S> {
    /// Leave the store unchanged.
    Nop,
    /// Apply the closure to `(destination store, source store)`.
    Update(ActionFn<S>),
}

impl<S: Store> Action<S> {
    pub fn update(f: impl Fn(&mut S, &S) + 'static) -> Self {
        Action::Update(Rc::new(f))
    }

    pub fn apply(&self, dest: &mut S, src: &S) {
        match self {
            Action::Nop => {}
            Action::Update(f) => f(dest, src),
        }
    }
}

impl<S> Clone for Action<S> {
    fn clone(&self) -> Self {
        match self {
            Action::Nop => Action::Nop,
            Action::Update(f) => Action::Update(Rc::clone(f)),
        }
    }
}

/// One outgoing transition of a location.
///
/// Construction freezes the label, target location, guard, and action.
pub struct Transition<S> {
    label: Event,
    target: Loc,
    guard: Guard<S>,
    action: Action<S>,
}

impl<S: Store> Transition<S> {
    pub fn new(label: impl Into<Event>, target: u32, guard: Guard<S>, action: Action<S>) -> Self {
        Transition {
            label: label.into(),
            target: Loc::new(target),
            guard,
            action,
        }
    }

    pub fn label(&self) -> &Event {
        &self.label
    }

    pub fn target(&self) -> Loc {
        self.target
    }

    pub fn guard(&self) -> &Guard<S> {
        &self.guard
    }

    pub fn action(&self) -> &Action<S> {
        &self.action
    }
}

/// The declared outgoing transitions of one location.
///
/// A location with an empty transition list is legal: the process has
/// terminated there and contributes nothing further.
pub struct StateTransitions<S> {
    location: Loc,
    transitions: Vec<Transition<S>>,
}

impl<S: Store> StateTransitions<S> {
    pub fn new(location: u32, transitions: Vec<Transition<S>>) -> Self {
        StateTransitions {
            location: Loc::new(location),
            transitions,
        }
    }
}

/// A named guarded-transition automaton.
///
/// Locations must be declared densely in order (`0, 1, 2, ...`); location 0
/// is the initial location. Every transition target is validated at
/// construction, so a dangling target fails fast here instead of corrupting
/// an exploration later.
pub struct Process<S> {
    name: String,
    transitions: Vec<Vec<Transition<S>>>,
}

impl<S: Store> Process<S> {
    /// # Panics
    ///
    /// Panics if the location list is empty, locations are not declared
    /// densely in order, or a transition targets an undeclared location.
    pub fn new(name: impl Into<String>, states: Vec<StateTransitions<S>>) -> Self {
        let name = name.into();
        assert!(!states.is_empty(), "process {} declares no locations", name);

        let num_locations = states.len();
        let mut transitions = Vec::with_capacity(num_locations);
        for (i, state) in states.into_iter().enumerate() {
            assert_eq!(
                state.location.index(),
                i,
                "locations of process {} must be declared densely in order",
                name
            );
            for t in &state.transitions {
                assert!(
                    t.target.index() < num_locations,
                    "unknown target location {} in process {}",
                    t.target,
                    name
                );
            }
            transitions.push(state.transitions);
        }

        Process { name, transitions }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial_loc(&self) -> Loc {
        Loc::new(0)
    }

    pub fn num_locations(&self) -> usize {
        self.transitions.len()
    }

    /// Outgoing transitions of `loc`, in declaration order.
    pub fn next_transitions(&self, loc: Loc) -> &[Transition<S>] {
        assert!(
            loc.index() < self.transitions.len(),
            "location {} is not declared in process {}",
            loc,
            self.name
        );
        &self.transitions[loc.index()]
    }

    /// Human-readable label of a location, e.g. `P0`.
    pub fn loc_label(&self, loc: Loc) -> String {
        format!("{}{}", self.name, loc)
    }
}
