//! Breadth-first exploration of shared-variable systems.
//!
//! [`System::explore`] enumerates every reachable global configuration of a
//! set of guarded-transition processes interleaving over a shared store,
//! deduplicating by structural equality and flagging configurations with no
//! enabled outgoing move as deadlocks.
//!
//! Candidate transitions are considered in a fixed deterministic order:
//! process list order crossed with each process's declared transition order.
//! The ordering is not semantically significant, but it makes state ids and
//! edge records reproducible across runs.
//!
//! Termination requires the reachable store domain to be finite; this is a
//! documented precondition, not a detected condition. Callers that want a
//! hard bound use [`System::explore_bounded`].

use std::collections::VecDeque;
use std::rc::Rc;

use log::debug;
use thiserror::Error;

use crate::config::Config;
use crate::lts::Lts;
use crate::path::{Path, Step, Trace};
use crate::process::Process;
use crate::store::Store;
use crate::types::ProcessId;

/// Errors produced by bounded exploration.
#[derive(Debug, Error)]
pub enum ExploreError {
    /// The state budget was exhausted before the frontier emptied.
    #[error("state limit of {limit} exceeded")]
    StateLimit { limit: usize },
}

/// A set of processes interleaving over a shared store.
pub struct System<S> {
    processes: Vec<Process<S>>,
}

impl<S: Store> System<S> {
    /// # Panics
    ///
    /// Panics if `processes` is empty.
    pub fn new(processes: Vec<Process<S>>) -> Self {
        assert!(!processes.is_empty(), "a system needs at least one process");
        System { processes }
    }

    pub fn processes(&self) -> &[Process<S>] {
        &self.processes
    }

    pub fn process(&self, id: ProcessId) -> &Process<S> {
        &self.processes[id.index()]
    }

    /// Explore the full reachable state space from `store`.
    pub fn explore(&self, store: S) -> Lts<S> {
        match self.explore_inner(store, None) {
            Ok(lts) => lts,
            Err(_) => unreachable!("no state limit was set"),
        }
    }

    /// Explore with a hard bound on the number of stored states.
    ///
    /// The bound counts distinct configurations (the root included); hitting
    /// it aborts the run with [`ExploreError::StateLimit`] rather than
    /// returning a partially explored graph.
    pub fn explore_bounded(&self, store: S, max_states: usize) -> Result<Lts<S>, ExploreError> {
        self.explore_inner(store, Some(max_states))
    }

    fn explore_inner(&self, store: S, limit: Option<usize>) -> Result<Lts<S>, ExploreError> {
        // The root itself counts against the budget.
        if let Some(0) = limit {
            return Err(ExploreError::StateLimit { limit: 0 });
        }
        let root = Rc::new(Config::initial(&self.processes, store));
        let mut lts = Lts::new(Rc::clone(&root), &self.processes);
        let mut queue = VecDeque::new();
        queue.push_back(Trace::root(Step { config: root, via: None }));

        while let Some(path) = queue.pop_front() {
            let s = Rc::clone(&path.last().config);
            let sid = lts.id_of(&s).expect("dequeued configuration must be in the table");
            debug!("explore: expanding {} [{}]", sid, lts.display_label(sid));

            let mut enabled = false;
            for (pi, process) in self.processes.iter().enumerate() {
                let pid = ProcessId::new(pi as u32);
                for tran in process.next_transitions(s.loc(pid)) {
                    if !tran.guard().eval(pid, &s) {
                        continue;
                    }
                    enabled = true;

                    // Clone-on-write: the successor starts as a snapshot of
                    // the source, then gets the location advance and the
                    // action's targeted store writes.
                    let mut t = (*s).clone();
                    t.set_loc(pid, tran.target());
                    tran.action().apply(t.store_mut(), s.store());

                    match lts.id_of(&t) {
                        None => {
                            if let Some(max) = limit {
                                if lts.num_states() >= max {
                                    return Err(ExploreError::StateLimit { limit: max });
                                }
                            }
                            let t = Rc::new(t);
                            let tid = lts.insert(
                                Rc::clone(&t),
                                sid,
                                pid,
                                tran.label().clone(),
                                &self.processes,
                            );
                            debug!("explore: {} --{}.{}--> {} (new)", sid, process.name(), tran.label(), tid);
                            queue.push_back(path.append(Step {
                                config: t,
                                via: Some((pid, tran.label().clone())),
                            }));
                        }
                        Some(tid) => {
                            debug!("explore: {} --{}.{}--> {} (known)", sid, process.name(), tran.label(), tid);
                            lts.add_reverse(sid, tid, pid, tran.label().clone());
                        }
                    }
                }
            }

            // The flag is decided only after every process's transitions out
            // of `s` have been considered.
            if enabled {
                lts.clear_deadlock(sid);
            } else {
                debug!("explore: deadlock at {} [{}]", sid, lts.display_label(sid));
                lts.record_deadlock(sid, path.clone());
            }
        }

        Ok(lts)
    }

    /// Render a discovery path as an aligned text table, root first.
    pub fn render_path(&self, path: &Path<S>) -> String {
        let mut out = String::from("--------------------\n");
        for (idx, step) in path.iter().enumerate() {
            let via = match &step.via {
                None => format!("{:4} {:10}", "---", "---"),
                Some((pid, label)) => format!("{:4} {:10}", self.process(*pid).name(), label.label()),
            };
            let state = format!("{:8} {}", step.config.name(&self.processes), step.config.store());
            out.push_str(&format!("{:4} {:14} {:32}\n", idx, via, state));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lts::Direction;
    use crate::process::{Action, Guard, StateTransitions, Transition};
    use crate::store::NoStore;
    use crate::types::{Loc, StateId};
    use std::fmt;
    use test_log::test;

    fn chain(name: &str, n: u32) -> Process<NoStore> {
        let mut states = Vec::new();
        for i in 0..n {
            states.push(StateTransitions::new(
                i,
                vec![Transition::new(format!("t{}", i), i + 1, Guard::Always, Action::Nop)],
            ));
        }
        states.push(StateTransitions::new(n, vec![]));
        Process::new(name, states)
    }

    #[test]
    fn test_linear_chain_yields_n_plus_one_states() {
        let system = System::new(vec![chain("P", 4)]);
        let lts = system.explore(NoStore);

        assert_eq!(lts.num_states(), 5);
        // No branching: every non-root state has exactly its discovery edge.
        for id in 1..5u32 {
            let edges = lts.incoming_edges(StateId::new(id));
            assert_eq!(edges.len(), 1);
            assert_eq!(edges[0].direction, Direction::Forward);
            assert_eq!(edges[0].other, StateId::new(id - 1));
        }
        // The end of the chain has no outgoing move at all.
        assert_eq!(lts.deadlocks(), vec![StateId::new(4)]);
    }

    #[test]
    fn test_interleaving_dedup() {
        // Two independent one-step processes: the diamond has 4 distinct
        // configurations even though (1,1) is reached twice.
        let system = System::new(vec![chain("P", 1), chain("Q", 1)]);
        let lts = system.explore(NoStore);

        assert_eq!(lts.num_states(), 4);
        let configs: Vec<_> = lts.all_configurations().collect();
        for (i, a) in configs.iter().enumerate() {
            for b in &configs[i + 1..] {
                assert_ne!(a, b, "dedup invariant violated");
            }
        }

        // The second discovery of the final configuration is recorded as a
        // reverse edge on its source, not as a new state.
        let reverse_count: usize = (0..4)
            .map(|i| {
                lts.incoming_edges(StateId::new(i))
                    .iter()
                    .filter(|e| e.direction == Direction::Reverse)
                    .count()
            })
            .sum();
        assert_eq!(reverse_count, 1);
    }

    #[test]
    fn test_independent_processes_full_product() {
        // 3 x 4 locations, no shared store: the product is fully reachable.
        let system = System::new(vec![chain("P", 2), chain("Q", 3)]);
        let lts = system.explore(NoStore);
        assert_eq!(lts.num_states(), 12);
    }

    #[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
    struct Locks {
        m0: bool,
        m1: bool,
    }

    impl fmt::Display for Locks {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "m0={} m1={}", self.m0 as u8, self.m1 as u8)
        }
    }

    impl crate::store::Store for Locks {}

    fn lock(target: u32, is_m0: bool) -> Transition<Locks> {
        Transition::new(
            if is_m0 { "lock0" } else { "lock1" },
            target,
            Guard::when(move |_, c: &Config<Locks>| {
                if is_m0 {
                    !c.store().m0
                } else {
                    !c.store().m1
                }
            }),
            Action::update(move |dest: &mut Locks, _: &Locks| {
                if is_m0 {
                    dest.m0 = true;
                } else {
                    dest.m1 = true;
                }
            }),
        )
    }

    fn unlock(target: u32, is_m0: bool) -> Transition<Locks> {
        Transition::new(
            if is_m0 { "unlock0" } else { "unlock1" },
            target,
            Guard::Always,
            Action::update(move |dest: &mut Locks, _: &Locks| {
                if is_m0 {
                    dest.m0 = false;
                } else {
                    dest.m1 = false;
                }
            }),
        )
    }

    /// Acquire `m0` then `m1` (or the other way around), then release both.
    fn locker(name: &str, first_is_m0: bool) -> Process<Locks> {
        let first = first_is_m0;
        let second = !first_is_m0;
        Process::new(
            name,
            vec![
                StateTransitions::new(0, vec![lock(1, first)]),
                StateTransitions::new(1, vec![lock(2, second)]),
                StateTransitions::new(2, vec![unlock(3, second)]),
                StateTransitions::new(3, vec![unlock(0, first)]),
            ],
        )
    }

    #[test]
    fn test_opposite_lock_order_deadlocks() {
        let system = System::new(vec![locker("P", true), locker("Q", false)]);
        let lts = system.explore(Locks::default());

        let deadlocks = lts.deadlocks();
        assert_eq!(deadlocks.len(), 1);
        let d = deadlocks[0];
        assert!(lts.is_deadlock(d));

        // Both processes hold one lock and wait on the other.
        let config = lts.config(d);
        assert_eq!(config.loc(ProcessId::new(0)), Loc::new(1));
        assert_eq!(config.loc(ProcessId::new(1)), Loc::new(1));
        assert!(config.store().m0);
        assert!(config.store().m1);

        // The counterexample trace ends in the deadlocked configuration.
        let traces = lts.deadlock_traces();
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].0, d);
        assert_eq!(traces[0].1.last().config.as_ref(), config);
        let rendered = system.render_path(&traces[0].1);
        assert!(rendered.contains("lock0"));
        assert!(rendered.contains("lock1"));
    }

    #[test]
    fn test_same_lock_order_is_deadlock_free() {
        let system = System::new(vec![locker("P", true), locker("Q", true)]);
        let lts = system.explore(Locks::default());
        assert!(lts.deadlocks().is_empty());
        assert!(lts.deadlock_traces().is_empty());
    }

    #[test]
    fn test_explore_bounded() {
        let system = System::new(vec![chain("P", 2), chain("Q", 3)]);
        assert!(system.explore_bounded(NoStore, 12).is_ok());
        let err = system.explore_bounded(NoStore, 5).unwrap_err();
        assert!(matches!(err, ExploreError::StateLimit { limit: 5 }));
    }

    #[test]
    fn test_zero_state_budget_rejects_the_root() {
        // The bound counts the root, so a budget of 0 fails even for a
        // system whose root has no successor.
        let system = System::new(vec![Process::new("P", vec![StateTransitions::new(0, vec![])])]);
        let err = system.explore_bounded(NoStore, 0).unwrap_err();
        assert!(matches!(err, ExploreError::StateLimit { limit: 0 }));
        assert!(system.explore_bounded(NoStore, 1).is_ok());
    }

    #[test]
    fn test_root_has_no_incoming_records() {
        let system = System::new(vec![chain("P", 1)]);
        let lts = system.explore(NoStore);
        assert!(lts.incoming_edges(lts.root()).is_empty());
    }
}
