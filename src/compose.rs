//! Event-synchronized product of two unfolded processes.
//!
//! [`compose`] builds the product transition system of two [`ProcessLts`]
//! values under a [`SyncEventSet`]: events in the sync set fire only as
//! joint moves of both components with the same event, every other event
//! interleaves freely.
//!
//! Product states are interned in a [`PairTable`] keyed by the component
//! state id pair, so each pair of component states appears at most once no
//! matter how many interleavings reach it. The pairing key is injective
//! over the id range, which makes the dedup collision-free by construction.

use std::collections::HashMap;

use crate::event::{Event, SyncEventSet};
use crate::types::StateId;
use crate::unfold::{EventLts, EventState, ProcessLts, StateGen, StateLike};
use crate::utils::pairing2;

/// A state of the synchronized product: a pair of component states.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CompositeState {
    id: StateId,
    event: Option<Event>,
    p: StateId,
    q: StateId,
    label: String,
}

impl CompositeState {
    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn event(&self) -> Option<&Event> {
        self.event.as_ref()
    }

    /// Id of the left component's state.
    pub fn left(&self) -> StateId {
        self.p
    }

    /// Id of the right component's state.
    pub fn right(&self) -> StateId {
        self.q
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl StateLike for CompositeState {
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

/// The synchronized product transition system of two processes.
pub type CompositeLts = EventLts<CompositeState>;

/// Interning table for product states, keyed by the component id pair.
struct PairTable {
    ids: HashMap<u64, CompositeState>,
    gen: StateGen,
}

impl PairTable {
    fn new() -> Self {
        PairTable {
            ids: HashMap::new(),
            gen: StateGen::new(),
        }
    }

    /// The product state for `(ps, qs)`, created on first sight.
    ///
    /// A reused state keeps the event it was first discovered with; the
    /// edge structure is tracked by the surrounding graph, not here.
    fn intern(&mut self, ps: &EventState, qs: &EventState, event: Option<Event>) -> CompositeState {
        let key = pairing2(ps.id().raw() as u64, qs.id().raw() as u64);
        let gen = &mut self.gen;
        let state = self.ids.entry(key).or_insert_with(|| CompositeState {
            id: gen.fresh(),
            event,
            p: ps.id(),
            q: qs.id(),
            label: format!("{} {}", ps.label(), qs.label()),
        });
        debug_assert_eq!(
            (state.p, state.q),
            (ps.id(), qs.id()),
            "pairing key collision"
        );
        state.clone()
    }
}

/// Build the product of `p` and `q` synchronizing on `sync`.
pub fn compose(sync: &SyncEventSet, p: &ProcessLts, q: &ProcessLts) -> CompositeLts {
    let mut table = PairTable::new();
    let initial = table.intern(p.initial_state(), q.initial_state(), None);
    let name = format!("{}||{}", p.name(), q.name());

    EventLts::bfs(name, initial, |s| {
        let mut out = Vec::new();

        // Left component moves alone on events outside the sync set.
        for tp in p.next_states(s.left()) {
            if tp.event().is_some_and(|e| sync.contains(e)) {
                continue;
            }
            out.push(table.intern(tp, q.state(s.right()), tp.event().cloned()));
        }

        // Right component moves alone.
        for tq in q.next_states(s.right()) {
            if tq.event().is_some_and(|e| sync.contains(e)) {
                continue;
            }
            out.push(table.intern(p.state(s.left()), tq, tq.event().cloned()));
        }

        // Joint moves: both components fire the same sync event.
        for tp in p.next_states(s.left()) {
            let Some(e) = tp.event() else { continue };
            if !sync.contains(e) {
                continue;
            }
            for tq in q.next_states(s.right()) {
                if tq.event() == Some(e) {
                    out.push(table.intern(tp, tq, Some(e.clone())));
                }
            }
        }

        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unfold::{unfold, ChainProcess};
    use test_log::test;

    fn chain(name: &str, events: &[&str]) -> ProcessLts {
        unfold(&ChainProcess::new(name, events.iter().map(|&e| Event::from(e))))
    }

    #[test]
    fn test_empty_sync_is_full_interleaving() {
        let p = chain("P", &["a", "b"]);
        let q = chain("Q", &["c"]);
        let product = compose(&SyncEventSet::empty(), &p, &q);

        // 3 x 2 component states, all pairs reachable.
        assert_eq!(product.num_states(), 6);
        assert_eq!(product.name(), "P||Q");
        assert_eq!(product.initial_state().label(), "P0 Q0");
        assert!(product.initial_state().event().is_none());

        // The only stuck state is the one where both components finished.
        let stuck: Vec<_> = product
            .states()
            .iter()
            .filter(|s| product.is_stuck(s.id()))
            .collect();
        assert_eq!(stuck.len(), 1);
        assert_eq!(stuck[0].label(), "P2 Q1");
    }

    #[test]
    fn test_sync_event_forces_joint_move() {
        let p = chain("P", &["a", "c"]);
        let q = chain("Q", &["b", "c"]);
        let sync = SyncEventSet::new([Event::from("c")]);
        let product = compose(&sync, &p, &q);

        // a and b interleave freely; c fires only once both components are
        // ready for it, collapsing the tail into a single joint successor.
        assert_eq!(product.num_states(), 5);
        let labels: Vec<_> = product.states().iter().map(|s| s.label()).collect();
        assert!(labels.contains(&"P1 Q1"));
        assert!(labels.contains(&"P2 Q2"));
        // No state where only one component has passed c.
        assert!(!labels.contains(&"P2 Q1"));
        assert!(!labels.contains(&"P1 Q2"));

        let joint = product.states().iter().find(|s| s.label() == "P2 Q2").unwrap();
        assert_eq!(joint.event().unwrap().label(), "c");
        assert!(product.is_stuck(joint.id()));
    }

    #[test]
    fn test_unmatched_sync_event_blocks() {
        let p = chain("P", &["c"]);
        let q = chain("Q", &["b"]);
        let sync = SyncEventSet::new([Event::from("c")]);
        let product = compose(&sync, &p, &q);

        // P's c never finds a partner, so only Q's free move fires.
        assert_eq!(product.num_states(), 2);
        let last = product.states().last().unwrap();
        assert_eq!(last.label(), "P0 Q1");
        assert!(product.is_stuck(last.id()));
    }

    #[test]
    fn test_rediscovered_pair_is_not_duplicated() {
        let p = chain("P", &["a"]);
        let q = chain("Q", &["b"]);
        let product = compose(&SyncEventSet::empty(), &p, &q);

        // The diamond: both orders of {a, b} converge on the same pair.
        assert_eq!(product.num_states(), 4);
        let top = product.states().iter().find(|s| s.label() == "P1 Q1").unwrap();
        assert_eq!(product.paths_to(top.id()).len(), 2);
    }

    #[test]
    fn test_component_ids_are_tracked() {
        let p = chain("P", &["a"]);
        let q = chain("Q", &["b"]);
        let product = compose(&SyncEventSet::empty(), &p, &q);

        for s in product.states() {
            assert_eq!(
                s.label(),
                format!("{} {}", p.state(s.left()).label(), q.state(s.right()).label())
            );
        }
    }
}
