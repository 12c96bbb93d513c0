//! # lts-rs: explicit-state exploration of small concurrent systems
//!
//! **`lts-rs`** builds and analyzes labelled transition systems (LTSs) for small
//! concurrent models. It is designed for teaching, prototyping, and debugging
//! concurrency designs: describe a handful of processes, explore every
//! reachable state, and look at the deadlocks and counterexample traces.
//!
//! ## Two modeling styles
//!
//! - **Shared variables**: processes are guarded-transition automata over a
//!   shared store. [`System::explore`][crate::explorer::System::explore]
//!   enumerates every reachable global configuration by breadth-first search,
//!   deduplicating by structural equality and flagging configurations with no
//!   enabled move as deadlocks.
//! - **Event synchronization**: processes are transition functions over
//!   event-labelled states. [`unfold`][crate::unfold::unfold] expands one
//!   process into its transition system, and
//!   [`compose`][crate::compose::compose] builds the product of two unfolded
//!   processes under a synchronization event set.
//!
//! Both styles produce graphs that render to DOT (see [`dot`]) and record
//! discovery paths, so a reachable bad state always comes with a trace that
//! leads to it.
//!
//! ## Basic Usage
//!
//! ```rust
//! use lts_rs::explorer::System;
//! use lts_rs::process::{Action, Guard, Process, StateTransitions, Transition};
//! use lts_rs::store::NoStore;
//!
//! // Two independent one-step processes (no shared data).
//! fn one_step(name: &str) -> Process<NoStore> {
//!     Process::new(
//!         name,
//!         vec![
//!             StateTransitions::new(0, vec![Transition::new("go", 1, Guard::Always, Action::Nop)]),
//!             StateTransitions::new(1, vec![]),
//!         ],
//!     )
//! }
//!
//! let system = System::new(vec![one_step("P"), one_step("Q")]);
//! let lts = system.explore(NoStore);
//!
//! // The interleaving diamond: 4 distinct configurations.
//! assert_eq!(lts.num_states(), 4);
//! // Both processes finished: nothing can move.
//! assert_eq!(lts.deadlocks().len(), 1);
//! ```
//!
//! Realistic models put data in the store: any `Clone + Eq + Hash + Display`
//! type implementing [`Store`][crate::store::Store] works, with guards reading
//! it and actions writing it. See the `mutex` example for the classic
//! two-process deadlock.
//!
//! ## Core Components
//!
//! - **[`explorer`]**: breadth-first exploration of shared-variable systems.
//! - **[`process`]**: guarded-transition automata and their building blocks.
//! - **[`unfold`]** / **[`compose`]**: the event-synchronization model.
//! - **[`formula`]**: propositional formulas for annotating explored states.
//! - **[`dot`]**: Graphviz rendering of every graph the crate produces.

pub mod compose;
pub mod config;
pub mod dot;
pub mod event;
pub mod explorer;
pub mod formula;
pub mod lts;
pub mod path;
pub mod process;
pub mod store;
pub mod types;
pub mod unfold;
pub mod utils;
