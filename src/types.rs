//! Newtype wrappers for the id spaces used across the crate.
//!
//! Three distinct kinds of integer index appear in exploration code, and
//! mixing them up silently corrupts the resulting graph. The wrappers keep
//! them apart at compile time:
//!
//! - [`ProcessId`]: position of a process in the system's process list.
//! - [`Loc`]: a control location *within one process's* automaton.
//! - [`StateId`]: the stable integer id assigned to a discovered state in
//!   first-discovery order. Ids are for display and lookup only; state
//!   equality is never defined in terms of them.

use std::fmt;

/// Index of a process in the system's process list.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ProcessId(u32);

impl ProcessId {
    pub fn new(index: u32) -> Self {
        ProcessId(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// A control location within a single process's automaton (0-indexed).
///
/// Locations are dense: a process with `n` declared locations uses
/// `0..n`, and location 0 is the initial location.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Loc(u32);

impl Loc {
    pub fn new(index: u32) -> Self {
        Loc(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable integer id of a discovered state, assigned in first-discovery
/// order (event model) or first-insertion order (shared-variable model).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct StateId(u32);

impl StateId {
    /// Id of the initial state of any exploration.
    pub const INITIAL: StateId = StateId(0);

    pub fn new(id: u32) -> Self {
        StateId(id)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loc_ordering() {
        let l0 = Loc::new(0);
        let l1 = Loc::new(1);
        assert!(l0 < l1);
        assert_eq!(l0.index(), 0);
        assert_eq!(l1.to_string(), "1");
    }

    #[test]
    fn test_state_id_initial() {
        assert_eq!(StateId::INITIAL, StateId::new(0));
        assert_eq!(StateId::new(7).raw(), 7);
    }

    #[test]
    fn test_process_id_display() {
        assert_eq!(ProcessId::new(2).to_string(), "p2");
    }
}
