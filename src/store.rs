//! The shared value store capability contract.
//!
//! The exploration engine never inspects the store itself; it only needs to
//! snapshot it (clone), compare snapshots structurally (for state
//! deduplication), hash them (for the state table), and print them (for
//! counterexamples and graph labels). Those capabilities are stated as
//! supertrait bounds, so a store type without a valid equality or clone
//! contract is rejected at compile time rather than producing a silently
//! duplicated state space.

use std::fmt;
use std::hash::Hash;

/// Capability contract for the shared mutable store of a system.
///
/// Equality must be structural and total: two stores compare equal iff every
/// field agrees. Identity-based equality breaks deduplication.
pub trait Store: Clone + Eq + Hash + fmt::Display {
    /// Label used by graph renderers. Defaults to the `Display` rendering.
    fn graph_label(&self) -> String {
        self.to_string()
    }
}

/// Store for systems whose processes share no variables.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct NoStore;

impl fmt::Display for NoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-")
    }
}

impl Store for NoStore {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
    struct Counter {
        x: u32,
    }

    impl fmt::Display for Counter {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "x={}", self.x)
        }
    }

    impl Store for Counter {}

    #[test]
    fn test_graph_label_defaults_to_display() {
        let c = Counter { x: 3 };
        assert_eq!(c.graph_label(), "x=3");
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Counter { x: 1 }, Counter { x: 1 }.clone());
        assert_ne!(Counter { x: 1 }, Counter { x: 2 });
    }

    #[test]
    fn test_no_store() {
        assert_eq!(NoStore, NoStore);
        assert_eq!(NoStore.graph_label(), "-");
    }
}
