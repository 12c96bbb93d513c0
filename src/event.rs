//! Events and synchronization event sets for the event-composition model.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// An atomic event label.
///
/// Events are compared by value equality only; there is no meaningful
/// ordering between events. Cloning is cheap (the label is shared).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Event(Arc<str>);

impl Event {
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Event(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Event {
    fn from(label: &str) -> Self {
        Event::new(label)
    }
}

impl From<String> for Event {
    fn from(label: String) -> Self {
        Event::new(label)
    }
}

/// The set of events on which two composed processes must synchronize.
///
/// A transition whose event belongs to the sync set may only fire jointly
/// with a matching transition of the partner process; all other events
/// interleave freely.
#[derive(Debug, Clone, Default)]
pub struct SyncEventSet {
    events: HashSet<Event>,
}

impl SyncEventSet {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        SyncEventSet {
            events: events.into_iter().collect(),
        }
    }

    /// The empty sync set: full interleaving, no synchronization.
    pub fn empty() -> Self {
        SyncEventSet::default()
    }

    pub fn contains(&self, event: &Event) -> bool {
        self.events.contains(event)
    }

    /// Check whether every event in `candidates` belongs to the sync set.
    pub fn is_included<'a>(&self, candidates: impl IntoIterator<Item = &'a Event>) -> bool {
        candidates.into_iter().all(|e| self.events.contains(e))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_value_equality() {
        let a1 = Event::new("a");
        let a2 = Event::from("a");
        let b = Event::from("b");
        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert_eq!(a1.label(), "a");
    }

    #[test]
    fn test_sync_set_inclusion() {
        let a = Event::from("a");
        let b = Event::from("b");
        let c = Event::from("c");
        let sync = SyncEventSet::new([a.clone(), b.clone()]);

        assert!(sync.contains(&a));
        assert!(!sync.contains(&c));
        assert!(sync.is_included([&a]));
        assert!(sync.is_included([&a, &b]));
        assert!(!sync.is_included([&a, &c]));
        // Vacuously included.
        assert!(sync.is_included(std::iter::empty::<&Event>()));
    }

    #[test]
    fn test_empty_sync_set() {
        let sync = SyncEventSet::empty();
        assert!(sync.is_empty());
        assert!(!sync.contains(&Event::from("a")));
        assert!(!sync.is_included([&Event::from("a")]));
    }
}
