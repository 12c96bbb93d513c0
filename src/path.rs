//! Immutable, structurally shared discovery paths.
//!
//! [`Trace`] is a persistent cons list: appending creates a new trace that
//! shares its entire prefix with the original, so keeping one trace per
//! frontier configuration during a breadth-first exploration costs O(1)
//! memory per step instead of a deep copy of the whole path.
//!
//! The shared-variable engine instantiates it as [`Path`], whose elements
//! record which process took which transition into each configuration; the
//! event model instantiates it over bare [`StateId`]s.
//!
//! [`StateId`]: crate::types::StateId

use std::rc::Rc;

use crate::config::Config;
use crate::event::Event;
use crate::types::ProcessId;

#[derive(Debug)]
struct Node<T> {
    elem: T,
    prev: Option<Rc<Node<T>>>,
}

/// A non-empty immutable sequence with structural sharing.
#[derive(Debug)]
pub struct Trace<T> {
    head: Rc<Node<T>>,
    len: usize,
}

// A trace is non-empty by construction, so there is no `is_empty`.
#[allow(clippy::len_without_is_empty)]
impl<T> Trace<T> {
    /// A one-element trace.
    pub fn root(elem: T) -> Self {
        Trace {
            head: Rc::new(Node { elem, prev: None }),
            len: 1,
        }
    }

    /// A new trace extending `self` by one element. `self` is unchanged and
    /// the prefix is shared.
    pub fn append(&self, elem: T) -> Self {
        Trace {
            head: Rc::new(Node {
                elem,
                prev: Some(Rc::clone(&self.head)),
            }),
            len: self.len + 1,
        }
    }

    /// Number of elements; at least 1, since a trace always holds its root.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The most recently appended element.
    pub fn last(&self) -> &T {
        &self.head.elem
    }

    /// Iterate root first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let mut items = Vec::with_capacity(self.len);
        let mut cur = Some(&self.head);
        while let Some(node) = cur {
            items.push(&node.elem);
            cur = node.prev.as_ref();
        }
        items.into_iter().rev()
    }

    /// The prefix of length `len` (structurally shared with `self`).
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= len <= self.len()`.
    pub fn truncate(&self, len: usize) -> Trace<T> {
        assert!(len >= 1 && len <= self.len, "invalid truncation length {} for trace of length {}", len, self.len);
        let mut head = &self.head;
        for _ in len..self.len {
            head = head.prev.as_ref().expect("trace shorter than its recorded length");
        }
        Trace {
            head: Rc::clone(head),
            len,
        }
    }
}

impl<T> Clone for Trace<T> {
    fn clone(&self) -> Self {
        Trace {
            head: Rc::clone(&self.head),
            len: self.len,
        }
    }
}

impl<T: PartialEq> PartialEq for Trace<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for Trace<T> {}

/// One step of a shared-variable discovery path: the configuration entered,
/// and the (process, transition label) that produced it (`None` for the
/// root).
#[derive(Debug)]
pub struct Step<S> {
    pub config: Rc<Config<S>>,
    pub via: Option<(ProcessId, Event)>,
}

impl<S> Clone for Step<S> {
    fn clone(&self) -> Self {
        Step {
            config: Rc::clone(&self.config),
            via: self.via.clone(),
        }
    }
}

impl<S: PartialEq> PartialEq for Step<S> {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config && self.via == other.via
    }
}

impl<S: Eq> Eq for Step<S> {}

/// A discovery path through the shared-variable state space, root first.
pub type Path<S> = Trace<Step<S>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_and_append() {
        let t = Trace::root(10);
        assert_eq!(t.len(), 1);
        assert_eq!(*t.last(), 10);

        let t2 = t.append(20).append(30);
        assert_eq!(t2.len(), 3);
        assert_eq!(*t2.last(), 30);
        // The original is unchanged.
        assert_eq!(t.len(), 1);

        let elems: Vec<_> = t2.iter().copied().collect();
        assert_eq!(elems, [10, 20, 30]);
    }

    #[test]
    fn test_append_then_truncate_round_trip() {
        let t = Trace::root(1).append(2).append(3);
        let extended = t.append(4).append(5);
        let back = extended.truncate(t.len());
        assert_eq!(back, t);
    }

    #[test]
    fn test_equality_is_element_wise() {
        let a = Trace::root(1).append(2);
        let b = Trace::root(1).append(2);
        let c = Trace::root(1).append(3);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, a.append(2));
    }

    #[test]
    fn test_truncate_to_self() {
        let t = Trace::root(7).append(8);
        assert_eq!(t.truncate(2), t);
        assert_eq!(t.truncate(1), Trace::root(7));
    }

    #[test]
    #[should_panic(expected = "invalid truncation length")]
    fn test_truncate_beyond_length() {
        Trace::root(1).truncate(2);
    }
}
