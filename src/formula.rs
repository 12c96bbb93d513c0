//! Propositional formulas over store snapshots.
//!
//! A [`Formula`] is a closed tree of atomic propositions combined with
//! `and`, `or` and `not`. Atomic propositions carry a display label and a
//! predicate over the store. Evaluation is total and side-effect free;
//! [`Formula::check`] additionally reports which atomic propositions held,
//! which is what state annotation wants.
//!
//! Formulas compose with the usual operators:
//!
//! ```
//! use lts_rs::formula::Formula;
//!
//! let f: Formula<i32> = Formula::prop("x=1", |x| *x == 1) & !Formula::prop("x<0", |x| *x < 0);
//! assert!(f.eval(&1));
//! assert!(!f.eval(&-1));
//! ```

use std::fmt;
use std::rc::Rc;

/// A propositional formula over store values of type `S`.
pub enum Formula<S> {
    Prop {
        label: String,
        pred: Rc<dyn Fn(&S) -> bool>,
    },
    And(Box<Formula<S>>, Box<Formula<S>>),
    Or(Box<Formula<S>>, Box<Formula<S>>),
    Not(Box<Formula<S>>),
}

/// The result of checking a formula against one store value.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Verdict {
    pub holds: bool,
    /// Labels of the atomic propositions that evaluated to true, in
    /// left-to-right formula order.
    pub true_labels: Vec<String>,
}

impl<S> Formula<S> {
    /// An atomic proposition with a display label.
    pub fn prop(label: impl Into<String>, pred: impl Fn(&S) -> bool + 'static) -> Self {
        Formula::Prop {
            label: label.into(),
            pred: Rc::new(pred),
        }
    }

    /// Truth value of the formula on `store`.
    pub fn eval(&self, store: &S) -> bool {
        match self {
            Formula::Prop { pred, .. } => pred(store),
            Formula::And(g, h) => g.eval(store) & h.eval(store),
            Formula::Or(g, h) => g.eval(store) | h.eval(store),
            Formula::Not(g) => !g.eval(store),
        }
    }

    /// Truth value plus the labels of every satisfied atomic proposition.
    ///
    /// Every atom is evaluated, including atoms under a short-circuitable
    /// connective: the label report covers the whole formula, not just the
    /// part that decided it.
    pub fn check(&self, store: &S) -> Verdict {
        let mut true_labels = Vec::new();
        let holds = self.walk(store, &mut true_labels);
        Verdict { holds, true_labels }
    }

    fn walk(&self, store: &S, true_labels: &mut Vec<String>) -> bool {
        match self {
            Formula::Prop { label, pred } => {
                let v = pred(store);
                if v {
                    true_labels.push(label.clone());
                }
                v
            }
            Formula::And(g, h) => {
                let a = g.walk(store, true_labels);
                let b = h.walk(store, true_labels);
                a & b
            }
            Formula::Or(g, h) => {
                let a = g.walk(store, true_labels);
                let b = h.walk(store, true_labels);
                a | b
            }
            Formula::Not(g) => !g.walk(store, true_labels),
        }
    }
}

impl<S> Clone for Formula<S> {
    fn clone(&self) -> Self {
        match self {
            Formula::Prop { label, pred } => Formula::Prop {
                label: label.clone(),
                pred: Rc::clone(pred),
            },
            Formula::And(g, h) => Formula::And(g.clone(), h.clone()),
            Formula::Or(g, h) => Formula::Or(g.clone(), h.clone()),
            Formula::Not(g) => Formula::Not(g.clone()),
        }
    }
}

impl<S> fmt::Display for Formula<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Prop { label, .. } => write!(f, "{}", label),
            Formula::And(g, h) => write!(f, "and ({}, {})", g, h),
            Formula::Or(g, h) => write!(f, "or ({}, {})", g, h),
            Formula::Not(g) => write!(f, "not ({})", g),
        }
    }
}

impl<S> fmt::Debug for Formula<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Formula[{}]", self)
    }
}

impl<S> std::ops::BitAnd for Formula<S> {
    type Output = Formula<S>;
    fn bitand(self, rhs: Self) -> Self::Output {
        Formula::And(Box::new(self), Box::new(rhs))
    }
}

impl<S> std::ops::BitOr for Formula<S> {
    type Output = Formula<S>;
    fn bitor(self, rhs: Self) -> Self::Output {
        Formula::Or(Box::new(self), Box::new(rhs))
    }
}

impl<S> std::ops::Not for Formula<S> {
    type Output = Formula<S>;
    fn not(self) -> Self::Output {
        Formula::Not(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Vars {
        x: i64,
        y: i64,
        z: i64,
    }

    fn x_is_1() -> Formula<Vars> {
        Formula::prop("x=1", |v: &Vars| v.x == 1)
    }

    fn y_pos() -> Formula<Vars> {
        Formula::prop("y>0", |v: &Vars| v.y > 0)
    }

    fn z_zero() -> Formula<Vars> {
        Formula::prop("z=0", |v: &Vars| v.z == 0)
    }

    #[test]
    fn test_and_reports_all_true_atoms() {
        let f = x_is_1() & y_pos();
        let v = f.check(&Vars { x: 1, y: 1, z: 0 });
        assert!(v.holds);
        assert_eq!(v.true_labels, ["x=1", "y>0"]);
    }

    #[test]
    fn test_failed_and_still_reports_satisfied_atoms() {
        let f = x_is_1() & y_pos();
        let v = f.check(&Vars { x: 0, y: 1, z: 0 });
        assert!(!v.holds);
        assert_eq!(v.true_labels, ["y>0"]);
    }

    #[test]
    fn test_or_evaluates_both_branches() {
        let f = x_is_1() | y_pos();
        let v = f.check(&Vars { x: 1, y: 5, z: 0 });
        assert!(v.holds);
        // The right branch is not skipped after the left already decided.
        assert_eq!(v.true_labels, ["x=1", "y>0"]);
    }

    #[test]
    fn test_not() {
        let f = !z_zero();
        assert!(!f.eval(&Vars::default()));
        assert!(f.eval(&Vars { z: 3, ..Vars::default() }));
        // A satisfied atom under a negation is still reported.
        let v = f.check(&Vars::default());
        assert!(!v.holds);
        assert_eq!(v.true_labels, ["z=0"]);
    }

    #[test]
    fn test_nested() {
        let f = (x_is_1() & y_pos()) | !z_zero();
        assert!(f.eval(&Vars { x: 1, y: 2, z: 0 }));
        assert!(f.eval(&Vars { x: 0, y: 0, z: 1 }));
        assert!(!f.eval(&Vars { x: 0, y: 0, z: 0 }));
    }

    #[test]
    fn test_display() {
        let f = (x_is_1() & y_pos()) | !z_zero();
        assert_eq!(f.to_string(), "or (and (x=1, y>0), not (z=0))");
    }

    #[test]
    fn test_clone_shares_predicates() {
        let f = x_is_1() & y_pos();
        let g = f.clone();
        let vars = Vars { x: 1, y: 1, z: 0 };
        assert_eq!(f.eval(&vars), g.eval(&vars));
        assert_eq!(f.to_string(), g.to_string());
    }
}
