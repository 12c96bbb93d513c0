//! Graph to DOT (Graphviz) conversion.
//!
//! Every explored structure renders to DOT for inspection with `dot`,
//! `neato`, or an online viewer:
//!
//! - [`Lts::to_dot`]: the explored shared-variable state space. The initial
//!   state is highlighted, deadlocked states are filled with the deadlock
//!   color, and every edge is labelled `process.transition`.
//! - [`EventLts::to_dot`]: an unfolded process or synchronized product, with
//!   edges labelled by the event that produced the target state.
//! - [`Process::to_dot`]: the declared automaton of a single process, before
//!   any exploration.
//!
//! Appearance is customized through [`DotConfig`]; `DotConfig::default()`
//! gives the standard settings.

use std::fmt::Write as _;

use crate::formula::Formula;
use crate::lts::{Direction, Lts};
use crate::process::Process;
use crate::store::Store;
use crate::types::Loc;
use crate::unfold::{EventLts, StateLike};

/// Configuration options for DOT output generation.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for state nodes (default: "box")
    pub node_shape: &'static str,
    /// Fill color of the initial state (default: "cyan")
    pub initial_color: &'static str,
    /// Fill color of deadlocked states (default: "pink")
    pub deadlock_color: &'static str,
    /// Font size for node and edge labels (default: 11)
    pub fontsize: u32,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "box",
            initial_color: "cyan",
            deadlock_color: "pink",
            fontsize: 11,
        }
    }
}

/// Escape a label for use inside a double-quoted DOT string.
fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

impl<S: Store> Lts<S> {
    /// Converts the explored state space to DOT format.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        self.render_dot(config, |_| None)
    }

    /// Converts to DOT with each state annotated by the atomic propositions
    /// of `formula` that hold in it.
    ///
    /// States satisfying the whole formula are drawn with a doubled border.
    pub fn to_dot_annotated(&self, formula: &Formula<S>, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let verdicts = self.annotate(formula);
        self.render_dot(config, |i| Some(&verdicts[i]))
    }

    fn render_dot<'a>(
        &self,
        config: &DotConfig,
        verdict: impl Fn(usize) -> Option<&'a crate::formula::Verdict>,
    ) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph lts {{")?;
        writeln!(dot, "node [shape={}, fontsize={}];", config.node_shape, config.fontsize)?;
        writeln!(dot, "edge [fontsize={}];", config.fontsize)?;

        for i in 0..self.num_states() {
            let id = crate::types::StateId::new(i as u32);
            let mut label = format!("{}\n{}\n{}", id, self.state_name(id), self.config(id).store().graph_label());
            let mut attrs = format!("label=\"{}\"", escape(&label));
            if let Some(v) = verdict(i) {
                if !v.true_labels.is_empty() {
                    label.push('\n');
                    label.push_str(&v.true_labels.join(" "));
                    attrs = format!("label=\"{}\"", escape(&label));
                }
                if v.holds {
                    attrs.push_str(", peripheries=2");
                }
            }
            if id == self.root() {
                attrs.push_str(&format!(", style=filled, fillcolor={}", config.initial_color));
            } else if self.is_deadlock(id) {
                attrs.push_str(&format!(", style=filled, fillcolor={}", config.deadlock_color));
            }
            writeln!(dot, "{} [{}];", id, attrs)?;
        }

        // Each record is stored on one endpoint; orient it accordingly.
        for i in 0..self.num_states() {
            let id = crate::types::StateId::new(i as u32);
            for record in self.incoming_edges(id) {
                let (src, dst) = match record.direction {
                    Direction::Forward => (record.other, id),
                    Direction::Reverse => (id, record.other),
                };
                let label = format!("{}.{}", self.process_name(record.process), record.label);
                writeln!(dot, "{} -> {} [label=\"{}\"];", src, dst, escape(&label))?;
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

impl<T: StateLike + Clone> EventLts<T> {
    /// Converts an unfolded transition system to DOT format.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph \"{}\" {{", escape(self.name()))?;
        writeln!(dot, "node [shape={}, fontsize={}];", config.node_shape, config.fontsize)?;
        writeln!(dot, "edge [fontsize={}];", config.fontsize)?;

        for s in self.states() {
            let label = format!("{}\n{}", s.id(), s.label());
            let mut attrs = format!("label=\"{}\"", escape(&label));
            if s.id() == self.initial_state().id() {
                attrs.push_str(&format!(", style=filled, fillcolor={}", config.initial_color));
            }
            writeln!(dot, "{} [{}];", s.id(), attrs)?;
        }

        // Edges are labelled by the event the target was produced with.
        for s in self.states() {
            for &t in self.next_ids(s.id()) {
                let label = match self.state(t).event() {
                    Some(e) => e.label(),
                    None => "",
                };
                writeln!(dot, "{} -> {} [label=\"{}\"];", s.id(), t, escape(label))?;
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

impl<S: Store> Process<S> {
    /// Converts the declared automaton to DOT format: locations as nodes,
    /// transitions as labelled edges. Guards and actions are not rendered.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph \"{}\" {{", escape(self.name()))?;
        writeln!(dot, "node [shape={}, fontsize={}];", config.node_shape, config.fontsize)?;
        writeln!(dot, "edge [fontsize={}];", config.fontsize)?;

        for i in 0..self.num_locations() {
            let loc = Loc::new(i as u32);
            let mut attrs = format!("label=\"{}\"", escape(&self.loc_label(loc)));
            if loc == self.initial_loc() {
                attrs.push_str(&format!(", style=filled, fillcolor={}", config.initial_color));
            }
            writeln!(dot, "{} [{}];", loc, attrs)?;
        }

        for i in 0..self.num_locations() {
            let loc = Loc::new(i as u32);
            for t in self.next_transitions(loc) {
                writeln!(dot, "{} -> {} [label=\"{}\"];", loc, t.target(), escape(t.label().label()))?;
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
