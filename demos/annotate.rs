//! State annotation with a propositional formula.
//!
//! A single process increments x, then y, then z through a five-location
//! chain. After exploration, every state is checked against
//! `or (and (x=1, y>0), not (z=0))` and the satisfied atomic propositions
//! are printed per state. Optionally writes the annotated graph as DOT.

use std::fmt;

use clap::Parser;

use lts_rs::dot::DotConfig;
use lts_rs::explorer::System;
use lts_rs::formula::Formula;
use lts_rs::process::{Action, Guard, Process, StateTransitions, Transition};
use lts_rs::store::Store;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Write the annotated state graph as DOT to this file.
    #[clap(long, value_name = "FILE")]
    dot: Option<std::path::PathBuf>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
struct Vars {
    x: i64,
    y: i64,
    z: i64,
}

impl fmt::Display for Vars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x={} y={} z={}", self.x, self.y, self.z)
    }
}

impl Store for Vars {}

fn set(label: &str, target: u32, f: impl Fn(&mut Vars) + 'static) -> Transition<Vars> {
    Transition::new(label, target, Guard::Always, Action::update(move |dest: &mut Vars, _| f(dest)))
}

fn counter() -> Process<Vars> {
    Process::new(
        "T",
        vec![
            StateTransitions::new(0, vec![set("x:=1", 1, |v| v.x = 1)]),
            StateTransitions::new(1, vec![set("y:=1", 2, |v| v.y = 1)]),
            StateTransitions::new(2, vec![set("z:=1", 3, |v| v.z = 1)]),
            StateTransitions::new(3, vec![set("x:=0", 4, |v| v.x = 0)]),
            StateTransitions::new(4, vec![]),
        ],
    )
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();

    let system = System::new(vec![counter()]);
    let lts = system.explore(Vars::default());
    println!("explored {} states", lts.num_states());

    let f = (Formula::prop("x=1", |v: &Vars| v.x == 1) & Formula::prop("y>0", |v: &Vars| v.y > 0))
        | !Formula::prop("z=0", |v: &Vars| v.z == 0);
    println!("formula: {}", f);

    for (i, verdict) in lts.annotate(&f).iter().enumerate() {
        let id = lts_rs::types::StateId::new(i as u32);
        println!(
            "{:4} {:32} holds={} [{}]",
            id.to_string(),
            lts.display_label(id),
            verdict.holds,
            verdict.true_labels.join(", "),
        );
    }

    if let Some(path) = args.dot {
        std::fs::write(&path, lts.to_dot_annotated(&f, &DotConfig::default())?)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}
