//! The classic two-lock deadlock: P acquires m0 then m1, Q acquires m1 then
//! m0. Explores the full state space, reports every deadlock with its trace,
//! and optionally writes the state graph as DOT.

use std::fmt;

use clap::Parser;

use lts_rs::config::Config;
use lts_rs::explorer::System;
use lts_rs::process::{Action, Guard, Process, StateTransitions, Transition};
use lts_rs::store::Store;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Acquire the locks in the same order in both processes (deadlock-free).
    #[clap(long)]
    same_order: bool,

    /// Write the explored state graph as DOT to this file.
    #[clap(long, value_name = "FILE")]
    dot: Option<std::path::PathBuf>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
struct Mutexes {
    m0: bool,
    m1: bool,
}

impl fmt::Display for Mutexes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m0={} m1={}", self.m0 as u8, self.m1 as u8)
    }
}

impl Store for Mutexes {}

fn lock(target: u32, is_m0: bool) -> Transition<Mutexes> {
    Transition::new(
        if is_m0 { "lock0" } else { "lock1" },
        target,
        Guard::when(move |_, c: &Config<Mutexes>| {
            if is_m0 {
                !c.store().m0
            } else {
                !c.store().m1
            }
        }),
        Action::update(move |dest: &mut Mutexes, _: &Mutexes| {
            if is_m0 {
                dest.m0 = true;
            } else {
                dest.m1 = true;
            }
        }),
    )
}

fn unlock(target: u32, is_m0: bool) -> Transition<Mutexes> {
    Transition::new(
        if is_m0 { "unlock0" } else { "unlock1" },
        target,
        Guard::Always,
        Action::update(move |dest: &mut Mutexes, _: &Mutexes| {
            if is_m0 {
                dest.m0 = false;
            } else {
                dest.m1 = false;
            }
        }),
    )
}

/// Acquire both locks (first `first_is_m0`, then the other), then release
/// them in reverse order.
fn locker(name: &str, first_is_m0: bool) -> Process<Mutexes> {
    Process::new(
        name,
        vec![
            StateTransitions::new(0, vec![lock(1, first_is_m0)]),
            StateTransitions::new(1, vec![lock(2, !first_is_m0)]),
            StateTransitions::new(2, vec![unlock(3, !first_is_m0)]),
            StateTransitions::new(3, vec![unlock(0, first_is_m0)]),
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

    let q_first_is_m0 = args.same_order;
    let system = System::new(vec![locker("P", true), locker("Q", q_first_is_m0)]);
    let lts = system.explore(Mutexes::default());

    println!("explored {} states", lts.num_states());

    let deadlocks = lts.deadlocks();
    if deadlocks.is_empty() {
        println!("no deadlock");
    } else {
        for &id in &deadlocks {
            println!("deadlock at state {}: {}", id, lts.display_label(id));
        }
        for (id, trace) in lts.deadlock_traces() {
            println!("trace to deadlocked state {}:", id);
            print!("{}", system.render_path(trace));
        }
    }

    if let Some(path) = args.dot {
        std::fs::write(&path, lts.to_dot()?)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}
