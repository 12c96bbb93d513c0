//! Event-synchronized composition of two linear processes.
//!
//! P emits a, c, d and Q emits b, c, d, e; they synchronize on {c, d}.
//! Unfolds both processes, builds the product, and prints its states,
//! stuck states, and discovery paths. Optionally writes all three graphs
//! as DOT files.

use clap::Parser;

use lts_rs::compose::compose;
use lts_rs::event::{Event, SyncEventSet};
use lts_rs::unfold::{unfold, ChainProcess};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Write the component and product graphs as DOT files into this
    /// directory.
    #[clap(long, value_name = "DIR")]
    dot_dir: Option<std::path::PathBuf>,
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

    let p = unfold(&ChainProcess::new("P", ["a", "c", "d"].map(Event::from)));
    let q = unfold(&ChainProcess::new("Q", ["b", "c", "d", "e"].map(Event::from)));
    println!("{}: {} states", p.name(), p.num_states());
    println!("{}: {} states", q.name(), q.num_states());

    let sync = SyncEventSet::new(["c", "d"].map(Event::from));
    let product = compose(&sync, &p, &q);
    println!("{}: {} states", product.name(), product.num_states());

    for s in product.states() {
        let via = s.event().map(|e| e.label()).unwrap_or("-");
        let stuck = if product.is_stuck(s.id()) { " (stuck)" } else { "" };
        println!("{:4} {:10} {}{}", s.id().to_string(), via, s.label(), stuck);
    }

    for s in product.states() {
        for path in product.paths_to(s.id()) {
            let ids: Vec<_> = path.iter().map(|id| id.to_string()).collect();
            println!("path to {}: {}", s.id(), ids.join(" -> "));
        }
    }

    if let Some(dir) = args.dot_dir {
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join("p.dot"), p.to_dot()?)?;
        std::fs::write(dir.join("q.dot"), q.to_dot()?)?;
        std::fs::write(dir.join("product.dot"), product.to_dot()?)?;
        println!("wrote DOT files to {}", dir.display());
    }

    Ok(())
}
