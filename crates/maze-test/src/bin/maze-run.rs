//! Play one collector/scout episode on an ASCII map and print the report
//! as JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use maze_core::SearchMode;
use maze_test::{Episode, EpisodeConfig, MazeMap};

#[derive(Parser, Debug)]
#[command(name = "maze-run", about = "Run two maze agents on an ASCII map")]
struct Args {
    /// Map file (see maze_test::maze for the glyphs)
    map: PathBuf,

    /// Turn budget
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    /// Seed for agents and message loss
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Percent of messages lost in transit
    #[arg(long, default_value_t = 0)]
    drop_percent: u32,

    /// Only route through cells the agents have already seen
    #[arg(long)]
    known_cells: bool,

    /// Include the per-turn trace in the output
    #[arg(long)]
    trace: bool,

    /// Log filter used when RUST_LOG is unset, e.g. `debug` or
    /// `maze_core=trace`
    #[arg(long, default_value = "info")]
    log: String,
}

/// Logs go to stderr so stdout stays pure JSON
fn logger(default_filter: &str) -> env_logger::Builder {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    builder.target(env_logger::Target::Stderr);
    builder
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger(&args.log).init();

    let text = std::fs::read_to_string(&args.map)
        .with_context(|| format!("reading map {}", args.map.display()))?;
    let map = MazeMap::parse(&text).context("parsing map")?;

    let config = EpisodeConfig {
        max_turns: args.max_turns,
        seed: args.seed,
        drop_percent: args.drop_percent.min(100),
        search_mode: if args.known_cells {
            SearchMode::KnownCells
        } else {
            SearchMode::Optimistic
        },
    };

    let mut report = Episode::team(map, config)?.run();
    if !args.trace {
        report.trace.clear();
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
