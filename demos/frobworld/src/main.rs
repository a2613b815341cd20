//! frobworld: grass and frobs on a rock-strewn grid, run as two populations
//! on the daysched scheduler.
//!
//! Grass grows, splits into open neighbouring cells, and slows down when
//! crowded.  Frobs pay a mass tax, hop according to their genome's
//! preferences, eat the grass they land on, and reproduce with mutation.  A
//! run ends when the last frob dies or the horizon is reached.
//!
//! ```text
//! frobworld --runs 5
//! frobworld --seed 17 --seed 99 --days 5000 --output ./out
//! RUST_LOG=debug frobworld --seed 3 --days 50
//! ```

mod being;
mod driver;
mod model;
mod params;
mod stats;
mod world;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use rand::Rng;
use tracing_subscriber::EnvFilter;

use driver::{CsvOutput, run_world};
use params::MAX_SIMULATION_DAYS;

#[derive(Parser, Debug)]
#[command(name = "frobworld")]
#[command(about = "Grass-and-frob ecology on the daysched scheduler")]
struct Cli {
    /// Run this seed (repeatable).  When given, --runs is ignored.
    #[arg(long = "seed")]
    seeds: Vec<u64>,

    /// Number of runs with freshly drawn seeds.
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Stop each run after this many days even if frobs survive.
    #[arg(long, default_value_t = MAX_SIMULATION_DAYS)]
    days: u64,

    /// Write `run_<seed>/day_summaries.csv` under this directory.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Only write every Nth day to the CSV output.
    #[arg(long, default_value_t = 1)]
    every: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let seeds: Vec<u64> = if cli.seeds.is_empty() {
        let mut rng = rand::thread_rng();
        (0..cli.runs).map(|_| rng.gen_range(0..i32::MAX as u64)).collect()
    } else {
        cli.seeds.clone()
    };

    println!("=== frobworld ===");
    println!("Runs: {}  |  Horizon: {} days", seeds.len(), cli.days);
    println!();

    let t0 = Instant::now();
    let mut extinct = 0usize;
    for (i, &seed) in seeds.iter().enumerate() {
        let output = cli.output.as_deref().map(|dir| CsvOutput { dir, every: cli.every });
        let report = run_world(i + 1, seed, cli.days, output)?;
        if report.extinct() {
            extinct += 1;
        }
        println!("{report}");
    }

    println!(
        "{} of {} runs went extinct  ({:.2} s)",
        extinct,
        seeds.len(),
        t0.elapsed().as_secs_f64(),
    );
    if let Some(dir) = &cli.output {
        println!("Day summaries written to {}", dir.display());
    }
    Ok(())
}
