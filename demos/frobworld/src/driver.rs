//! One seeded run from setup to report.

use std::path::Path;

use anyhow::Result;

use ds_core::{Population, SimConfig};
use ds_output::{CsvWriter, SimOutputObserver};
use ds_sim::{NoopObserver, SchedulerBuilder};

use crate::model::{FrobWorld, populate};
use crate::stats::RunReport;

/// Where (and how often) to write per-day CSV rows.
pub struct CsvOutput<'a> {
    pub dir:   &'a Path,
    pub every: u64,
}

/// Build, populate and run one world, then summarise it.
///
/// With `output`, rows go to `<dir>/run_<seed>/day_summaries.csv`.
pub fn run_world(
    run:    usize,
    seed:   u64,
    days:   u64,
    output: Option<CsvOutput<'_>>,
) -> Result<RunReport> {
    let config = SimConfig { horizon_days: days, seed, survivor: Population::A };
    let mut sched = SchedulerBuilder::new(config, FrobWorld::new(seed))
        .capacity(Population::A, 1 << 10)
        .capacity(Population::B, 1 << 12)
        .build()?;
    populate(&mut sched)?;
    tracing::info!(run, seed, days, "world populated");

    let outcome = match output {
        Some(CsvOutput { dir, every }) => {
            let writer = CsvWriter::new(&dir.join(format!("run_{seed}")))?;
            let mut obs = SimOutputObserver::new(writer).every(every);
            let outcome = sched.run(&mut obs)?;
            if let Some(e) = obs.take_error() {
                return Err(e.into());
            }
            outcome
        }
        None => sched.run(&mut NoopObserver)?,
    };

    let (world, mut frobs, _grass) = sched.into_parts();
    let survivor_periods = frobs
        .drain_sorted()
        .into_iter()
        .filter_map(|h| frobs.period(h))
        .collect();

    Ok(RunReport { run, seed, outcome, stats: world.stats, survivor_periods })
}
