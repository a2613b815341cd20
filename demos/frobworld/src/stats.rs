//! Per-run counters and the end-of-run report.

use std::fmt;

use ds_sim::StepOutcome;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DeathCause {
    /// Mass ran out paying the daily tax (or giving birth).
    Tax,
    /// Hopped into a rock.
    Rock,
    /// Knocked out by other frobs hopping into it.
    Frob,
}

impl DeathCause {
    pub const ALL: [DeathCause; 3] = [DeathCause::Tax, DeathCause::Rock, DeathCause::Frob];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeathCause::Tax  => "paying the tax",
            DeathCause::Rock => "hitting rocks",
            DeathCause::Frob => "death by frob",
        })
    }
}

/// Counters the model bumps while the run is in progress.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Every frob that ever existed, the initial cohort included.
    pub frobs_ever:         u64,
    pub hops:               u64,
    pub grass_eaten:        u64,
    pub deaths:             [u64; 3],
    pub deepest_generation: u32,
}

impl RunStats {
    pub fn record_death(&mut self, cause: DeathCause) {
        self.deaths[cause.index()] += 1;
    }

    /// The most frequent cause of death; ties go to the earlier cause in
    /// [`DeathCause::ALL`].  `None` if nothing died.
    pub fn main_cause(&self) -> Option<DeathCause> {
        DeathCause::ALL
            .into_iter()
            .filter(|c| self.deaths[c.index()] > 0)
            .fold(None, |best: Option<DeathCause>, c| match best {
                Some(b) if self.deaths[b.index()] >= self.deaths[c.index()] => Some(b),
                _ => Some(c),
            })
    }

    fn per_frob(&self, total: u64) -> f64 {
        if self.frobs_ever == 0 { 0.0 } else { total as f64 / self.frobs_ever as f64 }
    }
}

/// Mean and population standard deviation.
pub fn mean_and_spread(values: &[u32]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
    let var = values.iter().map(|&v| (f64::from(v) - mean).powi(2)).sum::<f64>() / n;
    Some((mean, var.sqrt()))
}

/// Everything printed for one run.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub run:              usize,
    pub seed:             u64,
    pub outcome:          StepOutcome,
    pub stats:            RunStats,
    /// Periods of the frobs still alive, in wake order.
    pub survivor_periods: Vec<u32>,
}

impl RunReport {
    pub fn extinct(&self) -> bool {
        matches!(self.outcome, StepOutcome::Extinct(_))
    }

    pub fn avg_hops(&self) -> f64 {
        self.stats.per_frob(self.stats.hops)
    }

    pub fn avg_grass_eaten(&self) -> f64 {
        self.stats.per_frob(self.stats.grass_eaten)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run #{}  seed {}", self.run, self.seed)?;
        let day = self.outcome.day().0;
        if self.extinct() {
            writeln!(f, "  frobs extinct after {day} days")?;
        } else {
            let alive = self.survivor_periods.len();
            let share = 100.0 * alive as f64 / self.stats.frobs_ever.max(1) as f64;
            writeln!(f, "  frobs survived all {day} days")?;
            writeln!(f, "  survivors:               {alive} ({share:.2}% of all frobs)")?;
            if let Some((mean, spread)) = mean_and_spread(&self.survivor_periods) {
                writeln!(f, "  survivor period:         {mean:.2} ± {spread:.2} days")?;
            }
        }
        writeln!(f, "  average hops:            {:.2}", self.avg_hops())?;
        writeln!(f, "  deepest generation:      {}", self.stats.deepest_generation)?;
        writeln!(f, "  average grass eaten:     {:.2}", self.avg_grass_eaten())?;
        match self.stats.main_cause() {
            Some(cause) => writeln!(f, "  main cause of death:     {cause}"),
            None => writeln!(f, "  main cause of death:     none"),
        }
    }
}
