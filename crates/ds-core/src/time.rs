//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing integer `Day` counter.  Every wake time
//! and re-arm period is a whole number of days, so schedule arithmetic is
//! exact and two wake times are compared in O(1).
//!
//! `DayClock` holds the current day and is advanced by the scheduler only
//! after both populations have been drained for that day.

use std::fmt;

use crate::{CoreError, CoreResult, Population};

// ── Day ───────────────────────────────────────────────────────────────────────

/// An absolute simulation day.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Day(pub u64);

impl Day {
    pub const ZERO: Day = Day(0);

    /// Return the day `n` days after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Day {
        Day(self.0 + n)
    }

    /// Days elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Day) -> u64 {
        self.0 - earlier.0
    }

    /// The day immediately after `self`.
    #[inline]
    pub fn next(self) -> Day {
        Day(self.0 + 1)
    }
}

impl std::ops::Add<u64> for Day {
    type Output = Day;
    #[inline]
    fn add(self, rhs: u64) -> Day {
        Day(self.0 + rhs)
    }
}

impl std::ops::Sub for Day {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Day) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

// ── DayClock ──────────────────────────────────────────────────────────────────

/// The shared clock both populations advance against.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayClock {
    /// The day currently being drained.
    pub current_day: Day,
}

impl DayClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at an arbitrary day (mostly useful in tests).
    pub fn starting_at(day: Day) -> Self {
        Self { current_day: day }
    }

    /// Advance the clock by one day.
    #[inline]
    pub fn advance(&mut self) {
        self.current_day = self.current_day.next();
    }

    /// Days left before `horizon` (zero once it has been reached).
    #[inline]
    pub fn days_until(&self, horizon: Day) -> u64 {
        horizon.0.saturating_sub(self.current_day.0)
    }
}

impl fmt::Display for DayClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.current_day)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically built by the application crate (from CLI flags or a config file)
/// and passed to the scheduler builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// The run stops once the clock reaches this many days.
    pub horizon_days: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// The population that must stay non-empty; the run ends as extinct the
    /// moment its heap drains.
    pub survivor: Population,
}

impl SimConfig {
    /// Default horizon for long batch runs.
    pub const DEFAULT_HORIZON_DAYS: u64 = 25_000;

    pub fn new(seed: u64) -> Self {
        Self {
            horizon_days: Self::DEFAULT_HORIZON_DAYS,
            seed,
            survivor: Population::A,
        }
    }

    /// The day at which the run ends (exclusive upper bound).
    #[inline]
    pub fn horizon(&self) -> Day {
        Day(self.horizon_days)
    }

    /// Reject configurations that could never run a single day.
    pub fn validate(&self) -> CoreResult<()> {
        if self.horizon_days == 0 {
            return Err(CoreError::Config("horizon_days must be at least 1".into()));
        }
        Ok(())
    }
}
