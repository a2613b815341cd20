//! Deterministic simulation RNG and the initial-phase draw.
//!
//! # Determinism strategy
//!
//! A run owns exactly one root `SimRng` seeded from `SimConfig::seed`.  All
//! draws happen on the single scheduler thread in dispatch order, so two runs
//! with the same seed and the same initial cohort consume the RNG stream
//! identically.  Entity models that want an independent stream derive one
//! with [`SimRng::child`].
//!
//! # Initial phase
//!
//! A freshly created item first wakes at `now + (draw % period)`, where the
//! draw is uniform over `1..=PHASE_DRAW_MAX`.  Drawing from a range much wider
//! than any period before reducing keeps every residue reachable and spreads
//! a new cohort across roughly one full period instead of bunching it on
//! the current day.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::Day;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Upper bound (inclusive) of the raw draw reduced by `period` for the
/// initial phase.
pub const PHASE_DRAW_MAX: u64 = 25_000;

/// Simulation-level RNG.
///
/// Used only on the scheduler thread.  If an entity model needs its own
/// stream, derive one with [`child`][Self::child].
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset, useful for
    /// giving an entity model its own stream deterministically from the root.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Phase offset in `0..period` for a freshly created item.
    ///
    /// # Panics
    /// Panics if `period` is zero.
    #[inline]
    pub fn phase(&mut self, period: u32) -> u64 {
        assert!(period > 0, "phase requested for a zero period");
        self.0.gen_range(1..=PHASE_DRAW_MAX) % u64::from(period)
    }

    /// First wake day for an item entering the system on `now`.
    #[inline]
    pub fn initial_wake(&mut self, now: Day, period: u32) -> Day {
        now + self.phase(period)
    }
}
