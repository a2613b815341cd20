//! Simulation observer trait for progress reporting and data collection.

use ds_core::{Day, Population};
use ds_heap::Handle;

use crate::{Fate, StepOutcome};

/// Why an item left the simulation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Removal {
    /// Its own action reported [`Fate::Dead`].
    Died,
    /// An action of the other population deleted it.
    Consumed,
}

/// Counters for one drained day, indexed by [`Population::index`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DaySummary {
    pub day:        Day,
    pub dispatched: [u64; 2],
    pub births:     [u64; 2],
    pub deaths:     [u64; 2],
    pub consumed:   [u64; 2],
    /// Queued items per population when the day closed.
    pub live:       [usize; 2],
}

impl DaySummary {
    pub fn new(day: Day) -> Self {
        Self { day, ..Self::default() }
    }

    pub fn total_dispatched(&self) -> u64 {
        self.dispatched.iter().sum()
    }
}

/// Callbacks invoked by [`Scheduler::step`][crate::Scheduler::step] at key
/// points of the day loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_day_end(&mut self, summary: &DaySummary) {
///         if summary.day.0 % self.interval == 0 {
///             println!("{}: {} actions", summary.day, summary.total_dispatched());
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before the first dispatch of a day.
    fn on_day_start(&mut self, _day: Day) {}

    /// Called after an action has been fully resolved.
    fn on_dispatch(&mut self, _day: Day, _population: Population, _actor: Handle, _fate: Fate) {}

    /// Called when an item's record is released.
    fn on_removed(&mut self, _day: Day, _population: Population, _item: Handle, _why: Removal) {}

    /// Called once the day has been drained (or cut short by extinction).
    fn on_day_end(&mut self, _summary: &DaySummary) {}

    /// Called once, when the run terminates.
    fn on_sim_end(&mut self, _outcome: StepOutcome) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
