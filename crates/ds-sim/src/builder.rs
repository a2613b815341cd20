//! Fluent builder for constructing a [`Scheduler`].

use ds_core::{Day, DayClock, Population, SimConfig, SimRng};
use ds_heap::IndexedHeap;

use crate::{EntityModel, Scheduler, SimResult};

/// Fluent builder for [`Scheduler<M>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: horizon, seed, survivor population
/// - `M: EntityModel`: the entity rules
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                         |
/// |-----------------------|---------------------------------|
/// | `.capacity(pop, n)`   | Empty heap, grows by doubling   |
/// | `.start_day(day)`     | `Day::ZERO`                     |
///
/// # Example
///
/// ```rust,ignore
/// let mut sched = SchedulerBuilder::new(SimConfig::new(7), model)
///     .capacity(Population::A, 64)
///     .capacity(Population::B, 512)
///     .build()?;
/// sched.seed_a(payload, 10)?;
/// sched.run(&mut NoopObserver)?;
/// ```
pub struct SchedulerBuilder<M: EntityModel> {
    config:    SimConfig,
    model:     M,
    capacity:  [usize; 2],
    start_day: Day,
}

impl<M: EntityModel> SchedulerBuilder<M> {
    pub fn new(config: SimConfig, model: M) -> Self {
        Self {
            config,
            model,
            capacity:  [0, 0],
            start_day: Day::ZERO,
        }
    }

    /// Pre-size one population's heap.  Purely a performance hint.
    pub fn capacity(mut self, population: Population, n: usize) -> Self {
        self.capacity[population.index()] = n;
        self
    }

    /// Start the clock somewhere other than day 0.
    pub fn start_day(mut self, day: Day) -> Self {
        self.start_day = day;
        self
    }

    /// Validate the configuration and return an empty, ready-to-seed
    /// [`Scheduler`].
    pub fn build(self) -> SimResult<Scheduler<M>> {
        self.config.validate()?;

        Ok(Scheduler {
            rng:      SimRng::new(self.config.seed),
            clock:    DayClock::starting_at(self.start_day),
            pop_a:    IndexedHeap::with_capacity(self.capacity[Population::A.index()]),
            pop_b:    IndexedHeap::with_capacity(self.capacity[Population::B.index()]),
            model:    self.model,
            config:   self.config,
            finished: None,
        })
    }
}
