//! The `Scheduler` struct and its day loop.

use ds_core::{Day, DayClock, Population, SimConfig, SimRng};
use ds_heap::{Handle, HeapError, IndexedHeap};

use crate::{
    ActionContext, DaySummary, EntityModel, Fate, Outcome, Removal, SimError, SimObserver,
    SimResult,
};

// ── StepOutcome ───────────────────────────────────────────────────────────────

/// Result of one [`Scheduler::step`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StepOutcome {
    /// The day was drained; the carried day is the next one to drain.
    Continuing(Day),
    /// The survivor population's heap emptied on this day.
    Extinct(Day),
    /// The clock reached the configured horizon.
    HorizonReached(Day),
}

impl StepOutcome {
    pub fn day(self) -> Day {
        match self {
            StepOutcome::Continuing(d) | StepOutcome::Extinct(d) | StepOutcome::HorizonReached(d) => d,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, StepOutcome::Continuing(_))
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// The two-population discrete-event loop.
///
/// `Scheduler<M>` exclusively owns both heaps and the day clock.  Each
/// [`step`][Self::step] drains the current day:
///
/// 1. While population A's or B's minimum wake day equals today, extract the
///    ready minimum from A, then from B (A before B within a round).
/// 2. Hand each extracted item to [`EntityModel::act_a`] / [`act_b`].
/// 3. Resolve the [`Outcome`]: delete consumed other-population items,
///    re-arm survivors at `day + period`, release the dead, queue births.
/// 4. When neither population is ready, advance the clock by one day.
///
/// Create via [`SchedulerBuilder`][crate::SchedulerBuilder].
///
/// [`act_b`]: EntityModel::act_b
pub struct Scheduler<M: EntityModel> {
    /// Run configuration (horizon, seed, survivor population).
    pub config: SimConfig,

    /// The shared day clock.
    pub clock: DayClock,

    /// The entity rules.  Free to hold its own state (grids, counters, …).
    pub model: M,

    pub(crate) pop_a: IndexedHeap<M::A>,
    pub(crate) pop_b: IndexedHeap<M::B>,

    /// Drives initial-phase draws for seeded and newborn items.
    pub(crate) rng: SimRng,

    pub(crate) finished: Option<StepOutcome>,
}

impl<M: EntityModel> Scheduler<M> {
    // ── Public API ────────────────────────────────────────────────────────

    /// The day currently being (or about to be) drained.
    #[inline]
    pub fn current_day(&self) -> Day {
        self.clock.current_day
    }

    /// The terminal outcome, once the run has ended.
    pub fn finished(&self) -> Option<StepOutcome> {
        self.finished
    }

    /// Read-only access to population A's heap.
    pub fn population_a(&self) -> &IndexedHeap<M::A> {
        &self.pop_a
    }

    /// Read-only access to population B's heap.
    pub fn population_b(&self) -> &IndexedHeap<M::B> {
        &self.pop_b
    }

    /// Consume the scheduler, handing back the model and both heaps (for
    /// end-of-run statistics over the survivors).
    pub fn into_parts(self) -> (M, IndexedHeap<M::A>, IndexedHeap<M::B>) {
        (self.model, self.pop_a, self.pop_b)
    }

    /// Queued item count for `population`.
    pub fn len(&self, population: Population) -> usize {
        match population {
            Population::A => self.pop_a.len(),
            Population::B => self.pop_b.len(),
        }
    }

    /// Introduce a fresh population A item with an initial phase drawn
    /// relative to the current day.
    pub fn seed_a(&mut self, payload: M::A, period: u32) -> SimResult<Handle> {
        seed(&mut self.pop_a, &mut self.rng, self.clock.current_day, payload, period)
    }

    /// Introduce a fresh population B item.  See [`seed_a`][Self::seed_a].
    pub fn seed_b(&mut self, payload: M::B, period: u32) -> SimResult<Handle> {
        seed(&mut self.pop_b, &mut self.rng, self.clock.current_day, payload, period)
    }

    /// Run until extinction or the horizon, whichever comes first.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<StepOutcome> {
        loop {
            let outcome = self.step(observer)?;
            if outcome.is_terminal() {
                return Ok(outcome);
            }
        }
    }

    /// Run at most `n` days; stops early if the run terminates.
    pub fn run_days<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<StepOutcome> {
        let mut outcome = StepOutcome::Continuing(self.clock.current_day);
        for _ in 0..n {
            outcome = self.step(observer)?;
            if outcome.is_terminal() {
                break;
            }
        }
        Ok(outcome)
    }

    /// Drain the current day and advance the clock.
    ///
    /// Once the run has terminated every further call returns the same
    /// terminal outcome without touching any state.
    ///
    /// A [`SimError::Deletion`] ends the step after the offending action has
    /// been fully resolved: the actor is re-armed or released and its births
    /// are queued.  The clock does not advance, so a later call resumes the
    /// same day.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<StepOutcome> {
        if let Some(done) = self.finished {
            return Ok(done);
        }
        if let Some(done) = self.termination() {
            return Ok(self.finish(done, observer));
        }

        let day = self.clock.current_day;
        observer.on_day_start(day);
        let mut summary = DaySummary::new(day);

        loop {
            debug_assert!(self.pop_a.peek_wake().map_or(true, |w| w >= day));
            debug_assert!(self.pop_b.peek_wake().map_or(true, |w| w >= day));

            let ready_a = self.pop_a.peek_wake() == Some(day);
            let ready_b = self.pop_b.peek_wake() == Some(day);
            if !ready_a && !ready_b {
                break;
            }

            if ready_a {
                self.dispatch(Population::A, day, &mut summary, observer)?;
                if self.extinct() {
                    return Ok(self.close_day(summary, StepOutcome::Extinct(day), observer));
                }
            }
            // Re-peek: A's action may have consumed B's ready minimum.
            if self.pop_b.peek_wake() == Some(day) {
                self.dispatch(Population::B, day, &mut summary, observer)?;
                if self.extinct() {
                    return Ok(self.close_day(summary, StepOutcome::Extinct(day), observer));
                }
            }
        }

        summary.live = [self.pop_a.len(), self.pop_b.len()];
        observer.on_day_end(&summary);
        self.clock.advance();

        if let Some(done) = self.termination() {
            return Ok(self.finish(done, observer));
        }
        Ok(StepOutcome::Continuing(self.clock.current_day))
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    fn dispatch<O: SimObserver>(
        &mut self,
        population: Population,
        day:        Day,
        summary:    &mut DaySummary,
        observer:   &mut O,
    ) -> SimResult<()> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let Self { model, pop_a, pop_b, rng, .. } = self;
        match population {
            Population::A => dispatch_one(
                population, day, pop_a, pop_b, rng, summary, observer,
                |ctx| model.act_a(ctx),
            ),
            Population::B => dispatch_one(
                population, day, pop_b, pop_a, rng, summary, observer,
                |ctx| model.act_b(ctx),
            ),
        }
    }

    // ── Termination ───────────────────────────────────────────────────────

    fn extinct(&self) -> bool {
        self.len(self.config.survivor) == 0
    }

    fn termination(&self) -> Option<StepOutcome> {
        let day = self.clock.current_day;
        if self.extinct() {
            Some(StepOutcome::Extinct(day))
        } else if day >= self.config.horizon() {
            Some(StepOutcome::HorizonReached(day))
        } else {
            None
        }
    }

    fn close_day<O: SimObserver>(
        &mut self,
        mut summary: DaySummary,
        outcome:     StepOutcome,
        observer:    &mut O,
    ) -> StepOutcome {
        summary.live = [self.pop_a.len(), self.pop_b.len()];
        observer.on_day_end(&summary);
        self.finish(outcome, observer)
    }

    fn finish<O: SimObserver>(&mut self, outcome: StepOutcome, observer: &mut O) -> StepOutcome {
        tracing::info!(
            ?outcome,
            live_a = self.pop_a.len(),
            live_b = self.pop_b.len(),
            "run terminated",
        );
        self.finished = Some(outcome);
        observer.on_sim_end(outcome);
        outcome
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn seed<T>(
    heap:    &mut IndexedHeap<T>,
    rng:     &mut SimRng,
    now:     Day,
    payload: T,
    period:  u32,
) -> SimResult<Handle> {
    let handle = heap.spawn(payload, now, period)?;
    heap.set_wake(handle, rng.initial_wake(now, period))?;
    heap.insert(handle)?;
    Ok(handle)
}

/// Extract the ready minimum of `own`, run its action, and apply the outcome.
#[allow(clippy::too_many_arguments)]
fn dispatch_one<P, O, S, F>(
    population: Population,
    day:        Day,
    own:        &mut IndexedHeap<P>,
    other:      &mut IndexedHeap<O>,
    rng:        &mut SimRng,
    summary:    &mut DaySummary,
    observer:   &mut S,
    act:        F,
) -> SimResult<()>
where
    S: SimObserver,
    F: FnOnce(&mut ActionContext<'_, P, O>) -> Outcome,
{
    let Some(actor) = own.extract_min() else {
        return Ok(());
    };
    let own_ix = population.index();
    let other_ix = population.other().index();
    summary.dispatched[own_ix] += 1;

    let mut ctx = ActionContext::new(day, population, actor, own, other);
    let Outcome { fate, deletions } = act(&mut ctx);
    let births = ctx.into_births();

    // ── Cross-population deletions ────────────────────────────────────────
    // A bad target stops the remaining deletions, but the actor and its
    // births are still resolved so both heaps stay consistent.
    let mut failed = None;
    for target in deletions {
        if let Err(source) = other.delete(target).and_then(|()| other.release(target).map(drop)) {
            tracing::warn!(day = day.0, %population, %target, %source, "deletion refused");
            failed = Some(SimError::Deletion { population: population.other(), source });
            break;
        }
        tracing::trace!(day = day.0, %population, %target, "consumed");
        summary.consumed[other_ix] += 1;
        observer.on_removed(day, population.other(), target, Removal::Consumed);
    }

    // ── The actor itself ──────────────────────────────────────────────────
    match fate {
        Fate::Alive => {
            own.rearm(actor, day)?;
            own.insert(actor)?;
        }
        Fate::Dead => {
            own.release(actor)?;
            summary.deaths[own_ix] += 1;
            observer.on_removed(day, population, actor, Removal::Died);
        }
    }

    // ── Births ────────────────────────────────────────────────────────────
    for child in births {
        let period = own.period(child).ok_or(HeapError::StaleHandle(child))?;
        own.set_wake(child, rng.initial_wake(day, period))?;
        own.insert(child)?;
        summary.births[own_ix] += 1;
    }

    tracing::debug!(day = day.0, %population, %actor, ?fate, "dispatched");
    observer.on_dispatch(day, population, actor, fate);
    failed.map_or(Ok(()), Err)
}
