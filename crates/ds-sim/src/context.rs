//! `ActionContext`: what an entity sees while it acts.

use ds_core::{Day, Population};
use ds_heap::{Handle, HeapResult, IndexedHeap};

/// Per-action view handed to [`EntityModel`][crate::EntityModel] callbacks.
///
/// `P` is the acting population's payload, `O` the other population's.  The
/// acting item has already been extracted from its heap, so
/// `own().contains(ctx.actor())` is `false` for the duration of the call.
pub struct ActionContext<'a, P, O> {
    day:        Day,
    population: Population,
    actor:      Handle,
    own:        &'a mut IndexedHeap<P>,
    other:      &'a mut IndexedHeap<O>,
    births:     Vec<Handle>,
}

impl<'a, P, O> ActionContext<'a, P, O> {
    pub(crate) fn new(
        day:        Day,
        population: Population,
        actor:      Handle,
        own:        &'a mut IndexedHeap<P>,
        other:      &'a mut IndexedHeap<O>,
    ) -> Self {
        Self { day, population, actor, own, other, births: Vec::new() }
    }

    pub(crate) fn into_births(self) -> Vec<Handle> {
        self.births
    }

    /// The day being drained.
    #[inline]
    pub fn day(&self) -> Day {
        self.day
    }

    /// The acting item's population.
    #[inline]
    pub fn population(&self) -> Population {
        self.population
    }

    /// Handle of the acting item.
    #[inline]
    pub fn actor(&self) -> Handle {
        self.actor
    }

    /// The acting item's payload.
    ///
    /// # Panics
    /// Panics if the acting record is gone, which the loop never allows.
    pub fn me(&mut self) -> &mut P {
        self.own
            .get_mut(self.actor)
            .expect("acting item has a live record for the whole action")
    }

    /// The acting item's current re-arm period.
    pub fn period(&self) -> u32 {
        self.own
            .period(self.actor)
            .expect("acting item has a live record for the whole action")
    }

    /// Change the acting item's period; the re-arm after this action uses it.
    pub fn set_period(&mut self, period: u32) -> HeapResult<()> {
        self.own.set_period(self.actor, period)
    }

    /// Same-population items (the actor included, though not queued).
    pub fn own(&mut self) -> PopulationView<'_, P> {
        PopulationView { heap: self.own }
    }

    /// Other-population items.
    pub fn other(&mut self) -> PopulationView<'_, O> {
        PopulationView { heap: self.other }
    }

    /// Create a new item in the acting population.
    ///
    /// The loop queues it after this action resolves, with an initial phase
    /// drawn relative to the current day.  The handle is valid immediately,
    /// so the model can index it (e.g. on a grid) before it is queued.
    pub fn spawn(&mut self, payload: P, period: u32) -> HeapResult<Handle> {
        let handle = self.own.spawn(payload, self.day, period)?;
        self.births.push(handle);
        Ok(handle)
    }
}

/// Payload-level access to one population without structural mutation.
pub struct PopulationView<'a, T> {
    heap: &'a mut IndexedHeap<T>,
}

impl<T> PopulationView<'_, T> {
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.heap.get(handle)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.heap.get_mut(handle)
    }

    /// `true` while `handle` is queued (i.e. would be a valid deletion).
    pub fn contains(&self, handle: Handle) -> bool {
        self.heap.contains(handle)
    }

    pub fn wake_time(&self, handle: Handle) -> Option<Day> {
        self.heap.wake_time(handle)
    }

    pub fn period(&self, handle: Handle) -> Option<u32> {
        self.heap.period(handle)
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Queued items with payloads, in heap-array order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> + '_ {
        self.heap.iter()
    }
}
