//! The `EntityModel` trait, the callback contract the loop drives.

use ds_heap::Handle;

use crate::ActionContext;

/// Whether the acting item goes back into its heap.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Fate {
    /// Re-arm at `day + period` and reinsert.
    Alive,
    /// Release the record; the item never wakes again.
    Dead,
}

/// What an action reports back to the loop.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Outcome {
    pub fate:      Fate,
    /// Queued items of the *other* population this action consumed.
    ///
    /// Each must be currently queued.  Naming the same item twice, or an item
    /// an earlier action already consumed, fails the step with
    /// [`SimError::Deletion`][crate::SimError::Deletion].
    pub deletions: Vec<Handle>,
}

impl Outcome {
    pub fn alive() -> Self {
        Self { fate: Fate::Alive, deletions: Vec::new() }
    }

    pub fn dead() -> Self {
        Self { fate: Fate::Dead, deletions: Vec::new() }
    }

    /// Also delete `target` from the other population.
    pub fn deleting(mut self, target: Handle) -> Self {
        self.deletions.push(target);
        self
    }
}

/// Pluggable entity rules for both populations.
///
/// The loop calls [`act_a`][Self::act_a] for each ready item of population
/// A and [`act_b`][Self::act_b] for population B.  Each call receives an
/// [`ActionContext`] scoped to the acting item: it can read and mutate
/// payloads of either population, spawn new items into its own population,
/// and change its own period, but it cannot restructure either heap.  Removal
/// of other-population items goes through [`Outcome::deletions`].
///
/// # Example
///
/// ```rust,ignore
/// struct Decay;
///
/// impl EntityModel for Decay {
///     type A = u32; // remaining lives
///     type B = ();
///
///     fn act_a(&mut self, ctx: &mut ActionContext<'_, u32, ()>) -> Outcome {
///         let lives = ctx.me();
///         *lives -= 1;
///         if *lives == 0 { Outcome::dead() } else { Outcome::alive() }
///     }
///
///     fn act_b(&mut self, _ctx: &mut ActionContext<'_, (), u32>) -> Outcome {
///         Outcome::alive()
///     }
/// }
/// ```
pub trait EntityModel {
    /// Payload of population A items.
    type A;
    /// Payload of population B items.
    type B;

    /// Perform one action for a population A item.
    fn act_a(&mut self, ctx: &mut ActionContext<'_, Self::A, Self::B>) -> Outcome;

    /// Perform one action for a population B item.
    fn act_b(&mut self, ctx: &mut ActionContext<'_, Self::B, Self::A>) -> Outcome;
}
