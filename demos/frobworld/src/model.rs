//! `FrobWorld`: the entity rules for frobs (population A) and grass
//! (population B).
//!
//! Frobs are the survivor population: the run ends when the last one dies.

use ds_core::SimRng;
use ds_heap::Handle;
use ds_sim::{ActionContext, EntityModel, Fate, Outcome, Scheduler, SimResult};

use crate::being::{Frob, Grass};
use crate::params::*;
use crate::stats::{DeathCause, RunStats};
use crate::world::{Cell, Grid, Pos};

pub struct FrobWorld {
    pub grid:  Grid,
    pub rng:   SimRng,
    pub stats: RunStats,
}

impl FrobWorld {
    /// A rock-strewn world with no beings yet; see [`populate`].
    pub fn new(seed: u64) -> Self {
        let mut rng = SimRng::new(seed).child(1);
        let grid = Grid::with_rocks(&mut rng);
        Self { grid, rng, stats: RunStats::default() }
    }

    fn bury(&mut self, pos: Pos, generation: u32, cause: DeathCause) {
        self.grid.clear(pos);
        self.stats.record_death(cause);
        self.note_generation(generation);
    }

    fn note_generation(&mut self, generation: u32) {
        self.stats.deepest_generation = self.stats.deepest_generation.max(generation);
    }

    /// Frob hop resolution.  Returns whether the frob moved, or `None` if
    /// the hop killed it.
    fn hop(
        &mut self,
        ctx:     &mut ActionContext<'_, Frob, Grass>,
        outcome: &mut Outcome,
        from:    Pos,
        to:      Pos,
    ) -> Option<bool> {
        match self.grid.get(to) {
            Cell::Empty => Some(true),
            Cell::Rock => {
                let me = ctx.me();
                me.mass -= ROCK_BUMP_PENALTY;
                if me.mass <= 0 {
                    let generation = me.generation;
                    self.bury(from, generation, DeathCause::Rock);
                    return None;
                }
                Some(false)
            }
            Cell::Grass(grass) => {
                let meal = ctx.other().get(grass).map_or(0, |g| g.mass);
                ctx.me().eat(meal);
                outcome.deletions.push(grass);
                self.stats.grass_eaten += 1;
                Some(true)
            }
            Cell::Frob(other) => {
                if let Some(victim) = ctx.own().get_mut(other) {
                    victim.mass -= FROB_HIT_PENALTY;
                    victim.bumped = true;
                }
                Some(false)
            }
        }
    }
}

/// Scatter the initial grass and frobs over open cells and queue them.
pub fn populate(sched: &mut Scheduler<FrobWorld>) -> SimResult<()> {
    for _ in 0..INIT_GRASSES {
        let pos = sched.model.grid.random_open(&mut sched.model.rng);
        let handle = sched.seed_b(Grass::new(pos, GRASS_GENESIS_MASS), GRASS_INITIAL_PERIOD)?;
        sched.model.grid.set(pos, Cell::Grass(handle));
    }
    for _ in 0..INIT_FROBS {
        let pos = sched.model.grid.random_open(&mut sched.model.rng);
        let frob = Frob::genesis(pos, &mut sched.model.rng);
        let period = frob.period();
        let handle = sched.seed_a(frob, period)?;
        sched.model.grid.set(pos, Cell::Frob(handle));
        sched.model.stats.frobs_ever += 1;
    }
    Ok(())
}

impl EntityModel for FrobWorld {
    type A = Frob;
    type B = Grass;

    fn act_a(&mut self, ctx: &mut ActionContext<'_, Frob, Grass>) -> Outcome {
        let actor: Handle = ctx.actor();
        let period = ctx.period();
        let me = ctx.me();
        let (from, generation) = (me.pos, me.generation);

        // Knocked out by neighbours since the last action.
        if me.mass <= 0 {
            let cause = if me.bumped { DeathCause::Frob } else { DeathCause::Tax };
            self.bury(from, generation, cause);
            return Outcome::dead();
        }

        me.pay_tax(period);
        if me.mass <= 0 {
            self.bury(from, generation, DeathCause::Tax);
            return Outcome::dead();
        }

        let around = self.grid.neighbours(from);
        let to = from.step(ctx.me().choose_hop(&around, &mut self.rng));

        let mut outcome = Outcome::alive();
        let Some(moved) = self.hop(ctx, &mut outcome, from, to) else {
            return Outcome::dead();
        };
        if !moved {
            return outcome;
        }

        self.grid.clear(from);
        self.grid.set(to, Cell::Frob(actor));
        ctx.me().pos = to;
        self.stats.hops += 1;

        // Reproduce into the cell just vacated.
        let me = ctx.me();
        if me.mass >= me.genome.birth_mass() {
            let child = me.reproduce(from, &mut self.rng);
            let (child_period, child_generation) = (child.period(), child.generation);
            match ctx.spawn(child, child_period) {
                Ok(handle) => {
                    self.grid.set(from, Cell::Frob(handle));
                    self.stats.frobs_ever += 1;
                    self.note_generation(child_generation);
                }
                Err(e) => tracing::warn!(%actor, "frob birth failed: {e}"),
            }
            if ctx.me().mass <= 0 {
                self.bury(to, generation, DeathCause::Tax);
                outcome.fate = Fate::Dead;
            }
        }
        outcome
    }

    fn act_b(&mut self, ctx: &mut ActionContext<'_, Grass, Frob>) -> Outcome {
        let period = ctx.period();
        let me = ctx.me();
        me.pay_tax(period);
        let (pos, mass) = (me.pos, me.mass);
        if mass <= 0 {
            self.grid.clear(pos);
            return Outcome::dead();
        }

        let around = self.grid.neighbours(pos);
        let crowd = around.iter().filter(|(_, c)| matches!(c, Cell::Grass(_))).count();

        if mass > GRASS_BIRTH_MASS && crowd < GRASS_CROWD_LIMIT + 2 {
            let open: Vec<Pos> = around
                .iter()
                .filter(|(_, c)| *c == Cell::Empty)
                .map(|&(d, _)| pos.step(d))
                .collect();
            if !open.is_empty() {
                let at = open[self.rng.gen_range(0..open.len())];
                let child = ctx.me().split(at);
                match ctx.spawn(child, GRASS_INITIAL_PERIOD) {
                    Ok(handle) => self.grid.set(at, Cell::Grass(handle)),
                    Err(e) => tracing::warn!(actor = %ctx.actor(), "grass split failed: {e}"),
                }
            }
        } else if crowd >= GRASS_CROWD_LIMIT {
            // Crowded: slow down (up to the cap) and bank mass at the split
            // threshold.
            if 2 * period < GRASS_MAX_PERIOD {
                if let Err(e) = ctx.set_period(2 * period) {
                    tracing::warn!(actor = %ctx.actor(), "grass slowdown failed: {e}");
                }
            }
            ctx.me().mass = GRASS_BIRTH_MASS;
        }
        Outcome::alive()
    }
}
