//! Grass and frob payloads.

use ds_core::SimRng;

use crate::params::*;
use crate::world::{Cell, Direction, Pos};

// ── Genotype ──────────────────────────────────────────────────────────────────

/// A frob's 19-byte genome.
///
/// ```text
/// [0]      birth mass       (gene / 2 + 20)
/// [1]      birth percent    (gene * 100 / 255)
/// [2]      period           (gene % 32 + 5)
/// [3..7]   north prefs      empty, rock, grass, frob
/// [7..11]  south prefs
/// [11..15] east prefs
/// [15..19] west prefs
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Genotype(pub [u8; Genotype::LEN]);

impl Genotype {
    pub const LEN: usize = 19;

    const BIRTH_MASS:    usize = 0;
    const BIRTH_PERCENT: usize = 1;
    const PERIOD:        usize = 2;

    pub fn random(rng: &mut SimRng) -> Self {
        let mut genes = [0u8; Self::LEN];
        for g in &mut genes {
            *g = rng.random();
        }
        Genotype(genes)
    }

    pub fn birth_mass(&self) -> i32 {
        i32::from(self.0[Self::BIRTH_MASS]) / 2 + 20
    }

    pub fn birth_percent(&self) -> i32 {
        i32::from(self.0[Self::BIRTH_PERCENT]) * 100 / 255
    }

    /// Days between actions: 5 to 36.
    pub fn period(&self) -> u32 {
        u32::from(self.0[Self::PERIOD]) % 32 + 5
    }

    /// How much this genome likes hopping `dir` when `cell` is there.
    pub fn preference(&self, dir: Direction, cell: Cell) -> u8 {
        let base = match dir {
            Direction::North => 3,
            Direction::South => 7,
            Direction::East  => 11,
            Direction::West  => 15,
        };
        let offset = match cell {
            Cell::Empty    => 0,
            Cell::Rock     => 1,
            Cell::Grass(_) => 2,
            Cell::Frob(_)  => 3,
        };
        self.0[base + offset]
    }

    /// Copy with each byte independently given a one-in-`odds` chance of a
    /// single random bit flip.
    pub fn mutated(&self, odds: u32, rng: &mut SimRng) -> Self {
        let mut genes = self.0;
        for g in &mut genes {
            if rng.gen_range(0..odds) == 0 {
                *g ^= 1 << rng.gen_range(0..8u32);
            }
        }
        Genotype(genes)
    }
}

// ── Grass ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Grass {
    pub pos:  Pos,
    pub mass: i32,
}

impl Grass {
    pub fn new(pos: Pos, mass: i32) -> Self {
        Self { pos, mass }
    }

    /// Per-action mass change for a given period.  With a negative tax this
    /// is growth.
    pub fn pay_tax(&mut self, period: u32) {
        self.mass -= GRASS_MASS_TAX_MILLS * period as i32 / 1000 + GRASS_FIXED_OVERHEAD;
    }

    /// Split off a child holding [`GRASS_BIRTH_PERCENT`] of the mass.
    pub fn split(&mut self, at: Pos) -> Grass {
        let child_mass = self.mass * GRASS_BIRTH_PERCENT / 100;
        self.mass -= child_mass;
        Grass::new(at, child_mass)
    }
}

// ── Frob ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Frob {
    pub pos:        Pos,
    pub mass:       i32,
    pub genome:     Genotype,
    pub generation: u32,
    /// Set when another frob hops into this one; tells a later death apart
    /// from starvation.
    pub bumped:     bool,
}

impl Frob {
    pub fn new(pos: Pos, mass: i32, genome: Genotype, generation: u32) -> Self {
        Self { pos, mass, genome, generation, bumped: false }
    }

    /// A first-generation frob with a random genome.
    pub fn genesis(pos: Pos, rng: &mut SimRng) -> Self {
        Self::new(pos, FROB_GENESIS_MASS, Genotype::random(rng), 0)
    }

    pub fn period(&self) -> u32 {
        self.genome.period()
    }

    pub fn pay_tax(&mut self, period: u32) {
        self.mass -= FROB_MASS_TAX_MILLS * period as i32 / 1000 + FROB_FIXED_OVERHEAD;
    }

    /// Add a meal's mass unless that would exceed [`FROB_MAX_MASS`], then cap
    /// at the birth mass.
    pub fn eat(&mut self, meal: i32) {
        let fed = self.mass + meal;
        if fed <= FROB_MAX_MASS {
            self.mass = fed;
        }
        self.mass = self.mass.min(self.genome.birth_mass());
    }

    /// Choose a hop direction, weighting each by `preference + 1`.
    pub fn choose_hop(&self, around: &[(Direction, Cell); 4], rng: &mut SimRng) -> Direction {
        let weights = around.map(|(d, c)| u32::from(self.genome.preference(d, c)) + 1);
        let mut r = rng.gen_range(0..weights.iter().sum::<u32>());
        for (i, w) in weights.iter().enumerate() {
            if r < *w {
                return around[i].0;
            }
            r -= w;
        }
        around[3].0
    }

    /// Split off a child at `at` with a mutated genome.
    pub fn reproduce(&mut self, at: Pos, rng: &mut SimRng) -> Frob {
        let child_mass = self.mass * self.genome.birth_percent() / 100;
        self.mass -= child_mass;
        let genome = self.genome.mutated(DNA_MUTATION_ODDS_PER_BYTE, rng);
        Frob::new(at, child_mass, genome, self.generation + 1)
    }
}
