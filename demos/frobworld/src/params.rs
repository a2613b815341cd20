//! World constants.  Masses are whole units; taxes are in thousandths of a
//! unit per day of period.

pub const WORLD_WIDTH:  usize = 100;
pub const WORLD_HEIGHT: usize = 50;

/// Random interior rocks on top of the border ring.
pub const INTERIOR_ROCKS: usize = WORLD_WIDTH + 1;

pub const INIT_FROBS:   usize = 50;
pub const INIT_GRASSES: usize = 250;

pub const MAX_SIMULATION_DAYS: u64 = 25_000;

// ── Grass ─────────────────────────────────────────────────────────────────────

pub const GRASS_GENESIS_MASS:      i32 = 10;
pub const GRASS_BIRTH_MASS:        i32 = 30;
pub const GRASS_BIRTH_PERCENT:     i32 = 40;
pub const GRASS_INITIAL_PERIOD:    u32 = 10;
pub const GRASS_MAX_PERIOD:        u32 = 100;
/// Grass neighbours at or above which a grass stops trying to split and
/// slows down instead.
pub const GRASS_CROWD_LIMIT:       usize = 2;
/// Negative: grass gains mass each action.
pub const GRASS_MASS_TAX_MILLS:    i32 = -200;
pub const GRASS_FIXED_OVERHEAD:    i32 = 0;

// ── Frob ──────────────────────────────────────────────────────────────────────

pub const FROB_GENESIS_MASS:       i32 = 100;
pub const FROB_MASS_TAX_MILLS:     i32 = 100;
pub const FROB_FIXED_OVERHEAD:     i32 = 2;
/// Eating never takes a frob above this mass.
pub const FROB_MAX_MASS:           i32 = 255;
/// Mass lost by a frob that hops into a rock.
pub const ROCK_BUMP_PENALTY:       i32 = 30;
/// Mass lost by a frob that another frob hops into.
pub const FROB_HIT_PENALTY:        i32 = 10;
/// One-in-this chance of a single bit flip per genome byte at birth.
pub const DNA_MUTATION_ODDS_PER_BYTE: u32 = 20;
