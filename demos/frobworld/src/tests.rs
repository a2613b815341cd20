//! Tests for the frob-world model.

use ds_core::{Population, SimConfig, SimRng};
use ds_sim::{NoopObserver, Scheduler, SchedulerBuilder, StepOutcome};

use crate::being::{Frob, Genotype, Grass};
use crate::model::{FrobWorld, populate};
use crate::params::*;
use crate::world::{Cell, Direction, Grid, Pos};

fn world(seed: u64, days: u64) -> Scheduler<FrobWorld> {
    let config = SimConfig { horizon_days: days, seed, survivor: Population::A };
    let mut sched = SchedulerBuilder::new(config, FrobWorld::new(seed)).build().unwrap();
    populate(&mut sched).unwrap();
    sched
}

// ── Genotype ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod genotype_tests {
    use super::*;

    #[test]
    fn derived_traits_stay_in_range() {
        for byte in 0..=u8::MAX {
            let g = Genotype([byte; Genotype::LEN]);
            assert!((5..=36).contains(&g.period()));
            assert!((20..=147).contains(&g.birth_mass()));
            assert!((0..=100).contains(&g.birth_percent()));
        }
    }

    #[test]
    fn preferences_index_by_direction_then_cell() {
        let mut genes = [0u8; Genotype::LEN];
        for (i, g) in genes.iter_mut().enumerate() {
            *g = i as u8;
        }
        let g = Genotype(genes);
        assert_eq!(g.preference(Direction::North, Cell::Empty), 3);
        assert_eq!(g.preference(Direction::North, Cell::Rock), 4);
        assert_eq!(g.preference(Direction::South, Cell::Empty), 7);
        assert_eq!(g.preference(Direction::East, Cell::Rock), 12);
        assert_eq!(g.preference(Direction::West, Cell::Empty), 15);
    }

    #[test]
    fn certain_mutation_flips_one_bit_per_byte() {
        let mut rng = SimRng::new(5);
        let parent = Genotype::random(&mut rng);
        let child = parent.mutated(1, &mut rng);
        for (a, b) in parent.0.iter().zip(child.0.iter()) {
            assert_eq!((a ^ b).count_ones(), 1);
        }
    }
}

// ── Beings ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod being_tests {
    use super::*;

    fn frob_with_birth_mass_70(mass: i32) -> Frob {
        let mut genes = [0u8; Genotype::LEN];
        genes[0] = 100; // birth mass 100 / 2 + 20
        genes[1] = 255; // birth percent 100
        Frob::new(Pos::new(5, 5), mass, Genotype(genes), 0)
    }

    #[test]
    fn grass_grows_with_negative_tax() {
        let mut grass = Grass::new(Pos::new(1, 1), GRASS_GENESIS_MASS);
        grass.pay_tax(10);
        assert_eq!(grass.mass, GRASS_GENESIS_MASS + 2);
    }

    #[test]
    fn grass_split_shares_mass() {
        let mut grass = Grass::new(Pos::new(1, 1), 31);
        let child = grass.split(Pos::new(2, 1));
        assert_eq!(child.mass, 12);
        assert_eq!(grass.mass, 19);
        assert_eq!(child.pos, Pos::new(2, 1));
    }

    #[test]
    fn eating_caps_at_birth_mass() {
        let mut frob = frob_with_birth_mass_70(50);
        frob.eat(30);
        assert_eq!(frob.mass, 70);
    }

    #[test]
    fn overfull_meal_is_wasted() {
        let mut frob = frob_with_birth_mass_70(60);
        frob.eat(FROB_MAX_MASS);
        assert_eq!(frob.mass, 60);
    }

    #[test]
    fn reproduction_hands_over_birth_percent() {
        let mut rng = SimRng::new(1);
        let mut frob = frob_with_birth_mass_70(70);
        let child = frob.reproduce(Pos::new(4, 5), &mut rng);
        assert_eq!(child.mass, 70);
        assert_eq!(frob.mass, 0);
        assert_eq!(child.generation, 1);
    }

    #[test]
    fn strong_preference_dominates_hops() {
        let mut genes = [0u8; Genotype::LEN];
        genes[3] = 255; // north, empty
        let frob = Frob::new(Pos::new(5, 5), 100, Genotype(genes), 0);
        let around = Direction::ALL.map(|d| (d, Cell::Empty));

        let mut rng = SimRng::new(9);
        let north = (0..1000)
            .filter(|_| frob.choose_hop(&around, &mut rng) == Direction::North)
            .count();
        assert!(north > 900, "north chosen {north}/1000");
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod grid_tests {
    use super::*;

    #[test]
    fn border_is_rock() {
        let grid = Grid::bordered();
        assert_eq!(grid.get(Pos::new(0, 0)), Cell::Rock);
        assert_eq!(grid.get(Pos::new(WORLD_WIDTH, WORLD_HEIGHT)), Cell::Rock);
        assert_eq!(grid.get(Pos::new(37, 0)), Cell::Rock);
        assert_eq!(grid.get(Pos::new(0, 20)), Cell::Rock);
        assert_eq!(grid.get(Pos::new(1, 1)), Cell::Empty);
        let border = 2 * Grid::COLS + 2 * Grid::ROWS - 4;
        assert_eq!(grid.count(|c| c == Cell::Rock), border);
    }

    #[test]
    fn interior_rocks_added() {
        let grid = Grid::with_rocks(&mut SimRng::new(3));
        let border = 2 * Grid::COLS + 2 * Grid::ROWS - 4;
        assert_eq!(grid.count(|c| c == Cell::Rock), border + INTERIOR_ROCKS);
    }

    #[test]
    fn neighbours_follow_direction_order() {
        let grid = Grid::bordered();
        let around = grid.neighbours(Pos::new(1, 1));
        assert_eq!(around[0], (Direction::North, Cell::Rock));
        assert_eq!(around[1], (Direction::South, Cell::Empty));
        assert_eq!(around[2], (Direction::East, Cell::Empty));
        assert_eq!(around[3], (Direction::West, Cell::Rock));
    }
}

// ── Whole runs ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;
    use crate::driver::{CsvOutput, run_world};

    /// Every queued being sits on its own grid cell and every occupied cell
    /// names a live being.
    fn assert_grid_consistent(sched: &Scheduler<FrobWorld>) {
        let grid = &sched.model.grid;
        for (h, frob) in sched.population_a().iter() {
            assert_eq!(grid.get(frob.pos), Cell::Frob(h));
        }
        for (h, grass) in sched.population_b().iter() {
            assert_eq!(grid.get(grass.pos), Cell::Grass(h));
        }
        let frobs = grid.count(|c| matches!(c, Cell::Frob(h) if sched.population_a().contains(h)));
        let grasses = grid.count(|c| matches!(c, Cell::Grass(h) if sched.population_b().contains(h)));
        assert_eq!(frobs, sched.len(Population::A));
        assert_eq!(grasses, sched.len(Population::B));
        assert_eq!(grid.count(|c| matches!(c, Cell::Frob(_))), frobs);
        assert_eq!(grid.count(|c| matches!(c, Cell::Grass(_))), grasses);
    }

    #[test]
    fn populate_places_initial_cohorts() {
        let sched = world(11, 100);
        assert_eq!(sched.len(Population::A), INIT_FROBS);
        assert_eq!(sched.len(Population::B), INIT_GRASSES);
        assert_eq!(sched.model.stats.frobs_ever, INIT_FROBS as u64);
        assert_grid_consistent(&sched);
    }

    #[test]
    fn grid_stays_consistent_while_running() {
        let mut sched = world(21, 10_000);
        for _ in 0..30 {
            let outcome = sched.run_days(20, &mut NoopObserver).unwrap();
            sched.population_a().check_invariants();
            sched.population_b().check_invariants();
            assert_grid_consistent(&sched);
            if outcome.is_terminal() {
                break;
            }
        }
    }

    #[test]
    fn same_seed_same_run() {
        let a = run_world(1, 77, 400, None).unwrap();
        let b = run_world(1, 77, 400, None).unwrap();
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.survivor_periods, b.survivor_periods);
    }

    #[test]
    fn frobs_hop_and_eat() {
        let report = run_world(1, 5, 300, None).unwrap();
        assert!(report.stats.hops > 0);
        assert!(report.stats.grass_eaten > 0);
        if let StepOutcome::HorizonReached(day) = report.outcome {
            assert_eq!(day.0, 300);
            assert!(!report.survivor_periods.is_empty());
        }
    }

    #[test]
    fn csv_output_has_one_row_per_day() {
        let dir = tempfile::tempdir().unwrap();
        let output = CsvOutput { dir: dir.path(), every: 1 };
        let report = run_world(1, 8, 20, Some(output)).unwrap();

        let path = dir.path().join("run_8").join("day_summaries.csv");
        let text = std::fs::read_to_string(path).unwrap();
        let rows = text.lines().count() - 1;
        let expected = match report.outcome {
            StepOutcome::Extinct(day) => day.0 + 1,
            other => other.day().0,
        };
        assert_eq!(rows as u64, expected);
    }
}
