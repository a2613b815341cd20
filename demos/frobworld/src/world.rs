//! The grid: a rock-bordered rectangle of cells, each empty or holding one
//! thing.

use ds_core::SimRng;
use ds_heap::Handle;

use crate::params::{INTERIOR_ROCKS, WORLD_HEIGHT, WORLD_WIDTH};

/// A grid coordinate.  `(0, 0)` is the north-west corner.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `dir`.  Callers only step from interior
    /// cells, so the border ring keeps this in bounds.
    pub fn step(self, dir: Direction) -> Pos {
        match dir {
            Direction::North => Pos::new(self.x, self.y - 1),
            Direction::South => Pos::new(self.x, self.y + 1),
            Direction::East  => Pos::new(self.x + 1, self.y),
            Direction::West  => Pos::new(self.x - 1, self.y),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::North, Direction::South, Direction::East, Direction::West];
}

/// What occupies a cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Cell {
    #[default]
    Empty,
    Rock,
    Grass(Handle),
    Frob(Handle),
}

/// `(WORLD_WIDTH + 1) × (WORLD_HEIGHT + 1)` cells, row-major.
pub struct Grid {
    cells: Vec<Cell>,
}

impl Grid {
    pub const COLS: usize = WORLD_WIDTH + 1;
    pub const ROWS: usize = WORLD_HEIGHT + 1;

    /// An empty grid surrounded by a ring of rocks.
    pub fn bordered() -> Self {
        let mut grid = Self { cells: vec![Cell::Empty; Self::COLS * Self::ROWS] };
        for x in 0..Self::COLS {
            grid.set(Pos::new(x, 0), Cell::Rock);
            grid.set(Pos::new(x, WORLD_HEIGHT), Cell::Rock);
        }
        for y in 0..Self::ROWS {
            grid.set(Pos::new(0, y), Cell::Rock);
            grid.set(Pos::new(WORLD_WIDTH, y), Cell::Rock);
        }
        grid
    }

    /// Bordered grid plus [`INTERIOR_ROCKS`] rocks at random open cells.
    pub fn with_rocks(rng: &mut SimRng) -> Self {
        let mut grid = Self::bordered();
        for _ in 0..INTERIOR_ROCKS {
            let p = grid.random_open(rng);
            grid.set(p, Cell::Rock);
        }
        grid
    }

    #[inline]
    fn offset(p: Pos) -> usize {
        debug_assert!(p.x < Self::COLS && p.y < Self::ROWS, "{p:?} off grid");
        p.y * Self::COLS + p.x
    }

    #[inline]
    pub fn get(&self, p: Pos) -> Cell {
        self.cells[Self::offset(p)]
    }

    #[inline]
    pub fn set(&mut self, p: Pos, cell: Cell) {
        self.cells[Self::offset(p)] = cell;
    }

    pub fn clear(&mut self, p: Pos) {
        self.set(p, Cell::Empty);
    }

    /// A uniformly chosen empty interior cell.
    ///
    /// Retries until one is found, so it must only be used while the grid
    /// still has room (initial placement).
    pub fn random_open(&self, rng: &mut SimRng) -> Pos {
        loop {
            let p = Pos::new(rng.gen_range(1..WORLD_WIDTH), rng.gen_range(1..WORLD_HEIGHT));
            if self.get(p) == Cell::Empty {
                return p;
            }
        }
    }

    /// The four cells around `p`, in [`Direction::ALL`] order.
    pub fn neighbours(&self, p: Pos) -> [(Direction, Cell); 4] {
        Direction::ALL.map(|d| (d, self.get(p.step(d))))
    }

    pub fn count(&self, pred: impl Fn(Cell) -> bool) -> usize {
        self.cells.iter().filter(|&&c| pred(c)).count()
    }
}
