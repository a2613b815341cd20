//! The two independently scheduled populations.

use std::fmt;

/// Which of the scheduler's two heaps an item belongs to.
///
/// The ordering `A < B` is the dispatch order when both populations have an
/// item ready in the same drain round.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Population {
    A,
    B,
}

impl Population {
    /// Both populations in dispatch order.
    pub const ALL: [Population; 2] = [Population::A, Population::B];

    /// The population an action may delete from.
    #[inline]
    pub fn other(self) -> Population {
        match self {
            Population::A => Population::B,
            Population::B => Population::A,
        }
    }

    /// Stable 0/1 index for per-population arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Population::A => 0,
            Population::B => 1,
        }
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Population::A => "A",
            Population::B => "B",
        };
        f.write_str(s)
    }
}
