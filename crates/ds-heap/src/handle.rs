//! Heap identities and item handles.
//!
//! A [`Handle`] is what entity models hold on to in order to name a queued
//! item later (typically to delete it from the other population).  It is not
//! a reference: it is an arena index tagged with the owning heap's identity
//! and the record's generation, so a handle that outlives its item is
//! detected instead of silently aliasing whatever reuses the arena slot.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_HEAP_ID: AtomicU32 = AtomicU32::new(0);

/// Identity of one [`IndexedHeap`][crate::IndexedHeap] instance.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeapId(pub u32);

impl HeapId {
    /// Allocate an identity no other heap in this process carries.
    pub(crate) fn fresh() -> HeapId {
        HeapId(NEXT_HEAP_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for HeapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HeapId({})", self.0)
    }
}

/// Stable, generation-tagged reference to one item record.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Handle {
    pub(crate) heap:       HeapId,
    pub(crate) index:      u32,
    pub(crate) generation: u32,
}

impl Handle {
    /// The heap whose arena this handle points into.
    #[inline]
    pub fn heap(self) -> HeapId {
        self.heap
    }

    /// Arena index; stable for the life of the item.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.index as usize
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}:{}v{})", self.heap.0, self.index, self.generation)
    }
}
