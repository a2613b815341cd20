//! `IndexedHeap`: binary min-heap over wake days with delete-by-handle.
//!
//! # Why this exists
//!
//! A plain `BinaryHeap` can only hand back its minimum.  The scheduler also
//! needs to pull an arbitrary queued item out of the future, e.g. when an
//! action in one population consumes an item of the other.  Scanning for it
//! would cost O(n) per removal; instead every item record remembers the heap
//! slot it sits in, and the heap rewrites that back-pointer on every move.
//!
//! # Ordering
//!
//! Items are ordered by the composite key `(wake, seq)` where `seq` is a
//! counter stamped on every insert.  The key is a strict total order, and the
//! same comparison drives both the bubble-up and the sink-down paths, so
//! items sharing a wake day always come out first-inserted-first.
//!
//! # Item lifecycle
//!
//! ```text
//! spawn ──▶ detached ──insert──▶ queued ──extract_min / delete──▶ detached
//!              │  ▲                                                  │
//!              │  └──────────────── rearm + insert ◀─────────────────┘
//!              └──release──▶ freed (handle goes stale)
//! ```

use std::fmt::Write as _;

use ds_core::Day;

use crate::{Handle, HeapError, HeapId, HeapResult};

/// Slot value meaning "not queued".  Slot 0 of the heap array is never used.
const UNQUEUED: usize = 0;

/// Slots reserved by [`IndexedHeap::new`], sentinel included.
const INITIAL_SLOTS: usize = 4;

// ── Entry ─────────────────────────────────────────────────────────────────────

/// One arena record.  `payload == None` marks a vacant record on the free list.
struct Entry<T> {
    generation: u32,
    payload:    Option<T>,
    wake:       Day,
    period:     u32,
    /// Insertion stamp; tie-break among equal wake days.
    seq:        u64,
    /// Current position in `slots`, or `UNQUEUED`.
    slot:       usize,
}

impl<T> Entry<T> {
    #[inline]
    fn key(&self) -> (Day, u64) {
        (self.wake, self.seq)
    }
}

// ── IndexedHeap ───────────────────────────────────────────────────────────────

/// An array-backed binary min-heap of item records keyed by wake day.
///
/// The heap owns both the item arena and the 1-indexed heap array, so the
/// back-pointer from an item to its slot never crosses an ownership
/// boundary.  Outside code refers to items only through [`Handle`]s.
pub struct IndexedHeap<T> {
    id:       HeapId,
    entries:  Vec<Entry<T>>,
    /// Vacant arena indices available for reuse.
    free:     Vec<u32>,
    /// `slots[0]` is a sentinel; `slots[1..=len]` hold arena indices.
    slots:    Vec<u32>,
    next_seq: u64,
}

impl<T> Default for IndexedHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IndexedHeap<T> {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_SLOTS - 1)
    }

    /// Create a heap with room for `capacity` queued items before it grows.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity + 1);
        slots.push(u32::MAX);
        Self {
            id: HeapId::fresh(),
            entries: Vec::with_capacity(capacity),
            free: Vec::new(),
            slots,
            next_seq: 0,
        }
    }

    /// This heap's identity; every handle it issues carries it.
    #[inline]
    pub fn id(&self) -> HeapId {
        self.id
    }

    /// Number of queued items.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Queued items the heap array can hold before it has to grow.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity() - 1
    }

    /// Number of live item records, queued or detached.
    pub fn live_count(&self) -> usize {
        self.entries.len() - self.free.len()
    }

    // ── Record lifecycle ──────────────────────────────────────────────────

    /// Create a detached item record and return its handle.
    ///
    /// The item is not queued until [`insert`][Self::insert] is called.
    pub fn spawn(&mut self, payload: T, wake: Day, period: u32) -> HeapResult<Handle> {
        if period == 0 {
            return Err(HeapError::ZeroPeriod);
        }
        let index = match self.free.pop() {
            Some(index) => {
                let entry = &mut self.entries[index as usize];
                entry.payload = Some(payload);
                entry.wake = wake;
                entry.period = period;
                entry.seq = 0;
                entry.slot = UNQUEUED;
                index
            }
            None => {
                let index = arena_index(self.entries.len())?;
                self.entries.push(Entry {
                    generation: 0,
                    payload: Some(payload),
                    wake,
                    period,
                    seq: 0,
                    slot: UNQUEUED,
                });
                index
            }
        };
        Ok(self.handle_at(index))
    }

    /// Spawn and insert in one call.
    pub fn schedule(&mut self, payload: T, wake: Day, period: u32) -> HeapResult<Handle> {
        let handle = self.spawn(payload, wake, period)?;
        self.insert(handle)?;
        Ok(handle)
    }

    /// Free a detached record and hand back its payload.
    ///
    /// The handle (and every copy of it) goes stale.
    pub fn release(&mut self, handle: Handle) -> HeapResult<T> {
        let index = self.resolve(handle).ok_or(HeapError::StaleHandle(handle))?;
        let entry = &mut self.entries[index];
        if entry.slot != UNQUEUED {
            return Err(HeapError::Queued(handle));
        }
        let payload = entry.payload.take().ok_or(HeapError::StaleHandle(handle))?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(index as u32);
        Ok(payload)
    }

    // ── Queue operations ──────────────────────────────────────────────────

    /// Queue a detached item at its current wake day.
    ///
    /// Fails with [`HeapError::DuplicateMembership`] if the item is already
    /// queued.  O(log n).
    pub fn insert(&mut self, handle: Handle) -> HeapResult<()> {
        let index = self.resolve(handle).ok_or(HeapError::StaleHandle(handle))?;
        if self.entries[index].slot != UNQUEUED {
            return Err(HeapError::DuplicateMembership(handle));
        }

        self.grow_if_full();
        let slot = self.slots.len();
        self.slots.push(index as u32);

        let entry = &mut self.entries[index];
        entry.seq = self.next_seq;
        entry.slot = slot;
        self.next_seq += 1;

        self.sift_up(slot);
        Ok(())
    }

    /// The item that [`extract_min`][Self::extract_min] would return.  O(1).
    pub fn peek_min(&self) -> Option<Handle> {
        self.slots.get(1).map(|&index| self.handle_at(index))
    }

    /// Wake day of the minimum, or `None` when empty.
    pub fn peek_wake(&self) -> Option<Day> {
        self.slots.get(1).map(|&index| self.entries[index as usize].wake)
    }

    /// Detach and return the minimum.  O(log n).
    ///
    /// The record stays alive: re-arm and re-insert it, or release it.
    pub fn extract_min(&mut self) -> Option<Handle> {
        if self.is_empty() {
            return None;
        }
        let index = self.slots[1];
        self.remove_slot(1);
        Some(self.handle_at(index))
    }

    /// Detach a queued item from anywhere in the heap.  O(log n).
    ///
    /// Fails with [`HeapError::NotMember`] if `handle` is not currently
    /// queued here: never inserted, already extracted or deleted, released,
    /// or issued by another heap.
    pub fn delete(&mut self, handle: Handle) -> HeapResult<()> {
        let not_member = HeapError::NotMember { handle, heap: self.id };
        let index = self.resolve(handle).ok_or(not_member)?;
        let slot = self.entries[index].slot;
        if slot == UNQUEUED {
            return Err(not_member);
        }
        self.remove_slot(slot);
        Ok(())
    }

    /// Extract every queued item in key order.
    ///
    /// Records are detached, not released.
    pub fn drain_sorted(&mut self) -> Vec<Handle> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(handle) = self.extract_min() {
            out.push(handle);
        }
        out
    }

    // ── Record access ─────────────────────────────────────────────────────

    pub fn get(&self, handle: Handle) -> Option<&T> {
        let index = self.resolve(handle)?;
        self.entries[index].payload.as_ref()
    }

    /// Mutable payload access.  The payload is not part of the key, so this
    /// is allowed for queued items as well.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let index = self.resolve(handle)?;
        self.entries[index].payload.as_mut()
    }

    /// `true` while `handle` is queued in this heap.
    pub fn contains(&self, handle: Handle) -> bool {
        self.resolve(handle)
            .is_some_and(|index| self.entries[index].slot != UNQUEUED)
    }

    pub fn wake_time(&self, handle: Handle) -> Option<Day> {
        self.resolve(handle).map(|index| self.entries[index].wake)
    }

    pub fn period(&self, handle: Handle) -> Option<u32> {
        self.resolve(handle).map(|index| self.entries[index].period)
    }

    /// Change an item's re-arm period.  Takes effect at its next re-arm.
    pub fn set_period(&mut self, handle: Handle, period: u32) -> HeapResult<()> {
        if period == 0 {
            return Err(HeapError::ZeroPeriod);
        }
        let index = self.resolve(handle).ok_or(HeapError::StaleHandle(handle))?;
        self.entries[index].period = period;
        Ok(())
    }

    /// Set the wake day of a detached item.
    pub fn set_wake(&mut self, handle: Handle, wake: Day) -> HeapResult<()> {
        let index = self.detached(handle)?;
        self.entries[index].wake = wake;
        Ok(())
    }

    /// Set a detached item's wake day to `now + period` and return it.
    pub fn rearm(&mut self, handle: Handle, now: Day) -> HeapResult<Day> {
        let index = self.detached(handle)?;
        let entry = &mut self.entries[index];
        entry.wake = now + u64::from(entry.period);
        Ok(entry.wake)
    }

    /// Queued handles in heap-array order (not sorted).
    pub fn handles(&self) -> impl Iterator<Item = Handle> + '_ {
        self.slots[1..].iter().map(|&index| self.handle_at(index))
    }

    /// Queued items with their payloads, in heap-array order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> + '_ {
        self.slots[1..].iter().filter_map(|&index| {
            let payload = self.entries[index as usize].payload.as_ref()?;
            Some((self.handle_at(index), payload))
        })
    }

    // ── Diagnostics ───────────────────────────────────────────────────────

    /// Verify the heap property and the slot ↔ record back-pointers.
    ///
    /// # Panics
    /// Panics on any violation.  A broken invariant is a bug in this module,
    /// not a condition callers can recover from.
    pub fn check_invariants(&self) {
        assert_eq!(self.slots.len(), self.len() + 1, "slot array length drifted");
        for k in 1..=self.len() {
            let index = self.slots[k] as usize;
            let entry = &self.entries[index];
            assert!(entry.payload.is_some(), "slot {k} points at a vacant record");
            assert_eq!(entry.slot, k, "record {index} thinks it is at slot {}", entry.slot);
            if k > 1 {
                let parent = &self.entries[self.slots[k / 2] as usize];
                assert!(
                    parent.key() < entry.key(),
                    "heap property broken between slot {} and slot {k}",
                    k / 2,
                );
            }
        }
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.slot != UNQUEUED {
                assert!(entry.slot <= self.len(), "record {index} slot out of range");
                assert_eq!(self.slots[entry.slot] as usize, index, "slot does not point back");
            }
        }
    }

    /// Render the heap as a sideways tree of wake days, right subtree on top.
    ///
    /// ```text
    /// ,-- D3
    /// D1
    /// `-- D2
    /// ```
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        if !self.is_empty() {
            self.render_node(1, "", None, &mut out);
        }
        out
    }

    fn render_node(&self, k: usize, prefix: &str, upper: Option<bool>, out: &mut String) {
        let child_prefix = |toward_parent: bool| match upper {
            None => String::new(),
            Some(_) if toward_parent => format!("{prefix}|   "),
            Some(_) => format!("{prefix}    "),
        };

        let right = 2 * k + 1;
        if right <= self.len() {
            self.render_node(right, &child_prefix(upper == Some(false)), Some(true), out);
        }

        let marker = match upper {
            None => "",
            Some(true) => ",-- ",
            Some(false) => "`-- ",
        };
        let wake = self.entries[self.slots[k] as usize].wake;
        let _ = writeln!(out, "{prefix}{marker}{wake}");

        let left = 2 * k;
        if left <= self.len() {
            self.render_node(left, &child_prefix(upper == Some(true)), Some(false), out);
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    #[inline]
    fn handle_at(&self, index: u32) -> Handle {
        Handle {
            heap: self.id,
            index,
            generation: self.entries[index as usize].generation,
        }
    }

    /// Arena index for a handle that names a live record of this heap.
    fn resolve(&self, handle: Handle) -> Option<usize> {
        if handle.heap != self.id {
            return None;
        }
        let entry = self.entries.get(handle.index())?;
        (entry.generation == handle.generation && entry.payload.is_some())
            .then_some(handle.index())
    }

    fn detached(&self, handle: Handle) -> HeapResult<usize> {
        let index = self.resolve(handle).ok_or(HeapError::StaleHandle(handle))?;
        if self.entries[index].slot != UNQUEUED {
            return Err(HeapError::Queued(handle));
        }
        Ok(index)
    }

    /// Double the heap array's capacity when it is full.
    fn grow_if_full(&mut self) {
        let cap = self.slots.capacity();
        if self.slots.len() == cap {
            self.slots.reserve_exact(cap.max(INITIAL_SLOTS));
        }
    }

    #[inline]
    fn key_at(&self, slot: usize) -> (Day, u64) {
        self.entries[self.slots[slot] as usize].key()
    }

    #[inline]
    fn place(&mut self, slot: usize, index: u32) {
        self.slots[slot] = index;
        self.entries[index as usize].slot = slot;
    }

    /// Remove the item at `slot`, fill the hole with the last item, and
    /// restore the heap property at the hole.
    fn remove_slot(&mut self, slot: usize) {
        let removed = self.slots[slot];
        let last = self.len();
        let moved = self.slots.pop().unwrap_or(removed);

        if slot != last {
            self.place(slot, moved);
            if slot > 1 && self.key_at(slot) < self.key_at(slot / 2) {
                self.sift_up(slot);
            } else {
                self.sift_down(slot);
            }
        }
        self.entries[removed as usize].slot = UNQUEUED;
    }

    /// Move the item at `slot` toward the root while it is smaller than its
    /// parent.
    fn sift_up(&mut self, mut slot: usize) {
        let index = self.slots[slot];
        let key = self.entries[index as usize].key();
        while slot > 1 {
            let parent = slot / 2;
            if key >= self.key_at(parent) {
                break;
            }
            let parent_index = self.slots[parent];
            self.place(slot, parent_index);
            slot = parent;
        }
        self.place(slot, index);
    }

    /// Move the item at `slot` away from the root while a child is smaller.
    fn sift_down(&mut self, mut slot: usize) {
        let index = self.slots[slot];
        let key = self.entries[index as usize].key();
        let len = self.len();
        loop {
            let left = 2 * slot;
            if left > len {
                break;
            }
            let right = left + 1;
            let child = if right <= len && self.key_at(right) < self.key_at(left) {
                right
            } else {
                left
            };
            if self.key_at(child) >= key {
                break;
            }
            let child_index = self.slots[child];
            self.place(slot, child_index);
            slot = child;
        }
        self.place(slot, index);
    }
}

/// Arena index for the next pushed record.
pub(crate) fn arena_index(len: usize) -> HeapResult<u32> {
    u32::try_from(len).map_err(|_| HeapError::ArenaFull(len))
}
