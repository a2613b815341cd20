//! `ds-heap`: indexed min-heap with stable handles.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`handle`]   | `HeapId`, `Handle` (generation-tagged arena index)         |
//! | [`heap`]     | `IndexedHeap<T>`: insert, peek, extract-min, delete       |
//! | [`error`]    | `HeapError`, `HeapResult<T>`                               |
//!
//! # Storage model (summary)
//!
//! ```text
//! entries: [ rec0 | rec1 | rec2 | rec3 | … ]   arena, one record per item life
//!             ▲       ▲             ▲
//! slots:   [ - | 2 | 0 | 3 | … ]               1-indexed heap array of arena indices
//!                 k=1 k=2 k=3
//! ```
//!
//! Every record stores the heap slot it currently occupies (`0` = not
//! queued), and every slot stores the arena index of its record.  Both sides
//! are updated on every move, so an item can be found and removed from the
//! middle of the heap in O(log n) given only its [`Handle`].

pub mod error;
pub mod handle;
pub mod heap;

#[cfg(test)]
mod tests;

pub use error::{HeapError, HeapResult};
pub use handle::{Handle, HeapId};
pub use heap::IndexedHeap;
