use thiserror::Error;

use crate::{Handle, HeapId};

/// Contract violations reported by [`IndexedHeap`][crate::IndexedHeap].
///
/// None of these are transient: each one means the caller issued a request
/// that does not match the heap's membership records.  An empty heap is not
/// an error; peek and extract return `None` instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    #[error("{0} is already queued")]
    DuplicateMembership(Handle),

    #[error("{handle} is not a member of heap {heap}")]
    NotMember { handle: Handle, heap: HeapId },

    #[error("{0} does not refer to a live item of this heap")]
    StaleHandle(Handle),

    #[error("{0} is still queued; delete or extract it first")]
    Queued(Handle),

    #[error("re-arm period must be positive")]
    ZeroPeriod,

    #[error("arena already holds {0} records; handles index with u32")]
    ArenaFull(usize),
}

pub type HeapResult<T> = Result<T, HeapError>;
