use ds_core::{CoreError, Population};
use ds_heap::HeapError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("heap contract violation: {0}")]
    Heap(#[from] HeapError),

    /// An action asked to delete an item that is not queued in the target
    /// population (stale, already consumed today, or never inserted).
    #[error("deletion requested in population {population} failed: {source}")]
    Deletion {
        population: Population,
        #[source]
        source:     HeapError,
    },
}

pub type SimResult<T> = Result<T, SimError>;
