//! The `OutputWriter` trait implemented by backend writers.

use crate::{DaySummaryRow, OutputResult};

/// Trait implemented by output backends.
///
/// Errors are surfaced to the caller here; [`SimOutputObserver`] stores them
/// and hands them back through [`take_error`].
///
/// [`SimOutputObserver`]: crate::SimOutputObserver
/// [`take_error`]: crate::SimOutputObserver::take_error
pub trait OutputWriter {
    /// Write one day summary row.
    fn write_day_summary(&mut self, row: &DaySummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
