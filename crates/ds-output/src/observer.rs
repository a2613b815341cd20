//! `SimOutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use ds_sim::{DaySummary, SimObserver, StepOutcome};

use crate::row::DaySummaryRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes day summaries to any [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sched.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:        W,
    interval_days: u64,
    /// Latest day skipped by the interval, written at run end.
    pending:       Option<DaySummaryRow>,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer that writes every day.
    pub fn new(writer: W) -> Self {
        Self { writer, interval_days: 1, pending: None, last_error: None }
    }

    /// Only write days whose number is a multiple of `days`.  The last
    /// drained day of a run is always written.
    pub fn every(mut self, days: u64) -> Self {
        self.interval_days = days.max(1);
        self
    }

    /// Take the stored write error (if any) after `sched.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_day_end(&mut self, summary: &DaySummary) {
        let row = DaySummaryRow::from(summary);
        if row.day % self.interval_days == 0 {
            self.pending = None;
            let result = self.writer.write_day_summary(&row);
            self.store_err(result);
        } else {
            self.pending = Some(row);
        }
    }

    fn on_sim_end(&mut self, _outcome: StepOutcome) {
        if let Some(row) = self.pending.take() {
            let result = self.writer.write_day_summary(&row);
            self.store_err(result);
        }
        let result = self.writer.finish();
        self.store_err(result);
    }
}
