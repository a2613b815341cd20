//! CSV output backend.
//!
//! Creates `day_summaries.csv` in the configured output directory.

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{DaySummaryRow, OutputResult};

/// File name of the per-day table.
pub const DAY_SUMMARIES_FILE: &str = "day_summaries.csv";

/// Writes per-day summaries to a CSV file.
pub struct CsvWriter {
    summaries: Writer<File>,
    rows:      u64,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the CSV file in it, and write the header.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        let mut summaries = Writer::from_path(dir.join(DAY_SUMMARIES_FILE))?;
        summaries.write_record(DaySummaryRow::HEADER)?;

        Ok(Self { summaries, rows: 0, finished: false })
    }

    /// Data rows written so far (header excluded).
    pub fn rows_written(&self) -> u64 {
        self.rows
    }
}

impl OutputWriter for CsvWriter {
    fn write_day_summary(&mut self, row: &DaySummaryRow) -> OutputResult<()> {
        self.summaries.write_record(row.to_record())?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        Ok(())
    }
}
