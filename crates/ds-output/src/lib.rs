//! `ds-output`: simulation output writers for the daysched scheduler.
//!
//! | Backend | Files created        |
//! |---------|----------------------|
//! | CSV     | `day_summaries.csv`  |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `ds_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ds_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sched.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::DaySummaryRow;
pub use writer::OutputWriter;
