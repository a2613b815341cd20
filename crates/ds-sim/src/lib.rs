//! `ds-sim`: day loop orchestrator for the daysched scheduler.
//!
//! # Drain / advance loop
//!
//! ```text
//! step():
//!   while min_wake(A) == day || min_wake(B) == day:
//!     ① A ready? extract → EntityModel::act_a → resolve outcome
//!     ② B ready? extract → EntityModel::act_b → resolve outcome
//!   day += 1
//!
//! resolve outcome:
//!   deletions → other.delete(handle) + release     (consumed)
//!   Alive     → rearm(day + period) + insert       (survivor)
//!   Dead      → release                            (died)
//!   births    → initial phase + insert
//! ```
//!
//! The run ends as `Extinct` the moment the survivor population's heap is
//! empty, or as `HorizonReached` once the clock reaches the horizon.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ds_core::SimConfig;
//! use ds_sim::{NoopObserver, SchedulerBuilder};
//!
//! let mut sched = SchedulerBuilder::new(SimConfig::new(42), model).build()?;
//! for payload in cohort {
//!     sched.seed_a(payload, 10)?;
//! }
//! let outcome = sched.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod model;
pub mod observer;
pub mod scheduler;


pub use builder::SchedulerBuilder;
pub use context::{ActionContext, PopulationView};
pub use error::{SimError, SimResult};
pub use model::{EntityModel, Fate, Outcome};
pub use observer::{DaySummary, NoopObserver, Removal, SimObserver};
pub use scheduler::{Scheduler, StepOutcome};
