//! `ds-core`: foundational types for the `daysched` discrete-event scheduler.
//!
//! This crate is a dependency of every other `ds-*` crate.  It intentionally
//! has no `ds-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`time`]        | `Day`, `DayClock`, `SimConfig`                        |
//! | [`population`]  | `Population` tag (`A` / `B`)                          |
//! | [`rng`]         | `SimRng` and the initial-phase draw                   |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod population;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use population::Population;
pub use rng::{PHASE_DRAW_MAX, SimRng};
pub use time::{Day, DayClock, SimConfig};
