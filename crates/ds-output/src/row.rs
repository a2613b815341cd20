//! Plain data row types written by output backends.

use ds_core::Population;
use ds_sim::DaySummary;

/// One drained day, flattened to per-population columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySummaryRow {
    pub day:          u64,
    pub dispatched_a: u64,
    pub dispatched_b: u64,
    pub births_a:     u64,
    pub births_b:     u64,
    pub deaths_a:     u64,
    pub deaths_b:     u64,
    /// Items of each population deleted by the other population's actions.
    pub consumed_a:   u64,
    pub consumed_b:   u64,
    pub live_a:       u64,
    pub live_b:       u64,
}

impl DaySummaryRow {
    pub const HEADER: [&'static str; 11] = [
        "day",
        "dispatched_a",
        "dispatched_b",
        "births_a",
        "births_b",
        "deaths_a",
        "deaths_b",
        "consumed_a",
        "consumed_b",
        "live_a",
        "live_b",
    ];

    pub fn to_record(&self) -> [String; 11] {
        [
            self.day,
            self.dispatched_a,
            self.dispatched_b,
            self.births_a,
            self.births_b,
            self.deaths_a,
            self.deaths_b,
            self.consumed_a,
            self.consumed_b,
            self.live_a,
            self.live_b,
        ]
        .map(|v| v.to_string())
    }
}

impl From<&DaySummary> for DaySummaryRow {
    fn from(s: &DaySummary) -> Self {
        let (a, b) = (Population::A.index(), Population::B.index());
        Self {
            day:          s.day.0,
            dispatched_a: s.dispatched[a],
            dispatched_b: s.dispatched[b],
            births_a:     s.births[a],
            births_b:     s.births[b],
            deaths_a:     s.deaths[a],
            deaths_b:     s.deaths[b],
            consumed_a:   s.consumed[a],
            consumed_b:   s.consumed[b],
            live_a:       s.live[a] as u64,
            live_b:       s.live[b] as u64,
        }
    }
}
