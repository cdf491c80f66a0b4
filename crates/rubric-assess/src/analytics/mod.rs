//! Comparative statistics and trend series for assessment dashboards.
//!
//! There is no population of peer scores or stored history behind this crate, so the
//! shipped sources are synthetic placeholders. Hosts with a real analytics store
//! implement [`BenchmarkSource`] / [`HistorySource`] and swap them in.

mod benchmark;
mod history;

pub use benchmark::{percentile_bucket, BenchmarkResult, BenchmarkStatus, SyntheticBenchmarks};
pub use history::{HistoryPoint, SyntheticHistory, MAX_HISTORY_DAYS};

use chrono::NaiveDate;

/// Comparison of a worksheet score against a peer population.
///
/// Callers pass scores already on the 0-100 scale; [`crate::AssessmentService`]
/// rejects anything larger before a source sees it.
pub trait BenchmarkSource: Send + Sync {
    fn estimate(&self, subcomponent_id: &str, score: u32) -> BenchmarkResult;
}

/// Daily score series ending at `today`.
pub trait HistorySource: Send + Sync {
    fn history(&self, subcomponent_id: &str, days: u32, today: NaiveDate) -> Vec<HistoryPoint>;
}
