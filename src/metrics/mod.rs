//! Outcome collection, result log persistence, and run statistics.
mod collector;
mod histogram;
mod logging;
mod stats;
mod types;


pub use collector::{AggregatorConfig, spawn_aggregator};
pub use histogram::{LatencyHistogram, Percentiles};
pub use types::{LatencySummary, Outcome, RunStatistics};
