//! Run orchestration.
mod runner;

pub use runner::{RunOutcome, run_probe};
