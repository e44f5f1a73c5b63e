use std::time::Duration;

use chrono::{DateTime, Local};

/// Recorded result of one HTTP attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub timestamp: DateTime<Local>,
    pub method: String,
    pub url: String,
    /// `0` when no response was received.
    pub status_code: u16,
    pub elapsed: Duration,
    pub error: Option<String>,
    pub response_body: Option<String>,
    pub content_length: Option<u64>,
}

impl Outcome {
    /// Outcome for a request that failed before or during the call.
    #[must_use]
    pub fn failed(
        method: impl Into<String>,
        url: impl Into<String>,
        elapsed: Duration,
        error: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Local::now(),
            method: method.into(),
            url: url.into(),
            status_code: 0,
            elapsed,
            error: Some(error.into()),
            response_body: None,
            content_length: None,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        duration_ms(self.elapsed)
    }
}

/// Statistics derived once from the complete outcome log.
///
/// Latency figures only cover successful outcomes and are `None` when there
/// were none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStatistics {
    pub total: usize,
    pub successes: usize,
    pub errors: usize,
    pub latency: Option<LatencySummary>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencySummary {
    pub min: Duration,
    pub max: Duration,
    pub avg: Duration,
    pub sum: Duration,
    pub p50_ms: u64,
    pub p90_ms: u64,
    pub p99_ms: u64,
}

pub(crate) fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
