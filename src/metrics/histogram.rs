use std::time::Duration;

use hdrhistogram::Histogram;
use hdrhistogram::errors::{CreationError, RecordError};

use super::types::duration_ms;

/// Latency percentiles in whole milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Percentiles {
    pub p50_ms: u64,
    pub p90_ms: u64,
    pub p99_ms: u64,
}

/// Tracks successful-request latencies at millisecond resolution.
/// Sub-millisecond samples count as 1ms.
#[derive(Debug)]
pub struct LatencyHistogram {
    samples: Histogram<u64>,
}

impl LatencyHistogram {
    /// # Errors
    ///
    /// Returns the histogram's [`CreationError`] if it cannot be allocated.
    pub fn new() -> Result<Self, CreationError> {
        Histogram::new(3).map(|samples| Self { samples })
    }

    /// # Errors
    ///
    /// Returns a [`RecordError`] when the sample is outside the trackable range.
    pub fn record(&mut self, elapsed: Duration) -> Result<(), RecordError> {
        self.samples.record(duration_ms(elapsed).max(1))
    }

    /// All zero when nothing was recorded.
    #[must_use]
    pub fn percentiles(&self) -> Percentiles {
        if self.samples.len() == 0 {
            return Percentiles::default();
        }
        Percentiles {
            p50_ms: self.samples.value_at_quantile(0.5),
            p90_ms: self.samples.value_at_quantile(0.9),
            p99_ms: self.samples.value_at_quantile(0.99),
        }
    }

    #[must_use]
    pub fn samples(&self) -> u64 {
        self.samples.len()
    }
}
