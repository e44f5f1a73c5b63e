use std::time::Duration;

use tracing::warn;

use super::histogram::{LatencyHistogram, Percentiles};
use super::types::{LatencySummary, Outcome, RunStatistics, duration_ms};

impl RunStatistics {
    /// Computes counts and success-only latency figures over `outcomes`.
    #[must_use]
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let total = outcomes.len();
        let mut successes: usize = 0;
        let mut sum = Duration::ZERO;
        let mut min = Duration::MAX;
        let mut max = Duration::ZERO;
        let mut histogram = match LatencyHistogram::new() {
            Ok(histogram) => Some(histogram),
            Err(err) => {
                warn!("Percentiles unavailable: {}", err);
                None
            }
        };

        for outcome in outcomes.iter().filter(|outcome| outcome.is_success()) {
            successes = successes.saturating_add(1);
            sum = sum.saturating_add(outcome.elapsed);
            min = min.min(outcome.elapsed);
            max = max.max(outcome.elapsed);
            if let Some(hist) = histogram.as_mut()
                && let Err(err) = hist.record(outcome.elapsed)
            {
                warn!("Dropping latency sample: {}", err);
            }
        }

        let latency = average(sum, successes).map(|avg| {
            let Percentiles {
                p50_ms,
                p90_ms,
                p99_ms,
            } = histogram
                .as_ref()
                .map(LatencyHistogram::percentiles)
                .unwrap_or_default();
            LatencySummary {
                min,
                max,
                avg,
                sum,
                p50_ms,
                p90_ms,
                p99_ms,
            }
        });

        Self {
            total,
            successes,
            errors: total.saturating_sub(successes),
            latency,
        }
    }
}

fn average(sum: Duration, count: usize) -> Option<Duration> {
    if count == 0 {
        return None;
    }
    let nanos = sum.as_nanos().checked_div(u128::try_from(count).ok()?)?;
    Some(Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX)))
}

impl LatencySummary {
    #[must_use]
    pub fn min_ms(&self) -> u64 {
        duration_ms(self.min)
    }

    #[must_use]
    pub fn max_ms(&self) -> u64 {
        duration_ms(self.max)
    }

    #[must_use]
    pub fn avg_ms(&self) -> u64 {
        duration_ms(self.avg)
    }

    #[must_use]
    pub fn sum_ms(&self) -> u64 {
        duration_ms(self.sum)
    }
}
