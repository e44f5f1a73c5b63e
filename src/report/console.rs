use std::fmt::Write as _;
use std::path::Path;

use crate::metrics::{Outcome, RunStatistics};

/// `Status: <code> Elapsed: <ms>ms[ Error: <msg>]`
#[must_use]
pub fn format_outcome_line(outcome: &Outcome) -> String {
    let mut line = format!(
        "Status: {} Elapsed: {}ms",
        outcome.status_code,
        outcome.elapsed_ms()
    );
    if let Some(error) = outcome.error.as_deref() {
        line.push_str(" Error: ");
        line.push_str(error);
    }
    line
}

pub fn print_outcome_line(outcome: &Outcome) {
    println!("{}", format_outcome_line(outcome));
}

/// Final statistics block shown after the run.
#[must_use]
pub fn format_summary(stats: &RunStatistics, output_path: Option<&Path>) -> String {
    let mut out = String::new();
    if let Err(err) = write_summary(&mut out, stats, output_path) {
        tracing::warn!("Failed to format summary: {}", err);
    }
    out
}

fn write_summary(
    out: &mut String,
    stats: &RunStatistics,
    output_path: Option<&Path>,
) -> std::fmt::Result {
    writeln!(out, "\n=== Request Statistics ===")?;
    writeln!(out, "Total Requests: {}", stats.total)?;
    writeln!(out, "Successful: {}", stats.successes)?;
    writeln!(out, "Errors: {}", stats.errors)?;
    match stats.latency.as_ref() {
        Some(latency) => {
            writeln!(out, "Avg Latency: {}ms", latency.avg_ms())?;
            writeln!(out, "Min Latency: {}ms", latency.min_ms())?;
            writeln!(out, "Max Latency: {}ms", latency.max_ms())?;
            writeln!(out, "Total Latency: {}ms", latency.sum_ms())?;
            writeln!(
                out,
                "P50/P90/P99 Latency: {}ms / {}ms / {}ms",
                latency.p50_ms, latency.p90_ms, latency.p99_ms
            )?;
        }
        None => writeln!(out, "No successful requests.")?,
    }
    if let Some(path) = output_path {
        writeln!(out, "\nResult log: {}", path.display())?;
    }
    Ok(())
}

pub fn print_summary(stats: &RunStatistics, output_path: Option<&Path>) {
    print!("{}", format_summary(stats, output_path));
}
