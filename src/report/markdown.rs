use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::error::SinkError;
use crate::metrics::{Outcome, RunStatistics};

/// Renders the Markdown report: one table row per outcome followed by the
/// summary section.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn render_report(
    outcomes: &[Outcome],
    stats: &RunStatistics,
    generated_at: DateTime<Local>,
) -> Result<String, SinkError> {
    let mut doc = String::with_capacity(256_usize.saturating_add(outcomes.len().saturating_mul(160)));
    write_report_body(&mut doc, outcomes, stats, generated_at)
        .map_err(|source| SinkError::WriteLine { source })?;
    Ok(doc)
}

fn write_report_body(
    doc: &mut String,
    outcomes: &[Outcome],
    stats: &RunStatistics,
    generated_at: DateTime<Local>,
) -> std::fmt::Result {
    writeln!(doc, "# Request Report\n")?;
    writeln!(doc, "Generated at: {}\n", generated_at.format("%Y-%m-%d %H:%M:%S"))?;

    writeln!(
        doc,
        "| # | timestamp | method | URL | status | elapsed(ms) | content length | result |"
    )?;
    writeln!(doc, "|---|---|---|---|---|---|---|---|")?;
    for (index, outcome) in outcomes.iter().enumerate() {
        let status = match outcome.error {
            Some(_) => "-".to_owned(),
            None => outcome.status_code.to_string(),
        };
        let content_length = outcome
            .content_length
            .map_or_else(|| "-".to_owned(), |len| len.to_string());
        let result = match outcome.error.as_deref() {
            Some(error) => format!("ERROR: {}", escape_cell(error)),
            None => "OK".to_owned(),
        };
        writeln!(
            doc,
            "| {} | {} | {} | {} | {} | {} | {} | {} |",
            index.saturating_add(1),
            outcome.timestamp.format("%H:%M:%S%.3f"),
            outcome.method,
            escape_cell(&outcome.url),
            status,
            outcome.elapsed_ms(),
            content_length,
            result
        )?;
    }

    writeln!(doc, "\n## Summary\n")?;
    writeln!(doc, "- **Total Requests**: {}", stats.total)?;
    writeln!(doc, "- **Successful**: {}", stats.successes)?;
    writeln!(doc, "- **Errors**: {}", stats.errors)?;
    match stats.latency.as_ref() {
        Some(latency) => {
            writeln!(doc, "\n### Latency\n")?;
            writeln!(doc, "- **Average**: {}ms", latency.avg_ms())?;
            writeln!(doc, "- **Min**: {}ms", latency.min_ms())?;
            writeln!(doc, "- **Max**: {}ms", latency.max_ms())?;
            writeln!(doc, "- **Total**: {}ms", latency.sum_ms())?;
            writeln!(doc, "- **P50**: {}ms", latency.p50_ms)?;
            writeln!(doc, "- **P90**: {}ms", latency.p90_ms)?;
            writeln!(doc, "- **P99**: {}ms", latency.p99_ms)?;
        }
        None => writeln!(doc, "\nNo successful requests.")?,
    }
    Ok(())
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Writes the report to `path`.
///
/// # Errors
///
/// Returns an error if the report cannot be formatted or written.
pub async fn write_report(
    path: &Path,
    outcomes: &[Outcome],
    stats: &RunStatistics,
) -> Result<(), SinkError> {
    let doc = render_report(outcomes, stats, Local::now())?;
    tokio::fs::write(path, doc)
        .await
        .map_err(|source| SinkError::Write {
            path: path.to_path_buf(),
            source,
        })
}
