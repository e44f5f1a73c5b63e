use std::path::PathBuf;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, error, warn};

use super::logging::ResultLog;
use super::types::Outcome;
use crate::report::print_outcome_line;

/// Options for the aggregator task.
#[derive(Debug, Clone, Default)]
pub struct AggregatorConfig {
    /// NDJSON result log; `None` disables persistence.
    pub output_path: Option<PathBuf>,
    /// Print one console line per received outcome.
    pub echo: bool,
}

/// Spawns the single consumer of the result channel.
///
/// The task owns the outcome log and resolves to it, in arrival order, once
/// every sender has been dropped and the result log is flushed.
#[must_use]
pub fn spawn_aggregator(
    mut result_rx: mpsc::Receiver<Outcome>,
    config: AggregatorConfig,
) -> JoinHandle<Vec<Outcome>> {
    tokio::spawn(async move {
        let mut sink = match config.output_path.as_deref() {
            Some(path) => match ResultLog::create(path).await {
                Ok(log) => Some(log),
                Err(err) => {
                    error!("Result log disabled: {}", err);
                    None
                }
            },
            None => None,
        };

        let mut outcomes = Vec::new();
        while let Some(outcome) = result_rx.recv().await {
            if config.echo {
                print_outcome_line(&outcome);
            }
            let write_error = match sink.as_mut() {
                Some(log) => log.append(&outcome).await.err(),
                None => None,
            };
            if let Some(err) = write_error {
                error!("Result log disabled after write failure: {}", err);
                sink = None;
            }
            outcomes.push(outcome);
        }

        if let Some(log) = sink
            && let Err(err) = log.finish().await
        {
            warn!("Failed to flush result log: {}", err);
        }
        debug!("Aggregator drained {} outcome(s)", outcomes.len());
        outcomes
    })
}
