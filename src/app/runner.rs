use std::sync::Arc;

use tracing::{error, info};

use crate::{
    config::RunConfig,
    dispatch::Dispatcher,
    error::AppResult,
    http::{RequestExecutor, build_client},
    metrics::{AggregatorConfig, Outcome, RunStatistics},
    report::{print_summary, write_report},
    script::ScriptBridge,
};

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub outcomes: Vec<Outcome>,
    pub stats: RunStatistics,
}

/// Runs the pre-request script, dispatches every request, then prints the
/// summary and writes the optional report.
///
/// # Errors
///
/// Returns an error only when the HTTP client cannot be built. Request,
/// script and file failures are logged and reflected in the outcome.
pub async fn run_probe(config: RunConfig) -> AppResult<RunOutcome> {
    let config = Arc::new(config);
    let vars = ScriptBridge::new().run_once(config.pre_request_script.as_ref());

    let client = build_client()?;
    let executor = Arc::new(RequestExecutor::new(client, Arc::clone(&config), vars));

    info!(
        "Sending {} {} request(s) to {} with {} worker(s)",
        config.requests.get(),
        config.method.as_str(),
        config.url,
        config.concurrency.get()
    );
    let mut dispatcher = Dispatcher::new(
        config.requests.get(),
        config.concurrency.get(),
        config.delay,
    );
    let outcomes = dispatcher
        .run(
            executor,
            AggregatorConfig {
                output_path: config.output_file.clone(),
                echo: true,
            },
        )
        .await;

    let stats = RunStatistics::from_outcomes(&outcomes);
    print_summary(&stats, config.output_file.as_deref());

    if let Some(path) = config.report_file.as_deref() {
        match write_report(path, &outcomes, &stats).await {
            Ok(()) => println!("Report file: {}", path.display()),
            Err(err) => error!("Failed to write report: {}", err),
        }
    }

    Ok(RunOutcome { outcomes, stats })
}
