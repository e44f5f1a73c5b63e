use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveUsize, ProbeArgs};
use crate::error::ConfigError;

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Values given explicitly on the command line win; everything else is taken
/// from the file when present.
///
/// # Errors
///
/// Returns an error when a config value is out of range.
pub fn apply_config(
    args: &mut ProbeArgs,
    matches: &ArgMatches,
    config: ConfigFile,
) -> Result<(), ConfigError> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method
    {
        args.method = method;
    }

    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = ensure_positive_usize(requests, "requests")?;
    }

    if !is_cli(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = ensure_positive_usize(concurrency, "concurrency")?;
    }

    if !is_cli(matches, "delay")
        && let Some(delay) = config.delay.as_ref()
    {
        args.delay = delay
            .to_duration()
            .map_err(|err| ConfigError::InvalidField {
                field: "delay",
                source: err,
            })?;
    }

    if !is_cli(matches, "query_params")
        && let Some(query_params) = config.query_params
    {
        args.query_params = query_params.into_iter().collect();
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers
    {
        args.headers = headers.into_iter().collect();
    }

    if !is_cli(matches, "body_type")
        && let Some(body_type) = config.body_type
    {
        args.body_type = body_type;
    }

    if !is_cli(matches, "body")
        && let Some(body) = config.body
    {
        args.body = None;
        args.body_value = Some(body);
    }

    if !is_cli(matches, "script_file") {
        if let Some(script_file) = config.script_file {
            args.script_file = Some(script_file);
        }
        args.pre_request_script = config.pre_request_script;
    }

    if !is_cli(matches, "output")
        && let Some(output) = config.output_file
    {
        args.output = Some(output);
    }

    if !is_cli(matches, "report")
        && let Some(report) = config.report_file
    {
        args.report = Some(report);
    }

    if !is_cli(matches, "save_response_body")
        && let Some(save) = config.save_response_body
    {
        args.save_response_body = save;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_usize(value: usize, field: &'static str) -> Result<PositiveUsize, ConfigError> {
    PositiveUsize::try_from(value).map_err(|err| ConfigError::InvalidField { field, source: err })
}
