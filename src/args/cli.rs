use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_delay, parse_header, parse_positive_usize, parse_query};
use super::types::{BodyKind, HttpMethod, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Configurable HTTP load probe - fixed request counts, templated requests, streamed result logs and Markdown reports."
)]
pub struct ProbeArgs {
    /// Path to a config file (.toml or .json)
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Target URL; may contain {{name}} placeholders
    #[arg(long, short)]
    pub url: Option<String>,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// Total number of requests to send
    #[arg(long, short = 'n', default_value = "1", value_parser = parse_positive_usize)]
    pub requests: PositiveUsize,

    /// Number of concurrent workers
    #[arg(long, short = 'C', default_value = "1", value_parser = parse_positive_usize)]
    pub concurrency: PositiveUsize,

    /// Delay each worker waits after every request (seconds, or with ms/s/m suffix)
    #[arg(long, short = 'd', default_value = "0", value_parser = parse_delay)]
    pub delay: Duration,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Query parameters in 'key=value' format (repeatable)
    #[arg(long = "query", short = 'q', value_parser = parse_query)]
    pub query_params: Vec<(String, String)>,

    /// Request body; parsed as JSON for json/form body types
    #[arg(long)]
    pub body: Option<String>,

    /// Body encoding (json, form, xml, raw)
    #[arg(long = "body-type", default_value = "raw")]
    pub body_type: BodyKind,

    /// File holding the pre-request script
    #[arg(long = "script-file")]
    pub script_file: Option<String>,

    /// Stream every result as one JSON line to this file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Write a Markdown report to this file
    #[arg(long, short = 'r')]
    pub report: Option<String>,

    /// Keep response bodies in the result log
    #[arg(long = "save-response-body")]
    pub save_response_body: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    #[arg(skip)]
    pub body_value: Option<serde_json::Value>,

    #[arg(skip)]
    pub pre_request_script: Option<String>,
}
