use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::args::{BodyKind, HttpMethod, PositiveUsize, ProbeArgs};
use crate::error::ValidationError;

/// Request body as configured: the encoding to use and the raw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub kind: BodyKind,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    Inline(String),
    File(PathBuf),
}

/// Validated, immutable parameters for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: String,
    pub method: HttpMethod,
    pub requests: PositiveUsize,
    pub concurrency: PositiveUsize,
    pub delay: Duration,
    pub query_params: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub body: Option<BodySpec>,
    pub pre_request_script: Option<ScriptSource>,
    pub output_file: Option<PathBuf>,
    pub report_file: Option<PathBuf>,
    pub save_response_body: bool,
}

impl RunConfig {
    /// Builds the run parameters from merged CLI/config arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the target URL is missing or blank.
    pub fn from_args(args: ProbeArgs) -> Result<Self, ValidationError> {
        let url = match args.url {
            Some(url) if !url.trim().is_empty() => url,
            Some(_) | None => return Err(ValidationError::MissingUrl),
        };

        let payload = match (args.body_value, args.body) {
            (Some(value), _) => Some(value),
            (None, Some(text)) => Some(parse_cli_body(&args.body_type, text)),
            (None, None) => None,
        };
        let body = payload.map(|payload| BodySpec {
            kind: args.body_type,
            payload,
        });

        let pre_request_script = match (args.script_file, args.pre_request_script) {
            (Some(path), _) => Some(ScriptSource::File(PathBuf::from(path))),
            (None, Some(source)) if !source.trim().is_empty() => {
                Some(ScriptSource::Inline(source))
            }
            (None, Some(_) | None) => None,
        };

        Ok(Self {
            url,
            method: args.method,
            requests: args.requests,
            concurrency: args.concurrency,
            delay: args.delay,
            query_params: args.query_params.into_iter().collect(),
            headers: args.headers.into_iter().collect(),
            body,
            pre_request_script,
            output_file: args.output.map(PathBuf::from),
            report_file: args.report.map(PathBuf::from),
            save_response_body: args.save_response_body,
        })
    }
}

fn parse_cli_body(kind: &BodyKind, text: String) -> serde_json::Value {
    match kind {
        BodyKind::Json | BodyKind::Form => serde_json::from_str(&text)
            .unwrap_or(serde_json::Value::String(text)),
        BodyKind::Xml | BodyKind::Raw | BodyKind::Other(_) => serde_json::Value::String(text),
    }
}
