use std::error::Error as _;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use futures_util::StreamExt;
use reqwest::{
    Client, Response, Url,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use tokio::time::Instant;
use tracing::warn;

use super::body::{EncodedBody, encode_body};
use super::template::{render_map, render_template};
use crate::config::RunConfig;
use crate::dispatch::RequestRunner;
use crate::error::HttpError;
use crate::metrics::Outcome;
use crate::script::{VariableSnapshot, VariableStore};

/// Turns the run configuration into one HTTP call per invocation.
///
/// Only reads shared state, so a single executor is shared by all workers.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: Client,
    config: Arc<RunConfig>,
    vars: VariableSnapshot,
}

impl RequestExecutor {
    #[must_use]
    pub const fn new(client: Client, config: Arc<RunConfig>, vars: VariableSnapshot) -> Self {
        Self {
            client,
            config,
            vars,
        }
    }

    /// Executes one request and records what happened.
    ///
    /// Never fails: URL, body, header and transport problems are captured in
    /// the returned [`Outcome`].
    pub async fn execute(&self) -> Outcome {
        execute(&self.client, &self.config, &self.vars).await
    }
}

#[async_trait]
impl RequestRunner for RequestExecutor {
    async fn run(&self, _token: usize) -> Outcome {
        self.execute().await
    }
}

async fn execute(client: &Client, config: &RunConfig, vars: &VariableStore) -> Outcome {
    let timestamp = Local::now();
    let method = config.method.as_str();
    let rendered_url = render_template(&config.url, vars);

    let url = match resolve_url(&rendered_url, config, vars) {
        Ok(url) => url,
        Err(err) => return failed(timestamp, method, rendered_url, err.to_string()),
    };
    let resolved_url = url.to_string();

    let body = match config.body.as_ref().map(encode_body).transpose() {
        Ok(body) => body,
        Err(err) => {
            return failed(
                timestamp,
                method,
                resolved_url,
                format!("failed to prepare body: {}", err),
            );
        }
    };

    let headers = match build_headers(config, vars, body.as_ref()) {
        Ok(headers) => headers,
        Err(err) => return failed(timestamp, method, resolved_url, err.to_string()),
    };

    let mut builder = client
        .request(config.method.to_reqwest(), url)
        .headers(headers);
    if let Some(body) = body {
        builder = builder.body(body.bytes);
    }
    let request = match builder.build() {
        Ok(request) => request,
        Err(err) => {
            return failed(
                timestamp,
                method,
                resolved_url,
                format!("failed to create request: {}", error_chain(&err)),
            );
        }
    };

    let start = Instant::now();
    let result = client.execute(request).await;
    let elapsed = start.elapsed();

    match result {
        Ok(response) => {
            let status_code = response.status().as_u16();
            let (content_length, response_body) =
                match drain_response_body(response, config.save_response_body).await {
                    Ok((bytes, body)) => (
                        Some(bytes),
                        body.map(|raw| String::from_utf8_lossy(&raw).into_owned()),
                    ),
                    Err(err) => {
                        warn!("Failed to read response body: {}", error_chain(&err));
                        (None, None)
                    }
                };
            Outcome {
                timestamp,
                method: method.to_owned(),
                url: resolved_url,
                status_code,
                elapsed,
                error: None,
                response_body,
                content_length,
            }
        }
        Err(err) => Outcome {
            elapsed,
            ..failed(timestamp, method, resolved_url, error_chain(&err))
        },
    }
}

fn failed(
    timestamp: chrono::DateTime<Local>,
    method: &str,
    url: String,
    error: String,
) -> Outcome {
    Outcome {
        timestamp,
        ..Outcome::failed(method, url, std::time::Duration::ZERO, error)
    }
}

/// Parses the rendered URL and merges the configured query parameters.
///
/// Configured keys replace every existing value of the same key; pairs are
/// re-serialised sorted by key.
fn resolve_url(rendered: &str, config: &RunConfig, vars: &VariableStore) -> Result<Url, HttpError> {
    let mut url = Url::parse(rendered).map_err(|source| HttpError::InvalidUrl {
        url: rendered.to_owned(),
        source,
    })?;
    if config.query_params.is_empty() {
        return Ok(url);
    }

    let overrides = render_map(&config.query_params, vars);
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !overrides.contains_key(&**key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    pairs.extend(overrides);
    pairs.sort_by(|left, right| left.0.cmp(&right.0));

    url.query_pairs_mut().clear().extend_pairs(pairs);
    Ok(url)
}

fn build_headers(
    config: &RunConfig,
    vars: &VariableStore,
    body: Option<&EncodedBody>,
) -> Result<HeaderMap, HttpError> {
    let mut headers = HeaderMap::new();
    for (name, value) in render_map(&config.headers, vars) {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|source| {
                HttpError::InvalidHeaderName {
                    name: name.clone(),
                    source,
                }
            })?;
        let header_value = HeaderValue::from_str(&value)
            .map_err(|source| HttpError::InvalidHeaderValue { name, source })?;
        headers.insert(header_name, header_value);
    }
    if let Some(body) = body
        && !headers.contains_key(CONTENT_TYPE)
    {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(body.content_type));
    }
    Ok(headers)
}

/// Reads the body to the end so the connection can be reused, counting bytes
/// and optionally keeping them.
async fn drain_response_body(
    response: Response,
    keep: bool,
) -> Result<(u64, Option<Vec<u8>>), reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    let mut kept = keep.then(Vec::new);
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
        if let Some(buffer) = kept.as_mut() {
            buffer.extend_from_slice(&bytes);
        }
    }
    Ok((total_bytes, kept))
}

fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
