use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::args::{BodyKind, HttpMethod, parse_delay};
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub method: Option<HttpMethod>,
    pub requests: Option<usize>,
    pub concurrency: Option<usize>,
    pub delay: Option<DelayValue>,
    pub query_params: Option<BTreeMap<String, String>>,
    pub headers: Option<BTreeMap<String, String>>,
    pub body_type: Option<BodyKind>,
    pub body: Option<serde_json::Value>,
    pub pre_request_script: Option<String>,
    pub script_file: Option<String>,
    pub output_file: Option<String>,
    pub report_file: Option<String>,
    pub save_response_body: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DelayValue {
    Seconds(u64),
    Text(String),
}

impl DelayValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DelayValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DelayValue::Text(text) => parse_delay(text),
        }
    }
}
