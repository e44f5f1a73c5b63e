use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::{
    fs::File,
    io::{AsyncWriteExt, BufWriter},
};

use super::types::Outcome;
use crate::error::SinkError;

/// One line of the NDJSON result log.
#[derive(Debug, Serialize)]
pub(crate) struct OutcomeRecord<'a> {
    timestamp: &'a DateTime<Local>,
    method: &'a str,
    url: &'a str,
    status_code: u16,
    elapsed_ns: u64,
    elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_length: Option<u64>,
}

impl<'a> From<&'a Outcome> for OutcomeRecord<'a> {
    fn from(outcome: &'a Outcome) -> Self {
        Self {
            timestamp: &outcome.timestamp,
            method: &outcome.method,
            url: &outcome.url,
            status_code: outcome.status_code,
            elapsed_ns: u64::try_from(outcome.elapsed.as_nanos()).unwrap_or(u64::MAX),
            elapsed_ms: outcome.elapsed_ms(),
            error_message: outcome.error.as_deref(),
            response_body: outcome.response_body.as_deref(),
            content_length: outcome.content_length,
        }
    }
}

/// Buffered newline-delimited JSON writer for outcomes.
#[derive(Debug)]
pub(crate) struct ResultLog {
    path: PathBuf,
    writer: BufWriter<File>,
    line: Vec<u8>,
}

impl ResultLog {
    pub(crate) async fn create(path: &Path) -> Result<Self, SinkError> {
        let file = File::create(path).await.map_err(|source| SinkError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            line: Vec::with_capacity(512),
        })
    }

    pub(crate) async fn append(&mut self, outcome: &Outcome) -> Result<(), SinkError> {
        self.line.clear();
        serde_json::to_writer(&mut self.line, &OutcomeRecord::from(outcome))
            .map_err(|source| SinkError::Serialize { source })?;
        self.line.push(b'\n');
        self.writer
            .write_all(&self.line)
            .await
            .map_err(|source| SinkError::Write {
                path: self.path.clone(),
                source,
            })
    }

    pub(crate) async fn finish(mut self) -> Result<(), SinkError> {
        self.writer
            .flush()
            .await
            .map_err(|source| SinkError::Write {
                path: self.path.clone(),
                source,
            })
    }
}
