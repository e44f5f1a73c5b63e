use reqwest::Client;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::HttpError;

/// Builds the client shared by every worker of a run.
///
/// Transport defaults apply: no request timeout, no retries.
///
/// # Errors
///
/// Returns an error when the TLS backend cannot be initialised.
pub fn build_client() -> Result<Client, HttpError> {
    Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|source| HttpError::BuildClientFailed { source })
}
