//! Shared HTTP client and response checks for MulLing requests.
//!
//! Provides a configured [`reqwest::Client`] and the status/body handling
//! every endpoint shares: HTTP 500 means the service could not parse the
//! query, any other failure status is surfaced as-is, and bodies are decoded
//! with `serde_json` so decode failures map to [`SearchError::Parse`].
//! Large downloads are streamed to disk with a per-chunk idle timeout.

use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;

use crate::config::ClientConfig;
use crate::error::SearchError;

/// User-Agent sent when the config does not override it.
const DEFAULT_USER_AGENT: &str = concat!("mulling-search/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured for the MulLing service.
///
/// The client has:
/// - Timeout from config
/// - Custom User-Agent if configured, otherwise `mulling-search/<version>`
/// - gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &ClientConfig) -> Result<reqwest::Client, SearchError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Map a non-success status to [`SearchError::Transport`].
pub fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SearchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        tracing::warn!(status = status.as_u16(), url = %response.url().path(), "service returned failure status");
        Err(SearchError::Transport {
            status: status.as_u16(),
        })
    }
}

/// Read a response body and decode it as JSON.
pub async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, SearchError> {
    let body = response
        .bytes()
        .await
        .map_err(|e| SearchError::Http(format!("response read failed: {e}")))?;
    tracing::trace!(bytes = body.len(), "response received");
    serde_json::from_slice(&body).map_err(|e| SearchError::Parse(format!("invalid JSON body: {e}")))
}

/// Stream a response body into `dest` chunk by chunk.
///
/// `idle` bounds the wait for each chunk, not the whole transfer, so a
/// large body that keeps arriving is never cut off. A partially written
/// file is removed on failure.
///
/// Returns the number of bytes written.
pub async fn download_to_file(
    response: reqwest::Response,
    dest: &Path,
    idle: Duration,
) -> Result<u64, SearchError> {
    match stream_body(response, dest, idle).await {
        Ok(written) => {
            tracing::debug!(bytes = written, path = %dest.display(), "download complete");
            Ok(written)
        }
        Err(e) => {
            if let Err(remove_err) = tokio::fs::remove_file(dest).await {
                tracing::debug!(error = %remove_err, "could not remove partial download");
            }
            Err(e)
        }
    }
}

async fn stream_body(
    mut response: reqwest::Response,
    dest: &Path,
    idle: Duration,
) -> Result<u64, SearchError> {
    let mut file = tokio::fs::File::create(dest)
        .await
        .map_err(|e| SearchError::Io(format!("cannot create {}: {e}", dest.display())))?;
    let mut written: u64 = 0;

    loop {
        let chunk = tokio::time::timeout(idle, response.chunk())
            .await
            .map_err(|_| stalled(idle))?
            .map_err(|e| SearchError::Http(format!("response read failed: {e}")))?;
        let Some(chunk) = chunk else { break };
        file.write_all(&chunk)
            .await
            .map_err(|e| SearchError::Io(format!("write to {} failed: {e}", dest.display())))?;
        written += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| SearchError::Io(format!("write to {} failed: {e}", dest.display())))?;
    Ok(written)
}

/// Error for a transfer that produced no data within `idle`.
pub fn stalled(idle: Duration) -> SearchError {
    SearchError::Http(format!("no data received for {}s", idle.as_secs()))
}
