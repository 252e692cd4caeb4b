//! Client configuration with sensible defaults.
//!
//! [`ClientConfig`] controls where the MulLing service lives and how
//! requests to it behave.

use crate::error::SearchError;

/// Default address of a locally running MulLing service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5050";

/// Configuration for talking to the MulLing service.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the service, without a trailing slash.
    pub base_url: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, the crate name and version are sent.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_seconds: 30,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_url` must be an absolute `http` or `https` URL
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| SearchError::Config(format!("base_url is not a valid URL: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SearchError::Config(
                "base_url must use http or https".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Base URL with any trailing slashes removed.
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
