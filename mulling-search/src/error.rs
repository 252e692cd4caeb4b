//! Error types for the mulling-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Query text never appears in error messages.

/// Errors that can occur while querying the MulLing service or shaping
/// its responses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A raw result row did not split into 5 or 6 tab-delimited fields,
    /// or one of its numeric fields could not be parsed.
    #[error("malformed result row {index}: {reason}")]
    MalformedRow {
        /// 0-based position of the row in the response.
        index: usize,
        /// The offending row exactly as received.
        row: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The service answered with a non-success HTTP status.
    #[error("service returned HTTP {status}")]
    Transport {
        /// The HTTP status code.
        status: u16,
    },

    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// A downloaded file could not be written.
    #[error("I/O error: {0}")]
    Io(String),

    /// Invalid client configuration or query request.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Returns `true` when the service reported it could not parse the query
    /// (HTTP 500).
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Transport { status: 500 })
    }
}

/// Convenience type alias for mulling-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
