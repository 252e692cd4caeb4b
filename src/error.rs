//! Error types for the mulling dashboard.

use mulling_search::SearchError;

/// Top-level error type for the dashboard client.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Configuration file could not be parsed or holds invalid values.
    #[error("config error: {0}")]
    Config(String),

    /// Query, transport or shaping failure from the search client.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_errors_display_transparently() {
        let err: DashboardError = SearchError::Transport { status: 500 }.into();
        assert_eq!(err.to_string(), "service returned HTTP 500");
    }

    #[test]
    fn io_errors_convert() {
        let err: DashboardError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(err.to_string().starts_with("I/O error"));
    }
}
