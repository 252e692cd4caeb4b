//! # mulling-search
//!
//! Query client and result shaping for the MulLing multilingual
//! information-retrieval service.
//!
//! ## Design
//!
//! - Builds `/query_mono` and `/query_multi` URLs from typed form state
//! - Decodes the service's `{"allresults": [...]}` payload of tab-delimited rows
//! - Shapes rows into a flat ranked list and a cluster-grouped list, with
//!   related-article cross references per record
//! - Tracks request tickets so a stale response never replaces a newer one
//! - Wraps the tokenizer, word mover's distance and fastText endpoints
//!
//! Shaping is pure and synchronous; only the client touches the network.
//! Query text is logged only at trace level.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod panel;
pub mod query;
pub mod sandbox;
pub mod shaper;
pub mod types;

pub use api::MullingApi;
pub use client::MullingClient;
pub use config::ClientConfig;
pub use error::{Result, SearchError};
pub use panel::{Applied, PanelError, PanelState, RequestSequencer, RequestTicket, ResultsPanel};
pub use query::{QueryMode, QueryRequest};
pub use shaper::{shape, shape_lenient, ShapedResults};
pub use types::{ClusterLabel, Language, Model, RawResultRow, RelatedTitles, ResultRecord};

/// Run a search and shape the response.
///
/// Malformed rows are skipped (and logged at warn level) rather than failing
/// the whole response.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an invalid configuration or request,
/// and whatever [`MullingApi::query`] returns for transport failures.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> mulling_search::Result<()> {
/// let config = mulling_search::ClientConfig::default();
/// let request = mulling_search::QueryRequest::new("flood relief");
/// let results = mulling_search::search(&request, &config, true).await?;
/// for group in &results.clusters {
///     println!("{} {} results", group.heading(), group.len());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(
    request: &QueryRequest,
    config: &ClientConfig,
    clustering_enabled: bool,
) -> Result<ShapedResults> {
    request.validate()?;
    let client = MullingClient::new(config)?;
    let rows = client.query(request).await?;
    Ok(shape_lenient(&rows, clustering_enabled).results)
}
