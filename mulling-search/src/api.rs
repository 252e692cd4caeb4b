//! Trait definition for the MulLing service surface.
//!
//! [`MullingApi`] is the seam between form/panel logic and the transport.
//! [`crate::client::MullingClient`] implements it over HTTP; tests plug in
//! canned backends.

use std::path::Path;

use crate::error::SearchError;
use crate::query::QueryRequest;
use crate::sandbox::WmdResponse;
use crate::types::{Language, RawResultRow};

/// The four endpoints the dashboard consumes.
///
/// All implementations must be `Send + Sync` so a single backend can serve
/// overlapping requests.
pub trait MullingApi: Send + Sync {
    /// Run a search and return the raw tab-delimited rows.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Transport`] for failure statuses (500 meaning the
    /// query could not be parsed), [`SearchError::Http`] for network failures
    /// and [`SearchError::Parse`] for undecodable bodies.
    fn query(
        &self,
        request: &QueryRequest,
    ) -> impl std::future::Future<Output = Result<Vec<RawResultRow>, SearchError>> + Send;

    /// Tokenize a document the way the service indexes it.
    fn tokenize(
        &self,
        doc: &str,
        lang: Language,
        include_stopwords: bool,
    ) -> impl std::future::Future<Output = Result<Vec<String>, SearchError>> + Send;

    /// Word mover's distance between two documents.
    fn wmd(
        &self,
        doc1: &str,
        doc2: &str,
        lang1: Language,
        lang2: Language,
    ) -> impl std::future::Future<Output = Result<WmdResponse, SearchError>> + Send;

    /// Download the fastText vector file for a language into `dest`,
    /// returning the number of bytes written.
    fn fasttext(
        &self,
        lang: &str,
        dest: &Path,
    ) -> impl std::future::Future<Output = Result<u64, SearchError>> + Send;
}
