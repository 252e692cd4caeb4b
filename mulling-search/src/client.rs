//! HTTP implementation of [`MullingApi`].

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::api::MullingApi;
use crate::config::ClientConfig;
use crate::error::SearchError;
use crate::http;
use crate::query::{self, QueryRequest};
use crate::sandbox::{TokenizeResponse, WmdResponse};
use crate::types::{Language, RawResultRow};

/// Upper bound on a whole fastText download.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(6 * 60 * 60);

/// Body of a successful `/query_mono` or `/query_multi` response.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    allresults: Vec<RawResultRow>,
}

/// MulLing service client.
///
/// Holds one pooled [`reqwest::Client`]; cloning is cheap.
#[derive(Debug, Clone)]
pub struct MullingClient {
    client: reqwest::Client,
    base_url: String,
    idle_timeout: Duration,
}

impl MullingClient {
    /// Create a client after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for an invalid configuration or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            client: http::build_client(config)?,
            base_url: config.trimmed_base_url().to_owned(),
            idle_timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    /// The service base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, url: url::Url) -> Result<reqwest::Response, SearchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("request failed: {e}")))?;
        http::check_status(response)
    }
}

impl MullingApi for MullingClient {
    async fn query(&self, request: &QueryRequest) -> Result<Vec<RawResultRow>, SearchError> {
        let url = request.to_url(&self.base_url)?;
        tracing::trace!(query = %request.query, "MulLing query");
        tracing::debug!(
            endpoint = request.mode.endpoint(),
            model = %request.model,
            lang = %request.lang,
            k = request.k,
            "sending query"
        );

        let response = self.get(url).await?;
        let body: QueryResponse = http::read_json(response).await?;

        tracing::debug!(rows = body.allresults.len(), "query rows received");
        Ok(body.allresults)
    }

    async fn tokenize(
        &self,
        doc: &str,
        lang: Language,
        include_stopwords: bool,
    ) -> Result<Vec<String>, SearchError> {
        let url = query::tokenize_url(&self.base_url, doc, lang, include_stopwords)?;
        tracing::trace!(doc, %lang, "tokenize");
        let body: TokenizeResponse = http::read_json(self.get(url).await?).await?;
        Ok(body.tokens)
    }

    async fn wmd(
        &self,
        doc1: &str,
        doc2: &str,
        lang1: Language,
        lang2: Language,
    ) -> Result<WmdResponse, SearchError> {
        let url = query::wmd_url(&self.base_url, doc1, doc2, lang1, lang2)?;
        tracing::trace!(doc1, doc2, %lang1, %lang2, "word mover's distance");
        http::read_json(self.get(url).await?).await
    }

    async fn fasttext(&self, lang: &str, dest: &Path) -> Result<u64, SearchError> {
        let url = query::fasttext_url(&self.base_url, lang)?;
        tracing::debug!(lang, path = %dest.display(), "requesting fastText vectors");
        // Vector files run to gigabytes: lift the client-wide total timeout
        // for this request and bound each wait for data by `idle_timeout`.
        let send = self.client.post(url).timeout(DOWNLOAD_TIMEOUT).send();
        let response = tokio::time::timeout(self.idle_timeout, send)
            .await
            .map_err(|_| http::stalled(self.idle_timeout))?
            .map_err(|e| SearchError::Http(format!("request failed: {e}")))?;
        http::download_to_file(http::check_status(response)?, dest, self.idle_timeout).await
    }
}
