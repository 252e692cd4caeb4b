//! Outbound URL construction for the MulLing endpoints.
//!
//! Parameter names and order follow the service contract:
//!
//! ```text
//! /query_{mono|multi}?q=&model=&lang=&k=[&normalize=&oen=&ozh=&oms=&ota=]
//! /tokenize?doc=&lang=&includestopwords=
//! /wmd?doc1=&doc2=&lang1=&lang2=
//! /fasttext?lang=
//! ```
//!
//! Free text is percent-encoded with [`urlencoding::encode`], so spaces
//! travel as `%20` rather than `+`.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::{Language, Model};

/// Default number of results requested.
pub const DEFAULT_K: u32 = 20;

/// Largest result count the service accepts.
pub const MAX_K: u32 = 1000;

/// Monolingual or multilingual retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryMode {
    /// Search only the corpus of the input language.
    Monolingual,
    /// Search across corpora, restricted to `output_languages`.
    Multilingual {
        /// Normalise the top-L merge across languages.
        normalize: bool,
        /// Corpora whose articles may appear in the results.
        output_languages: Vec<Language>,
    },
}

impl QueryMode {
    /// Multilingual mode over every corpus with normalisation on, matching
    /// the dashboard's initial form state.
    pub fn multilingual_all() -> Self {
        Self::Multilingual {
            normalize: true,
            output_languages: Language::corpus().to_vec(),
        }
    }

    /// Endpoint path segment for this mode.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Monolingual => "query_mono",
            Self::Multilingual { .. } => "query_multi",
        }
    }
}

/// A search as submitted from the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Free-text query.
    pub query: String,
    /// Retrieval model.
    pub model: Model,
    /// Input language.
    pub lang: Language,
    /// Number of results requested.
    pub k: u32,
    /// Monolingual or multilingual retrieval.
    pub mode: QueryMode,
}

impl QueryRequest {
    /// A monolingual English query with the default model and result count.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            model: Model::default(),
            lang: Language::English,
            k: DEFAULT_K,
            mode: QueryMode::Monolingual,
        }
    }

    /// Use a different model.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Use a different input language.
    pub fn with_language(mut self, lang: Language) -> Self {
        self.lang = lang;
        self
    }

    /// Request a different number of results.
    pub fn with_k(mut self, k: u32) -> Self {
        self.k = k;
        self
    }

    /// Switch retrieval mode.
    pub fn with_mode(mut self, mode: QueryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Checks the request against what the service accepts.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.query.trim().is_empty() {
            return Err(SearchError::Config("query must not be empty".into()));
        }
        if self.k == 0 || self.k > MAX_K {
            return Err(SearchError::Config(format!(
                "k must be between 1 and {MAX_K}"
            )));
        }
        match &self.mode {
            QueryMode::Monolingual if self.lang == Language::Unspecified => {
                Err(SearchError::Config(
                    "an unspecified input language requires multilingual mode".into(),
                ))
            }
            QueryMode::Multilingual {
                output_languages, ..
            } if output_languages.is_empty() => Err(SearchError::Config(
                "multilingual mode needs at least one output language".into(),
            )),
            // The service divides k by ln(output language count) when merging
            // unnormalised scores, which is undefined for a single language.
            QueryMode::Multilingual {
                normalize: false,
                output_languages,
            } if output_languages.len() == 1 => Err(SearchError::Config(
                "unnormalised multilingual search needs at least two output languages".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Builds the full request URL against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the request is invalid or the
    /// resulting URL does not parse.
    pub fn to_url(&self, base_url: &str) -> Result<url::Url, SearchError> {
        self.validate()?;
        let mut address = format!(
            "{}/{}?q={}&model={}&lang={}&k={}",
            base_url.trim_end_matches('/'),
            self.mode.endpoint(),
            urlencoding::encode(&self.query),
            self.model.id(),
            self.lang.code(),
            self.k,
        );
        if let QueryMode::Multilingual {
            normalize,
            output_languages,
        } = &self.mode
        {
            address.push_str(&format!("&normalize={normalize}"));
            for lang in Language::corpus() {
                let enabled = output_languages.contains(lang);
                address.push_str(&format!("&o{}={enabled}", lang.code()));
            }
        }
        parse_url(&address)
    }
}

/// URL for the tokenizer endpoint.
pub fn tokenize_url(
    base_url: &str,
    doc: &str,
    lang: Language,
    include_stopwords: bool,
) -> Result<url::Url, SearchError> {
    parse_url(&format!(
        "{}/tokenize?doc={}&lang={}&includestopwords={include_stopwords}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(doc),
        lang.code(),
    ))
}

/// URL for the word mover's distance endpoint.
pub fn wmd_url(
    base_url: &str,
    doc1: &str,
    doc2: &str,
    lang1: Language,
    lang2: Language,
) -> Result<url::Url, SearchError> {
    parse_url(&format!(
        "{}/wmd?doc1={}&doc2={}&lang1={}&lang2={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(doc1),
        urlencoding::encode(doc2),
        lang1.code(),
        lang2.code(),
    ))
}

/// URL for the fastText vector download endpoint. `lang` is any fastText
/// language code, not only the four corpus languages.
pub fn fasttext_url(base_url: &str, lang: &str) -> Result<url::Url, SearchError> {
    parse_url(&format!(
        "{}/fasttext?lang={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(lang),
    ))
}

fn parse_url(address: &str) -> Result<url::Url, SearchError> {
    url::Url::parse(address).map_err(|e| SearchError::Config(format!("invalid request URL: {e}")))
}
