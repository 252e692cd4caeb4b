//! Core types for query requests and shaped result records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SearchError;

/// Maximum number of related titles shown per record before the
/// remainder is summarised as "+N more".
pub const RELATED_DISPLAY_LIMIT: usize = 3;

/// Languages understood by the MulLing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// English.
    #[serde(rename = "en")]
    English,
    /// Chinese.
    #[serde(rename = "zh")]
    Chinese,
    /// Malay.
    #[serde(rename = "ms")]
    Malay,
    /// Tamil.
    #[serde(rename = "ta")]
    Tamil,
    /// Let the service detect the input language. Only valid for
    /// multilingual queries.
    #[serde(rename = "null")]
    Unspecified,
}

impl Language {
    /// Wire code sent in the `lang` query parameter.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Chinese => "zh",
            Self::Malay => "ms",
            Self::Tamil => "ta",
            Self::Unspecified => "null",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Chinese => "Chinese",
            Self::Malay => "Malay",
            Self::Tamil => "Tamil",
            Self::Unspecified => "Unspecified",
        }
    }

    /// The four corpus languages, in the order the service expects the
    /// `o<lang>` output flags.
    pub fn corpus() -> &'static [Language] {
        &[Self::English, Self::Chinese, Self::Malay, Self::Tamil]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::English),
            "zh" => Ok(Self::Chinese),
            "ms" => Ok(Self::Malay),
            "ta" => Ok(Self::Tamil),
            "null" | "auto" => Ok(Self::Unspecified),
            other => Err(SearchError::Config(format!("unknown language: {other}"))),
        }
    }
}

/// Retrieval models hosted by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Model {
    /// Vector addition over article text.
    Baa,
    /// Vector addition over article titles.
    Meta,
    /// TF-IDF weighted article text.
    #[default]
    Bai,
    /// TF-IDF weighted sentences.
    Senbai,
    /// Bi-LSTM encoder over article text.
    Laser,
    /// Bi-LSTM encoder over article titles.
    Metalaser,
    /// Bi-LSTM encoder over sentences.
    Senlaser,
}

impl Model {
    /// Identifier sent in the `model` query parameter.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Baa => "baa",
            Self::Meta => "meta",
            Self::Bai => "bai",
            Self::Senbai => "senbai",
            Self::Laser => "laser",
            Self::Metalaser => "metalaser",
            Self::Senlaser => "senlaser",
        }
    }

    /// Name shown in model pickers.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Baa => "Vector Addition Text",
            Self::Meta => "Vector Addition Title",
            Self::Bai => "TF-IDF Text",
            Self::Senbai => "TF-IDF Sentences",
            Self::Laser => "Bi-LSTM Text",
            Self::Metalaser => "Bi-LSTM Title",
            Self::Senlaser => "Bi-LSTM Sentences",
        }
    }

    /// Sentence-level models return a best-matching sentence per result.
    pub fn is_sentence_level(&self) -> bool {
        matches!(self, Self::Senbai | Self::Senlaser)
    }

    /// Returns all model variants in picker order.
    pub fn all() -> &'static [Model] {
        &[
            Self::Baa,
            Self::Meta,
            Self::Bai,
            Self::Senbai,
            Self::Laser,
            Self::Metalaser,
            Self::Senlaser,
        ]
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Model {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|m| m.id() == wanted)
            .ok_or_else(|| SearchError::Config(format!("unknown model: {wanted}")))
    }
}

/// One tab-delimited record exactly as the service sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawResultRow(pub String);

impl RawResultRow {
    /// The raw line.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RawResultRow {
    fn from(line: &str) -> Self {
        Self(line.to_owned())
    }
}

impl From<String> for RawResultRow {
    fn from(line: String) -> Self {
        Self(line)
    }
}

/// Similarity cluster a record belongs to.
///
/// Ordering puts every numbered cluster before [`ClusterLabel::Unclustered`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClusterLabel {
    /// A 0-based cluster label.
    Cluster(u32),
    /// The service did not assign a cluster (`-1` or empty field).
    Unclustered,
}

impl ClusterLabel {
    /// 1-based number used in "Cluster k:" headings.
    pub fn display_number(&self) -> Option<u32> {
        match self {
            Self::Cluster(label) => Some(label + 1),
            Self::Unclustered => None,
        }
    }
}

/// Titles of other records in the same cluster, capped for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedTitles {
    /// Up to [`RELATED_DISPLAY_LIMIT`] titles, ordered by ascending rank.
    pub titles: Vec<String>,
    /// How many further related records were cut off.
    pub hidden: usize,
}

impl RelatedTitles {
    /// Total number of related records, shown and hidden.
    pub fn total(&self) -> usize {
        self.titles.len() + self.hidden
    }

    /// Returns `true` when the record has no related articles.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Short annotation printed under a result.
    pub fn annotation(&self) -> String {
        if self.titles.is_empty() {
            return "No Related Articles.".to_owned();
        }
        let mut text = format!("Related to Articles: {}", self.titles.join(", "));
        if self.hidden > 0 {
            text.push_str(&format!(" (+{} more)", self.hidden));
        }
        text
    }
}

/// A parsed result, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Position assigned by the service; defines display order.
    pub rank: u32,
    /// Article title.
    pub title: String,
    /// Full article body. May contain newlines.
    pub article: String,
    /// Best-matching sentence, only from sentence-level models.
    pub best_sentence: Option<String>,
    /// Cluster this record belongs to.
    pub cluster_label: ClusterLabel,
    /// Other records in the same cluster.
    pub related: RelatedTitles,
}
