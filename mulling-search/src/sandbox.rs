//! Tokenizer and word mover's distance payloads.
//!
//! The WMD endpoint returns the shared token vocabulary of both documents,
//! each document's normalised bag-of-words weights (`pdf1`, `pdf2`) and the
//! optimal transport `flow` matrix between them. [`WmdResponse::heatmap`]
//! keeps only the rows and columns with non-zero weight, which is what a
//! chart draws.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Body of a `/tokenize` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenizeResponse {
    /// Tokens in document order.
    pub tokens: Vec<String>,
}

/// Body of a `/wmd` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WmdResponse {
    /// The distance itself.
    pub wmd: f64,
    /// Shared vocabulary, indexing `pdf1`, `pdf2` and both axes of `flow`.
    pub tokens: Vec<String>,
    /// Weight of each token in the first document.
    pub pdf1: Vec<f64>,
    /// Weight of each token in the second document.
    pub pdf2: Vec<f64>,
    /// Transport flow from token `i` of document one to token `j` of document two.
    pub flow: Vec<Vec<f64>>,
}

/// Flow matrix restricted to the tokens each document actually uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WmdHeatmap {
    /// The distance.
    pub distance: f64,
    /// Tokens of the first document (y axis).
    pub rows: Vec<String>,
    /// Tokens of the second document (x axis).
    pub columns: Vec<String>,
    /// `cells[i][j]` is the flow from `rows[i]` to `columns[j]`.
    pub cells: Vec<Vec<f64>>,
}

impl WmdResponse {
    /// Build the heatmap for this response.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if `pdf1`, `pdf2` or `flow` do not match
    /// the vocabulary size.
    pub fn heatmap(&self) -> Result<WmdHeatmap, SearchError> {
        let n = self.tokens.len();
        if self.pdf1.len() != n || self.pdf2.len() != n {
            return Err(SearchError::Parse(format!(
                "wmd weights do not match vocabulary of {n} tokens"
            )));
        }
        if self.flow.len() != n || self.flow.iter().any(|row| row.len() != n) {
            return Err(SearchError::Parse(format!(
                "wmd flow is not a {n}x{n} matrix"
            )));
        }

        let kept_rows: Vec<usize> = (0..n).filter(|&i| self.pdf1[i] != 0.0).collect();
        let kept_cols: Vec<usize> = (0..n).filter(|&j| self.pdf2[j] != 0.0).collect();

        Ok(WmdHeatmap {
            distance: self.wmd,
            rows: kept_rows.iter().map(|&i| self.tokens[i].clone()).collect(),
            columns: kept_cols.iter().map(|&j| self.tokens[j].clone()).collect(),
            cells: kept_rows
                .iter()
                .map(|&i| kept_cols.iter().map(|&j| self.flow[i][j]).collect())
                .collect(),
        })
    }
}

/// Distance as shown to users: four decimal places.
pub fn format_distance(distance: f64) -> String {
    format!("{distance:.4}")
}
