//! Result shaping: raw rows in, flat and clustered views out.
//!
//! The pipeline parses every tab-delimited row, attaches related-article
//! cross references, and builds two parallel views of the same records:
//! the flat ranked list (input order, never re-sorted) and the
//! cluster-grouped list. Both are always computed; the caller's clustering
//! flag only selects which one is primary.
//!
//! Everything here is pure. No I/O, no hidden state.

pub mod cluster;
pub mod parse;
pub mod related;
pub mod snippet;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::{RawResultRow, ResultRecord};

pub use cluster::{ClusterGroup, ClusterMember};
pub use snippet::Snippet;

/// Which of the two views the renderer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimaryView {
    /// The flat ranked list.
    Flat,
    /// The cluster-grouped list.
    Clustered,
}

/// Output of [`shape`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapedResults {
    /// Every record in input order.
    pub flat: Vec<ResultRecord>,
    /// The same records grouped by cluster label.
    pub clusters: Vec<ClusterGroup>,
    /// Mirrors the caller's clustering flag.
    pub clustering_enabled: bool,
}

impl ShapedResults {
    /// `true` when the service returned zero rows. Not an error: the
    /// renderer shows a neutral "no results" area.
    pub fn is_empty_payload(&self) -> bool {
        self.flat.is_empty()
    }

    /// The view to make visible.
    pub fn primary_view(&self) -> PrimaryView {
        if self.clustering_enabled {
            PrimaryView::Clustered
        } else {
            PrimaryView::Flat
        }
    }
}

/// Output of [`shape_lenient`]: the shaped rows plus whatever was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LenientShape {
    /// Results built from the rows that parsed.
    pub results: ShapedResults,
    /// One [`SearchError::MalformedRow`] per skipped row, in input order.
    pub skipped: Vec<SearchError>,
}

/// Shape a response, failing on the first malformed row.
///
/// # Errors
///
/// Returns [`SearchError::MalformedRow`] for the first row whose field count
/// is outside {5, 6} or whose rank or cluster label does not parse.
pub fn shape(rows: &[RawResultRow], clustering_enabled: bool) -> Result<ShapedResults, SearchError> {
    let records = rows
        .iter()
        .enumerate()
        .map(|(index, row)| parse::parse_row(index, row))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(assemble(records, clustering_enabled))
}

/// Shape a response, skipping malformed rows and reporting them.
///
/// Rows before and after a malformed row are unaffected.
pub fn shape_lenient(rows: &[RawResultRow], clustering_enabled: bool) -> LenientShape {
    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        match parse::parse_row(index, row) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping malformed result row");
                skipped.push(err);
            }
        }
    }

    LenientShape {
        results: assemble(records, clustering_enabled),
        skipped,
    }
}

fn assemble(mut records: Vec<ResultRecord>, clustering_enabled: bool) -> ShapedResults {
    let related = related::related_titles(&records);
    for (record, related) in records.iter_mut().zip(related) {
        record.related = related;
    }

    let clusters = cluster::group_by_cluster(&records);
    tracing::debug!(
        records = records.len(),
        clusters = clusters.len(),
        "results shaped"
    );

    ShapedResults {
        flat: records,
        clusters,
        clustering_enabled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClusterLabel;

    fn rows(lines: &[&str]) -> Vec<RawResultRow> {
        lines.iter().map(|l| RawResultRow::from(*l)).collect()
    }

    fn sample() -> Vec<RawResultRow> {
        rows(&[
            "0\t\t0\tAlpha\tBody A",
            "1\t\t0\tBeta\tBody B",
            "2\t\t1\tGamma\tBody C",
        ])
    }

    #[test]
    fn three_row_scenario() {
        let shaped = shape(&sample(), true).expect("well-formed rows");

        let titles: Vec<&str> = shaped.flat.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Beta", "Gamma"]);

        assert_eq!(shaped.clusters.len(), 2);
        let first = &shaped.clusters[0];
        assert_eq!(first.heading(), "Cluster 1:");
        assert_eq!(first.head().map(|r| r.title.as_str()), Some("Alpha"));
        assert_eq!(first.members[1].record.title, "Beta");
        assert_eq!(first.members[1].record.related.titles, vec!["Alpha"]);

        let second = &shaped.clusters[1];
        assert_eq!(second.head().map(|r| r.title.as_str()), Some("Gamma"));
        assert!(second.members[0].record.related.is_empty());
        assert_eq!(
            second.members[0].record.related.annotation(),
            "No Related Articles."
        );
    }

    #[test]
    fn empty_payload_is_not_an_error() {
        let shaped = shape(&[], true).expect("empty is fine");
        assert!(shaped.flat.is_empty());
        assert!(shaped.clusters.is_empty());
        assert!(shaped.is_empty_payload());
    }

    #[test]
    fn flat_length_matches_rows_and_groups_partition() {
        let input = rows(&[
            "0\t\t1\tA\tx",
            "1\t\t0\tB\tx",
            "2\t\t2\tC\tx",
            "3\t\t1\tD\tx",
            "4\t\t0\tE\tx",
        ]);
        let shaped = shape(&input, false).expect("well-formed rows");
        assert_eq!(shaped.flat.len(), input.len());
        assert_eq!(shaped.clusters.len(), 3);
        let total: usize = shaped.clusters.iter().map(ClusterGroup::len).sum();
        assert_eq!(total, input.len());
    }

    #[test]
    fn flat_list_is_not_resorted() {
        let input = rows(&["3\t\t0\tC\tx", "1\t\t0\tA\tx", "2\t\t0\tB\tx"]);
        let shaped = shape(&input, false).expect("well-formed rows");
        let ranks: Vec<u32> = shaped.flat.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![3, 1, 2]);
    }

    #[test]
    fn clustering_flag_only_changes_primary_view() {
        let on = shape(&sample(), true).expect("well-formed rows");
        let off = shape(&sample(), false).expect("well-formed rows");
        assert_eq!(on.flat, off.flat);
        assert_eq!(on.clusters, off.clusters);
        assert_eq!(on.primary_view(), PrimaryView::Clustered);
        assert_eq!(off.primary_view(), PrimaryView::Flat);
    }

    #[test]
    fn shaping_is_deterministic() {
        assert_eq!(shape(&sample(), true), shape(&sample(), true));
    }

    #[test]
    fn strict_shape_fails_on_malformed_row() {
        let input = rows(&["0\t\t0\tA\tx", "1\t\t0\tB", "2\t\t0\tC\tx"]);
        match shape(&input, true) {
            Err(SearchError::MalformedRow { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn lenient_shape_skips_and_reports() {
        let input = rows(&["0\t\t0\tA\tx", "1\t\t0\tB", "2\t\t0\tC\tx"]);
        let outcome = shape_lenient(&input, true);
        let titles: Vec<&str> = outcome
            .results
            .flat
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert_eq!(outcome.skipped.len(), 1);
        assert!(matches!(
            outcome.skipped[0],
            SearchError::MalformedRow { index: 1, .. }
        ));
        assert_eq!(outcome.results.flat[0].related.titles, vec!["C"]);
    }

    #[test]
    fn unclustered_rows_kept_in_both_views() {
        let input = rows(&["0\t\t-1\tA\tx", "1\t\t0\tB\tx"]);
        let shaped = shape(&input, true).expect("well-formed rows");
        assert_eq!(shaped.flat.len(), 2);
        assert_eq!(shaped.clusters.len(), 2);
        assert_eq!(shaped.clusters[1].label, ClusterLabel::Unclustered);
    }
}
