//! Related-article cross references within a cluster.
//!
//! Each record lists the titles of the other records sharing its cluster
//! label, ordered by ascending rank and capped at
//! [`RELATED_DISPLAY_LIMIT`]. Lists are truncated independently, so A
//! listing B does not guarantee B lists A once a cluster has more than
//! four members.

use std::collections::HashMap;

use crate::types::{ClusterLabel, RelatedTitles, ResultRecord, RELATED_DISPLAY_LIMIT};

/// Compute the related titles for every record, index-aligned with `records`.
///
/// Unclustered records are never related to anything.
pub fn related_titles(records: &[ResultRecord]) -> Vec<RelatedTitles> {
    // Map from cluster label → member indices.
    let mut groups: HashMap<u32, Vec<usize>> = HashMap::new();
    for (index, record) in records.iter().enumerate() {
        if let ClusterLabel::Cluster(label) = record.cluster_label {
            groups.entry(label).or_default().push(index);
        }
    }

    // Stable sort keeps input order among equal ranks.
    for members in groups.values_mut() {
        members.sort_by_key(|&i| records[i].rank);
    }

    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let ClusterLabel::Cluster(label) = record.cluster_label else {
                return RelatedTitles::default();
            };
            let others: Vec<usize> = groups
                .get(&label)
                .map(|members| members.iter().copied().filter(|&i| i != index).collect())
                .unwrap_or_default();
            let hidden = others.len().saturating_sub(RELATED_DISPLAY_LIMIT);
            let titles = others
                .into_iter()
                .take(RELATED_DISPLAY_LIMIT)
                .map(|i| records[i].title.clone())
                .collect();
            RelatedTitles { titles, hidden }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rank: u32, label: ClusterLabel, title: &str) -> ResultRecord {
        ResultRecord {
            rank,
            title: title.to_owned(),
            article: format!("Body of {title}"),
            best_sentence: None,
            cluster_label: label,
            related: RelatedTitles::default(),
        }
    }

    #[test]
    fn excludes_self_and_other_clusters() {
        let records = vec![
            record(0, ClusterLabel::Cluster(0), "Alpha"),
            record(1, ClusterLabel::Cluster(0), "Beta"),
            record(2, ClusterLabel::Cluster(1), "Gamma"),
        ];
        let related = related_titles(&records);
        assert_eq!(related[0].titles, vec!["Beta"]);
        assert_eq!(related[1].titles, vec!["Alpha"]);
        assert!(related[2].is_empty());
    }

    #[test]
    fn ordered_by_ascending_rank_not_input_order() {
        let records = vec![
            record(5, ClusterLabel::Cluster(0), "Five"),
            record(2, ClusterLabel::Cluster(0), "Two"),
            record(9, ClusterLabel::Cluster(0), "Nine"),
            record(1, ClusterLabel::Cluster(0), "One"),
        ];
        let related = related_titles(&records);
        assert_eq!(related[0].titles, vec!["One", "Two", "Nine"]);
        assert_eq!(related[2].titles, vec!["One", "Two", "Five"]);
    }

    #[test]
    fn truncates_to_three_and_counts_hidden() {
        let records: Vec<_> = (0..6)
            .map(|i| record(i, ClusterLabel::Cluster(0), &format!("T{i}")))
            .collect();
        let related = related_titles(&records);
        assert_eq!(related[0].titles, vec!["T1", "T2", "T3"]);
        assert_eq!(related[0].hidden, 2);
        assert_eq!(related[0].total(), 5);
    }

    #[test]
    fn truncation_breaks_symmetry() {
        let records: Vec<_> = (0..5)
            .map(|i| record(i, ClusterLabel::Cluster(3), &format!("T{i}")))
            .collect();
        let related = related_titles(&records);
        // T4 lists T0, but T0's list stops at T3.
        assert!(related[4].titles.contains(&"T0".to_owned()));
        assert!(!related[0].titles.contains(&"T4".to_owned()));
    }

    #[test]
    fn unclustered_records_are_not_related() {
        let records = vec![
            record(0, ClusterLabel::Unclustered, "Loose A"),
            record(1, ClusterLabel::Unclustered, "Loose B"),
        ];
        let related = related_titles(&records);
        assert!(related.iter().all(RelatedTitles::is_empty));
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(related_titles(&[]).is_empty());
    }
}
