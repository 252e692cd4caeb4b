//! Cluster-grouped result view.
//!
//! Records are appended to their cluster's group in input order. The first
//! member of a group is its head and carries the "Cluster k:" heading; the
//! third member is preceded by a single "Similar Results:" sub-heading.
//! Groups are keyed by label value, so sparse labels do not allocate empty
//! groups, and unclustered records trail in a group of their own.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{ClusterLabel, ResultRecord};

/// Position (0-based) within a group before which "Similar Results:" appears.
const SIMILAR_HEADING_POSITION: usize = 2;

/// One record placed inside a cluster group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterMember {
    /// The record itself.
    pub record: ResultRecord,
    /// First record appended to the group.
    pub is_head: bool,
    /// Render the "Similar Results:" sub-heading immediately before this member.
    pub starts_similar: bool,
}

/// All records sharing one cluster label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterGroup {
    /// Label shared by every member.
    pub label: ClusterLabel,
    /// Members in input order.
    pub members: Vec<ClusterMember>,
}

impl ClusterGroup {
    /// Heading shown above the head record.
    pub fn heading(&self) -> String {
        match self.label.display_number() {
            Some(number) => format!("Cluster {number}:"),
            None => "Unclustered:".to_owned(),
        }
    }

    /// The group's head record.
    pub fn head(&self) -> Option<&ResultRecord> {
        self.members.first().map(|m| &m.record)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the group has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Group records by cluster label, ordered by label with unclustered last.
pub fn group_by_cluster(records: &[ResultRecord]) -> Vec<ClusterGroup> {
    let mut groups: BTreeMap<ClusterLabel, Vec<ClusterMember>> = BTreeMap::new();

    for record in records {
        let members = groups.entry(record.cluster_label).or_default();
        let position = members.len();
        members.push(ClusterMember {
            record: record.clone(),
            is_head: position == 0,
            starts_similar: position == SIMILAR_HEADING_POSITION,
        });
    }

    groups
        .into_iter()
        .map(|(label, members)| ClusterGroup { label, members })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RelatedTitles;

    fn record(rank: u32, label: ClusterLabel) -> ResultRecord {
        ResultRecord {
            rank,
            title: format!("Result {rank}"),
            article: String::new(),
            best_sentence: None,
            cluster_label: label,
            related: RelatedTitles::default(),
        }
    }

    #[test]
    fn dense_labels_give_max_plus_one_groups() {
        let records = vec![
            record(0, ClusterLabel::Cluster(2)),
            record(1, ClusterLabel::Cluster(0)),
            record(2, ClusterLabel::Cluster(1)),
            record(3, ClusterLabel::Cluster(0)),
        ];
        let groups = group_by_cluster(&records);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups.iter().map(ClusterGroup::len).sum::<usize>(), 4);
        assert_eq!(groups[0].label, ClusterLabel::Cluster(0));
        assert_eq!(groups[2].label, ClusterLabel::Cluster(2));
    }

    #[test]
    fn head_is_first_in_input_order() {
        let records = vec![
            record(3, ClusterLabel::Cluster(0)),
            record(1, ClusterLabel::Cluster(0)),
        ];
        let groups = group_by_cluster(&records);
        assert_eq!(groups[0].head().map(|r| r.rank), Some(3));
        assert!(groups[0].members[0].is_head);
        assert!(!groups[0].members[1].is_head);
    }

    #[test]
    fn similar_heading_only_before_third_member() {
        let records: Vec<_> = (0..5).map(|i| record(i, ClusterLabel::Cluster(0))).collect();
        let groups = group_by_cluster(&records);
        let flags: Vec<bool> = groups[0].members.iter().map(|m| m.starts_similar).collect();
        assert_eq!(flags, vec![false, false, true, false, false]);
    }

    #[test]
    fn two_member_group_has_no_similar_heading() {
        let records: Vec<_> = (0..2).map(|i| record(i, ClusterLabel::Cluster(0))).collect();
        let groups = group_by_cluster(&records);
        assert!(groups[0].members.iter().all(|m| !m.starts_similar));
    }

    #[test]
    fn sparse_labels_do_not_allocate_gaps() {
        let records = vec![
            record(0, ClusterLabel::Cluster(0)),
            record(1, ClusterLabel::Cluster(5)),
        ];
        let groups = group_by_cluster(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].heading(), "Cluster 6:");
    }

    #[test]
    fn unclustered_group_trails() {
        let records = vec![
            record(0, ClusterLabel::Unclustered),
            record(1, ClusterLabel::Cluster(1)),
        ];
        let groups = group_by_cluster(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].heading(), "Cluster 2:");
        assert_eq!(groups[1].heading(), "Unclustered:");
    }

    #[test]
    fn empty_input_gives_no_groups() {
        assert!(group_by_cluster(&[]).is_empty());
    }
}
