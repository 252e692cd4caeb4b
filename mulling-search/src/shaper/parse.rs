//! Tab-delimited row parsing.
//!
//! Field layout, by position:
//!
//! | index | meaning                                   |
//! |-------|-------------------------------------------|
//! | 0     | rank                                      |
//! | 1     | reserved, ignored                         |
//! | 2     | cluster label (`-1` or empty: unclustered) |
//! | 3     | title                                     |
//! | 4     | article body                              |
//! | 5     | best-matching sentence (optional)         |

use crate::error::SearchError;
use crate::types::{ClusterLabel, RawResultRow, RelatedTitles, ResultRecord};

const MIN_FIELDS: usize = 5;
const MAX_FIELDS: usize = 6;

/// Parse one raw row into a [`ResultRecord`] with no related titles yet.
///
/// `index` is the row's 0-based position in the response and is carried
/// into any [`SearchError::MalformedRow`] produced.
pub fn parse_row(index: usize, raw: &RawResultRow) -> Result<ResultRecord, SearchError> {
    let fields: Vec<&str> = raw.as_str().split('\t').collect();

    if !(MIN_FIELDS..=MAX_FIELDS).contains(&fields.len()) {
        return Err(malformed(
            index,
            raw,
            format!("expected 5 or 6 fields, found {}", fields.len()),
        ));
    }

    let rank = fields[0]
        .trim()
        .parse::<u32>()
        .map_err(|_| malformed(index, raw, format!("invalid rank {:?}", fields[0])))?;

    let cluster_label = parse_label(fields[2])
        .ok_or_else(|| malformed(index, raw, format!("invalid cluster label {:?}", fields[2])))?;

    let best_sentence = fields
        .get(5)
        .filter(|s| !s.trim().is_empty())
        .map(|s| (*s).to_owned());

    Ok(ResultRecord {
        rank,
        title: fields[3].to_owned(),
        article: fields[4].to_owned(),
        best_sentence,
        cluster_label,
        related: RelatedTitles::default(),
    })
}

fn parse_label(field: &str) -> Option<ClusterLabel> {
    match field.trim() {
        "" | "-1" => Some(ClusterLabel::Unclustered),
        other => other.parse::<u32>().ok().map(ClusterLabel::Cluster),
    }
}

fn malformed(index: usize, raw: &RawResultRow, reason: String) -> SearchError {
    SearchError::MalformedRow {
        index,
        row: raw.as_str().to_owned(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(line: &str) -> RawResultRow {
        RawResultRow::from(line)
    }

    #[test]
    fn five_field_row_parses() {
        let record = parse_row(0, &row("0\t\t1\tAlpha\tBody A")).expect("valid row");
        assert_eq!(record.rank, 0);
        assert_eq!(record.title, "Alpha");
        assert_eq!(record.article, "Body A");
        assert_eq!(record.cluster_label, ClusterLabel::Cluster(1));
        assert!(record.best_sentence.is_none());
        assert!(record.related.is_empty());
    }

    #[test]
    fn six_field_row_keeps_best_sentence() {
        let record = parse_row(0, &row("4\tx\t0\tT\tFirst. Second.\tSecond.")).expect("valid row");
        assert_eq!(record.rank, 4);
        assert_eq!(record.best_sentence.as_deref(), Some("Second."));
    }

    #[test]
    fn empty_best_sentence_is_none() {
        let record = parse_row(0, &row("1\t\t0\tT\tBody\t")).expect("valid row");
        assert!(record.best_sentence.is_none());
    }

    #[test]
    fn four_fields_is_malformed_with_index() {
        let err = parse_row(7, &row("0\t\t0\tAlpha")).unwrap_err();
        match err {
            SearchError::MalformedRow { index, row, reason } => {
                assert_eq!(index, 7);
                assert_eq!(row, "0\t\t0\tAlpha");
                assert!(reason.contains("found 4"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn seven_fields_is_malformed() {
        assert!(parse_row(0, &row("0\t\t0\tA\tB\tC\tD")).is_err());
    }

    #[test]
    fn minus_one_and_empty_labels_are_unclustered() {
        let a = parse_row(0, &row("0\t\t-1\tA\tB")).expect("valid row");
        let b = parse_row(1, &row("1\t\t\tA\tB")).expect("valid row");
        assert_eq!(a.cluster_label, ClusterLabel::Unclustered);
        assert_eq!(b.cluster_label, ClusterLabel::Unclustered);
    }

    #[test]
    fn non_numeric_rank_is_malformed() {
        let err = parse_row(2, &row("first\t\t0\tA\tB")).unwrap_err();
        assert!(err.to_string().contains("invalid rank"));
    }

    #[test]
    fn non_numeric_label_is_malformed() {
        let err = parse_row(2, &row("0\t\tred\tA\tB")).unwrap_err();
        assert!(err.to_string().contains("invalid cluster label"));
    }

    #[test]
    fn trailing_article_newline_kept() {
        let record =
            parse_row(0, &row("0\t\t0\tT\tpara one\npara two\n")).expect("valid row");
        assert_eq!(record.article, "para one\npara two\n");
    }

    #[test]
    fn best_sentence_kept_verbatim() {
        let record = parse_row(0, &row("0\t\t0\tT\tBody\tLast line.\n")).expect("valid row");
        assert_eq!(record.best_sentence.as_deref(), Some("Last line.\n"));
    }

    #[test]
    fn article_newlines_preserved() {
        let record = parse_row(0, &row("0\t\t0\tA\tline one\nline two")).expect("valid row");
        assert_eq!(record.article, "line one\nline two");
    }
}
