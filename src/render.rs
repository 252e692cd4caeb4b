//! Plain-text rendering of the results panel and sandbox tools.
//!
//! Emphasised spans are wrapped in `**`. The renderer only reads shaped
//! data; it never reorders or filters records.

use mulling_search::panel::{PanelError, PanelState};
use mulling_search::sandbox::{format_distance, WmdHeatmap};
use mulling_search::shaper::snippet::{Paragraph, Span};
use mulling_search::shaper::{PrimaryView, ShapedResults, Snippet};
use mulling_search::{Model, ResultRecord};

/// Shown above every non-empty result list.
pub const LINK_WARNING: &str =
    "Warning: Links lead out using DuckDuckGo's I'm Feeling Lucky. Click at your own risk!";

const INDENT: &str = "    ";

/// Rendering switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Print full articles instead of previews ("See More").
    pub expanded: bool,
}

/// Render whatever currently occupies the results area.
pub fn render_panel(state: &PanelState, options: RenderOptions) -> String {
    match state {
        PanelState::Idle => String::new(),
        PanelState::Loading(_) => "Loading...\n".to_owned(),
        PanelState::Results(results) => render_results(results, options),
        PanelState::Failed(err) => render_error(err),
    }
}

/// Render shaped results in their primary view.
pub fn render_results(results: &ShapedResults, options: RenderOptions) -> String {
    if results.is_empty_payload() {
        return "No results.\n".to_owned();
    }
    let mut out = String::new();
    push_line(&mut out, "", LINK_WARNING);
    out.push('\n');
    match results.primary_view() {
        PrimaryView::Flat => {
            for record in &results.flat {
                render_record(&mut out, record, options, "");
            }
        }
        PrimaryView::Clustered => {
            for group in &results.clusters {
                for member in &group.members {
                    if member.is_head {
                        push_line(&mut out, "", &group.heading());
                    }
                    if member.starts_similar {
                        push_line(&mut out, INDENT, "Similar Results:");
                    }
                    render_record(&mut out, &member.record, options, INDENT);
                }
            }
        }
    }
    out
}

/// Render the error panel.
pub fn render_error(err: &PanelError) -> String {
    format!("{}\n{}\n", err.title, err.message)
}

fn render_record(out: &mut String, record: &ResultRecord, options: RenderOptions, indent: &str) {
    let snippet = Snippet::for_record(record);
    push_line(out, indent, &record.title);
    push_line(out, indent, &snippet.link);
    if options.expanded {
        for paragraph in &snippet.full {
            push_line(out, indent, &paragraph_text(paragraph));
        }
    } else {
        push_line(out, indent, &paragraph_text(&snippet.preview));
        if snippet.expandable {
            push_line(out, indent, "(more with --full)");
        }
    }
    push_line(out, indent, &record.related.annotation());
    out.push('\n');
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    paragraph
        .0
        .iter()
        .map(|span| match span {
            Span::Plain(text) => text.clone(),
            Span::Emphasis(text) => format!("**{text}**"),
        })
        .collect()
}

/// Render tokenizer output, one token per line.
pub fn render_tokens(tokens: &[String]) -> String {
    let mut out = String::from("Tokens:\n");
    for token in tokens {
        push_line(&mut out, INDENT, token);
    }
    out
}

/// Render a word mover's distance result, optionally with its flow matrix.
pub fn render_wmd(heatmap: &WmdHeatmap, matrix: bool) -> String {
    let mut out = format!(
        "Word Movers' Distance: {}\n",
        format_distance(heatmap.distance)
    );
    if !matrix || heatmap.columns.is_empty() {
        return out;
    }

    let width = heatmap
        .rows
        .iter()
        .chain(heatmap.columns.iter())
        .map(|t| t.chars().count())
        .max()
        .unwrap_or(0)
        .max(6);

    out.push_str(&format!("{:width$}", ""));
    for column in &heatmap.columns {
        out.push_str(&format!(" {column:>width$}"));
    }
    out.push('\n');
    for (row, cells) in heatmap.rows.iter().zip(&heatmap.cells) {
        out.push_str(&format!("{row:width$}"));
        for cell in cells {
            out.push_str(&format!(" {cell:>width$.4}"));
        }
        out.push('\n');
    }
    out
}

/// Render the model picker listing.
pub fn render_models() -> String {
    let mut out = String::new();
    for model in Model::all() {
        let marker = if *model == Model::default() { " (default)" } else { "" };
        out.push_str(&format!(
            "{:<10} {}{marker}\n",
            model.id(),
            model.display_name()
        ));
    }
    out
}

fn push_line(out: &mut String, indent: &str, text: &str) {
    out.push_str(indent);
    out.push_str(text);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use mulling_search::{shape, RawResultRow};

    fn shaped(clustering: bool) -> ShapedResults {
        let rows: Vec<RawResultRow> = [
            "0\t\t0\tAlpha\tBody A",
            "1\t\t0\tBeta\tBody B",
            "2\t\t1\tGamma\tBody C",
            "3\t\t0\tDelta\tBody D",
        ]
        .iter()
        .map(|l| RawResultRow::from(*l))
        .collect();
        shape(&rows, clustering).expect("well-formed rows")
    }

    #[test]
    fn flat_view_lists_records_in_order() {
        let text = render_results(&shaped(false), RenderOptions::default());
        assert!(text.starts_with(LINK_WARNING));
        let alpha = text.find("Alpha").expect("alpha");
        let beta = text.find("Beta").expect("beta");
        let gamma = text.find("Gamma\n").expect("gamma");
        assert!(alpha < beta && beta < gamma);
        assert!(!text.contains("Cluster 1:"));
    }

    #[test]
    fn clustered_view_has_headings() {
        let text = render_results(&shaped(true), RenderOptions::default());
        assert!(text.contains("Cluster 1:\n    Alpha"));
        assert!(text.contains("Cluster 2:\n    Gamma"));
        assert_eq!(text.matches("Similar Results:").count(), 1);
        let similar = text.find("Similar Results:").expect("sub-heading");
        let delta = text.find("    Delta").expect("delta");
        assert!(similar < delta);
    }

    #[test]
    fn related_annotations_rendered() {
        let text = render_results(&shaped(false), RenderOptions::default());
        assert!(text.contains("Related to Articles: Beta, Delta"));
        assert!(text.contains("No Related Articles."));
    }

    #[test]
    fn empty_results_render_neutral_message() {
        let empty = shape(&[], true).expect("empty is fine");
        assert_eq!(render_results(&empty, RenderOptions::default()), "No results.\n");
    }

    #[test]
    fn expanded_view_emphasises_best_sentence() {
        let rows = vec![RawResultRow::from("0\t\t0\tT\tRivers rose. Dams held.\tDams held.")];
        let results = shape(&rows, false).expect("well-formed rows");
        let collapsed = render_results(&results, RenderOptions::default());
        assert!(collapsed.contains("**Closest Sentence: **Dams held."));
        assert!(collapsed.contains("(more with --full)"));

        let expanded = render_results(&results, RenderOptions { expanded: true });
        assert!(expanded.contains("Rivers rose. **Dams held.**"));
    }

    #[test]
    fn panel_states_render_exclusively() {
        assert_eq!(render_panel(&PanelState::Idle, RenderOptions::default()), "");
        let err = PanelError {
            status: Some(500),
            title: "Server Error".into(),
            message: "Query could not be parsed.".into(),
        };
        let text = render_panel(&PanelState::Failed(err), RenderOptions::default());
        assert_eq!(text, "Server Error\nQuery could not be parsed.\n");
    }

    #[test]
    fn tokens_listed_one_per_line() {
        let text = render_tokens(&["cat".into(), "sat".into()]);
        assert_eq!(text, "Tokens:\n    cat\n    sat\n");
    }

    #[test]
    fn wmd_distance_and_matrix() {
        let heatmap = WmdHeatmap {
            distance: 0.5,
            rows: vec!["cat".into()],
            columns: vec!["kucing".into()],
            cells: vec![vec![1.0]],
        };
        assert_eq!(render_wmd(&heatmap, false), "Word Movers' Distance: 0.5000\n");
        let with_matrix = render_wmd(&heatmap, true);
        assert!(with_matrix.contains("kucing"));
        assert!(with_matrix.contains("1.0000"));
    }

    #[test]
    fn models_listing_marks_default() {
        let text = render_models();
        assert_eq!(text.lines().count(), Model::all().len());
        assert!(text.contains("bai        TF-IDF Text (default)"));
    }
}
