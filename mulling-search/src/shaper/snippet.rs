//! Display text for a single result.
//!
//! A snippet has a collapsed preview and an expanded body. With a best
//! sentence the preview is that sentence; otherwise it is the first
//! [`PREVIEW_CHARS`] characters of the article. The expanded body marks the
//! best sentence for emphasis and breaks paragraphs at newlines.

use serde::{Deserialize, Serialize};

use crate::types::ResultRecord;

/// Characters of article text shown before "See More".
pub const PREVIEW_CHARS: usize = 300;

/// Lucky-search prefix used for outbound article links.
const LINK_PREFIX: &str = "https://duckduckgo.com/?q=!ducky+";

/// A run of text with uniform styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Span {
    /// Unstyled text.
    Plain(String),
    /// Text to be emphasised (bold in the dashboard).
    Emphasis(String),
}

impl Span {
    /// The span's text without styling.
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Emphasis(text) => text,
        }
    }
}

/// A paragraph of styled spans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph(pub Vec<Span>);

impl Paragraph {
    /// Concatenated text without styling.
    pub fn plain_text(&self) -> String {
        self.0.iter().map(Span::text).collect()
    }
}

/// Presentation-ready text for one result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// Collapsed view.
    pub preview: Paragraph,
    /// Expanded view.
    pub full: Vec<Paragraph>,
    /// Whether expanding shows anything the preview does not.
    pub expandable: bool,
    /// Outbound link for the title.
    pub link: String,
}

impl Snippet {
    /// Build the snippet for `record`.
    pub fn for_record(record: &ResultRecord) -> Self {
        let article = record.article.as_str();
        let (preview, expandable) = match record.best_sentence.as_deref() {
            Some(sentence) => (
                Paragraph(vec![
                    Span::Emphasis("Closest Sentence: ".to_owned()),
                    Span::Plain(sentence.to_owned()),
                ]),
                true,
            ),
            None => {
                let truncated = article.chars().count() > PREVIEW_CHARS;
                let text = if truncated {
                    let head: String = article.chars().take(PREVIEW_CHARS).collect();
                    format!("{head} ...")
                } else {
                    article.to_owned()
                };
                (
                    Paragraph(vec![Span::Plain(text)]),
                    truncated || article.contains('\n'),
                )
            }
        };

        Self {
            preview,
            full: paragraphs(&highlight(article, record.best_sentence.as_deref())),
            expandable,
            link: article_link(&record.title),
        }
    }
}

/// Link that opens the top web hit for `title`.
pub fn article_link(title: &str) -> String {
    format!("{LINK_PREFIX}{}", urlencoding::encode(title))
}

/// Split `article` around the first occurrence of `sentence`.
fn highlight(article: &str, sentence: Option<&str>) -> Vec<Span> {
    let Some(sentence) = sentence.filter(|s| !s.is_empty()) else {
        return vec![Span::Plain(article.to_owned())];
    };
    match article.find(sentence) {
        Some(start) => {
            let end = start + sentence.len();
            vec![
                Span::Plain(article[..start].to_owned()),
                Span::Emphasis(sentence.to_owned()),
                Span::Plain(article[end..].to_owned()),
            ]
        }
        None => vec![Span::Plain(article.to_owned())],
    }
}

/// Break spans into paragraphs at newlines, dropping empty paragraphs.
fn paragraphs(spans: &[Span]) -> Vec<Paragraph> {
    let mut out = vec![Paragraph::default()];
    for span in spans {
        for (i, piece) in span.text().split('\n').enumerate() {
            if i > 0 {
                out.push(Paragraph::default());
            }
            if piece.is_empty() {
                continue;
            }
            let piece = piece.to_owned();
            let styled = match span {
                Span::Plain(_) => Span::Plain(piece),
                Span::Emphasis(_) => Span::Emphasis(piece),
            };
            if let Some(current) = out.last_mut() {
                current.0.push(styled);
            }
        }
    }
    out.retain(|p| !p.0.is_empty());
    out
}
