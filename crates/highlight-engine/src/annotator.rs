//! Text annotation
//!
//! Splits a text into plain and annotated runs without copying or mutating
//! it: every segment borrows from the source text.
//!
//! Items are applied in order. Each item searches every still-plain segment
//! for the first exact occurrence of its snippet and carves it out; annotated
//! runs are never searched again. Earlier items therefore win when snippets
//! could overlap, and a phrase that occurs twice is only highlighted where an
//! item's search lands first.

use serde::{Deserialize, Serialize};
use shared_types::HighlightRecord;
use tracing::{debug, trace};

/// Snippets shorter than this (in characters) are never annotated
pub const MIN_SNIPPET_CHARS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnnotatorConfig {
    pub min_snippet_chars: usize,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            min_snippet_chars: MIN_SNIPPET_CHARS,
        }
    }
}

/// A highlight to overlay on a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationItem<'a> {
    pub id: &'a str,
    pub snippet: &'a str,
    pub concept: &'a str,
    pub explanation: &'a str,
}

impl<'a> From<&'a HighlightRecord> for AnnotationItem<'a> {
    fn from(record: &'a HighlightRecord) -> Self {
        Self {
            id: &record.id,
            snippet: &record.snippet,
            concept: &record.concept,
            explanation: &record.explanation,
        }
    }
}

/// A run of text matched by a highlight
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedRun<'a> {
    pub id: &'a str,
    pub concept: &'a str,
    pub text: &'a str,
    pub explanation: &'a str,
    pub is_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Segment<'a> {
    Plain { text: &'a str },
    Annotated(AnnotatedRun<'a>),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain { text } => text,
            Segment::Annotated(run) => run.text,
        }
    }

    pub fn as_annotated(&self) -> Option<&AnnotatedRun<'a>> {
        match self {
            Segment::Annotated(run) => Some(run),
            Segment::Plain { .. } => None,
        }
    }
}

/// Items to overlay given the active concept filter
///
/// With no filter every record is active.
pub fn active_items<'a>(
    records: &'a [HighlightRecord],
    concept_filter: Option<&str>,
) -> Vec<AnnotationItem<'a>> {
    records
        .iter()
        .filter(|r| concept_filter.map_or(true, |c| r.concept == c))
        .map(AnnotationItem::from)
        .collect()
}

/// Annotate `text` with the default configuration
pub fn annotate<'a>(
    text: &'a str,
    items: &[AnnotationItem<'a>],
    selected_id: Option<&str>,
) -> Vec<Segment<'a>> {
    annotate_with(text, items, selected_id, &AnnotatorConfig::default())
}

pub fn annotate_with<'a>(
    text: &'a str,
    items: &[AnnotationItem<'a>],
    selected_id: Option<&str>,
    config: &AnnotatorConfig,
) -> Vec<Segment<'a>> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut segments = vec![Segment::Plain { text }];

    for item in items {
        // An empty snippet would match everywhere
        if item.snippet.is_empty() || item.snippet.chars().count() < config.min_snippet_chars {
            trace!(id = item.id, "snippet below minimum length, skipped");
            continue;
        }

        let mut next = Vec::with_capacity(segments.len() + 2);
        let mut matched = false;

        for segment in segments {
            let part = match segment {
                Segment::Plain { text } => text,
                annotated => {
                    next.push(annotated);
                    continue;
                }
            };

            let Some(start) = part.find(item.snippet) else {
                next.push(Segment::Plain { text: part });
                continue;
            };
            let end = start + item.snippet.len();

            if start > 0 {
                next.push(Segment::Plain {
                    text: &part[..start],
                });
            }
            next.push(Segment::Annotated(AnnotatedRun {
                id: item.id,
                concept: item.concept,
                text: &part[start..end],
                explanation: item.explanation,
                is_selected: selected_id == Some(item.id),
            }));
            if end < part.len() {
                next.push(Segment::Plain { text: &part[end..] });
            }
            matched = true;
        }

        if !matched {
            debug!(id = item.id, concept = item.concept, "snippet not found in text");
        }
        segments = next;
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item<'a>(id: &'a str, snippet: &'a str, concept: &'a str) -> AnnotationItem<'a> {
        AnnotationItem {
            id,
            snippet,
            concept,
            explanation: "...",
        }
    }

    fn plain(text: &str) -> Segment<'_> {
        Segment::Plain { text }
    }

    fn run<'a>(id: &'a str, concept: &'a str, text: &'a str, selected: bool) -> Segment<'a> {
        Segment::Annotated(AnnotatedRun {
            id,
            concept,
            text,
            explanation: "...",
            is_selected: selected,
        })
    }

    #[test]
    fn test_single_highlight_splits_in_three() {
        let text = "Team members should feel welcome.";
        let items = [item("h1", "feel welcome", "Belonging")];

        let segments = annotate(text, &items, None);

        assert_eq!(
            segments,
            vec![
                plain("Team members should "),
                run("h1", "Belonging", "feel welcome", false),
                plain("."),
            ]
        );
    }

    #[test]
    fn test_match_at_edges_omits_empty_runs() {
        let text = "feel welcome";
        let items = [item("h1", "feel welcome", "Belonging")];
        assert_eq!(
            annotate(text, &items, None),
            vec![run("h1", "Belonging", "feel welcome", false)]
        );
    }

    #[test]
    fn test_short_snippets_skipped() {
        let text = "We are an inclusive team.";
        let items = [item("h1", "We", "Tone"), item("h2", "", "Tone")];
        assert_eq!(annotate(text, &items, None), vec![plain(text)]);
    }

    #[test]
    fn test_three_char_snippet_annotates() {
        let text = "all of us";
        let items = [item("h1", "all", "Belonging")];
        assert_eq!(
            annotate(text, &items, None),
            vec![run("h1", "Belonging", "all", false), plain(" of us")]
        );
    }

    #[test]
    fn test_missing_snippet_is_noop() {
        let text = "Nothing to see here.";
        let items = [item("h1", "absent phrase", "Tone")];
        assert_eq!(annotate(text, &items, None), vec![plain(text)]);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let items = [item("h1", "anything", "Tone")];
        assert!(annotate("", &items, None).is_empty());
    }

    #[test]
    fn test_only_first_occurrence_per_segment() {
        let text = "support and support";
        let items = [item("h1", "support", "Care")];
        assert_eq!(
            annotate(text, &items, None),
            vec![run("h1", "Care", "support", false), plain(" and support")]
        );
    }

    #[test]
    fn test_identical_snippets_claim_successive_occurrences() {
        let text = "We support you. We support them.";
        let items = [item("h1", "support", "Care"), item("h2", "support", "Care")];

        assert_eq!(
            annotate(text, &items, None),
            vec![
                plain("We "),
                run("h1", "Care", "support", false),
                plain(" you. We "),
                run("h2", "Care", "support", false),
                plain(" them."),
            ]
        );
    }

    #[test]
    fn test_earlier_item_wins_overlap() {
        let text = "people with disabilities";
        let items = [
            item("h1", "people with", "Person-first"),
            item("h2", "with disabilities", "Disability"),
        ];

        // The second snippet straddles an annotated run and no longer matches
        assert_eq!(
            annotate(text, &items, None),
            vec![
                run("h1", "Person-first", "people with", false),
                plain(" disabilities"),
            ]
        );
    }

    #[test]
    fn test_item_matches_in_each_plain_segment() {
        let text = "care about care";
        let items = [item("h1", "about", "A"), item("h2", "care", "B")];

        assert_eq!(
            annotate(text, &items, None),
            vec![
                run("h2", "B", "care", false),
                plain(" "),
                run("h1", "A", "about", false),
                plain(" "),
                run("h2", "B", "care", false),
            ]
        );
    }

    #[test]
    fn test_selected_flag() {
        let text = "Everyone belongs here and everyone matters.";
        let items = [
            item("h1", "Everyone belongs", "Belonging"),
            item("h2", "everyone matters", "Tone"),
        ];
        let segments = annotate(text, &items, Some("h2"));
        let selected: Vec<&str> = segments
            .iter()
            .filter_map(|s| s.as_annotated())
            .filter(|r| r.is_selected)
            .map(|r| r.id)
            .collect();
        assert_eq!(selected, vec!["h2"]);
    }

    #[test]
    fn test_multibyte_text() {
        let text = "Café für alle — willkommen!";
        let items = [item("h1", "für alle", "Belonging")];
        let segments = annotate(text, &items, None);
        assert_eq!(
            segments,
            vec![
                plain("Café "),
                run("h1", "Belonging", "für alle", false),
                plain(" — willkommen!"),
            ]
        );
    }

    #[test]
    fn test_min_length_counts_characters() {
        // "éé" is four bytes but two characters
        let text = "ééé and éé";
        let items = [item("h1", "éé", "Tone")];
        assert_eq!(annotate(text, &items, None), vec![plain(text)]);
    }

    #[test]
    fn test_custom_min_length() {
        let text = "We are here.";
        let items = [item("h1", "We", "Tone")];
        let config = AnnotatorConfig {
            min_snippet_chars: 2,
        };
        assert_eq!(
            annotate_with(text, &items, None, &config),
            vec![run("h1", "Tone", "We", false), plain(" are here.")]
        );
    }

    #[test]
    fn test_active_items_filter() {
        let records = vec![
            HighlightRecord::new("h1", "feel welcome", "Belonging", "x"),
            HighlightRecord::new("h2", "we listen", "Tone", "y"),
        ];
        let all = active_items(&records, None);
        let tone = active_items(&records, Some("Tone"));

        assert_eq!(all.len(), 2);
        assert_eq!(tone.len(), 1);
        assert_eq!(tone[0].id, "h2");
        assert!(active_items(&records, Some("Unknown")).is_empty());
    }

    #[test]
    fn test_segment_serialization() {
        let text = "Team members should feel welcome.";
        let items = [item("h1", "feel welcome", "Belonging")];
        let json = serde_json::to_string(&annotate(text, &items, Some("h1"))).unwrap();
        assert!(json.contains(r#""kind":"plain""#));
        assert!(json.contains(r#""kind":"annotated""#));
        assert!(json.contains(r#""isSelected":true"#));
    }
}
