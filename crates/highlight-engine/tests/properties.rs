//! End-to-end properties of annotation and selection

use highlight_engine::{
    active_items, annotate, ConceptColorMap, Direction, HighlightContext, HighlightIndex,
    ReviewSession, SelectionController, PALETTE,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use shared_types::{FileContent, HighlightRecord, InclusivityAnalysis};

const CTX: HighlightContext = HighlightContext::Analysis;

fn index_of(records: Vec<HighlightRecord>) -> HighlightIndex {
    let mut index = HighlightIndex::new();
    index.set_records(CTX, records);
    index
}

fn joined(text: &str, records: &[HighlightRecord], filter: Option<&str>) -> String {
    let items = active_items(records, filter);
    annotate(text, &items, None)
        .iter()
        .map(|s| s.text())
        .collect()
}

#[test]
fn test_repeated_phrase_scenario() {
    let text = "We support you. We support them.";
    let records = vec![
        HighlightRecord::new("a", "support", "Care", ""),
        HighlightRecord::new("b", "support", "Care", ""),
    ];
    let items = active_items(&records, None);
    let ids: Vec<&str> = annotate(text, &items, None)
        .iter()
        .filter_map(|s| s.as_annotated())
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_tone_navigation_scenario() {
    let index = index_of(vec![
        HighlightRecord::new("t1", "calm words", "Tone", ""),
        HighlightRecord::new("b1", "feel welcome", "Belonging", ""),
        HighlightRecord::new("t2", "we listen", "Tone", ""),
        HighlightRecord::new("t3", "thank you", "Tone", ""),
    ]);
    let mut ctl = SelectionController::new();
    ctl.select_concept("Tone", &index, CTX);
    assert_eq!(ctl.selected_highlight_id(), None);

    let mut seen = Vec::new();
    for _ in 0..4 {
        ctl.navigate(Direction::Next, "Tone", &index, CTX);
        seen.push(ctl.selected_highlight_id().unwrap_or_default().to_string());
    }
    // Three presses after the first complete the cycle
    assert_eq!(seen, vec!["t1", "t2", "t3", "t1"]);
    assert_eq!(ctl.selected_concept(), Some("Tone"));
}

#[test]
fn test_session_from_json_uses_derived_ids() {
    let json = r#"{
        "fullText": "Everyone is welcome here.",
        "characteristics": [{"name": "Belonging", "description": "Invites people in"}],
        "highlights": [{"snippet": "Everyone is welcome", "characteristic": "Belonging", "explanation": "Open"}],
        "systemInstruction": "Be open.",
        "tone": "Open"
    }"#;
    let analysis = InclusivityAnalysis::from_json(json).unwrap();
    let id = analysis.highlights[0].id.clone();
    assert!(id.starts_with("ref-"));

    let mut session = ReviewSession::new();
    session.set_reference("ref.txt", FileContent::text("Everyone is welcome here."));
    session.begin_analysis().unwrap();
    session.complete_analysis(analysis);
    session.click_highlight(&id);

    assert_eq!(session.selection().selected_concept.as_deref(), Some("Belonging"));
    let html = session.render_pane(highlight_engine::Pane::Reference);
    assert!(html.contains(&format!(r#"data-highlight-id="{}""#, id)));
}

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn concept() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Tone", "Belonging", "Clarity"]).prop_map(String::from)
}

prop_compose! {
    fn text_and_records()(
        words in prop::collection::vec(word(), 1..20),
        picks in prop::collection::vec((any::<prop::sample::Index>(), 1usize..4, concept()), 0..8),
    ) -> (String, Vec<HighlightRecord>) {
        let text = words.join(" ");
        let records = picks
            .iter()
            .enumerate()
            .map(|(i, (start, len, concept))| {
                let from = start.index(words.len());
                let to = (from + len).min(words.len());
                HighlightRecord::new(&format!("h{}", i), &words[from..to].join(" "), concept, "")
            })
            .collect();
        (text, records)
    }
}

proptest! {
    #[test]
    fn concatenation_reproduces_text((text, records) in text_and_records()) {
        prop_assert_eq!(joined(&text, &records, None), text.clone());
        prop_assert_eq!(joined(&text, &records, Some("Tone")), text);
    }

    #[test]
    fn annotated_runs_respect_minimum_length((text, records) in text_and_records()) {
        let items = active_items(&records, None);
        for segment in annotate(&text, &items, None) {
            if let Some(run) = segment.as_annotated() {
                prop_assert!(run.text.chars().count() >= 3);
            }
        }
    }

    #[test]
    fn filtered_annotation_only_shows_filtered_concept((text, records) in text_and_records()) {
        let items = active_items(&records, Some("Clarity"));
        for segment in annotate(&text, &items, None) {
            if let Some(run) = segment.as_annotated() {
                prop_assert_eq!(run.concept, "Clarity");
            }
        }
    }

    #[test]
    fn color_assignment_is_stable(names in prop::collection::vec("[A-Z][a-z]{2,8}", 0..20)) {
        let first = ConceptColorMap::assign(&names);
        let second = ConceptColorMap::assign(&names);
        prop_assert_eq!(&first, &second);
        for name in &names {
            prop_assert!(PALETTE.contains(first.get(name)));
        }
    }

    #[test]
    fn concept_filter_preserves_order((_, records) in text_and_records(), target in concept()) {
        let index = index_of(records.clone());
        let expected: Vec<&str> = records
            .iter()
            .filter(|r| r.concept == target)
            .map(|r| r.id.as_str())
            .collect();
        let actual: Vec<&str> = index
            .highlights_for_concept(&target, CTX)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn navigation_cycles_back((_, records) in text_and_records(), target in concept()) {
        let index = index_of(records);
        let count = index.count_for_concept(&target, CTX);
        prop_assume!(count > 0);

        let mut ctl = SelectionController::new();
        ctl.navigate(Direction::Next, &target, &index, CTX);
        let start = ctl.selected_highlight_id().map(String::from);
        for _ in 0..count {
            ctl.navigate(Direction::Next, &target, &index, CTX);
        }
        prop_assert_eq!(ctl.selected_highlight_id().map(String::from), start.clone());

        for _ in 0..count {
            ctl.navigate(Direction::Prev, &target, &index, CTX);
        }
        prop_assert_eq!(ctl.selected_highlight_id().map(String::from), start);
    }

    #[test]
    fn concept_toggle_twice_clears((_, records) in text_and_records(), target in concept()) {
        let index = index_of(records);
        let mut ctl = SelectionController::new();
        ctl.select_concept(&target, &index, CTX);
        let auto = ctl.selected_highlight_id().is_some();
        prop_assert_eq!(auto, index.count_for_concept(&target, CTX) == 1);

        ctl.select_concept(&target, &index, CTX);
        prop_assert!(ctl.state().is_empty());
    }
}
