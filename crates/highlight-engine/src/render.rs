//! HTML rendering of annotated segments

use crate::annotator::{AnnotatedRun, Segment};
use crate::palette::ConceptColorMap;
use html_escape::{encode_double_quoted_attribute, encode_text};

const CONTAINER_CLASS: &str = "whitespace-pre-wrap leading-relaxed text-sm";
const RUN_CLASS: &str = "cursor-pointer transition-all duration-200 rounded px-0.5";
const SELECTED_CLASS: &str = "ring-2 font-semibold z-10 relative shadow-sm";
const IDLE_CLASS: &str = "opacity-90 hover:opacity-100 hover:shadow-sm";

/// Attribute carrying the highlight id on every annotated run
pub const HIGHLIGHT_ID_ATTR: &str = "data-highlight-id";

/// Render segments as a `<div>` of escaped text and clickable spans
///
/// Annotated runs carry their highlight id in [`HIGHLIGHT_ID_ATTR`] so a
/// delegated click handler can route clicks back to the selection
/// controller. Returns an empty string when there are no segments.
pub fn render_html(segments: &[Segment<'_>], colors: &ConceptColorMap) -> String {
    if segments.is_empty() {
        return String::new();
    }

    let mut html = format!(r#"<div class="{}">"#, CONTAINER_CLASS);
    for segment in segments {
        match segment {
            Segment::Plain { text } => html.push_str(&encode_text(text)),
            Segment::Annotated(run) => push_run(&mut html, run, colors),
        }
    }
    html.push_str("</div>");
    html
}

fn push_run(html: &mut String, run: &AnnotatedRun<'_>, colors: &ConceptColorMap) {
    let palette = colors.get(run.concept);
    let state_class = if run.is_selected {
        format!("{} {}", SELECTED_CLASS, palette.ring)
    } else {
        format!("{} {}", IDLE_CLASS, palette.hover)
    };
    let title = format!("{}: {}", run.concept, run.explanation);

    html.push_str(&format!(
        r#"<span {}="{}" data-concept="{}" class="{} {} {} {}" title="{}">{}</span>"#,
        HIGHLIGHT_ID_ATTR,
        encode_double_quoted_attribute(run.id),
        encode_double_quoted_attribute(run.concept),
        RUN_CLASS,
        palette.bg,
        palette.text,
        state_class,
        encode_double_quoted_attribute(&title),
        encode_text(run.text),
    ));
}
