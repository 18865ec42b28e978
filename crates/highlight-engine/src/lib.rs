//! Highlight mapping and selection for the inclusivity review wizard
//!
//! This crate turns analysis and rewrite results into annotated text and
//! keeps the concept/highlight selection consistent across every pane.
//!
//! - `annotator`: greedy first-occurrence overlay of snippets on a text
//! - `selection`: concept filter and highlight selection state machine
//! - `review`: wizard session tying documents, colors and selection together

pub mod annotator;
pub mod error;
pub mod export;
pub mod index;
pub mod palette;
pub mod render;
pub mod review;
pub mod selection;

pub use annotator::{
    active_items, annotate, annotate_with, AnnotatedRun, AnnotationItem, AnnotatorConfig, Segment,
    MIN_SNIPPET_CHARS,
};
pub use error::SessionError;
pub use export::{export_file_name, word_document_html, WORD_MIME_TYPE};
pub use index::{position_of, HighlightContext, HighlightIndex};
pub use palette::{ConceptColorMap, ConceptColors, PALETTE};
pub use render::{render_html, HIGHLIGHT_ID_ATTR};
pub use review::{ConceptSummary, NamedFile, Pane, ReviewSession, SelectedDetail};
pub use selection::{Direction, SelectionController, SelectionState};
