//! WASM bindings for the inclusivity review wizard
//!
//! All wizard and selection state lives in Rust via `LensSession`.
//! JavaScript only performs uploads, calls the analysis and rewrite
//! services, and writes the returned HTML into the panes.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { LensSession } from './pkg/lens_wasm.js';
//!
//! await init();
//!
//! const session = new LensSession();
//! session.enableAutoFocus();
//! session.setReference("brand.txt", "text/plain", text, false);
//! const reference = session.beginAnalysis();
//! session.completeAnalysis(await analyze(reference));
//!
//! referencePane.innerHTML = session.renderPane("reference");
//! referencePane.onclick = (e) => {
//!   const id = e.target.closest("[data-highlight-id]")?.dataset.highlightId;
//!   if (id) session.clickHighlight(id);
//! };
//! ```

pub mod focus;
pub mod session;

use highlight_engine::{active_items, annotate_with, render_html, AnnotatorConfig, ConceptColorMap};
use shared_types::HighlightRecord;
use wasm_bindgen::prelude::*;

pub use focus::{FocusConfig, FocusPlanner, FocusReactor};
pub use session::{ExportedDocument, LensSession, RewriteRequest};

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Inclusivity lens WASM initialized".into());
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Render `text` with highlight records outside of a session
///
/// `records_json` is an array of `{ id, snippet, concept, explanation }`,
/// `concepts` lists concept names in color order.
#[wasm_bindgen]
pub fn render_highlighted_text(
    text: &str,
    records_json: &str,
    concepts: Vec<String>,
    concept_filter: Option<String>,
    selected_id: Option<String>,
) -> Result<String, JsValue> {
    render_highlighted_text_internal(
        text,
        records_json,
        &concepts,
        concept_filter.as_deref(),
        selected_id.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

fn render_highlighted_text_internal(
    text: &str,
    records_json: &str,
    concepts: &[String],
    concept_filter: Option<&str>,
    selected_id: Option<&str>,
) -> Result<String, String> {
    let records: Vec<HighlightRecord> = serde_json::from_str(records_json)
        .map_err(|e| format!("Failed to parse highlights: {}", e))?;
    let colors = ConceptColorMap::assign(concepts);
    let items = active_items(&records, concept_filter);
    let segments = annotate_with(text, &items, selected_id, &AnnotatorConfig::default());
    Ok(render_html(&segments, &colors))
}

/// Color tokens for each concept, in the order given
#[wasm_bindgen]
pub fn concept_colors(concepts: Vec<String>) -> Result<JsValue, JsValue> {
    let colors = ConceptColorMap::assign(&concepts);
    let tokens: Vec<_> = concepts.iter().map(|c| colors.get(c)).collect();
    serde_wasm_bindgen::to_value(&tokens)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
