//! Stateful wizard session for JavaScript
//!
//! Holds documents, results and the selection in Rust. JavaScript forwards
//! uploads, upstream responses and clicks, then re-renders from the getters.

use crate::focus::{FocusConfig, FocusReactor};
use highlight_engine::{AnnotatorConfig, Direction, Pane, ReviewSession, WORD_MIME_TYPE};
use serde::Serialize;
use shared_types::{FileContent, InclusivityAnalysis, RewriteResult, WizardStep};
use wasm_bindgen::prelude::*;

/// Payload JavaScript sends to the rewrite service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRequest {
    pub content: FileContent,
    pub system_instruction: String,
}

/// A finished export ready for download
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedDocument {
    pub file_name: String,
    pub mime_type: String,
    pub html: String,
}

#[wasm_bindgen]
pub struct LensSession {
    inner: ReviewSession,
    focus: Option<FocusReactor>,
}

impl Default for LensSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl LensSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: ReviewSession::new(),
            focus: None,
        }
    }

    /// Create a session with annotator settings, e.g. `{ minSnippetChars: 4 }`
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<LensSession, JsValue> {
        let config: AnnotatorConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid annotator config: {}", e)))?;
        Ok(Self {
            inner: ReviewSession::with_config(config),
            focus: None,
        })
    }

    /// Scroll to and emphasize the selected highlight after each change
    #[wasm_bindgen(js_name = enableAutoFocus)]
    pub fn enable_auto_focus(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: FocusConfig = if config.is_undefined() || config.is_null() {
            FocusConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid focus config: {}", e)))?
        };
        self.focus = Some(FocusReactor::new(config));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Wizard
    // ------------------------------------------------------------------

    /// Zero-based wizard step
    #[wasm_bindgen(getter)]
    pub fn step(&self) -> u32 {
        self.inner.step().index()
    }

    #[wasm_bindgen(getter, js_name = stepName)]
    pub fn step_name(&self) -> String {
        step_name(self.inner.step())
    }

    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.inner.error().map(String::from)
    }

    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&mut self, step: u32) -> Result<(), JsValue> {
        self.go_to_internal(step).map_err(|e| JsValue::from_str(&e))
    }

    fn go_to_internal(&mut self, step: u32) -> Result<(), String> {
        let step = WizardStep::from_index(step).ok_or_else(|| format!("Unknown step: {}", step))?;
        self.inner.go_to(step);
        self.sync_focus();
        Ok(())
    }

    #[wasm_bindgen(js_name = setReference)]
    pub fn set_reference(&mut self, name: &str, mime_type: &str, data: &str, is_binary: bool) {
        self.inner
            .set_reference(name, file_content(mime_type, data, is_binary));
    }

    #[wasm_bindgen(js_name = setTarget)]
    pub fn set_target(&mut self, name: &str, mime_type: &str, data: &str, is_binary: bool) {
        self.inner
            .set_target(name, file_content(mime_type, data, is_binary));
    }

    /// Enter the analyzing step, returning the reference to send upstream
    #[wasm_bindgen(js_name = beginAnalysis)]
    pub fn begin_analysis(&mut self) -> Result<JsValue, JsValue> {
        let content = self
            .inner
            .begin_analysis()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let value = serde_wasm_bindgen::to_value(content)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)));
        self.sync_focus();
        value
    }

    /// Load the analysis service's JSON response
    #[wasm_bindgen(js_name = completeAnalysis)]
    pub fn complete_analysis(&mut self, json: &str) -> Result<(), JsValue> {
        self.complete_analysis_internal(json)
            .map_err(|e| JsValue::from_str(&e))
    }

    fn complete_analysis_internal(&mut self, json: &str) -> Result<(), String> {
        match InclusivityAnalysis::from_json(json) {
            Ok(analysis) => {
                self.inner.complete_analysis(analysis);
                self.sync_focus();
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                self.fail_analysis(&message);
                Err(message)
            }
        }
    }

    #[wasm_bindgen(js_name = failAnalysis)]
    pub fn fail_analysis(&mut self, message: &str) {
        self.inner.fail_analysis(message);
        self.sync_focus();
    }

    /// Enter the rewriting step, returning the target and instruction
    #[wasm_bindgen(js_name = beginRewrite)]
    pub fn begin_rewrite(&mut self) -> Result<JsValue, JsValue> {
        let request = self
            .begin_rewrite_internal()
            .map_err(|e| JsValue::from_str(&e))?;
        serde_wasm_bindgen::to_value(&request)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    fn begin_rewrite_internal(&mut self) -> Result<RewriteRequest, String> {
        let request = self
            .inner
            .begin_rewrite()
            .map(|(content, instruction)| RewriteRequest {
                content: content.clone(),
                system_instruction: instruction.to_string(),
            })
            .map_err(|e| e.to_string())?;
        self.sync_focus();
        Ok(request)
    }

    /// Load the rewrite service's JSON response
    #[wasm_bindgen(js_name = completeRewrite)]
    pub fn complete_rewrite(&mut self, json: &str) -> Result<(), JsValue> {
        self.complete_rewrite_internal(json)
            .map_err(|e| JsValue::from_str(&e))
    }

    fn complete_rewrite_internal(&mut self, json: &str) -> Result<(), String> {
        match RewriteResult::from_json(json) {
            Ok(result) => {
                self.inner.complete_rewrite(result);
                self.sync_focus();
                Ok(())
            }
            Err(e) => {
                let message = e.to_string();
                self.fail_rewrite(&message);
                Err(message)
            }
        }
    }

    #[wasm_bindgen(js_name = failRewrite)]
    pub fn fail_rewrite(&mut self, message: &str) {
        self.inner.fail_rewrite(message);
        self.sync_focus();
    }

    pub fn reset(&mut self) {
        self.inner.reset();
        self.sync_focus();
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = selectConcept)]
    pub fn select_concept(&mut self, concept: &str) {
        self.inner.select_concept(concept);
        self.sync_focus();
    }

    #[wasm_bindgen(js_name = clearConcept)]
    pub fn clear_concept(&mut self) {
        self.inner.clear_concept();
        self.sync_focus();
    }

    /// Route a click on an annotated run (its `data-highlight-id`)
    #[wasm_bindgen(js_name = clickHighlight)]
    pub fn click_highlight(&mut self, id: &str) {
        self.inner.click_highlight(id);
        self.sync_focus();
    }

    pub fn next(&mut self, concept: &str) {
        self.inner.navigate(Direction::Next, concept);
        self.sync_focus();
    }

    pub fn prev(&mut self, concept: &str) {
        self.inner.navigate(Direction::Prev, concept);
        self.sync_focus();
    }

    #[wasm_bindgen(js_name = toggleInstruction)]
    pub fn toggle_instruction(&mut self) -> bool {
        self.inner.toggle_instruction()
    }

    #[wasm_bindgen(getter, js_name = instructionExpanded)]
    pub fn instruction_expanded(&self) -> bool {
        self.inner.is_instruction_expanded()
    }

    #[wasm_bindgen(getter, js_name = selectedConcept)]
    pub fn selected_concept(&self) -> Option<String> {
        self.inner.selection().selected_concept.clone()
    }

    #[wasm_bindgen(getter, js_name = selectedHighlightId)]
    pub fn selected_highlight_id(&self) -> Option<String> {
        self.inner.selection().selected_highlight_id.clone()
    }

    // ------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------

    /// Sidebar entries for the active concepts
    pub fn concepts(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.concept_summaries())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = selectedDetail)]
    pub fn selected_detail(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.selected_detail())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Tone during analysis review, summary during result review
    pub fn headline(&self) -> Option<String> {
        self.inner.headline().map(String::from)
    }

    #[wasm_bindgen(js_name = systemInstruction)]
    pub fn system_instruction(&self) -> Option<String> {
        self.inner
            .analysis()
            .map(|a| a.system_instruction.clone())
    }

    #[wasm_bindgen(getter, js_name = referenceFileName)]
    pub fn reference_file_name(&self) -> Option<String> {
        self.inner.reference().map(|f| f.name.clone())
    }

    #[wasm_bindgen(getter, js_name = targetFileName)]
    pub fn target_file_name(&self) -> Option<String> {
        self.inner.target().map(|f| f.name.clone())
    }

    /// True when the reference was extracted from a binary upload (PDF)
    #[wasm_bindgen(getter, js_name = referenceIsBinary)]
    pub fn reference_is_binary(&self) -> bool {
        self.inner.reference().is_some_and(|f| f.content.is_binary)
    }

    #[wasm_bindgen(getter, js_name = targetIsBinary)]
    pub fn target_is_binary(&self) -> bool {
        self.inner.target().is_some_and(|f| f.content.is_binary)
    }

    /// Plain rewritten text for copy-to-clipboard
    #[wasm_bindgen(getter, js_name = rewrittenText)]
    pub fn rewritten_text(&self) -> Option<String> {
        self.inner.rewritten_text().map(String::from)
    }

    /// Visual style for the result and export panes, or `undefined`
    #[wasm_bindgen(js_name = layoutStyle)]
    pub fn layout_style(&self) -> Result<JsValue, JsValue> {
        match self.inner.layout_style() {
            Some(style) => serde_wasm_bindgen::to_value(style)
                .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e))),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Annotated HTML for "reference", "original" or "rewritten"
    #[wasm_bindgen(js_name = renderPane)]
    pub fn render_pane(&self, pane: &str) -> Result<String, JsValue> {
        self.render_pane_internal(pane)
            .map_err(|e| JsValue::from_str(&e))
    }

    fn render_pane_internal(&self, pane: &str) -> Result<String, String> {
        let pane = Pane::parse(pane).ok_or_else(|| format!("Unknown pane: {}", pane))?;
        Ok(self.inner.render_pane(pane))
    }

    /// Annotated segments for custom rendering
    pub fn segments(&self, pane: &str) -> Result<JsValue, JsValue> {
        let pane =
            Pane::parse(pane).ok_or_else(|| JsValue::from_str(&format!("Unknown pane: {}", pane)))?;
        serde_wasm_bindgen::to_value(&self.inner.segments(pane))
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Build the Word download: `{ fileName, mimeType, html, href }`
    #[wasm_bindgen(js_name = exportWord)]
    pub fn export_word(&self) -> Result<JsValue, JsValue> {
        let exported = self
            .export_word_internal(js_sys::Date::now() as u64)
            .map_err(|e| JsValue::from_str(&e))?;
        let href = format!(
            "data:{};charset=utf-8,{}",
            exported.mime_type,
            String::from(js_sys::encode_uri_component(&exported.html))
        );

        let value = serde_wasm_bindgen::to_value(&exported)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))?;
        js_sys::Reflect::set(&value, &"href".into(), &href.into())?;
        Ok(value)
    }

    fn export_word_internal(&self, timestamp_ms: u64) -> Result<ExportedDocument, String> {
        let (file_name, html) = self
            .inner
            .export_word(timestamp_ms)
            .map_err(|e| e.to_string())?;
        Ok(ExportedDocument {
            file_name,
            mime_type: WORD_MIME_TYPE.to_string(),
            html,
        })
    }

    /// Hand the current selection to the focus reactor, if enabled
    fn sync_focus(&mut self) {
        let Some(reactor) = self.focus.as_mut() else {
            return;
        };
        let selected = self.inner.selection().selected_highlight_id.as_deref();
        if let Err(e) = reactor.observe(selected) {
            web_sys::console::warn_1(&e);
        }
    }
}

fn file_content(mime_type: &str, data: &str, is_binary: bool) -> FileContent {
    FileContent {
        mime_type: mime_type.to_string(),
        data: data.to_string(),
        is_binary,
    }
}

fn step_name(step: WizardStep) -> String {
    serde_json::to_value(step)
        .ok()
        .and_then(|v| v.as_str().map(String::from))
        .unwrap_or_else(|| format!("{:?}", step))
}
