//! Wizard session state
//!
//! Holds the documents, the upstream results, and the one
//! [`SelectionController`] for the whole wizard. Which record list the
//! selection works against follows the current step: the analysis review
//! works on reference highlights, the result review on change records.

use crate::annotator::{active_items, annotate_with, AnnotatorConfig, Segment};
use crate::error::SessionError;
use crate::export::{export_file_name, word_document_html};
use crate::index::{position_of, HighlightContext, HighlightIndex};
use crate::palette::{ConceptColorMap, ConceptColors};
use crate::render::render_html;
use crate::selection::{Direction, SelectionController, SelectionState};
use serde::Serialize;
use shared_types::{
    CharacteristicDefinition, ContentChange, FileContent, HighlightRecord, InclusivityAnalysis,
    RewriteResult, VisualStyle, WizardStep,
};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// A rendered text area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    /// Reference document with analysis highlights
    Reference,
    /// Target document before the rewrite, original-side snippets
    Original,
    /// Rewritten document, rewritten-side snippets
    Rewritten,
}

impl Pane {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "reference" => Some(Pane::Reference),
            "original" => Some(Pane::Original),
            "rewritten" => Some(Pane::Rewritten),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedFile {
    pub name: String,
    pub content: FileContent,
}

/// Sidebar entry for one active concept
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptSummary {
    pub name: String,
    pub description: String,
    pub count: usize,
    pub colors: ConceptColors,
    pub is_selected: bool,
    pub nav_label: String,
}

/// Details panel content for the selected highlight
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SelectedDetail {
    Highlight {
        record: HighlightRecord,
        colors: ConceptColors,
    },
    Change {
        change: ContentChange,
        colors: ConceptColors,
    },
}

#[derive(Debug, Default)]
pub struct ReviewSession {
    step: WizardStep,
    reference: Option<NamedFile>,
    target: Option<NamedFile>,
    analysis: Option<InclusivityAnalysis>,
    result: Option<RewriteResult>,
    error: Option<String>,
    index: HighlightIndex,
    // Change records scoped to the original text (same ids as the index)
    original_records: Vec<HighlightRecord>,
    colors: ConceptColorMap,
    selection: SelectionController,
    config: AnnotatorConfig,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnnotatorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn analysis(&self) -> Option<&InclusivityAnalysis> {
        self.analysis.as_ref()
    }

    pub fn result(&self) -> Option<&RewriteResult> {
        self.result.as_ref()
    }

    pub fn reference(&self) -> Option<&NamedFile> {
        self.reference.as_ref()
    }

    pub fn target(&self) -> Option<&NamedFile> {
        self.target.as_ref()
    }

    pub fn index(&self) -> &HighlightIndex {
        &self.index
    }

    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    pub fn is_instruction_expanded(&self) -> bool {
        self.selection.is_instruction_expanded()
    }

    // ------------------------------------------------------------------
    // Wizard transitions
    // ------------------------------------------------------------------

    /// Move to `step`; every step change resets the selection
    pub fn go_to(&mut self, step: WizardStep) {
        debug!(from = ?self.step, to = ?step, "step change");
        self.step = step;
        self.selection.reset();
        self.refresh_colors();
    }

    pub fn set_reference(&mut self, name: &str, content: FileContent) {
        self.reference = Some(NamedFile {
            name: name.to_string(),
            content,
        });
        self.error = None;
    }

    pub fn set_target(&mut self, name: &str, content: FileContent) {
        self.target = Some(NamedFile {
            name: name.to_string(),
            content,
        });
        self.error = None;
    }

    /// Validate the reference and enter the analyzing step
    pub fn begin_analysis(&mut self) -> Result<&FileContent, SessionError> {
        if self.reference.as_ref().map_or(true, |f| f.content.is_empty()) {
            let err = SessionError::MissingReference;
            self.error = Some(err.to_string());
            return Err(err);
        }
        self.error = None;
        self.go_to(WizardStep::Analyzing);
        self.reference
            .as_ref()
            .map(|f| &f.content)
            .ok_or(SessionError::MissingReference)
    }

    /// Load an analysis; blank or repeated highlight ids are re-derived
    pub fn complete_analysis(&mut self, mut analysis: InclusivityAnalysis) {
        analysis.assign_ids();
        let defined: HashSet<&str> = analysis
            .characteristics
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        let orphans = analysis
            .highlights
            .iter()
            .filter(|h| !defined.contains(h.characteristic.as_str()))
            .count();
        if orphans > 0 {
            warn!(orphans, "highlights reference undefined characteristics");
        }
        info!(
            characteristics = analysis.characteristics.len(),
            highlights = analysis.highlights.len(),
            "analysis loaded"
        );

        self.index.set_analysis(&analysis);
        self.analysis = Some(analysis);
        self.go_to(WizardStep::ReviewAnalysis);
    }

    pub fn fail_analysis(&mut self, message: &str) {
        warn!(message, "analysis failed");
        self.error = Some(message.to_string());
        self.go_to(WizardStep::UploadReference);
    }

    /// Validate the target and enter the rewriting step
    ///
    /// Returns the target content and the system instruction to rewrite with.
    pub fn begin_rewrite(&mut self) -> Result<(&FileContent, &str), SessionError> {
        if self.target.as_ref().map_or(true, |f| f.content.is_empty()) {
            let err = SessionError::MissingTarget;
            self.error = Some(err.to_string());
            return Err(err);
        }
        if self.analysis.is_none() {
            return Err(SessionError::MissingAnalysis);
        }
        self.error = None;
        self.go_to(WizardStep::Rewriting);

        let target = self.target.as_ref().ok_or(SessionError::MissingTarget)?;
        let analysis = self.analysis.as_ref().ok_or(SessionError::MissingAnalysis)?;
        Ok((&target.content, analysis.system_instruction.as_str()))
    }

    /// Load a rewrite; blank or repeated change ids are re-derived
    pub fn complete_rewrite(&mut self, mut result: RewriteResult) {
        result.assign_ids();
        info!(changes = result.changes.len(), "rewrite loaded");
        self.index.set_rewrite(&result);
        self.original_records = result.original_records();
        self.result = Some(result);
        self.go_to(WizardStep::ReviewResult);
    }

    pub fn fail_rewrite(&mut self, message: &str) {
        warn!(message, "rewrite failed");
        self.error = Some(message.to_string());
        self.go_to(WizardStep::UploadTarget);
    }

    /// Back to the first step with every document cleared
    pub fn reset(&mut self) {
        self.reference = None;
        self.target = None;
        self.analysis = None;
        self.result = None;
        self.error = None;
        self.index.clear();
        self.original_records.clear();
        self.go_to(WizardStep::UploadReference);
    }

    // ------------------------------------------------------------------
    // Concepts and colors
    // ------------------------------------------------------------------

    /// Record list the current step works against
    pub fn context(&self) -> Option<HighlightContext> {
        match self.step {
            WizardStep::ReviewAnalysis if self.analysis.is_some() => {
                Some(HighlightContext::Analysis)
            }
            WizardStep::ReviewResult if self.result.is_some() => Some(HighlightContext::Rewrite),
            _ => None,
        }
    }

    /// Definitions shown in the sidebar for the current step
    ///
    /// The result review only lists concepts some change actually used.
    pub fn active_concepts(&self) -> Vec<&CharacteristicDefinition> {
        let Some(analysis) = self.analysis.as_ref() else {
            return Vec::new();
        };
        match self.context() {
            Some(HighlightContext::Analysis) => analysis.characteristics.iter().collect(),
            Some(HighlightContext::Rewrite) => {
                let used: HashSet<&str> = self
                    .index
                    .records(HighlightContext::Rewrite)
                    .iter()
                    .map(|r| r.concept.as_str())
                    .collect();
                analysis
                    .characteristics
                    .iter()
                    .filter(|d| used.contains(d.name.as_str()))
                    .collect()
            }
            None => Vec::new(),
        }
    }

    pub fn colors(&self) -> &ConceptColorMap {
        &self.colors
    }

    fn refresh_colors(&mut self) {
        let colors = ConceptColorMap::assign(self.active_concepts().iter().map(|d| &d.name));
        self.colors = colors;
    }

    pub fn concept_summaries(&self) -> Vec<ConceptSummary> {
        let Some(context) = self.context() else {
            return Vec::new();
        };
        let selected_id = self.selection.selected_highlight_id();

        self.active_concepts()
            .into_iter()
            .map(|def| {
                let highlights = self.index.highlights_for_concept(&def.name, context);
                let nav_label = match selected_id.and_then(|id| position_of(id, &highlights)) {
                    Some(i) => format!("{} / {}", i + 1, highlights.len()),
                    None => format!("{} instances", highlights.len()),
                };
                ConceptSummary {
                    name: def.name.clone(),
                    description: def.description.clone(),
                    count: highlights.len(),
                    colors: *self.colors.get(&def.name),
                    is_selected: self.selection.selected_concept() == Some(def.name.as_str()),
                    nav_label,
                }
            })
            .collect()
    }

    /// Rewritten document text, once a rewrite has loaded
    pub fn rewritten_text(&self) -> Option<&str> {
        self.result.as_ref().map(|r| r.rewritten_text.as_str())
    }

    /// Style for the result and export panes
    ///
    /// The rewrite's final layout wins; otherwise the reference's style.
    pub fn layout_style(&self) -> Option<&VisualStyle> {
        self.result
            .as_ref()
            .and_then(|r| r.final_layout_style.as_ref())
            .or_else(|| self.analysis.as_ref()?.visual_style.as_ref())
    }

    /// Tone during analysis review, summary during result review
    pub fn headline(&self) -> Option<&str> {
        match self.context()? {
            HighlightContext::Analysis => self.analysis.as_ref().map(|a| a.tone.as_str()),
            HighlightContext::Rewrite => self.result.as_ref().map(|r| r.summary.as_str()),
        }
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn select_concept(&mut self, concept: &str) {
        if let Some(context) = self.context() {
            self.selection.select_concept(concept, &self.index, context);
        }
    }

    pub fn clear_concept(&mut self) {
        if self.context().is_some() {
            self.selection.clear_concept();
        }
    }

    pub fn click_highlight(&mut self, id: &str) {
        if let Some(context) = self.context() {
            self.selection.click_highlight(id, &self.index, context);
        }
    }

    pub fn navigate(&mut self, direction: Direction, concept: &str) {
        if let Some(context) = self.context() {
            self.selection
                .navigate(direction, concept, &self.index, context);
        }
    }

    pub fn toggle_instruction(&mut self) -> bool {
        self.selection.toggle_instruction()
    }

    pub fn selected_detail(&self) -> Option<SelectedDetail> {
        let id = self.selection.selected_highlight_id()?;
        match self.context()? {
            HighlightContext::Analysis => {
                let record = self.index.find(id, HighlightContext::Analysis)?;
                Some(SelectedDetail::Highlight {
                    colors: *self.colors.get(&record.concept),
                    record: record.clone(),
                })
            }
            HighlightContext::Rewrite => {
                let change = self
                    .result
                    .as_ref()?
                    .changes
                    .iter()
                    .find(|c| c.id == id)?;
                Some(SelectedDetail::Change {
                    colors: *self.colors.get(&change.concept),
                    change: change.clone(),
                })
            }
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Annotated segments of `pane`, filtered by the selected concept
    pub fn segments(&self, pane: Pane) -> Vec<Segment<'_>> {
        let (text, records) = match pane {
            Pane::Reference => match self.analysis.as_ref() {
                Some(a) => (
                    a.full_text.as_str(),
                    self.index.records(HighlightContext::Analysis),
                ),
                None => return Vec::new(),
            },
            Pane::Original => match self.result.as_ref() {
                Some(r) => (r.original_text.as_str(), self.original_records.as_slice()),
                None => return Vec::new(),
            },
            Pane::Rewritten => match self.result.as_ref() {
                Some(r) => (
                    r.rewritten_text.as_str(),
                    self.index.records(HighlightContext::Rewrite),
                ),
                None => return Vec::new(),
            },
        };

        let items = active_items(records, self.selection.selected_concept());
        annotate_with(
            text,
            &items,
            self.selection.selected_highlight_id(),
            &self.config,
        )
    }

    pub fn render_pane(&self, pane: Pane) -> String {
        render_html(&self.segments(pane), &self.colors)
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Word document for the rewritten text as `(file name, html)`
    pub fn export_word(&self, timestamp_ms: u64) -> Result<(String, String), SessionError> {
        let result = self.result.as_ref().ok_or(SessionError::NothingToExport)?;
        if result.rewritten_text.is_empty() {
            return Err(SessionError::NothingToExport);
        }
        info!(timestamp_ms, "exporting rewritten document");
        Ok((
            export_file_name(timestamp_ms, "doc"),
            word_document_html(&result.rewritten_text),
        ))
    }
}
