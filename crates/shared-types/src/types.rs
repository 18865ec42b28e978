use crate::error::ContractError;
use crate::ids::{IdAllocator, ANALYSIS_ID_PREFIX, CHANGE_ID_PREFIX};
use serde::{Deserialize, Serialize};

/// Steps of the reference → rewrite → export wizard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WizardStep {
    #[default]
    UploadReference,
    Analyzing,
    ReviewAnalysis,
    UploadTarget,
    Rewriting,
    ReviewResult,
    Export,
}

impl WizardStep {
    pub const ALL: [WizardStep; 7] = [
        WizardStep::UploadReference,
        WizardStep::Analyzing,
        WizardStep::ReviewAnalysis,
        WizardStep::UploadTarget,
        WizardStep::Rewriting,
        WizardStep::ReviewResult,
        WizardStep::Export,
    ];

    /// Zero-based position of the step in the wizard
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// An uploaded document as handed over by the file-ingestion collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    pub mime_type: String,
    pub data: String, // text content OR base64 string
    pub is_binary: bool,
}

impl FileContent {
    pub fn text(data: &str) -> Self {
        Self {
            mime_type: "text/plain".to_string(),
            data: data.to_string(),
            is_binary: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A concept (characteristic) detected in the reference document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacteristicDefinition {
    pub name: String,
    pub description: String,
}

/// Evidence snippet in the reference document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceHighlight {
    #[serde(default)]
    pub id: String,
    pub snippet: String,
    pub characteristic: String,
    pub explanation: String,
}

impl ReferenceHighlight {
    pub fn to_record(&self) -> HighlightRecord {
        HighlightRecord {
            id: self.id.clone(),
            snippet: self.snippet.clone(),
            concept: self.characteristic.clone(),
            explanation: self.explanation.clone(),
        }
    }
}

/// CSS hints inferred from a document's layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualStyle {
    pub font_family: String,
    pub font_size: String,
    pub line_height: String,
    pub text_color: String,
    pub background_color: String,
    pub text_align: String,
    pub spacing: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_dark_theme: Option<bool>,
}

/// Result of analysing the reference document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InclusivityAnalysis {
    pub full_text: String,
    pub characteristics: Vec<CharacteristicDefinition>,
    pub highlights: Vec<ReferenceHighlight>,
    #[serde(default)]
    pub system_instruction: String,
    pub tone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_style: Option<VisualStyle>,
}

impl InclusivityAnalysis {
    /// Parse an analysis result and give every highlight a stable id
    pub fn from_json(json: &str) -> Result<Self, ContractError> {
        let mut analysis: Self = serde_json::from_str(json)?;
        if analysis.full_text.is_empty() {
            return Err(ContractError::MissingText("fullText"));
        }
        analysis.assign_ids();
        Ok(analysis)
    }

    pub fn assign_ids(&mut self) {
        let mut ids = IdAllocator::default();
        for (position, h) in self.highlights.iter_mut().enumerate() {
            h.id = ids.resolve(
                &h.id,
                ANALYSIS_ID_PREFIX,
                &h.characteristic,
                &h.snippet,
                position,
            );
        }
    }

    pub fn records(&self) -> Vec<HighlightRecord> {
        self.highlights.iter().map(|h| h.to_record()).collect()
    }
}

/// One before/after change made by the rewrite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentChange {
    #[serde(default)]
    pub id: String,
    pub original_snippet: String,
    pub rewritten_snippet: String,
    pub concept: String,
    pub explanation: String,
}

impl ContentChange {
    /// View of the change scoped to the original text
    pub fn original_view(&self) -> HighlightRecord {
        HighlightRecord {
            id: self.id.clone(),
            snippet: self.original_snippet.clone(),
            concept: self.concept.clone(),
            explanation: self.explanation.clone(),
        }
    }

    /// View of the change scoped to the rewritten text
    pub fn rewritten_view(&self) -> HighlightRecord {
        HighlightRecord {
            id: self.id.clone(),
            snippet: self.rewritten_snippet.clone(),
            concept: self.concept.clone(),
            explanation: self.explanation.clone(),
        }
    }
}

/// Result of rewriting the target document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteResult {
    pub original_text: String,
    pub rewritten_text: String,
    pub summary: String,
    pub changes: Vec<ContentChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_layout_style: Option<VisualStyle>,
}

impl RewriteResult {
    /// Parse a rewrite result and give every change a stable id
    pub fn from_json(json: &str) -> Result<Self, ContractError> {
        let mut result: Self = serde_json::from_str(json)?;
        if result.rewritten_text.is_empty() {
            return Err(ContractError::MissingText("rewrittenText"));
        }
        result.assign_ids();
        Ok(result)
    }

    pub fn assign_ids(&mut self) {
        let mut ids = IdAllocator::default();
        for (position, c) in self.changes.iter_mut().enumerate() {
            // Keyed on the rewritten side, which is what the result view navigates
            c.id = ids.resolve(
                &c.id,
                CHANGE_ID_PREFIX,
                &c.concept,
                &c.rewritten_snippet,
                position,
            );
        }
    }

    pub fn original_records(&self) -> Vec<HighlightRecord> {
        self.changes.iter().map(|c| c.original_view()).collect()
    }

    pub fn rewritten_records(&self) -> Vec<HighlightRecord> {
        self.changes.iter().map(|c| c.rewritten_view()).collect()
    }
}

/// A snippet tied to the concept it evidences
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HighlightRecord {
    pub id: String,
    pub snippet: String,
    pub concept: String,
    pub explanation: String,
}

impl HighlightRecord {
    pub fn new(id: &str, snippet: &str, concept: &str, explanation: &str) -> Self {
        Self {
            id: id.to_string(),
            snippet: snippet.to_string(),
            concept: concept.to_string(),
            explanation: explanation.to_string(),
        }
    }
}
