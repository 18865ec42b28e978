//! Per-context highlight lookup
//!
//! The analysis context holds the reference-document highlights, the
//! rewrite context holds the change records (rewritten-text view). Both lists
//! keep the order in which the upstream result presented them, which is the
//! order next/prev navigation walks.

use serde::{Deserialize, Serialize};
use shared_types::{HighlightRecord, InclusivityAnalysis, RewriteResult};

/// Which record list a lookup runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HighlightContext {
    /// Highlights found in the reference document
    Analysis,
    /// Change records produced by the rewrite
    Rewrite,
}

#[derive(Debug, Clone, Default)]
pub struct HighlightIndex {
    analysis: Vec<HighlightRecord>,
    rewrite: Vec<HighlightRecord>,
}

impl HighlightIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_analysis(&mut self, analysis: &InclusivityAnalysis) {
        self.analysis = analysis.records();
    }

    pub fn set_rewrite(&mut self, result: &RewriteResult) {
        self.rewrite = result.rewritten_records();
    }

    pub fn set_records(&mut self, context: HighlightContext, records: Vec<HighlightRecord>) {
        match context {
            HighlightContext::Analysis => self.analysis = records,
            HighlightContext::Rewrite => self.rewrite = records,
        }
    }

    pub fn clear(&mut self) {
        self.analysis.clear();
        self.rewrite.clear();
    }

    /// Full record list of a context, in source order
    pub fn records(&self, context: HighlightContext) -> &[HighlightRecord] {
        match context {
            HighlightContext::Analysis => &self.analysis,
            HighlightContext::Rewrite => &self.rewrite,
        }
    }

    /// Records evidencing `concept`, in source order
    ///
    /// An unknown concept yields an empty list.
    pub fn highlights_for_concept(
        &self,
        concept: &str,
        context: HighlightContext,
    ) -> Vec<&HighlightRecord> {
        self.records(context)
            .iter()
            .filter(|r| r.concept == concept)
            .collect()
    }

    pub fn count_for_concept(&self, concept: &str, context: HighlightContext) -> usize {
        self.records(context)
            .iter()
            .filter(|r| r.concept == concept)
            .count()
    }

    pub fn find(&self, id: &str, context: HighlightContext) -> Option<&HighlightRecord> {
        self.records(context).iter().find(|r| r.id == id)
    }
}

/// Position of `id` within an ordered highlight list
pub fn position_of(id: &str, highlights: &[&HighlightRecord]) -> Option<usize> {
    highlights.iter().position(|h| h.id == id)
}
