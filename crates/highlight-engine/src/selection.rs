//! Selection state machine
//!
//! [`SelectionController`] is the only writer of [`SelectionState`]. Every
//! transition leaves the state consistent: a selected highlight always
//! belongs to the selected concept when one is set.

use crate::index::{position_of, HighlightContext, HighlightIndex};
use serde::Serialize;
use tracing::debug;

/// Currently selected concept filter and highlight
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub selected_concept: Option<String>,
    pub selected_highlight_id: Option<String>,
}

impl SelectionState {
    pub fn is_empty(&self) -> bool {
        self.selected_concept.is_none() && self.selected_highlight_id.is_none()
    }
}

/// Direction for cycling through a concept's highlights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: SelectionState,
    // Disclosure panel showing the derived system instruction
    instruction_expanded: bool,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn selected_concept(&self) -> Option<&str> {
        self.state.selected_concept.as_deref()
    }

    pub fn selected_highlight_id(&self) -> Option<&str> {
        self.state.selected_highlight_id.as_deref()
    }

    pub fn is_instruction_expanded(&self) -> bool {
        self.instruction_expanded
    }

    /// Toggle the instruction panel; Selection State is untouched
    pub fn toggle_instruction(&mut self) -> bool {
        self.instruction_expanded = !self.instruction_expanded;
        self.instruction_expanded
    }

    /// Concept button: toggles the filter, auto-selecting a sole highlight
    pub fn select_concept(
        &mut self,
        concept: &str,
        index: &HighlightIndex,
        context: HighlightContext,
    ) {
        if self.selected_concept() == Some(concept) {
            self.clear_concept();
            return;
        }

        let highlights = index.highlights_for_concept(concept, context);
        self.state.selected_concept = Some(concept.to_string());
        self.state.selected_highlight_id = match highlights.as_slice() {
            [only] => Some(only.id.clone()),
            _ => None,
        };
        debug!(
            concept,
            highlights = highlights.len(),
            auto_selected = self.state.selected_highlight_id.is_some(),
            "concept selected"
        );
    }

    pub fn clear_concept(&mut self) {
        self.state.selected_concept = None;
        self.state.selected_highlight_id = None;
    }

    /// Click on an annotated run
    ///
    /// Clicking the selected highlight deselects it. Otherwise the highlight
    /// becomes selected and the concept filter follows it. Ids unknown to
    /// the context are ignored.
    pub fn click_highlight(
        &mut self,
        id: &str,
        index: &HighlightIndex,
        context: HighlightContext,
    ) {
        let Some(record) = index.find(id, context) else {
            debug!(id, "click on unknown highlight ignored");
            return;
        };

        if self.selected_highlight_id() == Some(id) {
            self.state.selected_highlight_id = None;
            return;
        }

        self.state.selected_highlight_id = Some(record.id.clone());
        if self.selected_concept() != Some(record.concept.as_str()) {
            self.state.selected_concept = Some(record.concept.clone());
        }
    }

    /// Step to the next or previous highlight of `concept`, wrapping around
    pub fn navigate(
        &mut self,
        direction: Direction,
        concept: &str,
        index: &HighlightIndex,
        context: HighlightContext,
    ) {
        let highlights = index.highlights_for_concept(concept, context);
        if highlights.is_empty() {
            return;
        }

        // -1 when nothing (or a highlight outside this concept) is selected
        let len = highlights.len() as isize;
        let current = self
            .selected_highlight_id()
            .and_then(|id| position_of(id, &highlights))
            .map_or(-1, |i| i as isize);
        let target = match direction {
            Direction::Next => (current + 1).rem_euclid(len),
            Direction::Prev => (current - 1 + len).rem_euclid(len),
        };

        self.state.selected_highlight_id = Some(highlights[target as usize].id.clone());
        if matches!(self.selected_concept(), Some(c) if c != concept) {
            self.state.selected_concept = Some(concept.to_string());
        }
    }

    pub fn next(&mut self, concept: &str, index: &HighlightIndex, context: HighlightContext) {
        self.navigate(Direction::Next, concept, index, context);
    }

    pub fn prev(&mut self, concept: &str, index: &HighlightIndex, context: HighlightContext) {
        self.navigate(Direction::Prev, concept, index, context);
    }

    /// Step change or full reset
    pub fn reset(&mut self) {
        self.state = SelectionState::default();
        self.instruction_expanded = false;
    }
}
