//! Concept → color assignment
//!
//! Concepts are colored in the order their definitions arrive, cycling
//! through [`PALETTE`]. Unknown concepts render with the first entry.

use serde::Serialize;
use shared_types::CharacteristicDefinition;
use std::collections::HashMap;

/// Presentation tokens (CSS utility classes) for one concept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub ring: &'static str,
    pub border: &'static str,
    pub hover: &'static str,
    pub badge: &'static str,
    pub active_border: &'static str,
    pub dot: &'static str,
}

macro_rules! concept_colors {
    ($hue:literal) => {
        ConceptColors {
            bg: concat!("bg-", $hue, "-100"),
            text: concat!("text-", $hue, "-900"),
            ring: concat!("ring-", $hue, "-400"),
            border: concat!("border-", $hue, "-200"),
            hover: concat!("hover:bg-", $hue, "-200"),
            badge: concat!("bg-", $hue, "-50 text-", $hue, "-700"),
            active_border: concat!("border-", $hue, "-400"),
            dot: concat!("bg-", $hue, "-500"),
        }
    };
}

/// Distinct color sets, assigned by index modulo length
pub static PALETTE: [ConceptColors; 8] = [
    concept_colors!("blue"),
    concept_colors!("green"),
    concept_colors!("purple"),
    concept_colors!("orange"),
    concept_colors!("pink"),
    concept_colors!("teal"),
    concept_colors!("amber"),
    concept_colors!("cyan"),
];

/// Color set used for concepts missing from a map
pub fn fallback_colors() -> &'static ConceptColors {
    &PALETTE[0]
}

/// Mapping from concept name to its palette entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConceptColorMap {
    slots: HashMap<String, usize>,
}

impl ConceptColorMap {
    /// Assign palette entries to `names` in order
    pub fn assign<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut slots = HashMap::new();
        for (index, name) in names.into_iter().enumerate() {
            slots
                .entry(name.as_ref().to_string())
                .or_insert(index % PALETTE.len());
        }
        Self { slots }
    }

    pub fn from_definitions(definitions: &[CharacteristicDefinition]) -> Self {
        Self::assign(definitions.iter().map(|d| d.name.as_str()))
    }

    /// Colors for `concept`, falling back to the first palette entry
    pub fn get(&self, concept: &str) -> &'static ConceptColors {
        self.slots
            .get(concept)
            .map(|&slot| &PALETTE[slot])
            .unwrap_or_else(fallback_colors)
    }

    pub fn contains(&self, concept: &str) -> bool {
        self.slots.contains_key(concept)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
