pub mod error;
pub mod ids;
pub mod types;

pub use error::ContractError;
pub use ids::derive_highlight_id;
pub use types::{
    CharacteristicDefinition, ContentChange, FileContent, HighlightRecord, InclusivityAnalysis,
    ReferenceHighlight, RewriteResult, VisualStyle, WizardStep,
};
