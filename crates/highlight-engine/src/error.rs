use thiserror::Error;

/// Wizard actions attempted without the inputs they need
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Please provide reference content.")]
    MissingReference,

    #[error("Please provide content to rewrite.")]
    MissingTarget,

    #[error("Analyze a reference document before rewriting.")]
    MissingAnalysis,

    #[error("No rewritten document to export.")]
    NothingToExport,
}
