use thiserror::Error;

/// Errors raised while accepting results from the upstream AI collaborators
#[derive(Error, Debug)]
pub enum ContractError {
    #[error("Invalid result JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Result is missing text: {0}")]
    MissingText(&'static str),
}
