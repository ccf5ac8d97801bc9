use thiserror::Error;

/// The only failure the normalization pipeline can raise
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
