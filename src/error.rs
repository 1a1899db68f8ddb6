//! Error types for reading setup candidates
//!
//! Scoring, tiering and gating never fail; these only occur at the input edge.

/// Error types for the scorer's input edge
#[derive(Debug, thiserror::Error)]
pub enum ScorerError {
    #[error("Invalid flag bundle: {0}")]
    InvalidBundle(#[from] serde_json::Error),

    #[error("Flag bundle must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Failed to write evaluation: {0}")]
    Output(serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Setup symbol must be a string, got {0}")]
    InvalidSymbol(&'static str),
}

/// Result type for scorer edge operations
pub type Result<T> = std::result::Result<T, ScorerError>;
