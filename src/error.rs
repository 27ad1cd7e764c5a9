// Error types for pocketdict.
// Covers query validation, dictionary API failures, cache I/O, and configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictError {
    #[error("Please enter a word")]
    EmptyQuery,

    #[error("Word not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Dictionary service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid dictionary endpoint: {0}")]
    Endpoint(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl DictError {
    /// True for a blank query rejected before any lookup.
    pub fn is_validation(&self) -> bool {
        matches!(self, DictError::EmptyQuery)
    }

    /// True when the dictionary reported no entries for the word.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DictError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, DictError>;
