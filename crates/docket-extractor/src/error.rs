//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
///
/// Only `Config` and `EmptyText` ever reach a pipeline caller. The remaining
/// variants describe capability failures, which the pipeline logs and turns
/// into missing data.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Invalid pipeline configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document text was empty or whitespace only
    #[error("Document text is empty")]
    EmptyText,

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Entity extraction capability failed
    #[error("Entity extraction failed: {0}")]
    Extraction(String),

    /// Entity extraction did not finish in time
    #[error("Entity extraction timed out after {0}s")]
    Timeout(u64),

    /// Malformed entity list in an LLM response
    #[error("Invalid entity format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
