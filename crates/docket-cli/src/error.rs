//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing, unreadable or empty input document
    #[error("Input error: {0}")]
    Input(String),

    /// Input extension is not handled
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Extraction pipeline error
    #[error(transparent)]
    Extractor(#[from] docket_extractor::ExtractorError),

    /// Rename refused or failed
    #[error("Rename failed: {0}")]
    Rename(String),
}
