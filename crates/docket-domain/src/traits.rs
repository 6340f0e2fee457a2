//! Trait definitions for external capabilities
//!
//! These traits define the boundaries between the extraction core and the
//! collaborators it depends on but does not implement.

use crate::EntityMapping;
use chrono::NaiveDate;
use std::path::Path;
use std::time::Instant;

/// Named-entity recognition over document text
///
/// Implemented by the application layer (docket-extractor)
pub trait EntityExtractor {
    /// Error type for extraction operations
    type Error;

    /// Extract labeled mentions from text
    fn extract(&self, text: &str) -> Result<EntityMapping, Self::Error>;

    /// Extract, giving up on remaining work once `deadline` has passed
    ///
    /// Extractors that make several slow calls should check the deadline
    /// between them. The default ignores it.
    fn extract_before(&self, text: &str, deadline: Instant) -> Result<EntityMapping, Self::Error> {
        let _ = deadline;
        self.extract(text)
    }
}

/// Parsing of free-form date expressions
///
/// A failed parse is per-candidate and reported as `None`, never an error.
pub trait DateParser {
    /// Parse a date expression into a calendar date
    fn parse(&self, raw: &str) -> Option<NaiveDate>;
}

/// Conversion of an input file into plain text
///
/// Implemented by the binary (docket-cli)
pub trait TextExtractor {
    /// Error type for text extraction
    type Error;

    /// Whether this extractor handles the given file
    fn supports(&self, path: &Path) -> bool;

    /// Read the file and return its text content
    fn extract_text(&self, path: &Path) -> Result<String, Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (docket-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate with structured output (if supported)
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;
}
