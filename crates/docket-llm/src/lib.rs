//! Docket LLM Provider Layer
//!
//! Pluggable LLM backends used for model-based entity extraction.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `docket-domain`. The extractor crate wraps any provider in an entity
//! extractor that prompts for PERSON/ORG/DATE mentions and parses the reply.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use docket_llm::MockProvider;
//! use docket_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new(r#"{"PERSON": ["Jane Roe"]}"#);
//! let result = provider.generate("any prompt").unwrap();
//! assert!(result.contains("Jane Roe"));
//! ```

#![warn(missing_docs)]

pub mod ollama;

use docket_domain::traits::LlmProvider as LlmProviderTrait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns a fixed reply (or a fixed failure) without any network calls. An
/// optional delay makes it possible to exercise extraction timeouts.
///
/// # Examples
///
/// ```
/// use docket_llm::MockProvider;
/// use docket_domain::traits::LlmProvider;
///
/// let provider = MockProvider::failing("model offline");
/// assert!(provider.generate("prompt").is_err());
/// assert_eq!(provider.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    reply: Result<String, String>,
    delay: Option<Duration>,
    call_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a MockProvider that answers every prompt with `response`
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            reply: Ok(response.into()),
            delay: None,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a MockProvider whose every call fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            delay: None,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sleep for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, _prompt: &str) -> Result<String, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        self.reply.clone().map_err(LlmError::Other)
    }

    fn generate_structured(&self, prompt: &str, _schema: &str) -> Result<String, Self::Error> {
        self.generate(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_fixed_reply() {
        let provider = MockProvider::new("Test response");
        assert_eq!(provider.generate("any prompt").unwrap(), "Test response");
        assert_eq!(provider.generate("other prompt").unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.generate("prompt1").unwrap();
        provider.generate_structured("prompt2", "{}").unwrap();
        assert_eq!(provider.call_count(), 2);
    }

    #[test]
    fn test_mock_provider_error() {
        let provider = MockProvider::failing("boom");
        let result = provider.generate("bad prompt");
        assert!(matches!(result, Err(LlmError::Other(msg)) if msg == "boom"));
    }

    #[test]
    fn test_mock_provider_clone_shares_count() {
        let provider1 = MockProvider::default();
        let provider2 = provider1.clone();

        provider1.generate("test").unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
