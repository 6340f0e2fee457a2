//! Core Pipeline implementation

use crate::classifier::DocumentTypeClassifier;
use crate::config::PipelineConfig;
use crate::dates::DateResolver;
use crate::error::ExtractorError;
use crate::filename::FilenameSynthesizer;
use crate::parties::PartyResolver;
use crate::summary::SummaryBuilder;
use chrono::NaiveDateTime;
use docket_domain::traits::EntityExtractor;
use docket_domain::{DocumentType, EntityMapping, ProcessedDocument, SummaryRecord};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Pipeline turns document text into a summary record and a filename
///
/// Entity extraction is the only fallible step. It runs on the blocking pool
/// under a timeout that is also handed to the extractor as a deadline, and
/// any failure degrades to an empty entity mapping.
/// Everything after it is deterministic.
pub struct Pipeline<E> {
    extractor: Arc<E>,
    classifier: DocumentTypeClassifier,
    parties: PartyResolver,
    dates: DateResolver,
    filenames: FilenameSynthesizer,
    config: PipelineConfig,
}

impl<E> Pipeline<E>
where
    E: EntityExtractor + Send + Sync + 'static,
    E::Error: std::fmt::Display,
{
    /// Create a new Pipeline, validating the configuration
    pub fn new(extractor: E, config: PipelineConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let classifier =
            DocumentTypeClassifier::from_config(&config.classifier).map_err(ExtractorError::Config)?;

        Ok(Self {
            extractor: Arc::new(extractor),
            classifier,
            parties: PartyResolver::new(&config.parties),
            dates: DateResolver::new(&config.dates),
            filenames: FilenameSynthesizer::new(&config.filename),
            config,
        })
    }

    /// Process one document's text
    ///
    /// Fails only on empty text. Missing evidence yields `Unknown`, no
    /// parties or no date rather than an error.
    pub async fn process(&self, text: &str) -> Result<ProcessedDocument, ExtractorError> {
        if text.trim().is_empty() {
            return Err(ExtractorError::EmptyText);
        }

        info!("Processing document, text length {}", text.len());

        let entities = match self.extract_entities(text).await {
            Ok(entities) => entities,
            Err(e) => {
                warn!("Entity extraction failed, continuing without entities: {}", e);
                EntityMapping::new()
            }
        };

        let document = self.summarize(text, entities);
        info!(
            "Summary: type {}, {} party(ies), date {}",
            document.summary().document_type(),
            document.summary().parties_involved().len(),
            document
                .summary()
                .date_filed()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "absent".to_string())
        );

        Ok(document)
    }

    /// Run the entity extractor with the configured bounds
    pub async fn extract_entities(&self, text: &str) -> Result<EntityMapping, ExtractorError> {
        let max = self.config.extraction.max_text_length;
        let bounded = truncate_at_char_boundary(text, max);
        if bounded.len() < text.len() {
            warn!(
                "Text length {} exceeds {}, extracting entities from the first {} bytes",
                text.len(),
                max,
                bounded.len()
            );
        }

        let extractor = Arc::clone(&self.extractor);
        let owned = bounded.to_string();
        let deadline = Instant::now() + self.config.extraction.timeout();

        // The extractor is synchronous and may block on I/O. Awaiting stops at
        // the timeout; the deadline stops the blocking task's remaining calls.
        let task = tokio::task::spawn_blocking(move || {
            extractor
                .extract_before(&owned, deadline)
                .map_err(|e| ExtractorError::Extraction(e.to_string()))
        });

        let entities = timeout(self.config.extraction.timeout(), task)
            .await
            .map_err(|_| ExtractorError::Timeout(self.config.extraction.timeout_secs))?
            .map_err(|e| ExtractorError::Extraction(format!("Task join error: {}", e)))??;

        debug!(
            "Extracted {} entities in {} categories",
            entities.len(),
            entities.categories().count()
        );
        Ok(entities)
    }

    /// Derive the summary from text and an already extracted mapping
    pub fn summarize(&self, text: &str, entities: EntityMapping) -> ProcessedDocument {
        let document_type = match self.classifier.explain(text) {
            Some(hit) => {
                debug!(
                    "Classified as {} by rule {} on '{}'",
                    hit.label, hit.rule_index, hit.trigger
                );
                hit.label
            }
            None => {
                debug!("No classifier rule matched");
                DocumentType::Unknown
            }
        };

        let parties = self.parties.resolve(&entities);
        let date_filed = self.dates.resolve(&entities);

        SummaryBuilder::new()
            .document_type(document_type)
            .parties(parties)
            .date_filed(date_filed)
            .build(entities)
    }

    /// Canonical filename for a summary
    pub fn filename_for(&self, record: &SummaryRecord, ext: &str) -> String {
        self.filenames.synthesize(record, ext)
    }

    /// Canonical filename for a summary, with a fixed fallback timestamp
    pub fn filename_for_at(&self, record: &SummaryRecord, ext: &str, now: NaiveDateTime) -> String {
        self.filenames.synthesize_at(record, ext, now)
    }

    /// The active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// The compiled classifier
    pub fn classifier(&self) -> &DocumentTypeClassifier {
        &self.classifier
    }
}

fn truncate_at_char_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternEntityExtractor;

    fn create_test_pipeline() -> Pipeline<PatternEntityExtractor> {
        Pipeline::new(PatternEntityExtractor::new(), PipelineConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let pipeline = create_test_pipeline();
        let result = pipeline.process("  \n\t ").await;
        assert!(matches!(result, Err(ExtractorError::EmptyText)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = PipelineConfig::default();
        config.extraction.timeout_secs = 0;
        let result = Pipeline::new(PatternEntityExtractor::new(), config);
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_summarize_without_entities() {
        let pipeline = create_test_pipeline();
        let doc = pipeline.summarize("AFFIDAVIT OF SERVICE", EntityMapping::new());
        assert_eq!(doc.summary().document_type(), DocumentType::Affidavit);
        assert!(doc.summary().parties_involved().is_empty());
        assert!(doc.summary().date_filed().is_none());
    }

    #[test]
    fn test_truncate_at_char_boundary() {
        assert_eq!(truncate_at_char_boundary("héllo", 2), "h");
        assert_eq!(truncate_at_char_boundary("héllo", 3), "hé");
        assert_eq!(truncate_at_char_boundary("hi", 10), "hi");
    }
}
