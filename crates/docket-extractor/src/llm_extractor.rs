//! Model-backed entity extraction

use crate::chunking::TextChunker;
use crate::error::ExtractorError;
use crate::parser::{parse_entity_response, LabeledMention};
use crate::prompt::{PromptBuilder, ENTITY_SCHEMA};
use docket_domain::traits::{EntityExtractor, LlmProvider};
use docket_domain::{Entity, EntityCategory, EntityMapping};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Entity extractor that asks an LLM for labeled mentions
///
/// Long documents are split into chunks and each chunk is sent separately.
/// A chunk whose call or reply fails is skipped; extraction fails only when
/// every chunk does. Reported mentions are located in the source text to
/// recover their positions; a mention the model invented or rewrote keeps
/// no span.
pub struct LlmEntityExtractor<L> {
    llm_provider: L,
    chunker: TextChunker,
}

impl<L> LlmEntityExtractor<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    /// Create an extractor sending at most `max_chunk_size` bytes per call
    pub fn new(llm_provider: L, max_chunk_size: usize) -> Self {
        Self {
            llm_provider,
            chunker: TextChunker::new(max_chunk_size),
        }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &L {
        &self.llm_provider
    }
}

impl<L> EntityExtractor for LlmEntityExtractor<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    type Error = ExtractorError;

    fn extract(&self, text: &str) -> Result<EntityMapping, Self::Error> {
        self.run(text, None)
    }

    fn extract_before(&self, text: &str, deadline: Instant) -> Result<EntityMapping, Self::Error> {
        self.run(text, Some(deadline))
    }
}

impl<L> LlmEntityExtractor<L>
where
    L: LlmProvider,
    L::Error: std::fmt::Display,
{
    fn run(&self, text: &str, deadline: Option<Instant>) -> Result<EntityMapping, ExtractorError> {
        let chunks = self.chunker.chunk(text);
        info!("Extracting entities from {} chunk(s)", chunks.len());

        let mut entities = Vec::new();
        let mut last_error = None;
        let mut succeeded = 0;

        for (idx, chunk) in chunks.iter().enumerate() {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                warn!(
                    "Deadline reached, skipping {} of {} chunk(s)",
                    chunks.len() - idx,
                    chunks.len()
                );
                break;
            }

            match self.extract_chunk(idx, chunks.len(), chunk.text) {
                Ok(mentions) => {
                    succeeded += 1;
                    let mut locator = SpanLocator::new(chunk.text, chunk.offset);
                    entities.extend(
                        mentions
                            .into_iter()
                            .map(|(category, mention)| locator.locate(category, mention)),
                    );
                }
                Err(e) => {
                    warn!("Chunk {} of {} skipped: {}", idx + 1, chunks.len(), e);
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if succeeded == 0 => Err(e),
            _ => Ok(EntityMapping::from_entities(entities)),
        }
    }

    fn extract_chunk(
        &self,
        idx: usize,
        total: usize,
        text: &str,
    ) -> Result<Vec<LabeledMention>, ExtractorError> {
        let prompt = PromptBuilder::new(text).with_chunk(idx, total).build();
        debug!("Prompt length: {} chars", prompt.len());

        let response = self
            .llm_provider
            .generate_structured(&prompt, ENTITY_SCHEMA)
            .map_err(|e| ExtractorError::Llm(e.to_string()))?;
        debug!("LLM response length: {} chars", response.len());

        let mentions = parse_entity_response(&response)?;
        debug!("Chunk {}: {} mention(s)", idx + 1, mentions.len());
        Ok(mentions)
    }
}

/// Finds successive occurrences of mentions within one chunk
struct SpanLocator<'a> {
    text: &'a str,
    offset: usize,
    cursors: HashMap<String, usize>,
}

impl<'a> SpanLocator<'a> {
    fn new(text: &'a str, offset: usize) -> Self {
        Self {
            text,
            offset,
            cursors: HashMap::new(),
        }
    }

    /// Repeated mentions of the same text resolve to later occurrences
    fn locate(&mut self, category: EntityCategory, mention: String) -> Entity {
        let cursor = self.cursors.get(&mention).copied().unwrap_or(0);
        let found = self.text[cursor..]
            .find(&mention)
            .map(|pos| cursor + pos)
            .or_else(|| self.text.find(&mention));

        match found {
            Some(start) => {
                let end = start + mention.len();
                self.cursors.insert(mention.clone(), end);
                Entity::with_span(category, mention, self.offset + start, self.offset + end)
            }
            None => Entity::new(category, mention),
        }
    }
}
