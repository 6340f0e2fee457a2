//! Docket Extractor
//!
//! Turns the text of a legal document into structured metadata and a
//! canonical filename.
//!
//! # Overview
//!
//! The extractor consumes raw document text and labeled mentions from an
//! entity extractor, then decides what kind of document it is, who the
//! parties are and when it was filed. The result is a [`SummaryRecord`] that
//! both the filename synthesizer and the JSON exporter read from.
//!
//! # Architecture
//!
//! ```text
//!                  ┌→ DocumentTypeClassifier ─┐
//! Text → Entities ─┼→ PartyResolver ──────────┼→ SummaryBuilder → FilenameSynthesizer
//!                  └→ DateResolver ───────────┘
//! ```
//!
//! # Key Features
//!
//! - **Rule-table Classification**: Ordered, configurable cue phrases and patterns
//! - **Party Resolution**: Normalization, noise filtering, case-insensitive dedup
//! - **Filing Date**: Earliest plausible date among all date mentions
//! - **Safe Filenames**: Reserved characters stripped, length bounded, fallback names
//! - **Pluggable NER**: Offline pattern recognizer or any [`LlmProvider`]
//!
//! # Example Usage
//!
//! ```no_run
//! use docket_extractor::{PatternEntityExtractor, Pipeline, PipelineConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::new(PatternEntityExtractor::new(), PipelineConfig::default())?;
//!
//! let doc = pipeline
//!     .process("MOTION TO DISMISS. Defendant Johnathan Mitchell, July 1, 2022.")
//!     .await?;
//!
//! println!("Type: {}", doc.summary().document_type());
//! println!("Filename: {}", pipeline.filename_for(doc.summary(), ".pdf"));
//! # Ok(())
//! # }
//! ```
//!
//! [`SummaryRecord`]: docket_domain::SummaryRecord
//! [`LlmProvider`]: docket_domain::traits::LlmProvider

#![warn(missing_docs)]

mod chunking;
mod classifier;
mod config;
mod dates;
mod error;
mod filename;
mod llm_extractor;
mod normalize;
mod parser;
mod parties;
mod patterns;
mod pipeline;
mod prompt;
mod summary;


pub use chunking::{Chunk, TextChunker};
pub use classifier::{DocumentTypeClassifier, RuleMatch};
pub use config::{
    ClassifierConfig, DateConfig, ExtractionConfig, FilenameConfig, PartyConfig,
    PipelineConfig, RuleConfig,
};
pub use dates::{ChronoDateParser, DateResolver};
pub use error::ExtractorError;
pub use filename::{FilenameSynthesizer, MAX_NAME_BYTES, UNDATED, UNKNOWN_PARTY};
pub use llm_extractor::LlmEntityExtractor;
pub use normalize::normalize_mention;
pub use parser::{parse_entity_response, LabeledMention};
pub use parties::PartyResolver;
pub use patterns::PatternEntityExtractor;
pub use pipeline::Pipeline;
pub use summary::SummaryBuilder;
