//! Docket Domain Layer
//!
//! This crate contains the value types and trait interfaces shared by every
//! other Docket crate. It holds no business rules beyond the invariants the
//! types themselves enforce, and it performs no I/O.
//!
//! ## Key Concepts
//!
//! - **Entity**: A labeled mention extracted from document text
//! - **EntityMapping**: Entities grouped by category, in first-appearance order
//! - **DocumentType**: Closed taxonomy of legal document kinds (`Unknown` included)
//! - **Party**: A canonical, deduplicated participant name
//! - **SummaryRecord**: The single authoritative structured result of a run
//!
//! ## Architecture
//!
//! - Pure data types, no processing logic
//! - Collaborator capabilities (NER, date parsing, text extraction, LLMs)
//!   are described as traits; implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod date;
pub mod document_type;
pub mod entity;
pub mod party;
pub mod summary;
pub mod traits;

// Re-exports for convenience
pub use date::DateCandidate;
pub use document_type::DocumentType;
pub use entity::{Entity, EntityCategory, EntityMapping, Span};
pub use party::{collapse_whitespace, Party};
pub use summary::{ProcessedDocument, SummaryRecord};
