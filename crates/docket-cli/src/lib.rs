//! Docket CLI library.
//!
//! Reads a legal document, runs the extraction pipeline over its text, writes
//! the JSON export and optionally renames the document to its synthesized
//! filename.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod ocr;
pub mod output;
pub mod rename;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
pub use export::ExportDocument;
pub use input::DocumentReader;
pub use ocr::OcrTextExtractor;
pub use output::{Formatter, Report};
pub use rename::rename_document;
