//! CLI argument definitions and parsing.

use clap::Parser;
use std::path::PathBuf;

/// Docket - Extract metadata from legal documents and name them consistently.
#[derive(Debug, Parser)]
#[command(name = "docket")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Document to process (.txt or .pdf)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Rename the document to its synthesized filename
    #[arg(short, long)]
    pub rename: bool,

    /// Print the synthesized filename only; no export, no rename
    #[arg(long, conflicts_with = "rename")]
    pub dry_run: bool,

    /// Directory for the JSON export
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, env = "DOCKET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Read images and scanned PDFs with tesseract
    #[arg(long)]
    pub ocr: bool,

    /// Entity recognition backend
    #[arg(long, value_enum)]
    pub ner: Option<NerArg>,

    /// Model name for the ollama backend
    #[arg(long)]
    pub model: Option<String>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Summary and entity tables (default)
    Table,
    /// The JSON export document
    Json,
    /// Synthesized filename only
    Quiet,
}

/// Entity recognition backends.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum NerArg {
    /// Offline pattern recognizer
    Pattern,
    /// Local Ollama model
    Ollama,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<NerArg> for crate::config::NerBackend {
    fn from(ner: NerArg) -> Self {
        match ner {
            NerArg::Pattern => crate::config::NerBackend::Pattern,
            NerArg::Ollama => crate::config::NerBackend::Ollama,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NerBackend, OutputFormat};

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["docket", "--file", "motion.pdf", "--rename"]);
        assert_eq!(cli.file, PathBuf::from("motion.pdf"));
        assert!(cli.rename);
        assert!(!cli.dry_run);
        assert!(cli.format.is_none());
        assert!(!cli.ocr);
    }

    #[test]
    fn test_ocr_flag() {
        let cli = Cli::parse_from(["docket", "-f", "scan.png", "--ocr"]);
        assert!(cli.ocr);
    }

    #[test]
    fn test_file_is_required() {
        assert!(Cli::try_parse_from(["docket", "--rename"]).is_err());
    }

    #[test]
    fn test_dry_run_conflicts_with_rename() {
        assert!(Cli::try_parse_from(["docket", "-f", "a.txt", "--rename", "--dry-run"]).is_err());
    }

    #[test]
    fn test_value_enums() {
        let cli = Cli::parse_from([
            "docket", "-f", "a.txt", "--format", "json", "--ner", "ollama", "--model", "mistral",
        ]);
        let format: OutputFormat = cli.format.unwrap().into();
        let ner: NerBackend = cli.ner.unwrap().into();
        assert!(matches!(format, OutputFormat::Json));
        assert!(matches!(ner, NerBackend::Ollama));
        assert_eq!(cli.model.as_deref(), Some("mistral"));
    }
}
