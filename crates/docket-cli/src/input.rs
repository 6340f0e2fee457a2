//! Reading input documents as text.

use crate::error::{CliError, Result};
use crate::ocr::OcrTextExtractor;
use docket_domain::traits::TextExtractor;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Lowercased extension without the dot
fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// UTF-8 plain text files.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    type Error = CliError;

    fn supports(&self, path: &Path) -> bool {
        matches!(extension(path).as_deref(), Some("txt" | "text"))
    }

    fn extract_text(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .map_err(|e| CliError::Input(format!("Cannot read {}: {}", path.display(), e)))
    }
}

/// PDF files with a text layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    type Error = CliError;

    fn supports(&self, path: &Path) -> bool {
        extension(path).as_deref() == Some("pdf")
    }

    fn extract_text(&self, path: &Path) -> Result<String> {
        pdf_extract::extract_text(path)
            .map_err(|e| CliError::Input(format!("Cannot read PDF {}: {}", path.display(), e)))
    }
}

/// Picks the extractor matching the file extension.
///
/// With OCR enabled, images are recognized and PDFs without a text layer
/// fall back to page-by-page recognition.
#[derive(Debug, Clone, Default)]
pub struct DocumentReader {
    text: PlainTextExtractor,
    pdf: PdfTextExtractor,
    ocr: Option<OcrTextExtractor>,
}

impl DocumentReader {
    /// Create a reader for text and PDF files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also read images and scanned PDFs through OCR.
    pub fn with_ocr(mut self, ocr: OcrTextExtractor) -> Self {
        self.ocr = Some(ocr);
        self
    }

    /// Read the document, rejecting missing, unsupported and empty inputs.
    pub fn read(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(CliError::Input(format!(
                "File not found: {}",
                path.display()
            )));
        }
        if !path.is_file() {
            return Err(CliError::Input(format!("Not a file: {}", path.display())));
        }

        let text = self.extract_text(path)?;
        if text.trim().is_empty() {
            return Err(CliError::Input(format!(
                "No text could be extracted from {}",
                path.display()
            )));
        }

        debug!("Read {} bytes of text from {}", text.len(), path.display());
        Ok(text)
    }
}

impl TextExtractor for DocumentReader {
    type Error = CliError;

    fn supports(&self, path: &Path) -> bool {
        self.text.supports(path)
            || self.pdf.supports(path)
            || self.ocr.as_ref().is_some_and(|ocr| ocr.supports(path))
    }

    fn extract_text(&self, path: &Path) -> Result<String> {
        if self.text.supports(path) {
            self.text.extract_text(path)
        } else if self.pdf.supports(path) {
            let text = self.pdf.extract_text(path)?;
            match &self.ocr {
                Some(ocr) if text.trim().is_empty() => {
                    info!("No text layer in {}, falling back to OCR", path.display());
                    ocr.extract_pdf(path)
                }
                _ => Ok(text),
            }
        } else if let Some(ocr) = self.ocr.as_ref().filter(|ocr| ocr.supports(path)) {
            ocr.extract_text(path)
        } else {
            Err(CliError::UnsupportedFormat(
                extension(path).unwrap_or_else(|| "(none)".to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_text_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("motion.TXT");
        fs::write(&path, "MOTION TO DISMISS").unwrap();

        let text = DocumentReader::new().read(&path).unwrap();
        assert_eq!(text, "MOTION TO DISMISS");
    }

    #[test]
    fn test_missing_file() {
        let result = DocumentReader::new().read(Path::new("/nonexistent/motion.txt"));
        assert!(matches!(result, Err(CliError::Input(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.png");
        fs::write(&path, [0u8, 1, 2]).unwrap();

        let result = DocumentReader::new().read(&path);
        assert!(matches!(result, Err(CliError::UnsupportedFormat(ext)) if ext == "png"));
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blank.txt");
        fs::write(&path, "  \n ").unwrap();

        let result = DocumentReader::new().read(&path);
        assert!(matches!(result, Err(CliError::Input(_))));
    }

    #[test]
    fn test_images_go_through_ocr_when_enabled() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scan.png");
        fs::write(&path, [0u8, 1, 2]).unwrap();

        let reader = DocumentReader::new().with_ocr(OcrTextExtractor::with_commands(
            "docket-test-no-such-ocr",
            "docket-test-no-such-raster",
        ));
        assert!(reader.supports(&path));

        // Routed to the OCR engine, which is absent here
        let result = reader.read(&path);
        assert!(matches!(result, Err(CliError::Input(msg)) if msg.contains("docket-test-no-such-ocr")));
    }

    #[test]
    fn test_ocr_does_not_touch_text_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("motion.txt");
        fs::write(&path, "MOTION TO DISMISS").unwrap();

        let reader = DocumentReader::new().with_ocr(OcrTextExtractor::with_commands(
            "docket-test-no-such-ocr",
            "docket-test-no-such-raster",
        ));
        assert_eq!(reader.read(&path).unwrap(), "MOTION TO DISMISS");
    }

    #[test]
    fn test_supports() {
        let reader = DocumentReader::new();
        assert!(reader.supports(Path::new("a.pdf")));
        assert!(reader.supports(Path::new("a.txt")));
        assert!(!reader.supports(Path::new("a.docx")));
        assert!(!reader.supports(Path::new("README")));
        assert!(!reader.supports(Path::new("a.png")));
    }
}
