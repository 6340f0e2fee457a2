//! Optical character recognition through the `tesseract` command.
//!
//! Images are read directly. Scanned PDFs are rasterized with `pdftoppm`
//! first and each page image is recognized in order.

use crate::error::{CliError, Result};
use docket_domain::traits::TextExtractor;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tracing::{debug, info};

/// Default OCR engine command
pub const TESSERACT: &str = "tesseract";

/// Default PDF rasterizer command
pub const PDFTOPPM: &str = "pdftoppm";

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp", "gif"];

/// Extracts text from images and scanned PDFs with external tools.
#[derive(Debug, Clone)]
pub struct OcrTextExtractor {
    tesseract: PathBuf,
    pdftoppm: PathBuf,
}

impl OcrTextExtractor {
    /// Use `tesseract` and `pdftoppm` from `PATH`.
    pub fn new() -> Self {
        Self::with_commands(TESSERACT, PDFTOPPM)
    }

    /// Use the given OCR and rasterizer commands.
    pub fn with_commands(tesseract: impl Into<PathBuf>, pdftoppm: impl Into<PathBuf>) -> Self {
        Self {
            tesseract: tesseract.into(),
            pdftoppm: pdftoppm.into(),
        }
    }

    /// Recognize every page of a PDF that has no text layer.
    pub fn extract_pdf(&self, path: &Path) -> Result<String> {
        let pages = TempDir::new()?;
        let prefix = pages.path().join("page");

        run(
            Command::new(&self.pdftoppm)
                .args(["-r", "300", "-png"])
                .arg(path)
                .arg(&prefix),
            &self.pdftoppm,
        )?;

        let mut images: Vec<PathBuf> = fs::read_dir(pages.path())?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension() == Some(OsStr::new("png")))
            .collect();
        // pdftoppm zero-pads page numbers, so name order is page order
        images.sort();
        info!("OCR over {} rasterized page(s) of {}", images.len(), path.display());

        let mut text = String::new();
        for image in &images {
            text.push_str(&self.recognize(image)?);
            text.push('\n');
        }
        Ok(text)
    }

    fn recognize(&self, image: &Path) -> Result<String> {
        let output = run(
            Command::new(&self.tesseract).arg(image).arg("stdout"),
            &self.tesseract,
        )?;
        debug!("OCR read {} bytes from {}", output.len(), image.display());
        Ok(output)
    }
}

impl Default for OcrTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for OcrTextExtractor {
    type Error = CliError;

    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
    }

    fn extract_text(&self, path: &Path) -> Result<String> {
        self.recognize(path)
    }
}

/// Run a command and return its stdout as text
fn run(command: &mut Command, program: &Path) -> Result<String> {
    let output = command.output().map_err(|e| {
        CliError::Input(format!("OCR needs '{}' on PATH: {}", program.display(), e))
    })?;

    if !output.status.success() {
        return Err(CliError::Input(format!(
            "'{}' failed ({}): {}",
            program.display(),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
