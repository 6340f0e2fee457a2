//! Canonical filename synthesis

use crate::config::FilenameConfig;
use chrono::{Local, NaiveDateTime};
use docket_domain::SummaryRecord;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Subject used when a summary has no parties
pub const UNKNOWN_PARTY: &str = "Unknown Party";

/// Date segment used when a summary has no filing date
pub const UNDATED: &str = "Undated";

/// Longest name, in bytes, most filesystems accept (NAME_MAX)
pub const MAX_NAME_BYTES: usize = 255;

const SEPARATOR: &str = " - ";

const FORBIDDEN: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

static SEPARATOR_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*-(?:\s*-)+\s*").unwrap());

/// Builds `<Party> - <Type> - <Area> - <YYYY-MM-DD><ext>` filenames
#[derive(Debug, Clone)]
pub struct FilenameSynthesizer {
    max_length: usize,
    practice_area: String,
    fallback_name: String,
}

impl FilenameSynthesizer {
    /// Create a synthesizer from configuration
    pub fn new(config: &FilenameConfig) -> Self {
        Self {
            max_length: config.max_length,
            practice_area: config.practice_area.clone(),
            fallback_name: config.fallback_name.clone(),
        }
    }

    /// Synthesize a filename, timestamping any fallback with local time
    pub fn synthesize(&self, record: &SummaryRecord, ext: &str) -> String {
        self.synthesize_at(record, ext, Local::now().naive_local())
    }

    /// Synthesize a filename using `now` for any fallback timestamp
    pub fn synthesize_at(&self, record: &SummaryRecord, ext: &str, now: NaiveDateTime) -> String {
        let party = record
            .primary_party()
            .map(|p| p.name())
            .unwrap_or(UNKNOWN_PARTY);
        let date = record
            .date_filed()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| UNDATED.to_string());

        let raw_base = [
            party,
            record.document_type().short_name(),
            &self.practice_area,
            &date,
        ]
        .join(SEPARATOR);

        self.sanitize(&raw_base, ext, now)
    }

    /// Make `raw_base` + `ext` safe for common filesystems
    ///
    /// Reserved characters are removed, whitespace and separator runs are
    /// collapsed, and the base is truncated so the whole name fits
    /// `max_length` characters and [`MAX_NAME_BYTES`] bytes with the
    /// extension intact. An empty base is replaced by the fallback name and a
    /// timestamp.
    pub fn sanitize(&self, raw_base: &str, ext: &str, now: NaiveDateTime) -> String {
        let ext = normalize_extension(ext);
        let budget = Budget {
            chars: self.max_length.saturating_sub(ext.chars().count()),
            bytes: MAX_NAME_BYTES.saturating_sub(ext.len()),
        };

        let mut base = budget.truncate(&clean(raw_base));
        if base.is_empty() {
            let fallback = format!(
                "{}{}{}",
                self.fallback_name,
                SEPARATOR,
                now.format("%Y%m%d-%H%M%S")
            );
            debug!("Sanitized name was empty, using '{}'", fallback);
            base = budget.truncate(&clean(&fallback));
            if base.is_empty() {
                base = fallback;
            }
        }

        format!("{}{}", base, ext)
    }
}

impl Default for FilenameSynthesizer {
    fn default() -> Self {
        Self::new(&FilenameConfig::default())
    }
}

fn strip_reserved(text: &str) -> String {
    text.chars()
        .filter(|c| !FORBIDDEN.contains(c) && !c.is_control())
        .collect()
}

fn trim_edges(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '.' | '_'))
}

fn clean(raw: &str) -> String {
    let stripped = strip_reserved(raw);
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    let collapsed = SEPARATOR_RUN_RE.replace_all(&collapsed, SEPARATOR);
    trim_edges(&collapsed).to_string()
}

/// Room left for the base name
#[derive(Debug, Clone, Copy)]
struct Budget {
    chars: usize,
    bytes: usize,
}

impl Budget {
    /// Cut on a char boundary so both limits hold
    fn truncate(self, text: &str) -> String {
        let end = text
            .char_indices()
            .enumerate()
            .find(|&(count, (idx, c))| count >= self.chars || idx + c.len_utf8() > self.bytes)
            .map(|(_, (idx, _))| idx);

        match end {
            Some(idx) => trim_edges(&text[..idx]).to_string(),
            None => text.to_string(),
        }
    }
}

/// `pdf` → `.pdf`; reserved characters and whitespace are dropped
fn normalize_extension(ext: &str) -> String {
    let ext: String = strip_reserved(ext)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let ext = ext.trim_start_matches('.');
    if ext.is_empty() {
        String::new()
    } else {
        format!(".{}", ext)
    }
}
