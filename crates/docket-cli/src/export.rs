//! JSON export of a processed document.

use crate::error::{CliError, Result};
use docket_domain::{EntityMapping, ProcessedDocument, SummaryRecord};
use docket_extractor::normalize_mention;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// The exported document: source filename, summary and raw entities.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    /// Original file name
    pub filename: String,

    /// Structured summary
    pub summary: &'a SummaryRecord,

    /// Normalized mentions per category
    pub entities: EntitySection,
}

impl<'a> ExportDocument<'a> {
    /// Build the export for a document read from `source`.
    pub fn new(source: &Path, document: &'a ProcessedDocument) -> Self {
        let filename = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            filename,
            summary: document.summary(),
            entities: EntitySection::from_mapping(document.entities()),
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Category → mentions, normalized and deduplicated, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntitySection(Vec<(String, Vec<String>)>);

impl EntitySection {
    /// Normalize every category of a mapping.
    pub fn from_mapping(entities: &EntityMapping) -> Self {
        let groups = entities
            .iter()
            .map(|(category, group)| {
                let mut seen = HashSet::new();
                let mentions = group
                    .iter()
                    .filter_map(|e| normalize_mention(e.text()))
                    .filter(|m| seen.insert(m.clone()))
                    .collect();
                (category.as_str().to_string(), mentions)
            })
            .collect();
        Self(groups)
    }

    /// Mentions of one category.
    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, mentions)| mentions.as_slice())
    }

    /// Iterate categories with their mentions.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(c, m)| (c.as_str(), m.as_slice()))
    }
}

impl Serialize for EntitySection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, mentions) in &self.0 {
            map.serialize_entry(category, mentions)?;
        }
        map.end()
    }
}

/// Path of the export for `source` inside `output_dir`.
pub fn export_path(output_dir: &Path, source: &Path) -> Result<PathBuf> {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| CliError::Input(format!("No file stem in {}", source.display())))?;
    Ok(output_dir.join(format!("{}_entities.json", stem)))
}

/// Write the export, creating the output directory as needed.
pub fn write_export(output_dir: &Path, export: &ExportDocument<'_>, source: &Path) -> Result<PathBuf> {
    let path = export_path(output_dir, source)?;
    fs::create_dir_all(output_dir)?;
    fs::write(&path, export.to_json()?)?;
    info!("Wrote {}", path.display());
    Ok(path)
}
