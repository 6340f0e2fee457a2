//! Summary module - the structured result of one processing run

use crate::{DocumentType, EntityMapping, Party};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

/// Structured metadata describing one document
///
/// This is the single source of truth read by both the filename synthesizer
/// and the JSON exporter. It is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRecord {
    document_type: DocumentType,
    parties_involved: Vec<Party>,
    date_filed: Option<NaiveDate>,
}

impl SummaryRecord {
    /// Create a summary record
    ///
    /// Parties sharing a dedup key are collapsed onto their first occurrence,
    /// so the record never holds two equivalent parties.
    ///
    /// # Examples
    ///
    /// ```
    /// use docket_domain::{DocumentType, Party, SummaryRecord};
    ///
    /// let record = SummaryRecord::new(
    ///     DocumentType::Motion,
    ///     vec![Party::new("Jane Roe"), Party::new("JANE ROE")],
    ///     None,
    /// );
    /// assert_eq!(record.parties_involved().len(), 1);
    /// assert_eq!(record.primary_party().unwrap().name(), "Jane Roe");
    /// ```
    pub fn new(
        document_type: DocumentType,
        parties_involved: Vec<Party>,
        date_filed: Option<NaiveDate>,
    ) -> Self {
        let mut seen = HashSet::new();
        let parties_involved = parties_involved
            .into_iter()
            .filter(|p| seen.insert(p.dedup_key()))
            .collect();

        Self {
            document_type,
            parties_involved,
            date_filed,
        }
    }

    /// Record with no evidence at all: `Unknown` type, no parties, no date
    pub fn empty() -> Self {
        Self::new(DocumentType::Unknown, Vec::new(), None)
    }

    /// Detected document type
    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    /// Parties in first-appearance order
    pub fn parties_involved(&self) -> &[Party] {
        &self.parties_involved
    }

    /// First party, used as the filename subject
    pub fn primary_party(&self) -> Option<&Party> {
        self.parties_involved.first()
    }

    /// Earliest valid date in the document
    pub fn date_filed(&self) -> Option<NaiveDate> {
        self.date_filed
    }
}

/// A summary paired with the raw entity mapping it was derived from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    summary: SummaryRecord,
    entities: EntityMapping,
}

impl ProcessedDocument {
    /// Pair a summary with its entities
    pub fn new(summary: SummaryRecord, entities: EntityMapping) -> Self {
        Self { summary, entities }
    }

    /// The structured summary
    pub fn summary(&self) -> &SummaryRecord {
        &self.summary
    }

    /// Every entity the extractor produced, known categories or not
    pub fn entities(&self) -> &EntityMapping {
        &self.entities
    }
}
