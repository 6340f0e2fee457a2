//! Summary assembly

use chrono::NaiveDate;
use docket_domain::{DocumentType, EntityMapping, Party, ProcessedDocument, SummaryRecord};

/// Assembles a [`SummaryRecord`] from resolved parts
///
/// Missing parts take their neutral values: `Unknown`, no parties, no date.
#[derive(Debug, Clone, Default)]
pub struct SummaryBuilder {
    document_type: DocumentType,
    parties: Vec<Party>,
    date_filed: Option<NaiveDate>,
}

impl SummaryBuilder {
    /// Start an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document type
    pub fn document_type(mut self, document_type: DocumentType) -> Self {
        self.document_type = document_type;
        self
    }

    /// Set the ordered party list
    pub fn parties(mut self, parties: Vec<Party>) -> Self {
        self.parties = parties;
        self
    }

    /// Set the filing date
    pub fn date_filed(mut self, date_filed: Option<NaiveDate>) -> Self {
        self.date_filed = date_filed;
        self
    }

    /// Build the summary record alone
    pub fn record(self) -> SummaryRecord {
        SummaryRecord::new(self.document_type, self.parties, self.date_filed)
    }

    /// Build the summary and pair it with the entities it came from
    pub fn build(self, entities: EntityMapping) -> ProcessedDocument {
        ProcessedDocument::new(self.record(), entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_neutral() {
        let record = SummaryBuilder::new().record();
        assert_eq!(record, SummaryRecord::empty());
        assert_eq!(record.document_type(), DocumentType::Unknown);
        assert!(record.parties_involved().is_empty());
        assert!(record.date_filed().is_none());
    }

    #[test]
    fn test_build_keeps_entities() {
        let date = NaiveDate::from_ymd_opt(2022, 7, 1);
        let doc = SummaryBuilder::new()
            .document_type(DocumentType::Motion)
            .parties(vec![Party::new("Johnathan Mitchell"), Party::new("johnathan mitchell")])
            .date_filed(date)
            .build(EntityMapping::new());

        assert_eq!(doc.summary().document_type(), DocumentType::Motion);
        assert_eq!(doc.summary().parties_involved().len(), 1);
        assert_eq!(doc.summary().date_filed(), date);
        assert!(doc.entities().is_empty());
    }
}
