//! Document type module - closed taxonomy of legal document kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of legal document
///
/// `Unknown` is an ordinary value meaning "no classification evidence", never
/// an error or a missing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocumentType {
    /// Motion filed with a court (to dismiss, to vacate, ...)
    Motion,

    /// Court order or judgment
    Order,

    /// Complaint or petition initiating a case
    Complaint,

    /// Sworn affidavit or declaration
    Affidavit,

    /// Subpoena
    Subpoena,

    /// Notice of hearing, appearance, filing, ...
    Notice,

    /// Contract, lease or other agreement
    Contract,

    /// Correspondence
    Letter,

    /// No rule matched
    #[default]
    Unknown,
}

impl DocumentType {
    /// Every label in the taxonomy
    pub const ALL: [DocumentType; 9] = [
        DocumentType::Motion,
        DocumentType::Order,
        DocumentType::Complaint,
        DocumentType::Affidavit,
        DocumentType::Subpoena,
        DocumentType::Notice,
        DocumentType::Contract,
        DocumentType::Letter,
        DocumentType::Unknown,
    ];

    /// Get the label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Motion => "Motion",
            DocumentType::Order => "Order",
            DocumentType::Complaint => "Complaint",
            DocumentType::Affidavit => "Affidavit",
            DocumentType::Subpoena => "Subpoena",
            DocumentType::Notice => "Notice",
            DocumentType::Contract => "Contract",
            DocumentType::Letter => "Letter",
            DocumentType::Unknown => "Unknown",
        }
    }

    /// Label used in synthesized filenames (`Unknown` reads as "Document")
    pub fn short_name(&self) -> &'static str {
        match self {
            DocumentType::Unknown => "Document",
            other => other.as_str(),
        }
    }

    /// Parse a label case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }

    /// Whether this is the `Unknown` sentinel
    pub fn is_unknown(&self) -> bool {
        matches!(self, DocumentType::Unknown)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid document type: {}", s))
    }
}
