//! Configuration for the extraction pipeline

use crate::classifier::DocumentTypeClassifier;
use docket_domain::DocumentType;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One classifier rule: a label and the cues that select it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Label assigned when any trigger matches
    pub label: DocumentType,

    /// Literal phrases, matched case-insensitively on word boundaries
    #[serde(default)]
    pub phrases: Vec<String>,

    /// Case-insensitive regular expressions
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl RuleConfig {
    fn new(label: DocumentType, phrases: &[&str]) -> Self {
        Self {
            label,
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
            patterns: Vec::new(),
        }
    }

    fn with_patterns(mut self, patterns: &[&str]) -> Self {
        self.patterns = patterns.iter().map(|p| p.to_string()).collect();
        self
    }
}

/// Document type rules, highest priority first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Ordered rule table; the first matching rule wins
    pub rules: Vec<RuleConfig>,
}

impl Default for ClassifierConfig {
    /// Order > Motion > Affidavit > Complaint > Subpoena > Notice > Contract > Letter
    ///
    /// Order triggers are decretal language or a caption line opening with
    /// "order", so an order ruling on a motion is not labeled `Motion`.
    fn default() -> Self {
        Self {
            rules: vec![
                RuleConfig::new(
                    DocumentType::Order,
                    &["it is hereby ordered", "ordered and adjudged"],
                )
                .with_patterns(&[
                    r"(?m)^[ \t]*(?:final[ \t]+)?order[ \t]+(?:granting|denying|on|of|to|setting)\b",
                    r"(?m)^[ \t]*final[ \t]+judgment\b",
                ]),
                RuleConfig::new(
                    DocumentType::Motion,
                    &["motion to dismiss", "motion to vacate", "motion for", "motion"],
                ),
                RuleConfig::new(DocumentType::Affidavit, &["affidavit", "sworn statement"]),
                RuleConfig::new(DocumentType::Complaint, &["complaint", "petition for"]),
                RuleConfig::new(DocumentType::Subpoena, &["subpoena"]),
                RuleConfig::new(
                    DocumentType::Notice,
                    &["notice of hearing", "notice of appearance", "notice of"],
                ),
                RuleConfig::new(DocumentType::Contract, &["agreement", "contract"])
                    .with_patterns(&[r"\bthis\s+lease\b"]),
                RuleConfig::new(
                    DocumentType::Letter,
                    &["sincerely", "very truly yours", "to whom it may concern"],
                )
                .with_patterns(&[r"(?m)^\s*dear\s+\S"]),
            ],
        }
    }
}

/// Party filtering policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyConfig {
    /// Noise terms; a mention containing one as whole words is dropped
    pub blocklist: Vec<String>,

    /// Minimum characters in a normalized mention
    pub min_chars: usize,

    /// Minimum words in a normalized mention
    pub min_words: usize,

    /// Optional cap on the number of parties kept
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parties: Option<usize>,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            blocklist: [
                "court",
                "circuit court",
                "county court",
                "clerk",
                "clerk of court",
                "judge",
                "honorable",
                "magistrate",
                "plaintiff",
                "defendant",
                "petitioner",
                "respondent",
                "appellant",
                "appellee",
                "attorney",
                "counsel",
                "esq",
                "esquire",
                "notary public",
                "judicial circuit",
                "state of florida",
                "united states",
                "county",
                "division",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            min_chars: 3,
            min_words: 2,
            max_parties: None,
        }
    }
}

/// Validity window for filing dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateConfig {
    /// Earliest accepted year (inclusive)
    pub min_year: i32,

    /// Latest accepted year (inclusive)
    pub max_year: i32,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            min_year: 1900,
            max_year: 2100,
        }
    }
}

/// Filename synthesis settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilenameConfig {
    /// Maximum filename length in characters, extension included
    ///
    /// Names are also capped at 255 bytes whatever this is set to.
    pub max_length: usize,

    /// Fixed practice-area segment
    pub practice_area: String,

    /// Base name used when sanitization leaves nothing
    pub fallback_name: String,
}

impl Default for FilenameConfig {
    fn default() -> Self {
        Self {
            max_length: 180,
            practice_area: "Legal".to_string(),
            fallback_name: "Legal Document".to_string(),
        }
    }
}

/// Bounds on the entity-extraction capability call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Maximum time for the entity extraction call (seconds)
    pub timeout_secs: u64,

    /// Maximum bytes of text handed to the entity extractor
    pub max_text_length: usize,

    /// Maximum chunk size for model-backed extraction (bytes)
    pub max_chunk_size: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 60,
            max_text_length: 500_000,
            max_chunk_size: 8_000,
        }
    }
}

/// Configuration for the whole pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Document type rules
    pub classifier: ClassifierConfig,

    /// Party filtering
    pub parties: PartyConfig,

    /// Date validity window
    pub dates: DateConfig,

    /// Filename synthesis
    pub filename: FilenameConfig,

    /// Entity extraction bounds
    pub extraction: ExtractionConfig,
}

impl ExtractionConfig {
    /// Get the extraction timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl PipelineConfig {
    /// Strict preset: longer names required, modern dates only
    pub fn strict() -> Self {
        Self {
            parties: PartyConfig {
                min_chars: 5,
                max_parties: Some(4),
                ..PartyConfig::default()
            },
            dates: DateConfig {
                min_year: 1970,
                max_year: 2100,
            },
            ..Self::default()
        }
    }

    /// Lenient preset: single-word parties (e.g. "Acme") accepted
    pub fn lenient() -> Self {
        Self {
            parties: PartyConfig {
                min_chars: 2,
                min_words: 1,
                ..PartyConfig::default()
            },
            dates: DateConfig {
                min_year: 1800,
                max_year: 2200,
            },
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.dates.min_year > self.dates.max_year {
            return Err(format!(
                "dates.min_year {} exceeds dates.max_year {}",
                self.dates.min_year, self.dates.max_year
            ));
        }
        if self.filename.max_length < 16 {
            return Err("filename.max_length must be at least 16".to_string());
        }
        if self.extraction.timeout_secs == 0 {
            return Err("extraction.timeout_secs must be greater than 0".to_string());
        }
        if self.extraction.max_text_length == 0 {
            return Err("extraction.max_text_length must be greater than 0".to_string());
        }
        if self.extraction.max_chunk_size == 0 {
            return Err("extraction.max_chunk_size must be greater than 0".to_string());
        }
        if self.parties.max_parties == Some(0) {
            return Err("parties.max_parties must be greater than 0 when set".to_string());
        }
        DocumentTypeClassifier::from_config(&self.classifier).map(|_| ())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
