//! Rule-table document type classification

use crate::config::{ClassifierConfig, RuleConfig};
use docket_domain::DocumentType;
use regex::{Regex, RegexBuilder};

/// Outcome of a successful rule match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Label of the winning rule
    pub label: DocumentType,
    /// Position of the rule in the table
    pub rule_index: usize,
    /// Text that triggered the rule
    pub trigger: String,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    label: DocumentType,
    triggers: Vec<Regex>,
}

/// Classifies document text against an ordered, immutable rule table
///
/// Rules are evaluated in table order and the first rule with any matching
/// trigger wins, so table position is the only tie-break between labels.
#[derive(Debug, Clone)]
pub struct DocumentTypeClassifier {
    rules: Vec<CompiledRule>,
}

impl DocumentTypeClassifier {
    /// Compile a rule table
    ///
    /// Fails on empty or reserved labels, rules without triggers, and
    /// patterns that are not valid regular expressions.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, String> {
        let rules = config
            .rules
            .iter()
            .enumerate()
            .map(|(idx, rule)| compile_rule(idx, rule))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    /// Classify text; `Unknown` when no rule matches
    pub fn classify(&self, text: &str) -> DocumentType {
        self.explain(text)
            .map(|m| m.label)
            .unwrap_or(DocumentType::Unknown)
    }

    /// The first matching rule and the text that triggered it
    pub fn explain(&self, text: &str) -> Option<RuleMatch> {
        self.rules.iter().enumerate().find_map(|(rule_index, rule)| {
            rule.triggers.iter().find_map(|trigger| {
                trigger.find(text).map(|m| RuleMatch {
                    label: rule.label,
                    rule_index,
                    trigger: m.as_str().to_string(),
                })
            })
        })
    }

    /// Labels in priority order
    pub fn labels(&self) -> impl Iterator<Item = DocumentType> + '_ {
        self.rules.iter().map(|r| r.label)
    }
}

impl Default for DocumentTypeClassifier {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default()).expect("built-in rule table compiles")
    }
}

fn compile_rule(idx: usize, rule: &RuleConfig) -> Result<CompiledRule, String> {
    if rule.label.is_unknown() {
        return Err(format!("classifier rule {}: label Unknown is reserved", idx));
    }
    if rule.phrases.is_empty() && rule.patterns.is_empty() {
        return Err(format!(
            "classifier rule {} ({}): no phrases or patterns",
            idx, rule.label
        ));
    }

    let mut triggers = Vec::with_capacity(rule.phrases.len() + rule.patterns.len());
    for phrase in &rule.phrases {
        let source = phrase_pattern(phrase).ok_or_else(|| {
            format!("classifier rule {} ({}): empty phrase", idx, rule.label)
        })?;
        triggers.push(build(&source).map_err(|e| {
            format!("classifier rule {} ({}): phrase '{}': {}", idx, rule.label, phrase, e)
        })?);
    }
    for pattern in &rule.patterns {
        triggers.push(build(pattern).map_err(|e| {
            format!("classifier rule {} ({}): pattern '{}': {}", idx, rule.label, pattern, e)
        })?);
    }

    Ok(CompiledRule {
        label: rule.label,
        triggers,
    })
}

fn build(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Literal phrase to regex: word-bounded, any whitespace between words
fn phrase_pattern(phrase: &str) -> Option<String> {
    let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        return None;
    }

    let trimmed = phrase.trim();
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut pattern = String::new();
    if trimmed.starts_with(is_word) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&words.join(r"\s+"));
    if trimmed.ends_with(is_word) {
        pattern.push_str(r"\b");
    }
    Some(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_outranks_complaint() {
        let classifier = DocumentTypeClassifier::default();
        let text = "DEFENDANT'S MOTION TO VACATE the default entered on the Complaint.";
        assert_eq!(classifier.classify(text), DocumentType::Motion);

        let explained = classifier.explain(text).unwrap();
        assert_eq!(explained.rule_index, 1);
        assert_eq!(explained.trigger.to_lowercase(), "motion to vacate");
    }

    #[test]
    fn test_order_on_a_motion_is_order() {
        let classifier = DocumentTypeClassifier::default();
        let text = "ORDER GRANTING DEFENDANT'S MOTION TO DISMISS\n\n\
                    IT IS HEREBY ORDERED AND ADJUDGED that the motion is granted.";
        assert_eq!(classifier.classify(text), DocumentType::Order);

        let caption_only = "FINAL JUDGMENT\n\nThis cause came before the Court on Plaintiff's motion.";
        assert_eq!(classifier.classify(caption_only), DocumentType::Order);
    }

    #[test]
    fn test_motion_requesting_an_order_stays_motion() {
        let classifier = DocumentTypeClassifier::default();
        let text = "MOTION FOR SUMMARY JUDGMENT\n\nPlaintiff asks the Court to enter an order granting \
                    final judgment in its favor.";
        assert_eq!(classifier.classify(text), DocumentType::Motion);
    }

    #[test]
    fn test_no_trigger_is_unknown() {
        let classifier = DocumentTypeClassifier::default();
        assert_eq!(
            classifier.classify("Grocery list: eggs, milk, bread."),
            DocumentType::Unknown
        );
        assert!(classifier.explain("").is_none());
    }

    #[test]
    fn test_phrase_spans_line_breaks() {
        let classifier = DocumentTypeClassifier::default();
        assert_eq!(
            classifier.classify("NOTICE\nOF   HEARING on the docket"),
            DocumentType::Notice
        );
    }

    #[test]
    fn test_phrases_respect_word_boundaries() {
        let classifier = DocumentTypeClassifier::default();
        // "promotional" contains "motion" but is not a motion
        assert_eq!(
            classifier.classify("A promotional flyer."),
            DocumentType::Unknown
        );
    }

    #[test]
    fn test_letter_pattern() {
        let classifier = DocumentTypeClassifier::default();
        assert_eq!(
            classifier.classify("Re: account\n\nDear Ms. Roe,\nPlease remit."),
            DocumentType::Letter
        );
    }

    #[test]
    fn test_table_order_is_the_tie_break() {
        let config = ClassifierConfig {
            rules: vec![
                RuleConfig {
                    label: DocumentType::Complaint,
                    phrases: vec!["complaint".into()],
                    patterns: vec![],
                },
                RuleConfig {
                    label: DocumentType::Motion,
                    phrases: vec!["motion".into()],
                    patterns: vec![],
                },
            ],
        };
        let classifier = DocumentTypeClassifier::from_config(&config).unwrap();
        let text = "Motion to dismiss the complaint";
        assert_eq!(classifier.classify(text), DocumentType::Complaint);
        assert_eq!(
            classifier.labels().collect::<Vec<_>>(),
            vec![DocumentType::Complaint, DocumentType::Motion]
        );
    }

    #[test]
    fn test_rule_without_triggers_rejected() {
        let config = ClassifierConfig {
            rules: vec![RuleConfig {
                label: DocumentType::Order,
                phrases: vec![],
                patterns: vec![],
            }],
        };
        assert!(DocumentTypeClassifier::from_config(&config).is_err());
    }

    #[test]
    fn test_blank_phrase_rejected() {
        let config = ClassifierConfig {
            rules: vec![RuleConfig {
                label: DocumentType::Order,
                phrases: vec!["   ".into()],
                patterns: vec![],
            }],
        };
        assert!(DocumentTypeClassifier::from_config(&config).is_err());
    }

    #[test]
    fn test_phrase_pattern_escapes_metacharacters() {
        assert_eq!(phrase_pattern("a.b  c").unwrap(), r"\ba\.b\s+c\b");
        assert_eq!(phrase_pattern("(see)").unwrap(), r"\(see\)");
    }
}
