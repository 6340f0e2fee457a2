//! Party resolution from PERSON and ORG mentions

use crate::config::PartyConfig;
use crate::normalize::normalize_mention;
use docket_domain::{Entity, EntityCategory, EntityMapping, Party};
use std::collections::HashSet;
use tracing::debug;

/// Turns PERSON/ORG mentions into a deduplicated, ordered party list
///
/// 1. PERSON and ORG mentions are merged by document position
/// 2. Each mention is normalized
/// 3. Blocklisted and too-short mentions are dropped
/// 4. Mentions are deduplicated case-insensitively, first casing wins
#[derive(Debug, Clone)]
pub struct PartyResolver {
    /// Blocklist entries as word sequences, e.g. `["clerk", "of", "court"]`
    blocklist: Vec<Vec<String>>,
    min_chars: usize,
    min_words: usize,
    max_parties: Option<usize>,
}

impl PartyResolver {
    /// Create a resolver from configuration
    pub fn new(config: &PartyConfig) -> Self {
        let blocklist = config
            .blocklist
            .iter()
            .map(|term| words(term))
            .filter(|w| !w.is_empty())
            .collect();

        Self {
            blocklist,
            min_chars: config.min_chars,
            min_words: config.min_words,
            max_parties: config.max_parties,
        }
    }

    /// Resolve parties from an entity mapping
    pub fn resolve(&self, entities: &EntityMapping) -> Vec<Party> {
        let mut mentions: Vec<&Entity> = entities
            .get(&EntityCategory::Person)
            .iter()
            .chain(entities.get(&EntityCategory::Org))
            .collect();
        // Stable: PERSON precedes ORG on equal or missing positions
        mentions.sort_by_key(|e| e.position());

        self.resolve_mentions(mentions.into_iter().map(Entity::text))
    }

    /// Resolve parties from mentions already in document order
    pub fn resolve_mentions<'a, I>(&self, mentions: I) -> Vec<Party>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut parties = Vec::new();

        for raw in mentions {
            let Some(name) = normalize_mention(raw) else {
                continue;
            };
            if !self.accepts(&name) {
                debug!("Dropping party mention '{}'", name);
                continue;
            }
            if seen.insert(Party::key_for(&name)) {
                parties.push(Party::new(&name));
            }
            if self.max_parties.is_some_and(|max| parties.len() >= max) {
                break;
            }
        }

        parties
    }

    fn accepts(&self, name: &str) -> bool {
        if name.chars().count() < self.min_chars {
            return false;
        }
        if name.split_whitespace().count() < self.min_words {
            return false;
        }
        !self.is_blocked(name)
    }

    /// Whether any blocklist entry occurs in the name as whole words
    fn is_blocked(&self, name: &str) -> bool {
        let name_words = words(name);
        self.blocklist.iter().any(|term| {
            name_words
                .windows(term.len())
                .any(|window| window == term.as_slice())
        })
    }
}

impl Default for PartyResolver {
    fn default() -> Self {
        Self::new(&PartyConfig::default())
    }
}

/// Lowercased alphanumeric words
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(parties: &[Party]) -> Vec<&str> {
        parties.iter().map(Party::name).collect()
    }

    #[test]
    fn test_case_insensitive_dedup_keeps_first_casing() {
        let resolver = PartyResolver::default();
        let parties = resolver.resolve_mentions([
            "Johnathan Mitchell",
            "JOHNATHAN MITCHELL",
            "Hunter Warfield",
        ]);
        assert_eq!(names(&parties), vec!["Johnathan Mitchell", "Hunter Warfield"]);
    }

    #[test]
    fn test_merge_by_document_position() {
        let mapping = EntityMapping::from_entities(vec![
            Entity::with_span(EntityCategory::Person, "Jane Roe", 120, 128),
            Entity::with_span(EntityCategory::Org, "Hunter Warfield, Inc.", 10, 31),
            Entity::with_span(EntityCategory::Person, "Johnathan Mitchell", 50, 68),
        ]);
        let parties = PartyResolver::default().resolve(&mapping);
        assert_eq!(
            names(&parties),
            vec!["Hunter Warfield, Inc", "Johnathan Mitchell", "Jane Roe"]
        );
    }

    #[test]
    fn test_without_spans_person_precedes_org() {
        let mapping = EntityMapping::from_entities(vec![
            Entity::new(EntityCategory::Org, "Acme Holdings"),
            Entity::new(EntityCategory::Person, "Jane Roe"),
        ]);
        let parties = PartyResolver::default().resolve(&mapping);
        assert_eq!(names(&parties), vec!["Jane Roe", "Acme Holdings"]);
    }

    #[test]
    fn test_blocklist_and_thresholds() {
        let resolver = PartyResolver::default();
        let parties = resolver.resolve_mentions([
            "Circuit Court",
            "Clerk of Court",
            "Honorable Jane Smith",
            "Madonna",
            "Ed",
            "  Hunter \n Warfield  ",
        ]);
        assert_eq!(names(&parties), vec!["Hunter Warfield"]);
    }

    #[test]
    fn test_blocklist_matches_whole_words_only() {
        let resolver = PartyResolver::default();
        // "courtney" contains "court" but is not the word "court"
        let parties = resolver.resolve_mentions(["Courtney Love"]);
        assert_eq!(names(&parties), vec!["Courtney Love"]);
    }

    #[test]
    fn test_max_parties_cap() {
        let config = PartyConfig {
            max_parties: Some(2),
            ..PartyConfig::default()
        };
        let parties = PartyResolver::new(&config).resolve_mentions([
            "Jane Roe",
            "JANE ROE",
            "John Doe",
            "Hunter Warfield",
        ]);
        assert_eq!(names(&parties), vec!["Jane Roe", "John Doe"]);
    }

    #[test]
    fn test_no_mentions_is_empty() {
        let parties = PartyResolver::default().resolve(&EntityMapping::new());
        assert!(parties.is_empty());
    }

    proptest! {
        #[test]
        fn resolved_parties_are_unique(mentions in prop::collection::vec("[A-Za-z]{3,6} [A-Za-z]{3,6}", 0..16)) {
            let parties = PartyResolver::default()
                .resolve_mentions(mentions.iter().map(String::as_str));
            let keys: HashSet<_> = parties.iter().map(Party::dedup_key).collect();
            prop_assert_eq!(keys.len(), parties.len());
        }
    }
}
