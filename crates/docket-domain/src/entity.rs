//! Entity module - labeled mentions produced by an entity extractor

use std::fmt;

/// Category of an extracted mention
///
/// The categories the pipeline consumes are closed variants. Anything else an
/// extractor produces is carried verbatim in `Other` and passed through to
/// the exported raw-entities section.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityCategory {
    /// A person's name
    Person,

    /// A company, agency, court or other organization
    Org,

    /// A date expression as written in the document
    Date,

    /// Any category the pipeline does not interpret
    Other(String),
}

impl EntityCategory {
    /// Map an extractor label onto a category
    ///
    /// Known labels match case-insensitively; unknown labels are kept as-is.
    ///
    /// # Examples
    ///
    /// ```
    /// use docket_domain::EntityCategory;
    ///
    /// assert_eq!(EntityCategory::from_label("person"), EntityCategory::Person);
    /// assert_eq!(EntityCategory::from_label("ORGANIZATION"), EntityCategory::Org);
    /// assert_eq!(
    ///     EntityCategory::from_label("GPE"),
    ///     EntityCategory::Other("GPE".to_string())
    /// );
    /// ```
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        match label.to_ascii_uppercase().as_str() {
            "PERSON" | "PER" => EntityCategory::Person,
            "ORG" | "ORGANIZATION" => EntityCategory::Org,
            "DATE" => EntityCategory::Date,
            _ => EntityCategory::Other(label.to_string()),
        }
    }

    /// Label used in exports
    pub fn as_str(&self) -> &str {
        match self {
            EntityCategory::Person => "PERSON",
            EntityCategory::Org => "ORG",
            EntityCategory::Date => "DATE",
            EntityCategory::Other(label) => label,
        }
    }

    /// Whether the pipeline interprets this category
    pub fn is_core(&self) -> bool {
        !matches!(self, EntityCategory::Other(_))
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte range of a mention within the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Inclusive start offset
    pub start: usize,
    /// Exclusive end offset
    pub end: usize,
}

/// A single labeled mention
///
/// Entities are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    category: EntityCategory,
    text: String,
    span: Option<Span>,
}

impl Entity {
    /// Create an entity without position information
    pub fn new(category: EntityCategory, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
            span: None,
        }
    }

    /// Create an entity located at `start..end` in the source text
    pub fn with_span(
        category: EntityCategory,
        text: impl Into<String>,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            category,
            text: text.into(),
            span: Some(Span { start, end }),
        }
    }

    /// Category of the mention
    pub fn category(&self) -> &EntityCategory {
        &self.category
    }

    /// Mention text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position in the source text, if the extractor reported one
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// Sort key for document order; entities without a span sort last
    pub fn position(&self) -> usize {
        self.span.map_or(usize::MAX, |s| s.start)
    }
}

/// Entities grouped by category
///
/// Within a category, entities are kept in first-appearance order. Categories
/// themselves are ordered by the position of their first mention.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMapping {
    groups: Vec<(EntityCategory, Vec<Entity>)>,
}

impl EntityMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from entities in any order
    ///
    /// Entities are stably sorted by span start, so mentions without a span
    /// keep their given relative order after all positioned mentions.
    pub fn from_entities<I>(entities: I) -> Self
    where
        I: IntoIterator<Item = Entity>,
    {
        let mut entities: Vec<Entity> = entities.into_iter().collect();
        entities.sort_by_key(Entity::position);

        let mut groups: Vec<(EntityCategory, Vec<Entity>)> = Vec::new();
        for entity in entities {
            match groups.iter_mut().find(|(c, _)| *c == entity.category) {
                Some((_, group)) => group.push(entity),
                None => groups.push((entity.category.clone(), vec![entity])),
            }
        }

        Self { groups }
    }

    /// Entities of one category (empty if the category never occurred)
    pub fn get(&self, category: &EntityCategory) -> &[Entity] {
        self.groups
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, group)| group.as_slice())
            .unwrap_or(&[])
    }

    /// Mention texts of one category, in document order
    pub fn texts(&self, category: &EntityCategory) -> Vec<&str> {
        self.get(category).iter().map(Entity::text).collect()
    }

    /// Iterate categories with their entities
    pub fn iter(&self) -> impl Iterator<Item = (&EntityCategory, &[Entity])> {
        self.groups.iter().map(|(c, group)| (c, group.as_slice()))
    }

    /// Categories present in the mapping
    pub fn categories(&self) -> impl Iterator<Item = &EntityCategory> {
        self.groups.iter().map(|(c, _)| c)
    }

    /// Total number of entities across all categories
    pub fn len(&self) -> usize {
        self.groups.iter().map(|(_, group)| group.len()).sum()
    }

    /// Whether the mapping holds no entities
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<Entity> for EntityMapping {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        Self::from_entities(iter)
    }
}
