//! Pattern-based entity extraction
//!
//! A deterministic, offline recognizer tuned for court filings. It finds
//! dates, case numbers and money amounts by shape, organizations by their
//! corporate suffix, and people as short runs of capitalized words that are
//! not legal boilerplate.

use docket_domain::traits::EntityExtractor;
use docket_domain::{Entity, EntityCategory, EntityMapping};
use regex::Regex;
use std::collections::HashSet;
use std::convert::Infallible;
use std::sync::LazyLock;

// =============================================================================
// PATTERNS
// =============================================================================

const MONTH: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

/// Month-name, day-first, numeric and ISO dates
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:\d{{1,2}}(?:st|nd|rd|th)?\s+(?:day\s+of\s+)?{m}\.?,?\s+\d{{4}}|{m}\.?\s+\d{{1,2}}(?:st|nd|rd|th)?,?\s+\d{{4}}|\d{{4}}-\d{{2}}-\d{{2}}|\d{{1,2}}[/-]\d{{1,2}}[/-](?:\d{{4}}|\d{{2}}))\b",
        m = MONTH
    ))
    .unwrap()
});

/// `Case No. 2022-CA-001234`; the number is capture group 1
static CASE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bcase\s+(?:no\.?|number|#)\s*:?\s*([a-z0-9][a-z0-9-]*[a-z0-9])").unwrap()
});

/// Dollar amounts with or without thousands separators
static MONEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\s?\d{1,3}(?:,\d{3})+(?:\.\d{2})?|\$\s?\d+(?:\.\d{2})?").unwrap()
});

/// Capitalized name followed by a corporate suffix
static ORG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b[A-Z][A-Za-z0-9&'-]*(?:[ \t]+(?:(?:of|and|&)[ \t]+)?[A-Z][A-Za-z0-9&'-]*)*,?[ \t]+(?i:LLC|L\.L\.C|Inc|Incorporated|Corp|Corporation|Company|Co|LLP|PLLC|P\.A|N\.A|Ltd|Bank|Association|Group|Partners|Holdings|Trust)\b\.?",
    )
    .unwrap()
});

const NAME_TOKEN: &str = r"(?:(?:Mr|Mrs|Ms|Dr)\.|[A-Z][A-Za-z'-]*[A-Za-z]|[A-Z]\.)";

/// Capitalized tokens on one line
static NAME_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\b{t}(?:[ \t]+{t})*", t = NAME_TOKEN)).unwrap());

static NAME_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(NAME_TOKEN).unwrap());

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").unwrap());

/// Capitalized words that never belong to a name
static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "the", "this", "that", "these", "those", "in", "on", "of", "for", "to",
        "by", "and", "or", "at", "as", "from", "with", "re", "v", "vs", "now", "comes",
        "dear", "sincerely", "respectfully", "submitted", "dated", "signed", "mr", "mrs",
        "ms", "dr", "hon", "honorable", "judge", "justice", "magistrate", "clerk",
        "plaintiff", "plaintiffs", "defendant", "defendants", "petitioner", "respondent",
        "appellant", "appellee", "attorney", "attorneys", "counsel", "esq", "esquire",
        "court", "circuit", "county", "district", "division", "judicial", "state",
        "florida", "united", "states", "case", "no", "number", "motion", "order",
        "ordered", "adjudged", "complaint", "affidavit", "subpoena", "notice", "hearing",
        "petition", "agreement", "contract", "lease", "exhibit", "page", "certificate",
        "service", "january", "february", "march", "april", "may", "june", "july",
        "august", "september", "october", "november", "december", "jan", "feb", "mar",
        "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "monday",
        "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "summary",
        "judgment", "judgement", "final", "partial", "default", "relief", "memorandum", "law",
        "support", "opposition", "response", "reply", "emergency", "temporary", "injunction",
        "dismiss", "vacate", "amended", "verified", "answer", "counterclaim", "discovery",
        "request", "requests", "production", "interrogatories", "admissions", "sanctions",
        "damages", "eviction", "possession", "fees", "costs", "objection", "stipulation",
        "settlement", "entry", "trial", "jury", "demand", "proposed", "writ", "execution",
    ]
    .into_iter()
    .collect()
});

/// A name directly followed by one of these is a place or an institution
const INSTITUTION_WORDS: &[&str] = &["court", "county", "circuit", "district", "division"];

/// Words that make an all-capitalized line a document title
const TITLE_WORDS: &[&str] = &[
    "motion", "order", "judgment", "complaint", "affidavit", "notice", "petition",
    "memorandum", "subpoena", "answer", "stipulation",
];

/// Lowercase words allowed inside a title-case heading
const TITLE_CONNECTORS: &[&str] = &["a", "an", "the", "of", "for", "to", "and", "or", "in", "on", "by"];

const STATES: &[&str] = &[
    "alabama", "alaska", "arizona", "arkansas", "california", "colorado", "connecticut",
    "delaware", "district of columbia", "florida", "georgia", "hawaii", "idaho", "illinois",
    "indiana", "iowa", "kansas", "kentucky", "louisiana", "maine", "maryland",
    "massachusetts", "michigan", "minnesota", "mississippi", "missouri", "montana",
    "nebraska", "nevada", "new hampshire", "new jersey", "new mexico", "new york",
    "north carolina", "north dakota", "ohio", "oklahoma", "oregon", "pennsylvania",
    "rhode island", "south carolina", "south dakota", "tennessee", "texas", "utah",
    "vermont", "virginia", "washington", "west virginia", "wisconsin", "wyoming",
];

/// `, FL 33401` style postal abbreviation after a city
static POSTAL_STATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^,?[ \t]*[A-Z]{2}[ \t]+\d{5}\b").unwrap());

fn key(word: &str) -> String {
    let word = word.trim_end_matches('.');
    let word = word
        .strip_suffix("'s")
        .or_else(|| word.strip_suffix("'S"))
        .unwrap_or(word);
    word.to_lowercase()
}

fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(key(word).as_str())
}

/// Whether `rest`, the text right after a name, opens with `, <State>`
fn starts_with_state(rest: &str) -> bool {
    if POSTAL_STATE_RE.is_match(rest) {
        return true;
    }
    let Some(rest) = rest.strip_prefix(',') else {
        return false;
    };
    let lowered: String = rest
        .trim_start()
        .chars()
        .take_while(|c| *c != '\n')
        .collect::<String>()
        .to_lowercase();
    STATES.iter().any(|state| {
        lowered.starts_with(state)
            && !lowered[state.len()..]
                .chars()
                .next()
                .is_some_and(char::is_alphanumeric)
    })
}

/// Byte ranges of lines that read as a document title
///
/// A title line has only capitalized words (lowercase connectors aside) and
/// names a kind of filing, e.g. `PLAINTIFF'S MOTION FOR SUMMARY JUDGMENT`.
fn heading_ranges(text: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let words: Vec<&str> = line
            .split_whitespace()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\''))
            .filter(|w| w.chars().any(char::is_alphabetic))
            .collect();

        let capitalized = words.iter().all(|w| {
            w.chars().next().is_some_and(char::is_uppercase)
                || TITLE_CONNECTORS.contains(&w.to_lowercase().as_str())
        });
        let titled = words.iter().any(|w| TITLE_WORDS.contains(&key(w).as_str()));

        if !words.is_empty() && capitalized && titled {
            ranges.push((offset, offset + line.len()));
        }
        offset += line.len();
    }

    ranges
}

// =============================================================================
// EXTRACTOR
// =============================================================================

/// Offline entity extractor driven by regular expressions
///
/// Produces PERSON, ORG and DATE plus the pass-through CASE_NUMBER and
/// MONEY categories. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternEntityExtractor;

impl PatternEntityExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// All mentions, in category-then-position order
    pub fn mentions(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        entities.extend(DATE_RE.find_iter(text).map(|m| {
            Entity::with_span(EntityCategory::Date, m.as_str(), m.start(), m.end())
        }));

        entities.extend(CASE_NUMBER_RE.captures_iter(text).filter_map(|caps| {
            caps.get(1).map(|m| {
                Entity::with_span(
                    EntityCategory::Other("CASE_NUMBER".to_string()),
                    m.as_str(),
                    m.start(),
                    m.end(),
                )
            })
        }));

        entities.extend(MONEY_RE.find_iter(text).map(|m| {
            Entity::with_span(
                EntityCategory::Other("MONEY".to_string()),
                m.as_str(),
                m.start(),
                m.end(),
            )
        }));

        let orgs = org_mentions(text);
        let org_spans: Vec<(usize, usize)> = orgs
            .iter()
            .filter_map(|e| e.span().map(|s| (s.start, s.end)))
            .collect();
        entities.extend(orgs);
        entities.extend(person_mentions(text, &org_spans));

        entities
    }
}

impl EntityExtractor for PatternEntityExtractor {
    type Error = Infallible;

    fn extract(&self, text: &str) -> Result<EntityMapping, Self::Error> {
        Ok(EntityMapping::from_entities(self.mentions(text)))
    }
}

fn org_mentions(text: &str) -> Vec<Entity> {
    ORG_RE
        .find_iter(text)
        .filter_map(|m| {
            let words: Vec<_> = WORD_RE.find_iter(m.as_str()).collect();
            let first = words.iter().position(|w| !is_stopword(w.as_str()))?;
            // Name plus suffix
            if words.len() - first < 2 {
                return None;
            }
            let start = m.start() + words[first].start();
            Some(Entity::with_span(
                EntityCategory::Org,
                &text[start..m.end()],
                start,
                m.end(),
            ))
        })
        .collect()
}

fn person_mentions(text: &str, org_spans: &[(usize, usize)]) -> Vec<Entity> {
    let mut people = Vec::new();
    let headings = heading_ranges(text);

    for run in NAME_RUN_RE.find_iter(text) {
        if headings.iter().any(|&(s, e)| s <= run.start() && run.start() < e) {
            continue;
        }
        let tokens: Vec<(usize, usize)> = NAME_TOKEN_RE
            .find_iter(run.as_str())
            .map(|t| (run.start() + t.start(), run.start() + t.end()))
            .collect();

        let mut group: Vec<(usize, usize)> = Vec::new();
        for &(start, end) in &tokens {
            let word = &text[start..end];
            if is_stopword(word) {
                people.extend(person_from_group(text, &group, Some(word), org_spans));
                group.clear();
            } else {
                group.push((start, end));
            }
        }
        people.extend(person_from_group(text, &group, None, org_spans));
    }

    people
}

fn person_from_group(
    text: &str,
    group: &[(usize, usize)],
    followed_by: Option<&str>,
    org_spans: &[(usize, usize)],
) -> Option<Entity> {
    if !(2..=4).contains(&group.len()) {
        return None;
    }
    if followed_by.is_some_and(|w| INSTITUTION_WORDS.contains(&key(w).as_str())) {
        return None;
    }

    let start = group.first()?.0;
    let end = group.last()?.1;
    if followed_by.is_none() && starts_with_state(&text[end..]) {
        return None;
    }
    if org_spans.iter().any(|&(s, e)| start < e && s < end) {
        return None;
    }

    Some(Entity::with_span(
        EntityCategory::Person,
        &text[start..end],
        start,
        end,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILING: &str = "IN THE CIRCUIT COURT OF THE FIFTEENTH JUDICIAL CIRCUIT
IN AND FOR PALM BEACH COUNTY, FLORIDA

Case No. 2022-CA-001234

HUNTER WARFIELD, INC.,
    Plaintiff,
v.
JOHNATHAN MITCHELL,
    Defendant.

DEFENDANT'S MOTION TO DISMISS

Defendant, Johnathan Mitchell, moves to dismiss the complaint filed on July 1, 2022
by Hunter Warfield, Inc. seeking $1,250.00 in unpaid rent.
";

    fn texts(mapping: &EntityMapping, category: &EntityCategory) -> Vec<String> {
        mapping
            .texts(category)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_court_filing() {
        let mapping = PatternEntityExtractor::new().extract(FILING).unwrap();

        assert_eq!(
            texts(&mapping, &EntityCategory::Person),
            vec!["JOHNATHAN MITCHELL", "Johnathan Mitchell"]
        );
        assert_eq!(
            texts(&mapping, &EntityCategory::Org),
            vec!["HUNTER WARFIELD, INC.", "Hunter Warfield, Inc."]
        );
        assert_eq!(texts(&mapping, &EntityCategory::Date), vec!["July 1, 2022"]);
        assert_eq!(
            texts(&mapping, &EntityCategory::Other("CASE_NUMBER".into())),
            vec!["2022-CA-001234"]
        );
        assert_eq!(
            texts(&mapping, &EntityCategory::Other("MONEY".into())),
            vec!["$1,250.00"]
        );
    }

    #[test]
    fn test_date_shapes() {
        let text = "Signed this 3rd day of March, 2021; served 03/04/2021 and 2021-03-05. Heard Sept. 9, 2021.";
        let mapping = PatternEntityExtractor::new().extract(text).unwrap();
        assert_eq!(
            texts(&mapping, &EntityCategory::Date),
            vec!["3rd day of March, 2021", "03/04/2021", "2021-03-05", "Sept. 9, 2021"]
        );
    }

    #[test]
    fn test_honorifics_and_roles_are_not_names() {
        let text = "Dear Ms. Jane Roe,\nPlaintiff Acme Holdings requests payment.";
        let mapping = PatternEntityExtractor::new().extract(text).unwrap();
        assert_eq!(texts(&mapping, &EntityCategory::Person), vec!["Jane Roe"]);
        assert_eq!(texts(&mapping, &EntityCategory::Org), vec!["Acme Holdings"]);
    }

    #[test]
    fn test_place_names_are_not_people() {
        let text = "Filed in the Palm Beach County Court.";
        let mapping = PatternEntityExtractor::new().extract(text).unwrap();
        assert!(mapping.get(&EntityCategory::Person).is_empty());
    }

    #[test]
    fn test_titles_and_cities_are_not_people() {
        let text = "PLAINTIFF'S MOTION FOR SUMMARY JUDGMENT

Plaintiff Hunter Warfield, Inc. moves for Final Judgment against Johnathan Mitchell
of West Palm Beach, Florida, and Jane Roe of Saratoga Springs, NY 12866.
";
        let mapping = PatternEntityExtractor::new().extract(text).unwrap();
        assert_eq!(
            texts(&mapping, &EntityCategory::Person),
            vec!["Johnathan Mitchell", "Jane Roe"]
        );
    }

    #[test]
    fn test_title_case_heading_is_skipped() {
        let text = "Motion to Compel Inspection of Premises\n\nThe tenant, Maria Lopez, asks for access.";
        let mapping = PatternEntityExtractor::new().extract(text).unwrap();
        assert_eq!(texts(&mapping, &EntityCategory::Person), vec!["Maria Lopez"]);
    }

    #[test]
    fn test_caption_names_survive_heading_filter() {
        let ranges = heading_ranges(FILING);
        let heading = FILING.find("DEFENDANT'S MOTION").unwrap();
        let caption = FILING.find("JOHNATHAN MITCHELL").unwrap();
        assert!(ranges.iter().any(|&(s, e)| s <= heading && heading < e));
        assert!(!ranges.iter().any(|&(s, e)| s <= caption && caption < e));
    }

    #[test]
    fn test_spans_point_into_text() {
        let mapping = PatternEntityExtractor::new().extract(FILING).unwrap();
        for (_, entities) in mapping.iter() {
            for entity in entities {
                let span = entity.span().unwrap();
                assert_eq!(&FILING[span.start..span.end], entity.text());
            }
        }
    }

    #[test]
    fn test_plain_text_has_no_entities() {
        let mapping = PatternEntityExtractor::new()
            .extract("nothing of note happens here.")
            .unwrap();
        assert!(mapping.is_empty());
    }
}
