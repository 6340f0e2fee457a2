//! Filing date resolution from DATE mentions

use crate::config::DateConfig;
use chrono::{Datelike, NaiveDate};
use docket_domain::traits::DateParser;
use docket_domain::{DateCandidate, EntityCategory, EntityMapping};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").unwrap());

static DAY_OF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})\s+day\s+of\s+").unwrap());

static FILLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?:on\s+or\s+about|on|dated|as\s+of|this|the)\s+)+").unwrap()
});

static ABBREV_DOT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Za-z]{3,4})\.").unwrap());

static SEPT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bsept\b").unwrap());

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})[/.-](\d{1,2})[/.-](\d{4}|\d{2})$").unwrap());

static ISO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})[/.-](\d{1,2})[/.-](\d{1,2})$").unwrap());

static MONTH_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]{3,9})\s+(\d{4})$").unwrap());

/// Month-name layouts tried after normalization; `%B` also accepts abbreviations
const MONTH_NAME_FORMATS: [&str; 2] = ["%B %d %Y", "%d %B %Y"];

/// Date parser for the expressions legal filings actually use
///
/// Accepts `July 1, 2022`, `Jul. 1 2022`, `1 July 2022`, `1st day of July,
/// 2022`, `07/01/2022`, `7-1-22`, `2022-07-01` and `July 2022` (first of the
/// month). Year-only and relative expressions are not dates here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoDateParser;

impl ChronoDateParser {
    /// Create a parser
    pub fn new() -> Self {
        Self
    }
}

impl DateParser for ChronoDateParser {
    fn parse(&self, raw: &str) -> Option<NaiveDate> {
        let text = normalize_date_text(raw);
        if text.is_empty() {
            return None;
        }

        if let Some(caps) = ISO_RE.captures(&text) {
            return ymd(&caps[1], &caps[2], &caps[3]);
        }

        if let Some(caps) = NUMERIC_RE.captures(&text) {
            let year = expand_year(&caps[3])?;
            return NaiveDate::from_ymd_opt(year, caps[1].parse().ok()?, caps[2].parse().ok()?);
        }

        if let Some(caps) = MONTH_YEAR_RE.captures(&text) {
            let first_of_month = format!("1 {} {}", &caps[1], &caps[2]);
            return NaiveDate::parse_from_str(&first_of_month, "%d %B %Y").ok();
        }

        MONTH_NAME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&text, fmt).ok())
    }
}

/// Strip filler words, ordinals, commas and abbreviation dots
fn normalize_date_text(raw: &str) -> String {
    let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let text = text.trim_matches(|c: char| c == ',' || c == ';' || c == '.' || c == ' ');
    let text = FILLER_RE.replace(text, "");
    let text = ORDINAL_RE.replace_all(&text, "$1");
    let text = DAY_OF_RE.replace_all(&text, "$1 ");
    let text = SEPT_RE.replace_all(&text, "Sep");
    let text = ABBREV_DOT_RE.replace_all(&text, "$1");
    text.replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn ymd(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Two-digit years pivot at 70: 69 → 2069, 70 → 1970
fn expand_year(year: &str) -> Option<i32> {
    let value: i32 = year.parse().ok()?;
    Some(match year.len() {
        2 if value < 70 => 2000 + value,
        2 => 1900 + value,
        _ => value,
    })
}

/// Selects the earliest plausible date among DATE mentions
///
/// Unparsable mentions and dates outside `[min_year, max_year]` are ignored.
#[derive(Debug, Clone)]
pub struct DateResolver<P = ChronoDateParser> {
    parser: P,
    min_year: i32,
    max_year: i32,
}

impl DateResolver<ChronoDateParser> {
    /// Create a resolver using the built-in parser
    pub fn new(config: &DateConfig) -> Self {
        Self::with_parser(ChronoDateParser, config)
    }
}

impl<P: DateParser> DateResolver<P> {
    /// Create a resolver with a custom date parser
    pub fn with_parser(parser: P, config: &DateConfig) -> Self {
        Self {
            parser,
            min_year: config.min_year,
            max_year: config.max_year,
        }
    }

    /// Parse and judge every mention, preserving order
    pub fn candidates<'a, I>(&self, mentions: I) -> Vec<DateCandidate>
    where
        I: IntoIterator<Item = &'a str>,
    {
        mentions
            .into_iter()
            .map(|raw| match self.parser.parse(raw) {
                Some(date) => {
                    let valid = (self.min_year..=self.max_year).contains(&date.year());
                    if !valid {
                        debug!("Date '{}' parsed to {} outside accepted years", raw, date);
                    }
                    DateCandidate::parsed(raw, date, valid)
                }
                None => {
                    debug!("Ignoring unparsable date '{}'", raw);
                    DateCandidate::unparsed(raw)
                }
            })
            .collect()
    }

    /// Earliest valid date among the mentions
    pub fn resolve_mentions<'a, I>(&self, mentions: I) -> Option<NaiveDate>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.candidates(mentions)
            .iter()
            .filter_map(DateCandidate::valid_date)
            .min()
    }

    /// Earliest valid date among the DATE entities of a mapping
    pub fn resolve(&self, entities: &EntityMapping) -> Option<NaiveDate> {
        self.resolve_mentions(entities.texts(&EntityCategory::Date))
    }
}

impl Default for DateResolver<ChronoDateParser> {
    fn default() -> Self {
        Self::new(&DateConfig::default())
    }
}
