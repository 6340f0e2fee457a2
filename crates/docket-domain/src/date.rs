//! Date candidate module

use chrono::NaiveDate;
use serde::Serialize;

/// A DATE mention after a parse attempt
///
/// `valid` is only ever true when `parsed` is present and falls inside the
/// accepted year range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateCandidate {
    /// Mention text as extracted
    pub raw: String,

    /// Parsed calendar date, if the text was recognizable
    pub parsed: Option<NaiveDate>,

    /// Whether the date may be used as a filing date
    pub valid: bool,
}

impl DateCandidate {
    /// A mention that could not be parsed
    pub fn unparsed(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            parsed: None,
            valid: false,
        }
    }

    /// A parsed mention; validity is decided by the caller's policy
    pub fn parsed(raw: impl Into<String>, date: NaiveDate, valid: bool) -> Self {
        Self {
            raw: raw.into(),
            parsed: Some(date),
            valid,
        }
    }

    /// The date, if it is usable
    pub fn valid_date(&self) -> Option<NaiveDate> {
        if self.valid {
            self.parsed
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparsed_is_never_valid() {
        let candidate = DateCandidate::unparsed("not a date");
        assert!(!candidate.valid);
        assert_eq!(candidate.valid_date(), None);
    }

    #[test]
    fn test_invalid_parsed_date_is_hidden() {
        let date = NaiveDate::from_ymd_opt(1066, 10, 14).unwrap();
        let candidate = DateCandidate::parsed("October 14, 1066", date, false);
        assert_eq!(candidate.parsed, Some(date));
        assert_eq!(candidate.valid_date(), None);
    }
}
