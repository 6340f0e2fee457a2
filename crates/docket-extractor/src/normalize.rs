//! Mention text normalization

use docket_domain::collapse_whitespace;

/// Normalize a raw mention: collapse whitespace (line breaks included) and
/// strip commas, periods and spaces from both ends
///
/// Returns `None` when nothing is left.
pub fn normalize_mention(raw: &str) -> Option<String> {
    let collapsed = collapse_whitespace(raw);
    let trimmed = collapsed.trim_matches(|c: char| c == ',' || c == '.' || c == ' ');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_mention() {
        assert_eq!(
            normalize_mention("  Hunter\n  Warfield, Inc., ").as_deref(),
            Some("Hunter Warfield, Inc")
        );
        assert_eq!(normalize_mention(" ., ").as_deref(), None);
    }
}
