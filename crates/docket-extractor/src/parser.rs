//! Parse LLM output into labeled mentions

use crate::error::ExtractorError;
use docket_domain::EntityCategory;
use serde_json::Value;
use tracing::warn;

/// A mention as reported by the model, before span lookup
pub type LabeledMention = (EntityCategory, String);

/// Parse an LLM reply into labeled mentions, in reply order
///
/// Two shapes are accepted:
/// - an object mapping labels to arrays of strings, `{"PERSON": ["Jane Roe"]}`
/// - an array of objects, `[{"label": "PERSON", "text": "Jane Roe"}]`
///
/// Malformed items are skipped with a warning; a reply that is not JSON or
/// has neither shape is an error.
pub fn parse_entity_response(response: &str) -> Result<Vec<LabeledMention>, ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| ExtractorError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    match json {
        Value::Object(map) => {
            let mut mentions = Vec::new();
            for (label, values) in map {
                let category = EntityCategory::from_label(&label);
                let Some(items) = values.as_array() else {
                    warn!("Entity label '{}' does not map to an array", label);
                    continue;
                };
                for (idx, item) in items.iter().enumerate() {
                    match item.as_str() {
                        Some(text) if !text.trim().is_empty() => {
                            mentions.push((category.clone(), text.to_string()))
                        }
                        _ => warn!("Skipping {} mention {}: not a non-empty string", label, idx),
                    }
                }
            }
            Ok(mentions)
        }
        Value::Array(items) => Ok(items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| match parse_mention_json(item) {
                Ok(mention) => Some(mention),
                Err(e) => {
                    warn!("Failed to parse mention {}: {}", idx, e);
                    None
                }
            })
            .collect()),
        _ => Err(ExtractorError::InvalidFormat(
            "Expected JSON object or array".to_string(),
        )),
    }
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
        }

        // Skip the opening fence and, when present, the closing one
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse a single `{label, text}` item
fn parse_mention_json(json: &Value) -> Result<LabeledMention, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "Mention is not a JSON object".to_string())?;

    let label = obj
        .get("label")
        .or_else(|| obj.get("category"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| "Missing or invalid 'label'".to_string())?;

    let text = obj
        .get("text")
        .and_then(|v| v.as_str())
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| "Missing or invalid 'text'".to_string())?;

    Ok((EntityCategory::from_label(label), text.to_string()))
}
