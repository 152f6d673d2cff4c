//! The response validator: turns a raw model reply into a validated
//! [`ImageMetadata`] record.
//!
//! Parsing is deliberately two-phase. Fence stripping is an isolated
//! normalization step that tolerates models ignoring the "no markdown"
//! instruction; everything after it is strict: one JSON value, `name` a
//! non-empty string, `tags` an array of strings. Nothing is repaired and no
//! partial record is ever returned.

use serde_json::Value;
use tracing::{error, trace};

use crate::error::{MalformedKind, Result, TagsmithError};
use crate::metadata::ImageMetadata;

/// Extract JSON from a markdown code block if present, otherwise return the
/// trimmed content as-is.
///
/// Handles replies wrapped in ```json ... ``` or ``` ... ```, with or
/// without a language tag and with or without newlines around the payload.
/// The fence must enclose the whole reply; fences in the middle of prose are
/// left alone (such a reply is not valid JSON and fails in the parse step).
pub fn extract_json_from_markdown(content: &str) -> String {
    let trimmed = content.trim();

    if let Some(rest) = trimmed.strip_prefix("```")
        && let Some(inner) = rest.strip_suffix("```")
    {
        // Drop an optional language tag from the opening fence line.
        let inner = match inner.find('\n') {
            Some(idx) if inner[..idx].chars().all(|c| c.is_ascii_alphanumeric()) => {
                &inner[idx + 1..]
            }
            _ => inner,
        };
        return inner.trim().to_string();
    }

    trimmed.to_string()
}

/// Parse a raw model reply into a validated metadata record.
///
/// Fails with [`TagsmithError::MalformedResponse`] when the reply is not a
/// single JSON object with a non-empty string `name` and a string array
/// `tags`. The content of a valid reply is returned unchanged.
pub fn parse_metadata(raw: &str) -> Result<ImageMetadata> {
    let json_text = extract_json_from_markdown(raw);
    trace!(json = %json_text, "parsing model reply");

    let value: Value = serde_json::from_str(&json_text).map_err(|e| {
        error!(error = %e, "model reply is not valid JSON");
        TagsmithError::MalformedResponse(MalformedKind::InvalidJson)
    })?;

    let Some(object) = value.as_object() else {
        return Err(schema_violation("reply is not a JSON object"));
    };

    match object.get("name") {
        None => return Err(schema_violation("`name` field is missing")),
        Some(Value::String(name)) if !name.is_empty() => {}
        Some(_) => return Err(schema_violation("`name` must be a non-empty string")),
    }

    match object.get("tags") {
        None => return Err(schema_violation("`tags` field is missing")),
        Some(Value::Array(tags)) if tags.iter().all(Value::is_string) => {}
        Some(_) => return Err(schema_violation("`tags` must be an array of strings")),
    }

    let metadata: ImageMetadata = serde_json::from_value(value).map_err(|e| {
        error!(error = %e, "structurally valid reply failed to deserialize");
        TagsmithError::MalformedResponse(MalformedKind::SchemaViolation)
    })?;

    Ok(metadata)
}

fn schema_violation(detail: &str) -> TagsmithError {
    error!(detail, "model reply failed structural validation");
    TagsmithError::MalformedResponse(MalformedKind::SchemaViolation)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: &str = r#"{"name":"Red Fox","tags":["animal","fox"]}"#;

    fn expected() -> ImageMetadata {
        ImageMetadata {
            name: "Red Fox".to_string(),
            tags: vec!["animal".to_string(), "fox".to_string()],
        }
    }

    #[test]
    fn test_parse_plain_json() {
        assert_eq!(parse_metadata(PLAIN).expect("should parse"), expected());
    }

    #[test]
    fn test_parse_preserves_content_unchanged() {
        let raw = r#"{"name":"  Red  Fox ","tags":["Animal","two words"]}"#;
        let parsed = parse_metadata(raw).expect("should parse");
        // The lenient pass returns exactly what the model said.
        assert_eq!(parsed.name, "  Red  Fox ");
        assert_eq!(parsed.tags, vec!["Animal", "two words"]);
    }

    #[test]
    fn test_parse_fenced_json_with_language_tag() {
        let raw = "```json\n{\"name\":\"Red Fox\",\"tags\":[\"animal\",\"fox\"]}\n```";
        assert_eq!(parse_metadata(raw).expect("should parse"), expected());
    }

    #[test]
    fn test_parse_fenced_json_without_language_tag() {
        let raw = format!("```\n{}\n```", PLAIN);
        assert_eq!(parse_metadata(&raw).expect("should parse"), expected());
    }

    #[test]
    fn test_parse_fenced_json_without_newlines() {
        let raw = format!("```{}```", PLAIN);
        assert_eq!(parse_metadata(&raw).expect("should parse"), expected());
    }

    #[test]
    fn test_parse_fenced_json_with_surrounding_whitespace() {
        let raw = format!("\n\n  ```json\n{}\n```  \n", PLAIN);
        assert_eq!(parse_metadata(&raw).expect("should parse"), expected());
    }

    #[test]
    fn test_fence_stripping_is_noop_on_bare_json() {
        assert_eq!(extract_json_from_markdown(PLAIN), PLAIN);
        assert_eq!(extract_json_from_markdown(&format!("  {}  ", PLAIN)), PLAIN);
    }

    #[test]
    fn test_mid_text_fence_is_left_alone() {
        let raw = format!("Here you go:\n```json\n{}\n```", PLAIN);
        assert_eq!(extract_json_from_markdown(&raw), raw.trim());
        assert_eq!(
            parse_metadata(&raw),
            Err(TagsmithError::MalformedResponse(MalformedKind::InvalidJson))
        );
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        for raw in [
            r#"{"name":"Red Fox","tags":["animal",]}"#,
            r#"{"name":"Red Fox","tags":["animal"#,
            "not json at all",
            "",
        ] {
            assert_eq!(
                parse_metadata(raw),
                Err(TagsmithError::MalformedResponse(MalformedKind::InvalidJson)),
                "input {:?} should be invalid JSON",
                raw
            );
        }
    }

    #[test]
    fn test_parse_rejects_schema_violations() {
        for raw in [
            r#"{"tags":["animal"]}"#,
            r#"{"name":5,"tags":["animal"]}"#,
            r#"{"name":"","tags":["animal"]}"#,
            r#"{"name":"Red Fox"}"#,
            r#"{"name":"Red Fox","tags":"a,b"}"#,
            r#"{"name":"Red Fox","tags":[1,2]}"#,
            r#"["name","tags"]"#,
        ] {
            assert_eq!(
                parse_metadata(raw),
                Err(TagsmithError::MalformedResponse(
                    MalformedKind::SchemaViolation
                )),
                "input {:?} should violate the schema",
                raw
            );
        }
    }

    #[test]
    fn test_parse_tolerates_extra_fields() {
        let raw = r#"{"name":"Red Fox","tags":["animal","fox"],"confidence":0.9}"#;
        assert_eq!(parse_metadata(raw).expect("should parse"), expected());
    }
}
