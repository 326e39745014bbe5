// src/sources/extract.rs
//! Tolerant JSON-array extraction for generative responses.
//!
//! The completion contract asks for a raw array, but models routinely wrap
//! the payload in prose or a markdown fence. Scanning for the outermost
//! brackets keeps the caller independent of "raw JSON only" compliance.

use serde::de::DeserializeOwned;

use crate::sources::types::SourceError;

/// Parse the substring between the first `[` and the last `]` as a JSON
/// array of `T`. Either bracket missing (or brackets out of order) is a
/// `SourceError::Parse`.
pub fn extract_first_json_array<T: DeserializeOwned>(
    text: &str,
) -> Result<Vec<T>, SourceError> {
    let start = text
        .find('[')
        .ok_or_else(|| SourceError::Parse("no '[' in response text".to_string()))?;
    let end = text
        .rfind(']')
        .filter(|&end| end > start)
        .ok_or_else(|| SourceError::Parse("no closing ']' in response text".to_string()))?;

    let payload = &text[start..=end];
    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{Intent, Signal};

    const ONE_SIGNAL: &str = r#"[
        {"company":"Acme","location":"Berlin, Germany","industry":"SaaS",
         "signal":"Hiring first AE","intent":"High","hook":"Boost B2B sales"}
    ]"#;

    #[test]
    fn parses_bare_array() {
        let out: Vec<Signal> = extract_first_json_array(ONE_SIGNAL).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].company, "Acme");
        assert_eq!(out[0].intent, Intent::High);
    }

    #[test]
    fn tolerates_prose_preamble_and_postamble() {
        let wrapped = format!("Sure! Here is today's batch:\n{ONE_SIGNAL}\nLet me know.");
        let out: Vec<Signal> = extract_first_json_array(&wrapped).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn tolerates_markdown_fence() {
        let fenced = format!("```json\n{ONE_SIGNAL}\n```");
        let out: Vec<Signal> = extract_first_json_array(&fenced).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn missing_open_bracket_is_parse_error() {
        let err = extract_first_json_array::<Signal>("no array here ]").unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn missing_close_bracket_is_parse_error() {
        let err = extract_first_json_array::<Signal>("prefix [ {\"company\":").unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn truncated_array_is_parse_error() {
        // Both brackets present, payload cut off in the middle.
        let truncated = r#"[ {"company":"Acme","location":"Berlin"} , {"com ]"#;
        let err = extract_first_json_array::<Signal>(truncated).unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn empty_array_parses_to_empty_vec() {
        let out: Vec<Signal> = extract_first_json_array("here: []").unwrap();
        assert!(out.is_empty());
    }
}
