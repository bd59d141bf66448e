//! Utilities for extracting structured data from model responses.
//!
//! Responses often wrap JSON in markdown code fences, sprinkle `**` emphasis
//! markers through it, or add explanatory text around it. These helpers recover
//! the JSON underneath.

use lumiere_error::ParseError;

/// Extract JSON from a response that may contain markdown or extra text.
///
/// Strategies, in order:
/// 1. Markdown code blocks: ```json ... ```
/// 2. Balanced braces: { ... }
/// 3. Balanced brackets: [ ... ]
///
/// `**` emphasis markers are removed first.
///
/// # Errors
///
/// Returns a [`ParseError`] if no JSON is found.
///
/// # Examples
///
/// ```
/// use lumiere_narrative::extract_json;
///
/// let response = "Here it is:\n```json\n{\"title\": \"**Bella**\"}\n```\n";
/// assert_eq!(extract_json(response).unwrap(), "{\"title\": \"Bella\"}");
/// ```
pub fn extract_json(response: &str) -> Result<String, ParseError> {
    let cleaned = response.replace("**", "");

    if let Some(json) = extract_from_code_block(&cleaned, "json") {
        return Ok(json);
    }

    let bracket_pos = cleaned.find('[');
    let brace_pos = cleaned.find('{');

    let found = match (bracket_pos, brace_pos) {
        (Some(b_pos), Some(c_pos)) if b_pos < c_pos => extract_balanced(&cleaned, '[', ']')
            .or_else(|| extract_balanced(&cleaned, '{', '}')),
        (Some(_), None) => extract_balanced(&cleaned, '[', ']'),
        _ => extract_balanced(&cleaned, '{', '}')
            .or_else(|| extract_balanced(&cleaned, '[', ']')),
    };

    found.ok_or_else(|| {
        tracing::warn!(response_length = response.len(), "No JSON found in response");
        ParseError::new(format!(
            "No JSON found in response (length: {})",
            response.len()
        ))
    })
}

/// Extract JSON and deserialize it into `T`.
///
/// # Errors
///
/// Returns a [`ParseError`] if no JSON is found or it does not fit `T`.
///
/// # Examples
///
/// ```
/// use lumiere_narrative::parse_json;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Persona {
///     name: String,
/// }
///
/// let persona: Persona = parse_json("```\n{\"name\": \"Ana\"}\n```").unwrap();
/// assert_eq!(persona.name, "Ana");
/// ```
pub fn parse_json<T>(response: &str) -> Result<T, ParseError>
where
    T: serde::de::DeserializeOwned,
{
    let json = extract_json(response)?;
    serde_json::from_str(&json).map_err(|e| {
        let preview = json.chars().take(100).collect::<String>();

        tracing::warn!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        ParseError::new(format!("Failed to parse JSON: {} (JSON: {}...)", e, preview))
    })
}

/// Extract content from markdown code blocks.
///
/// Looks for ```language\n...\n``` first, then a fence with any language tag.
/// A missing closing fence (truncated response) yields everything after the opener.
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        return Some(match response[content_start..].find("```") {
            Some(end) => response[content_start..content_start + end].trim().to_string(),
            None => response[content_start..].trim().to_string(),
        });
    }

    let start = response.find("```")?;
    let content_start = start + 3;
    let skip_to = response[content_start..]
        .find('\n')
        .map(|n| content_start + n + 1)
        .unwrap_or(content_start);

    Some(match response[skip_to..].find("```") {
        Some(end) => response[skip_to..skip_to + end].trim().to_string(),
        None => response[skip_to..].trim().to_string(),
    })
}

/// Extract content between balanced delimiters, ignoring delimiters in strings.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_from_code_block() {
        let response = r#"
Here's the JSON you requested:

```json
{
  "id": 123,
  "name": "Test"
}
```

Hope this helps!
"#;
        let json = extract_json(response).unwrap();
        assert!(json.contains("\"id\": 123"));
    }

    #[test]
    fn test_extract_json_balanced_braces() {
        let response = r#"Sure! Here it is: {"id": 456, "nested": {"value": "test"}} Enjoy."#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, r#"{"id": 456, "nested": {"value": "test"}}"#);
    }

    #[test]
    fn test_braces_inside_strings_are_ignored() {
        let response = r#"{"intro": "a } inside", "n": 1} trailing"#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, r#"{"intro": "a } inside", "n": 1}"#);
    }

    #[test]
    fn test_emphasis_markers_are_stripped() {
        let response = r#"{"title": "**Bold** move"}"#;
        assert_eq!(extract_json(response).unwrap(), r#"{"title": "Bold move"}"#);
    }

    #[test]
    fn test_unterminated_fence_is_tolerated() {
        let response = "```json\n{\"a\": 1}";
        assert_eq!(extract_json(response).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_no_json_found() {
        assert!(extract_json("This is just plain text with no JSON").is_err());
    }

    #[test]
    fn test_parse_json_rejects_wrong_shape() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Strict {
            id: i32,
        }

        assert!(parse_json::<Strict>(r#"{"id": "not a number"}"#).is_err());
    }
}
