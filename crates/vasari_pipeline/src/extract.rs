//! Structured output extraction from generator responses.
//!
//! Assistant text often wraps its JSON in markdown fences or surrounds
//! it with prose. Extraction tolerates that; anything beyond it is a
//! protocol error, since the generation profile's contract is JSON
//! output.

use vasari_error::{ProtocolError, Stage, VasariResult};

/// Extract the JSON object from a generator response.
///
/// Tries a ```` ```json ```` fence first, then the first balanced
/// `{ ... }` block.
///
/// # Errors
///
/// Returns a protocol error if no JSON object is found.
///
/// # Examples
///
/// ```
/// use vasari_pipeline::extract_json;
///
/// let response = "Here you go:\n```json\n{\"title\": \"Hi\"}\n```\n";
/// assert_eq!(extract_json(response).unwrap(), "{\"title\": \"Hi\"}");
/// ```
pub fn extract_json(response: &str) -> VasariResult<String> {
    if let Some(json) = fenced_block(response) {
        return Ok(json);
    }
    if let Some(json) = balanced_object(response) {
        return Ok(json);
    }

    tracing::error!(
        response_chars = response.len(),
        "No JSON object found in generator response"
    );
    Err(ProtocolError::new(
        Stage::Retrieval,
        format!(
            "no JSON object found in response ({} chars)",
            response.len()
        ),
    )
    .into())
}

/// Parse extracted JSON into a typed value.
///
/// # Errors
///
/// Returns a protocol error carrying a preview of the offending JSON if
/// it does not match type `T`.
pub fn parse_json<T>(json_str: &str) -> VasariResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview: String = json_str.chars().take(100).collect();
        tracing::error!(error = %e, json_preview = %preview, "Generator JSON did not match the expected shape");
        ProtocolError::new(
            Stage::Retrieval,
            format!("generator output did not match the expected shape: {e} (JSON: {preview}...)"),
        )
        .into()
    })
}

/// Content of a ```` ```json ```` (or bare ```` ``` ````) fence, if any.
fn fenced_block(response: &str) -> Option<String> {
    let start = response.find("```")?;
    let after_fence = start + 3;
    // Skip an optional language tag up to the next newline.
    let content_start = response[after_fence..]
        .find('\n')
        .map(|n| after_fence + n + 1)
        .unwrap_or(after_fence);

    match response[content_start..].find("```") {
        Some(end) => Some(response[content_start..content_start + end].trim().to_string()),
        // No closing fence, likely a truncated response; take the rest.
        None => Some(response[content_start..].trim().to_string()),
    }
}

/// The first balanced `{ ... }` block, respecting strings and escapes.
fn balanced_object(response: &str) -> Option<String> {
    let start = response.find('{')?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + 1].to_string());
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
    fn extracts_from_json_fence() {
        let response = "Sure!\n\n```json\n{\"title\": \"T\", \"summary\": \"S\"}\n```\nDone.";
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("\"title\""));
    }

    #[test]
    fn extracts_balanced_object_from_prose() {
        let response = r#"Here it is: {"title": "T", "nested": {"a": 1}} hope that helps"#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, r#"{"title": "T", "nested": {"a": 1}}"#);
    }

    #[test]
    fn handles_braces_inside_strings() {
        let response = r#"{"title": "curly } brace"}"#;
        let json = extract_json(response).unwrap();
        assert_eq!(json, response);
    }

    #[test]
    fn plain_prose_is_a_protocol_error() {
        assert!(extract_json("no structured output here").is_err());
    }

    #[test]
    fn truncated_fence_returns_remainder() {
        let response = "```json\n{\"title\": \"T\"}";
        let json = extract_json(response).unwrap();
        assert_eq!(json, "{\"title\": \"T\"}");
    }
}
