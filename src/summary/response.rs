//! `generateContent` response handling.

use serde_json::Value;

use crate::error_handling::SummaryError;
use crate::models::SummaryText;

/// Pulls `candidates[0].content.parts[0].text` out of a response body.
///
/// # Errors
///
/// - `SummaryError::MalformedResponse` if the body is not JSON
/// - `SummaryError::NoContent` if any level of that path is missing or empty,
///   or the text itself is blank
pub fn extract_summary_text(raw: &str) -> Result<SummaryText, SummaryError> {
    let envelope: Value = serde_json::from_str(raw)?;

    let text = envelope
        .get("candidates")
        .and_then(|candidates| candidates.get(0))
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.get(0))
        .and_then(|part| part.get("text"))
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .ok_or(SummaryError::NoContent)?;

    Ok(SummaryText::new(text))
}
