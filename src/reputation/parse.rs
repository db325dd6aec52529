//! AbuseIPDB `check` response parsing.
//!
//! Only `data.ipAddress` and `data.abuseConfidenceScore` are required; every
//! other field falls back to an empty string (or 0 for `asn`) when absent,
//! `null`, or of an unexpected type.

use serde_json::{Map, Value};

use crate::config::MAX_CONFIDENCE_SCORE;
use crate::error_handling::ReputationError;
use crate::models::ReputationResult;

/// Parses the body of a successful `check` call.
///
/// # Errors
///
/// - `ReputationError::MalformedJson` if the body is not JSON
/// - `ReputationError::MissingField` if `data`, `data.ipAddress` or
///   `data.abuseConfidenceScore` is absent
/// - `ReputationError::InvalidField` if a required field has the wrong type or
///   the score is outside 0..=100
pub fn parse_check_response(raw: &str) -> Result<ReputationResult, ReputationError> {
    let envelope: Value = serde_json::from_str(raw)?;
    let data = envelope
        .get("data")
        .and_then(Value::as_object)
        .ok_or(ReputationError::MissingField("data"))?;

    Ok(ReputationResult {
        ip_address: required_string(data, "ipAddress")?,
        abuse_confidence_score: confidence_score(data)?,
        country_code: optional_text(data, "countryCode"),
        city: optional_text(data, "city"),
        isp: optional_text(data, "isp"),
        usage_type: optional_text(data, "usageType"),
        asn: optional_asn(data),
        hostnames: optional_text(data, "hostnames"),
        domain: optional_text(data, "domain"),
    })
}

fn required_string(data: &Map<String, Value>, field: &'static str) -> Result<String, ReputationError> {
    match data.get(field) {
        None | Some(Value::Null) => Err(ReputationError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ReputationError::InvalidField {
            field,
            value: other.to_string(),
        }),
    }
}

fn confidence_score(data: &Map<String, Value>) -> Result<u8, ReputationError> {
    const FIELD: &str = "abuseConfidenceScore";
    let value = match data.get(FIELD) {
        None | Some(Value::Null) => return Err(ReputationError::MissingField(FIELD)),
        Some(value) => value,
    };

    let score = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    score
        .filter(|s| *s <= u64::from(MAX_CONFIDENCE_SCORE))
        .and_then(|s| u8::try_from(s).ok())
        .ok_or_else(|| ReputationError::InvalidField {
            field: FIELD,
            value: value.to_string(),
        })
}

/// Text for an optional field; arrays (as `hostnames` is) are joined with ", ".
fn optional_text(data: &Map<String, Value>, field: &str) -> String {
    match data.get(field) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(other @ (Value::Number(_) | Value::Bool(_))) => other.to_string(),
        Some(Value::Object(_)) => String::new(),
    }
}

/// ASN as a number; accepts `15169`, `"15169"` and `"AS15169"`, else 0.
fn optional_asn(data: &Map<String, Value>) -> u32 {
    match data.get("asn") {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()).unwrap_or(0),
        Some(Value::String(s)) => {
            let digits = s.trim();
            let digits = digits
                .strip_prefix("AS")
                .or_else(|| digits.strip_prefix("as"))
                .unwrap_or(digits);
            digits.parse().unwrap_or(0)
        }
        _ => 0,
    }
}
