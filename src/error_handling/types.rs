//! Error type definitions.
//!
//! One error type per pipeline stage, plus initialization errors and the outcome
//! kinds counted by [`super::ProcessingStats`].

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::config::{EMPTY_DOMAIN_MESSAGE, MAX_DOMAIN_LENGTH, NO_SUMMARY_MESSAGE};

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// User input rejected before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Nothing but whitespace was entered.
    #[error("{}", EMPTY_DOMAIN_MESSAGE)]
    EmptyDomain,

    /// Longer than a DNS name can be.
    #[error("Domain is {0} characters long (maximum is {max})", max = MAX_DOMAIN_LENGTH)]
    TooLong(usize),

    /// Not a hostname or IP address.
    #[error("'{0}' is not a valid domain name")]
    InvalidDomain(String),
}

/// The domain could not be turned into an IP address.
///
/// Carries no failure subtype: NXDOMAIN, timeouts and unreachable
/// servers all surface the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Could not resolve {domain} to an IP address")]
pub struct ResolutionError {
    /// The domain that failed to resolve
    pub domain: String,
}

/// Failure talking to, or understanding, the reputation service.
#[derive(Error, Debug)]
pub enum ReputationError {
    /// Transport-level failure (connect, TLS, timeout, body read).
    #[error("AbuseIPDB request failed: {0}")]
    Request(#[from] ReqwestError),

    /// Any status other than 200 OK.
    #[error("AbuseIPDB returned HTTP {status}")]
    Status { status: u16 },

    /// The body was not JSON.
    #[error("AbuseIPDB response is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// A required field is absent.
    #[error("AbuseIPDB response is missing '{0}'")]
    MissingField(&'static str),

    /// A required field is present but unusable.
    #[error("AbuseIPDB response has invalid '{field}': {value}")]
    InvalidField { field: &'static str, value: String },
}

/// Failure producing a summary.
///
/// The `Display` text of each variant is what a degraded lookup shows in place
/// of the summary.
#[derive(Error, Debug)]
pub enum SummaryError {
    /// Transport-level failure.
    #[error("Error generating summary: {0}")]
    Request(#[from] ReqwestError),

    /// Any status other than 200 OK, with whatever error body came back.
    #[error("API Error {status}: {}", body_or_unknown(.body))]
    Status { status: u16, body: String },

    /// The body was not JSON.
    #[error("Error generating summary: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The envelope parsed but held no candidate text.
    #[error("{}", NO_SUMMARY_MESSAGE)]
    NoContent,
}

fn body_or_unknown(body: &str) -> &str {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Unknown error"
    } else {
        trimmed
    }
}

/// How a single lookup ended, for run statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum OutcomeKind {
    Success,
    /// Succeeded, but the summary slot holds failure text
    DegradedSummary,
    EmptyInput,
    InvalidInput,
    ResolutionFailed,
    ReputationFailed,
    SummaryFailed,
    /// Replaced by a newer lookup before it could be shown
    Superseded,
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Success => "Success",
            OutcomeKind::DegradedSummary => "Success without summary",
            OutcomeKind::EmptyInput => "Empty input",
            OutcomeKind::InvalidInput => "Invalid input",
            OutcomeKind::ResolutionFailed => "DNS resolution failed",
            OutcomeKind::ReputationFailed => "Reputation lookup failed",
            OutcomeKind::SummaryFailed => "Summary failed",
            OutcomeKind::Superseded => "Superseded by newer lookup",
        }
    }

    /// Whether this outcome produced a results panel.
    pub fn is_success(&self) -> bool {
        matches!(self, OutcomeKind::Success | OutcomeKind::DegradedSummary)
    }
}
