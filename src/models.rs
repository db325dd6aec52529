//! Data carried between pipeline stages.
//!
//! Every value here is created for a single lookup and dropped once the outcome
//! has been shown.

use std::fmt;
use std::net::IpAddr;

use crate::error_handling::{OutcomeKind, ReputationError, ResolutionError, SummaryError};

/// A validated domain submitted for checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub domain: String,
}

/// The address a domain resolved to.
///
/// Holding an `IpAddr` rather than text means the value is always a
/// well-formed IPv4 or IPv6 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedAddress {
    pub ip: IpAddr,
}

impl ResolvedAddress {
    pub fn new(ip: IpAddr) -> Self {
        Self { ip }
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ip)
    }
}

impl From<IpAddr> for ResolvedAddress {
    fn from(ip: IpAddr) -> Self {
        Self::new(ip)
    }
}

/// Reputation data for one IP address, as reported by AbuseIPDB.
///
/// Optional text fields are empty strings when the service omits them, and
/// `asn` is 0 when unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReputationResult {
    pub ip_address: String,
    /// 0 (clean) to 100 (certainly abusive)
    pub abuse_confidence_score: u8,
    pub country_code: String,
    pub city: String,
    pub isp: String,
    pub usage_type: String,
    pub asn: u32,
    pub hostnames: String,
    pub domain: String,
}

/// A parsed reputation result together with the exact body it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReputationReport {
    pub result: ReputationResult,
    /// Verbatim response body, fed to the summary stage unmodified
    pub raw_body: String,
}

/// Text written by the summary service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryText {
    pub text: String,
}

impl SummaryText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// The summary slot of a successful lookup.
#[derive(Debug)]
pub enum Summary {
    Generated(SummaryText),
    /// The summary stage failed; the lookup still succeeded
    Degraded(SummaryError),
}

impl Summary {
    /// Text to show where the summary goes.
    ///
    /// A degraded summary shows its error's message, e.g. `No summary generated.`
    /// or `API Error 500: ...`.
    pub fn display_text(&self) -> String {
        match self {
            Summary::Generated(summary) => summary.text.clone(),
            Summary::Degraded(error) => error.to_string(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Summary::Degraded(_))
    }
}

/// The single result of running one lookup.
#[derive(Debug)]
pub enum LookupOutcome {
    Success {
        report: ReputationReport,
        summary: Summary,
    },
    ResolutionFailed(ResolutionError),
    ReputationFailed(ReputationError),
    /// Only produced under [`SummaryPolicy::Strict`](crate::config::SummaryPolicy::Strict)
    SummaryFailed {
        report: ReputationReport,
        error: SummaryError,
    },
}

impl LookupOutcome {
    /// The reputation data, when the lookup got that far.
    pub fn reputation(&self) -> Option<&ReputationResult> {
        match self {
            LookupOutcome::Success { report, .. } | LookupOutcome::SummaryFailed { report, .. } => {
                Some(&report.result)
            }
            LookupOutcome::ResolutionFailed(_) | LookupOutcome::ReputationFailed(_) => None,
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            LookupOutcome::Success { summary, .. } if summary.is_degraded() => {
                OutcomeKind::DegradedSummary
            }
            LookupOutcome::Success { .. } => OutcomeKind::Success,
            LookupOutcome::ResolutionFailed(_) => OutcomeKind::ResolutionFailed,
            LookupOutcome::ReputationFailed(_) => OutcomeKind::ReputationFailed,
            LookupOutcome::SummaryFailed { .. } => OutcomeKind::SummaryFailed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LookupOutcome::Success { .. })
    }
}
