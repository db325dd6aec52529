//! Display model types.

use serde::Serialize;

use crate::config::{
    HIGH_RISK_BACKGROUND, HIGH_RISK_BORDER, LOW_RISK_BACKGROUND, LOW_RISK_BORDER,
    LOW_RISK_UPPER_BOUND, MEDIUM_RISK_BACKGROUND, MEDIUM_RISK_BORDER, MEDIUM_RISK_UPPER_BOUND,
};

/// Risk band of an abuse confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    /// Below 20
    Low,
    /// 20 to 60 inclusive
    Medium,
    /// Above 60
    High,
}

impl RiskTier {
    pub fn from_score(score: u8) -> Self {
        if score < LOW_RISK_UPPER_BOUND {
            RiskTier::Low
        } else if score <= MEDIUM_RISK_UPPER_BOUND {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }

    pub fn colors(self) -> TierColors {
        let (background, border) = match self {
            RiskTier::Low => (LOW_RISK_BACKGROUND, LOW_RISK_BORDER),
            RiskTier::Medium => (MEDIUM_RISK_BACKGROUND, MEDIUM_RISK_BORDER),
            RiskTier::High => (HIGH_RISK_BACKGROUND, HIGH_RISK_BORDER),
        };
        TierColors { background, border }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hex colours (`#RRGGBB`) for a results panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierColors {
    pub background: &'static str,
    pub border: &'static str,
}

/// Everything needed to draw a successful lookup.
///
/// Optional rows are `None` when there is nothing worth showing and are left
/// out of JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsPanel {
    pub ip_address: String,
    /// Score with a percent sign, e.g. `"45%"`
    pub confidence: String,
    pub tier: RiskTier,
    pub colors: TierColors,
    pub isp: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_type: Option<String>,
    /// `"AS{n}"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostnames: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    pub summary: String,
}

/// What a front end shows for one lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DisplayModel {
    Results(ResultsPanel),
    Failure { message: String },
}

impl DisplayModel {
    pub fn failure(message: impl Into<String>) -> Self {
        DisplayModel::Failure {
            message: message.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, DisplayModel::Failure { .. })
    }
}
