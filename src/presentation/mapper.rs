//! Outcome to display model mapping.

use super::types::{DisplayModel, ResultsPanel, RiskTier};
use crate::config::{REPUTATION_FAILED_MESSAGE, RESOLUTION_FAILED_MESSAGE};
use crate::models::{LookupOutcome, ReputationResult};

/// Maps a lookup outcome to what should be shown.
///
/// Pure: the same outcome always gives an equal model.
///
/// # Arguments
///
/// * `outcome` - The finished lookup
///
/// # Returns
///
/// A results panel for `Success` and `SummaryFailed` (the latter with the error
/// in the summary slot), otherwise a failure message.
pub fn to_display(outcome: &LookupOutcome) -> DisplayModel {
    match outcome {
        LookupOutcome::Success { report, summary } => {
            DisplayModel::Results(results_panel(&report.result, summary.display_text()))
        }
        LookupOutcome::SummaryFailed { report, error } => {
            DisplayModel::Results(results_panel(&report.result, error.to_string()))
        }
        LookupOutcome::ResolutionFailed(_) => DisplayModel::failure(RESOLUTION_FAILED_MESSAGE),
        LookupOutcome::ReputationFailed(_) => DisplayModel::failure(REPUTATION_FAILED_MESSAGE),
    }
}

fn results_panel(result: &ReputationResult, summary: String) -> ResultsPanel {
    let tier = RiskTier::from_score(result.abuse_confidence_score);
    ResultsPanel {
        ip_address: result.ip_address.clone(),
        confidence: format!("{}%", result.abuse_confidence_score),
        tier,
        colors: tier.colors(),
        isp: result.isp.clone(),
        location: location(&result.city, &result.country_code),
        usage_type: non_empty(&result.usage_type),
        asn: (result.asn != 0).then(|| format!("AS{}", result.asn)),
        hostnames: non_empty(&result.hostnames),
        domain: non_empty(&result.domain),
        summary,
    }
}

fn location(city: &str, country_code: &str) -> String {
    if city.is_empty() {
        country_code.to_string()
    } else {
        format!("{city}, {country_code}")
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
