//! End-of-run statistics.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{OutcomeKind, ProcessingStats};

/// Logs how many lookups ended each way.
pub fn print_lookup_statistics(stats: &ProcessingStats) {
    let total = stats.total();
    if total == 0 {
        return;
    }

    info!("Lookup outcomes ({} total):", total);
    for kind in OutcomeKind::iter() {
        let count = stats.get_count(kind);
        if count > 0 {
            info!("   {}: {}", kind.as_str(), count);
        }
    }
}

/// One-line summary printed after the last report.
pub fn summary_line(stats: &ProcessingStats, elapsed_seconds: f64) -> String {
    let total = stats.successful() + stats.failed();
    format!(
        "Checked {} domain{} ({} succeeded, {} failed) in {:.1}s",
        total,
        if total == 1 { "" } else { "s" },
        stats.successful(),
        stats.failed(),
        elapsed_seconds
    )
}
