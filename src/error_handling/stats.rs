//! Lookup statistics tracking.
//!
//! This module provides thread-safe counters of how lookups ended, shared by
//! every lookup in a run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::OutcomeKind;

/// Thread-safe lookup statistics tracker.
///
/// One atomic counter per [`OutcomeKind`], all initialized to zero on
/// creation. Share across tasks with `Arc`.
#[derive(Debug)]
pub struct ProcessingStats {
    outcomes: HashMap<OutcomeKind, AtomicUsize>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        let mut outcomes = HashMap::new();
        for kind in OutcomeKind::iter() {
            outcomes.insert(kind, AtomicUsize::new(0));
        }
        ProcessingStats { outcomes }
    }

    /// Increment the counter for an outcome kind.
    pub fn record(&self, kind: OutcomeKind) {
        if let Some(counter) = self.outcomes.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to record outcome {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                kind
            );
        }
    }

    /// Get the count for an outcome kind.
    pub fn get_count(&self, kind: OutcomeKind) -> usize {
        self.outcomes
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total lookups recorded, whatever their outcome.
    pub fn total(&self) -> usize {
        OutcomeKind::iter().map(|k| self.get_count(k)).sum()
    }

    /// Lookups that produced a results panel.
    pub fn successful(&self) -> usize {
        OutcomeKind::iter()
            .filter(|k| k.is_success())
            .map(|k| self.get_count(k))
            .sum()
    }

    /// Lookups that ended without results (superseded lookups excluded).
    pub fn failed(&self) -> usize {
        OutcomeKind::iter()
            .filter(|k| !k.is_success() && *k != OutcomeKind::Superseded)
            .map(|k| self.get_count(k))
            .sum()
    }
}
