//! Error handling and lookup statistics.
//!
//! This module provides:
//! - One error type per pipeline stage (input, resolution, reputation, summary)
//! - Initialization errors
//! - Lookup statistics tracking (how each lookup in a run ended)

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{
    InitializationError, InputError, OutcomeKind, ReputationError, ResolutionError, SummaryError,
};
