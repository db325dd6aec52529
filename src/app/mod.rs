//! Main application modules.
//!
//! This module provides input validation and statistics printing used by the
//! main application.

pub mod input;
pub mod statistics;

// Re-export public API
pub use input::validate_domain_input;
pub use statistics::{print_lookup_statistics, summary_line};
