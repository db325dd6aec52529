//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoints, generation parameters, risk bands, messages)
//! - CLI option types and parsing
//! - Configuration validation

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{
    AddressPreference, ApiKey, Config, ConfigValidationError, LogFormat, LogLevel, OutputFormat,
    SummaryPolicy,
};
