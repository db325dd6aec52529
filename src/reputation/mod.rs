//! IP reputation lookups against AbuseIPDB.
//!
//! The client keeps the response body verbatim alongside the parsed result so
//! the summary stage sees exactly what the service returned.

mod client;
mod parse;

// Re-export public API
pub use client::{AbuseIpDbClient, ReputationSource};
pub use parse::parse_check_response;

#[cfg(test)]
mod tests;
