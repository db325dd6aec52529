//! HTTP client initialization.
//!
//! This module provides the HTTP client shared by the reputation and summary
//! clients.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, USER_AGENT};
use crate::error_handling::InitializationError;
use reqwest::ClientBuilder;

/// Initializes the HTTP client with default settings.
///
/// Creates a `reqwest::Client` configured with:
/// - A `domain_risk/<version>` User-Agent
/// - The configured per-request timeout, if any (otherwise reqwest's default of none)
///
/// Both API clients share this one connection pool.
///
/// # Arguments
///
/// * `config` - Configuration holding the optional timeout
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let mut builder = ClientBuilder::new().user_agent(USER_AGENT);
    if let Some(secs) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(Arc::new(builder.build()?))
}
