//! AbuseIPDB client.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;

use super::parse::parse_check_response;
use crate::config::{ApiKey, ABUSEIPDB_CHECK_PATH};
use crate::error_handling::ReputationError;
use crate::models::{ReputationReport, ResolvedAddress};

/// Looks up the abuse reputation of an IP address.
#[async_trait]
pub trait ReputationSource: Send + Sync {
    /// Checks one address.
    ///
    /// # Errors
    ///
    /// Returns a `ReputationError` on transport failure, any non-200 status, or a
    /// body that does not parse.
    async fn check(
        &self,
        ip: &ResolvedAddress,
        api_key: &ApiKey,
    ) -> Result<ReputationReport, ReputationError>;
}

/// [`ReputationSource`] backed by the AbuseIPDB v2 `check` endpoint.
#[derive(Debug, Clone)]
pub struct AbuseIpDbClient {
    client: Arc<reqwest::Client>,
    base_url: String,
}

impl AbuseIpDbClient {
    /// Creates a client that talks to `base_url` (normally
    /// [`ABUSEIPDB_BASE_URL`](crate::config::ABUSEIPDB_BASE_URL)).
    pub fn new(client: Arc<reqwest::Client>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn check_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            ABUSEIPDB_CHECK_PATH
        )
    }
}

#[async_trait]
impl ReputationSource for AbuseIpDbClient {
    async fn check(
        &self,
        ip: &ResolvedAddress,
        api_key: &ApiKey,
    ) -> Result<ReputationReport, ReputationError> {
        let url = self.check_url();
        debug!("Checking {ip} against {url}");

        let response = self
            .client
            .get(&url)
            .query(&[("ipAddress", ip.to_string())])
            .header("Key", api_key.expose())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("AbuseIPDB returned {status} for {ip}");
            return Err(ReputationError::Status {
                status: status.as_u16(),
            });
        }

        let raw_body = response.text().await?;
        let result = parse_check_response(&raw_body)?;
        info!(
            "{ip}: abuse confidence {}% ({})",
            result.abuse_confidence_score,
            if result.isp.is_empty() {
                "unknown ISP"
            } else {
                result.isp.as_str()
            }
        );

        Ok(ReputationReport { result, raw_body })
    }
}
