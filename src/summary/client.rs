//! Gemini client.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::StatusCode;

use super::prompt::build_prompt;
use super::request::GenerateContentRequest;
use super::response::extract_summary_text;
use crate::config::ApiKey;
use crate::error_handling::SummaryError;
use crate::models::SummaryText;

/// Produces a short natural-language risk summary from reputation data.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarizes the raw AbuseIPDB body.
    ///
    /// # Errors
    ///
    /// Returns a `SummaryError` on transport failure, a non-200 status, an
    /// unparseable body, or a response without candidate text.
    async fn summarize(
        &self,
        raw_reputation_json: &str,
        api_key: &ApiKey,
    ) -> Result<SummaryText, SummaryError>;
}

/// [`Summarizer`] backed by the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Arc<reqwest::Client>,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        client: Arc<reqwest::Client>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Endpoint URL without the key; the key goes in the query string at send time.
    pub(super) fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl Summarizer for GeminiClient {
    async fn summarize(
        &self,
        raw_reputation_json: &str,
        api_key: &ApiKey,
    ) -> Result<SummaryText, SummaryError> {
        let endpoint = self.endpoint();
        let body = GenerateContentRequest::for_prompt(build_prompt(raw_reputation_json));
        debug!("Requesting summary from {endpoint}?key=***");

        let response = self
            .client
            .post(&endpoint)
            .query(&[("key", api_key.expose())])
            .json(&body)
            .send()
            .await
            .map_err(|e| SummaryError::Request(e.without_url()))?;

        let status = response.status();
        let text = response.text().await;
        if status != StatusCode::OK {
            // An unreadable error body still reports the status.
            let body = text.unwrap_or_default();
            warn!("Gemini returned {status}");
            return Err(SummaryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = text.map_err(|e| SummaryError::Request(e.without_url()))?;
        let summary = extract_summary_text(&text)?;
        info!("Summary generated ({} chars)", summary.text.len());
        Ok(summary)
    }
}
