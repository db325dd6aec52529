//! The lookup pipeline: resolve, check reputation, summarize.

use std::fmt;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::app::validate_domain_input;
use crate::config::{ApiKey, Config, SummaryPolicy};
use crate::dns::{DnsResolver, DomainResolver};
use crate::error_handling::{InitializationError, InputError};
use crate::initialization::{init_client, init_resolver};
use crate::models::{LookupOutcome, LookupRequest, Summary};
use crate::reputation::{AbuseIpDbClient, ReputationSource};
use crate::summary::{GeminiClient, Summarizer};

/// Where a lookup currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStage {
    Idle,
    Resolving,
    CheckingReputation,
    Summarizing,
    Done,
}

impl fmt::Display for LookupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LookupStage::Idle => "idle",
            LookupStage::Resolving => "resolving",
            LookupStage::CheckingReputation => "checking reputation",
            LookupStage::Summarizing => "summarizing",
            LookupStage::Done => "done",
        };
        f.write_str(label)
    }
}

/// Runs one domain through the three stages, one after another.
///
/// Resolution and reputation failures end the lookup; a summary failure is
/// handled according to the configured [`SummaryPolicy`].
pub struct LookupOrchestrator {
    resolver: Arc<dyn DomainResolver>,
    reputation: Arc<dyn ReputationSource>,
    summarizer: Arc<dyn Summarizer>,
    abuseipdb_key: ApiKey,
    gemini_key: ApiKey,
    summary_policy: SummaryPolicy,
}

impl fmt::Debug for LookupOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LookupOrchestrator")
            .field("abuseipdb_key", &self.abuseipdb_key)
            .field("gemini_key", &self.gemini_key)
            .field("summary_policy", &self.summary_policy)
            .finish_non_exhaustive()
    }
}

impl LookupOrchestrator {
    pub fn new(
        resolver: Arc<dyn DomainResolver>,
        reputation: Arc<dyn ReputationSource>,
        summarizer: Arc<dyn Summarizer>,
        abuseipdb_key: ApiKey,
        gemini_key: ApiKey,
        summary_policy: SummaryPolicy,
    ) -> Self {
        Self {
            resolver,
            reputation,
            summarizer,
            abuseipdb_key,
            gemini_key,
            summary_policy,
        }
    }

    /// Builds the production pipeline (hickory, AbuseIPDB, Gemini) from `config`.
    ///
    /// Both API clients share one HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let client = init_client(config)?;
        let resolver = DnsResolver::new(init_resolver(), config.address_preference);
        let reputation = AbuseIpDbClient::new(Arc::clone(&client), config.abuseipdb_url.clone());
        let summarizer = GeminiClient::new(
            client,
            config.gemini_url.clone(),
            config.gemini_model.clone(),
        );

        Ok(Self::new(
            Arc::new(resolver),
            Arc::new(reputation),
            Arc::new(summarizer),
            config.abuseipdb_key.clone(),
            config.gemini_key.clone(),
            config.summary_policy,
        ))
    }

    /// Validates `domain` and runs the lookup.
    ///
    /// # Errors
    ///
    /// Returns `InputError` without touching the network when the input is empty
    /// or not a domain. Every later failure is reported inside the outcome.
    pub async fn run(&self, domain: &str) -> Result<LookupOutcome, InputError> {
        self.run_observed(domain, &|_| {}).await
    }

    /// Like [`run`](Self::run), calling `on_stage` at every stage transition.
    pub async fn run_observed(
        &self,
        domain: &str,
        on_stage: &(dyn Fn(LookupStage) + Send + Sync),
    ) -> Result<LookupOutcome, InputError> {
        let request = LookupRequest {
            domain: validate_domain_input(domain)?,
        };
        Ok(self.execute(&request, on_stage).await)
    }

    async fn execute(
        &self,
        request: &LookupRequest,
        on_stage: &(dyn Fn(LookupStage) + Send + Sync),
    ) -> LookupOutcome {
        let domain = request.domain.as_str();
        let enter = |stage: LookupStage| {
            debug!("{domain}: {stage}");
            on_stage(stage);
        };

        enter(LookupStage::Resolving);
        let address = match self.resolver.resolve(domain).await {
            Ok(address) => address,
            Err(e) => {
                warn!("{e}");
                enter(LookupStage::Done);
                return LookupOutcome::ResolutionFailed(e);
            }
        };
        info!("{domain} resolved to {address}");

        enter(LookupStage::CheckingReputation);
        let report = match self.reputation.check(&address, &self.abuseipdb_key).await {
            Ok(report) => report,
            Err(e) => {
                warn!("{domain}: {e}");
                enter(LookupStage::Done);
                return LookupOutcome::ReputationFailed(e);
            }
        };

        enter(LookupStage::Summarizing);
        let summary = self
            .summarizer
            .summarize(&report.raw_body, &self.gemini_key)
            .await;
        enter(LookupStage::Done);

        match (summary, self.summary_policy) {
            (Ok(text), _) => LookupOutcome::Success {
                report,
                summary: Summary::Generated(text),
            },
            (Err(error), SummaryPolicy::Degrade) => {
                warn!("{domain}: summary unavailable: {error}");
                LookupOutcome::Success {
                    report,
                    summary: Summary::Degraded(error),
                }
            }
            (Err(error), SummaryPolicy::Strict) => {
                warn!("{domain}: summary failed: {error}");
                LookupOutcome::SummaryFailed { report, error }
            }
        }
    }
}
