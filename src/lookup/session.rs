//! Latest-wins lookup session.
//!
//! A session feeds one display sink. Each submission gets a generation number
//! and cancels the lookup before it, and an outcome is shown only while its
//! generation is still the newest. A slow answer to an old domain can never
//! replace the answer to a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info, warn};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::orchestrator::{LookupOrchestrator, LookupStage};
use crate::error_handling::{InputError, OutcomeKind, ProcessingStats};
use crate::presentation::{to_display, DisplayModel, DisplaySink};

/// What became of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Shown on the sink
    Published(OutcomeKind),
    /// A newer submission started first; nothing was shown
    Superseded,
}

/// Runs lookups for one display, keeping only the newest.
pub struct LookupSession {
    orchestrator: Arc<LookupOrchestrator>,
    sink: Arc<dyn DisplaySink>,
    stats: Arc<ProcessingStats>,
    generation: AtomicU64,
    /// Token of the newest lookup; held while publishing
    current: Mutex<CancellationToken>,
    stage: RwLock<LookupStage>,
}

impl LookupSession {
    pub fn new(
        orchestrator: Arc<LookupOrchestrator>,
        sink: Arc<dyn DisplaySink>,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        Self {
            orchestrator,
            sink,
            stats,
            generation: AtomicU64::new(0),
            current: Mutex::new(CancellationToken::new()),
            stage: RwLock::new(LookupStage::Idle),
        }
    }

    /// Stage of the newest lookup.
    pub fn stage(&self) -> LookupStage {
        *self.stage.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts a lookup for `domain`, cancelling whichever lookup is in flight.
    ///
    /// Input errors are shown on the sink like any other failure. The outcome
    /// is recorded in the session's [`ProcessingStats`] either way.
    pub async fn submit(&self, domain: &str) -> Submission {
        let (generation, token) = {
            let mut current = self.current.lock().await;
            current.cancel();
            *current = CancellationToken::new();
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            (generation, current.clone())
        };
        debug!("Lookup #{generation} for '{domain}'");

        let on_stage = |stage: LookupStage| {
            let mut slot = self.stage.write().unwrap_or_else(PoisonError::into_inner);
            if self.generation.load(Ordering::SeqCst) == generation && !token.is_cancelled() {
                *slot = stage;
            }
        };

        let result = tokio::select! {
            _ = token.cancelled() => None,
            result = self.orchestrator.run_observed(domain, &on_stage) => Some(result),
        };

        let Some(result) = result else {
            return self.superseded(generation, domain);
        };

        let (model, kind) = match result {
            Ok(outcome) => (to_display(&outcome), outcome.kind()),
            Err(e) => {
                on_stage(LookupStage::Idle);
                let kind = match e {
                    InputError::EmptyDomain => OutcomeKind::EmptyInput,
                    _ => OutcomeKind::InvalidInput,
                };
                (DisplayModel::failure(e.to_string()), kind)
            }
        };

        {
            let current = self.current.lock().await;
            if self.generation.load(Ordering::SeqCst) != generation || current.is_cancelled() {
                drop(current);
                return self.superseded(generation, domain);
            }
            self.sink.show(domain, &model);
        }

        self.stats.record(kind);
        if kind.is_success() {
            info!("Lookup #{generation} for '{domain}': {kind}");
        } else {
            warn!("Lookup #{generation} for '{domain}': {kind}");
        }
        Submission::Published(kind)
    }

    /// Cancels the lookup in flight, if any, and returns the stage to idle.
    pub async fn cancel(&self) {
        self.current.lock().await.cancel();
        *self.stage.write().unwrap_or_else(PoisonError::into_inner) = LookupStage::Idle;
    }

    fn superseded(&self, generation: u64, domain: &str) -> Submission {
        debug!("Lookup #{generation} for '{domain}' superseded");
        self.stats.record(OutcomeKind::Superseded);
        Submission::Superseded
    }
}
