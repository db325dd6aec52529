//! Tests for the orchestrator and session, using in-process fakes.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::*;
use crate::config::{ApiKey, SummaryPolicy};
use crate::dns::DomainResolver;
use crate::error_handling::{
    InputError, OutcomeKind, ProcessingStats, ReputationError, ResolutionError, SummaryError,
};
use crate::models::{LookupOutcome, ReputationReport, ResolvedAddress, Summary, SummaryText};
use crate::presentation::{DisplayModel, DisplaySink};
use crate::reputation::{parse_check_response, ReputationSource};
use crate::summary::Summarizer;

struct StaticResolver {
    answers: HashMap<String, IpAddr>,
    calls: Mutex<Vec<String>>,
}

impl StaticResolver {
    fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            answers: entries
                .iter()
                .map(|(domain, ip)| (domain.to_string(), ip.parse().unwrap()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DomainResolver for StaticResolver {
    async fn resolve(&self, domain: &str) -> Result<ResolvedAddress, ResolutionError> {
        self.calls.lock().unwrap().push(domain.to_string());
        self.answers
            .get(domain)
            .copied()
            .map(ResolvedAddress::new)
            .ok_or_else(|| ResolutionError {
                domain: domain.to_string(),
            })
    }
}

/// Blocks on `slow.test` until released; everything else resolves at once.
struct GatedResolver {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl DomainResolver for GatedResolver {
    async fn resolve(&self, domain: &str) -> Result<ResolvedAddress, ResolutionError> {
        if domain == "slow.test" {
            self.entered.notify_one();
            self.release.notified().await;
        }
        Ok(ResolvedAddress::new("192.0.2.10".parse().unwrap()))
    }
}

struct FakeReputation {
    /// `None` answers with HTTP 404
    score: Option<u8>,
    calls: AtomicUsize,
    last_key: Mutex<Option<String>>,
}

impl FakeReputation {
    fn scoring(score: u8) -> Self {
        Self {
            score: Some(score),
            calls: AtomicUsize::new(0),
            last_key: Mutex::new(None),
        }
    }

    fn failing() -> Self {
        Self {
            score: None,
            ..Self::scoring(0)
        }
    }
}

#[async_trait]
impl ReputationSource for FakeReputation {
    async fn check(
        &self,
        ip: &ResolvedAddress,
        api_key: &ApiKey,
    ) -> Result<ReputationReport, ReputationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_key.lock().unwrap() = Some(api_key.expose().to_string());
        let score = self.score.ok_or(ReputationError::Status { status: 404 })?;
        let raw_body = format!(
            "{{\"data\": {{\"ipAddress\": \"{ip}\", \"abuseConfidenceScore\": {score}, \"countryCode\": \"IE\"}}}}"
        );
        Ok(ReputationReport {
            result: parse_check_response(&raw_body)?,
            raw_body,
        })
    }
}

struct FakeSummarizer {
    answer: fn() -> Result<SummaryText, SummaryError>,
    calls: AtomicUsize,
    last_input: Mutex<Option<(String, String)>>,
}

impl FakeSummarizer {
    fn answering(answer: fn() -> Result<SummaryText, SummaryError>) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(
        &self,
        raw_reputation_json: &str,
        api_key: &ApiKey,
    ) -> Result<SummaryText, SummaryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some((
            raw_reputation_json.to_string(),
            api_key.expose().to_string(),
        ));
        (self.answer)()
    }
}

#[derive(Default)]
struct RecordingSink {
    shown: Mutex<Vec<(String, DisplayModel)>>,
}

impl RecordingSink {
    fn shown(&self) -> Vec<(String, DisplayModel)> {
        self.shown.lock().unwrap().clone()
    }
}

impl DisplaySink for RecordingSink {
    fn show(&self, query: &str, model: &DisplayModel) {
        self.shown
            .lock()
            .unwrap()
            .push((query.to_string(), model.clone()));
    }
}

fn good_summary() -> Result<SummaryText, SummaryError> {
    Ok(SummaryText::new("Low risk."))
}

fn empty_summary() -> Result<SummaryText, SummaryError> {
    Err(SummaryError::NoContent)
}

fn orchestrator(
    resolver: Arc<dyn DomainResolver>,
    reputation: Arc<FakeReputation>,
    summarizer: Arc<FakeSummarizer>,
    policy: SummaryPolicy,
) -> LookupOrchestrator {
    LookupOrchestrator::new(
        resolver,
        reputation,
        summarizer,
        ApiKey::new("abuse-key"),
        ApiKey::new("gemini-key"),
        policy,
    )
}

struct Pipeline {
    resolver: Arc<StaticResolver>,
    reputation: Arc<FakeReputation>,
    summarizer: Arc<FakeSummarizer>,
    orchestrator: LookupOrchestrator,
}

fn pipeline(
    reputation: FakeReputation,
    answer: fn() -> Result<SummaryText, SummaryError>,
    policy: SummaryPolicy,
) -> Pipeline {
    let resolver = Arc::new(StaticResolver::new(&[("example.com", "93.184.216.34")]));
    let reputation = Arc::new(reputation);
    let summarizer = Arc::new(FakeSummarizer::answering(answer));
    let orchestrator = orchestrator(
        resolver.clone(),
        reputation.clone(),
        summarizer.clone(),
        policy,
    );
    Pipeline {
        resolver,
        reputation,
        summarizer,
        orchestrator,
    }
}

#[tokio::test]
async fn test_empty_input_makes_no_calls() {
    let p = pipeline(FakeReputation::scoring(5), good_summary, SummaryPolicy::Degrade);

    for input in ["", "   ", "\t\n"] {
        let err = p.orchestrator.run(input).await.unwrap_err();
        assert_eq!(err, InputError::EmptyDomain);
        assert_eq!(err.to_string(), "Please enter a domain name");
    }

    assert!(p.resolver.calls().is_empty());
    assert_eq!(p.reputation.calls.load(Ordering::SeqCst), 0);
    assert_eq!(p.summarizer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_invalid_input_makes_no_calls() {
    let p = pipeline(FakeReputation::scoring(5), good_summary, SummaryPolicy::Degrade);

    let err = p.orchestrator.run("not a domain").await.unwrap_err();
    assert!(matches!(err, InputError::InvalidDomain(_)));
    assert!(p.resolver.calls().is_empty());
}

#[tokio::test]
async fn test_input_is_trimmed_and_lowercased_before_resolving() {
    let p = pipeline(FakeReputation::scoring(5), good_summary, SummaryPolicy::Degrade);

    let outcome = p.orchestrator.run("  Example.COM \n").await.unwrap();
    assert!(outcome.is_success());
    assert_eq!(p.resolver.calls(), vec!["example.com".to_string()]);
}

#[tokio::test]
async fn test_success_passes_raw_body_and_keys() {
    let p = pipeline(FakeReputation::scoring(5), good_summary, SummaryPolicy::Degrade);

    let outcome = p.orchestrator.run("example.com").await.unwrap();
    let LookupOutcome::Success { report, summary } = &outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(report.result.ip_address, "93.184.216.34");
    assert_eq!(report.result.abuse_confidence_score, 5);
    assert!(matches!(summary, Summary::Generated(text) if text.text == "Low risk."));

    assert_eq!(
        p.reputation.last_key.lock().unwrap().as_deref(),
        Some("abuse-key")
    );
    let (raw, key) = p.summarizer.last_input.lock().unwrap().clone().unwrap();
    assert_eq!(raw, report.raw_body);
    assert_eq!(key, "gemini-key");
}

#[tokio::test]
async fn test_resolution_failure_short_circuits() {
    let p = pipeline(FakeReputation::scoring(5), good_summary, SummaryPolicy::Degrade);

    let outcome = p.orchestrator.run("nowhere.invalid").await.unwrap();
    assert!(matches!(outcome, LookupOutcome::ResolutionFailed(ref e) if e.domain == "nowhere.invalid"));
    assert_eq!(p.reputation.calls.load(Ordering::SeqCst), 0);
    assert_eq!(p.summarizer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_reputation_failure_short_circuits() {
    let p = pipeline(FakeReputation::failing(), good_summary, SummaryPolicy::Degrade);

    let outcome = p.orchestrator.run("example.com").await.unwrap();
    assert!(matches!(
        outcome,
        LookupOutcome::ReputationFailed(ReputationError::Status { status: 404 })
    ));
    assert_eq!(p.reputation.calls.load(Ordering::SeqCst), 1);
    assert_eq!(p.summarizer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_degrade_policy_keeps_success() {
    let p = pipeline(FakeReputation::scoring(70), empty_summary, SummaryPolicy::Degrade);

    let outcome = p.orchestrator.run("example.com").await.unwrap();
    assert_eq!(outcome.kind(), OutcomeKind::DegradedSummary);
    let LookupOutcome::Success { summary, .. } = &outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(summary.display_text(), "No summary generated.");
}

#[tokio::test]
async fn test_strict_policy_reports_summary_failure() {
    let p = pipeline(FakeReputation::scoring(70), empty_summary, SummaryPolicy::Strict);

    let outcome = p.orchestrator.run("example.com").await.unwrap();
    assert!(matches!(
        outcome,
        LookupOutcome::SummaryFailed {
            error: SummaryError::NoContent,
            ..
        }
    ));
    assert_eq!(outcome.reputation().unwrap().abuse_confidence_score, 70);
}

#[tokio::test]
async fn test_stage_transitions() {
    let p = pipeline(FakeReputation::scoring(5), good_summary, SummaryPolicy::Degrade);
    let seen = Mutex::new(Vec::new());
    let record = |stage: LookupStage| seen.lock().unwrap().push(stage);

    p.orchestrator
        .run_observed("example.com", &record)
        .await
        .unwrap();
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            LookupStage::Resolving,
            LookupStage::CheckingReputation,
            LookupStage::Summarizing,
            LookupStage::Done,
        ]
    );

    seen.lock().unwrap().clear();
    p.orchestrator
        .run_observed("nowhere.invalid", &record)
        .await
        .unwrap();
    assert_eq!(
        *seen.lock().unwrap(),
        vec![LookupStage::Resolving, LookupStage::Done]
    );
}

fn session_with(
    resolver: Arc<dyn DomainResolver>,
) -> (Arc<LookupSession>, Arc<RecordingSink>, Arc<ProcessingStats>) {
    let orchestrator = orchestrator(
        resolver,
        Arc::new(FakeReputation::scoring(5)),
        Arc::new(FakeSummarizer::answering(good_summary)),
        SummaryPolicy::Degrade,
    );
    let sink = Arc::new(RecordingSink::default());
    let stats = Arc::new(ProcessingStats::new());
    let session = Arc::new(LookupSession::new(
        Arc::new(orchestrator),
        sink.clone(),
        stats.clone(),
    ));
    (session, sink, stats)
}

#[tokio::test]
async fn test_session_publishes_and_counts() {
    let resolver = Arc::new(StaticResolver::new(&[("example.com", "93.184.216.34")]));
    let (session, sink, stats) = session_with(resolver);
    assert_eq!(session.stage(), LookupStage::Idle);

    assert_eq!(
        session.submit("example.com").await,
        Submission::Published(OutcomeKind::Success)
    );
    assert_eq!(
        session.submit("gone.invalid").await,
        Submission::Published(OutcomeKind::ResolutionFailed)
    );
    assert_eq!(session.stage(), LookupStage::Done);

    let shown = sink.shown();
    assert_eq!(shown.len(), 2);
    assert_eq!(shown[0].0, "example.com");
    assert!(!shown[0].1.is_failure());
    assert_eq!(
        shown[1].1,
        DisplayModel::failure("Could not resolve domain to IP.")
    );
    assert_eq!(stats.get_count(OutcomeKind::Success), 1);
    assert_eq!(stats.get_count(OutcomeKind::ResolutionFailed), 1);
}

#[tokio::test]
async fn test_session_shows_input_errors() {
    let resolver = Arc::new(StaticResolver::new(&[]));
    let (session, sink, stats) = session_with(resolver.clone());

    assert_eq!(
        session.submit("  ").await,
        Submission::Published(OutcomeKind::EmptyInput)
    );
    assert_eq!(
        sink.shown(),
        vec![(
            "  ".to_string(),
            DisplayModel::failure("Please enter a domain name")
        )]
    );
    assert_eq!(stats.get_count(OutcomeKind::EmptyInput), 1);
    assert!(resolver.calls().is_empty());
    assert_eq!(session.stage(), LookupStage::Idle);
}

#[tokio::test]
async fn test_stale_lookup_is_never_shown() {
    let resolver = Arc::new(GatedResolver {
        entered: Notify::new(),
        release: Notify::new(),
    });
    let (session, sink, stats) = session_with(resolver.clone());

    let slow = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.submit("slow.test").await })
    };
    resolver.entered.notified().await;

    let fast = session.submit("fast.test").await;
    assert_eq!(fast, Submission::Published(OutcomeKind::Success));

    resolver.release.notify_waiters();
    assert_eq!(slow.await.unwrap(), Submission::Superseded);

    let shown = sink.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].0, "fast.test");
    assert_eq!(stats.get_count(OutcomeKind::Superseded), 1);
    assert_eq!(stats.get_count(OutcomeKind::Success), 1);
}

#[tokio::test]
async fn test_cancel_drops_lookup_in_flight() {
    let resolver = Arc::new(GatedResolver {
        entered: Notify::new(),
        release: Notify::new(),
    });
    let (session, sink, stats) = session_with(resolver.clone());

    let slow = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.submit("slow.test").await })
    };
    resolver.entered.notified().await;
    assert_eq!(session.stage(), LookupStage::Resolving);
    session.cancel().await;
    assert_eq!(session.stage(), LookupStage::Idle);

    assert_eq!(slow.await.unwrap(), Submission::Superseded);
    assert_eq!(session.stage(), LookupStage::Idle);
    assert!(sink.shown().is_empty());
    assert_eq!(stats.get_count(OutcomeKind::Superseded), 1);
}
