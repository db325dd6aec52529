//! domain_risk library: domain → IP → abuse reputation → risk summary
//!
//! This library resolves a domain to an IP address, asks AbuseIPDB how abusive
//! that address is, and has Gemini write a short security summary of the answer.
//! The pieces are exposed separately (resolver, reputation client, summary
//! client, orchestrator, presentation) so another front end can drive them; the
//! `domain_risk` binary is one such front end.
//!
//! # Example
//!
//! ```no_run
//! use domain_risk::{run_lookups, Config};
//! use domain_risk::config::ApiKey;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     domains: vec!["example.com".to_string()],
//!     abuseipdb_key: ApiKey::new("your-abuseipdb-key"),
//!     gemini_key: ApiKey::new("your-gemini-key"),
//!     ..Default::default()
//! };
//!
//! let report = run_lookups(config).await?;
//! println!("{} of {} lookups succeeded", report.successful, report.total);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

mod app;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod initialization;
pub mod lookup;
pub mod models;
pub mod presentation;
pub mod reputation;
pub mod summary;

// Re-export public API
pub use app::validate_domain_input;
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use lookup::{LookupOrchestrator, LookupSession, LookupStage, Submission};
pub use models::LookupOutcome;
pub use presentation::{to_display, DisplayModel, DisplaySink};
pub use run::{run_lookups, run_lookups_with, LookupReport};

// Internal run module (drives a batch of lookups for the CLI)
mod run {
    use std::sync::Arc;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::{info, warn};
    use tokio::io::{AsyncBufReadExt, BufReader};

    use crate::app::{print_lookup_statistics, summary_line};
    use crate::config::{Config, OutputFormat};
    use crate::error_handling::{OutcomeKind, ProcessingStats};
    use crate::lookup::{LookupOrchestrator, LookupSession};
    use crate::presentation::{DisplaySink, JsonSink, TerminalSink};

    /// Results of a batch of lookups.
    #[derive(Debug, Clone)]
    pub struct LookupReport {
        /// Number of domains submitted
        pub total: usize,
        /// Lookups that produced a results panel (including degraded summaries)
        pub successful: usize,
        /// Lookups that ended in a failure message
        pub failed: usize,
        /// Lookups that succeeded but whose summary could not be generated
        pub degraded: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
        /// Human-readable one-line summary of the run
        pub summary: String,
    }

    /// Looks up every domain in `config`, writing each result to stdout.
    ///
    /// Output is coloured text or JSON lines depending on `config.output`.
    /// A domain of `-` reads newline-separated domains from stdin, skipping
    /// blank lines and `#` comments.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The configuration does not validate (missing keys, bad URLs)
    /// - Stdin cannot be read
    /// - The HTTP client cannot be built
    ///
    /// Individual lookup failures are not errors; they are shown and counted.
    pub async fn run_lookups(config: Config) -> Result<LookupReport> {
        let sink: Arc<dyn DisplaySink> = match config.output {
            OutputFormat::Plain => Arc::new(TerminalSink::new()),
            OutputFormat::Json => Arc::new(JsonSink),
        };
        run_lookups_with(config, sink).await
    }

    /// Like [`run_lookups`], showing results on `sink` instead of stdout.
    ///
    /// # Errors
    ///
    /// Same as [`run_lookups`].
    pub async fn run_lookups_with(
        config: Config,
        sink: Arc<dyn DisplaySink>,
    ) -> Result<LookupReport> {
        config.validate().context("Invalid configuration")?;

        let domains = collect_domains(&config.domains)
            .await
            .context("Failed to read domains from stdin")?;
        if domains.is_empty() {
            warn!("No domains to check");
        }

        let orchestrator = LookupOrchestrator::from_config(&config)
            .context("Failed to initialize lookup pipeline")?;
        let stats = Arc::new(ProcessingStats::new());
        let session = LookupSession::new(Arc::new(orchestrator), sink, Arc::clone(&stats));

        info!("Checking {} domain(s)", domains.len());
        let start_time = Instant::now();

        // Submissions run one at a time, so none supersedes another.
        tokio::select! {
            _ = async {
                for domain in &domains {
                    session.submit(domain).await;
                }
            } => {}
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted; remaining domains were not checked");
            }
        }

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        print_lookup_statistics(&stats);

        Ok(LookupReport {
            total: domains.len(),
            successful: stats.successful(),
            failed: stats.failed(),
            degraded: stats.get_count(OutcomeKind::DegradedSummary),
            elapsed_seconds,
            summary: summary_line(&stats, elapsed_seconds),
        })
    }

    /// Expands `-` into the lines of stdin; other arguments pass through as given.
    async fn collect_domains(args: &[String]) -> std::io::Result<Vec<String>> {
        let mut domains = Vec::with_capacity(args.len());
        for arg in args {
            if arg != "-" {
                domains.push(arg.clone());
                continue;
            }
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if let Some(domain) = domain_line(&line) {
                    domains.push(domain.to_string());
                }
            }
        }
        Ok(domains)
    }

    /// The domain on one stdin line, if the line holds one.
    fn domain_line(line: &str) -> Option<&str> {
        let line = line.trim();
        (!line.is_empty() && !line.starts_with('#')).then_some(line)
    }

}
