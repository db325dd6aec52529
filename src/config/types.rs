//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::fmt;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::config::constants::{
    ABUSEIPDB_API_KEY_ENV, ABUSEIPDB_BASE_URL, DEFAULT_GEMINI_MODEL, GEMINI_API_KEY_ENV,
    GEMINI_BASE_URL,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How lookup results are written to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored report, one block per domain
    Plain,
    /// One JSON object per domain
    Json,
}

/// Which resolved address is checked when a domain has several.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AddressPreference {
    /// First address in resolver order
    #[default]
    First,
    /// First IPv4 address, falling back to the first address
    Ipv4,
    /// First IPv6 address, falling back to the first address
    Ipv6,
}

/// What a failed summary does to the overall lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SummaryPolicy {
    /// Lookup still succeeds; the summary slot shows the failure text
    #[default]
    Degrade,
    /// Lookup ends as a summary failure carrying the reputation data
    Strict,
}

/// An API credential.
///
/// The value never appears in `Debug` output, so configs can be logged safely.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for placing in a request. Do not log the result.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("ApiKey(<empty>)")
        } else {
            f.write_str("ApiKey(***)")
        }
    }
}

impl FromStr for ApiKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().to_string()))
    }
}

/// A configuration value that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending option
    pub field: &'static str,
    /// What is wrong and what is expected
    pub message: String,
}

impl ConfigValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Command-line options and configuration.
///
/// This struct is automatically generated by `clap` from the field attributes.
/// Credentials are normally supplied through the environment (or a `.env` file)
/// rather than on the command line.
///
/// # Examples
///
/// ```bash
/// # Check a single domain
/// domain_risk example.com
///
/// # Several domains, JSON output
/// domain_risk example.com example.org --output json
///
/// # Domains from stdin, prefer IPv6 addresses
/// cat domains.txt | domain_risk - --address-preference ipv6
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "domain_risk",
    version,
    about = "Resolves domains and summarizes the abuse reputation of their IP addresses."
)]
pub struct Config {
    /// Domains to check (use `-` to read one domain per line from stdin)
    #[arg(value_name = "DOMAIN", required = true)]
    pub domains: Vec<String>,

    /// AbuseIPDB API key
    #[arg(long, env = ABUSEIPDB_API_KEY_ENV, hide_env_values = true)]
    pub abuseipdb_key: ApiKey,

    /// Gemini API key
    #[arg(long, env = GEMINI_API_KEY_ENV, hide_env_values = true)]
    pub gemini_key: ApiKey,

    /// Gemini model used for the risk summary
    #[arg(long, default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    /// Which address to check when a domain resolves to several
    #[arg(long, value_enum, default_value_t = AddressPreference::First)]
    pub address_preference: AddressPreference,

    /// Whether a failed summary fails the whole lookup
    #[arg(long, value_enum, default_value_t = SummaryPolicy::Degrade)]
    pub summary_policy: SummaryPolicy,

    /// Per-request HTTP timeout in seconds (no timeout when unset)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Report format: plain|json
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// AbuseIPDB base URL
    #[arg(long, default_value = ABUSEIPDB_BASE_URL, hide = true)]
    pub abuseipdb_url: String,

    /// Gemini base URL
    #[arg(long, default_value = GEMINI_BASE_URL, hide = true)]
    pub gemini_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            abuseipdb_key: ApiKey::default(),
            gemini_key: ApiKey::default(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            address_preference: AddressPreference::First,
            summary_policy: SummaryPolicy::Degrade,
            timeout_seconds: None,
            output: OutputFormat::Plain,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            abuseipdb_url: ABUSEIPDB_BASE_URL.to_string(),
            gemini_url: GEMINI_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Checks the configuration before any network resource is built.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found: an empty API key, a zero timeout,
    /// an empty model name, or a base URL that is not http(s).
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.abuseipdb_key.is_empty() {
            return Err(ConfigValidationError::new(
                "abuseipdb_key",
                "must not be empty (set ABUSEIPDB_API_KEY or pass --abuseipdb-key)",
            ));
        }
        if self.gemini_key.is_empty() {
            return Err(ConfigValidationError::new(
                "gemini_key",
                "must not be empty (set GEMINI_API_KEY or pass --gemini-key)",
            ));
        }
        if self.gemini_model.trim().is_empty() {
            return Err(ConfigValidationError::new(
                "gemini_model",
                "must name a model, e.g. gemini-2.0-flash",
            ));
        }
        if self.timeout_seconds == Some(0) {
            return Err(ConfigValidationError::new(
                "timeout_seconds",
                "must be greater than 0 (omit the flag to disable timeouts)",
            ));
        }
        validate_base_url("abuseipdb_url", &self.abuseipdb_url)?;
        validate_base_url("gemini_url", &self.gemini_url)?;
        Ok(())
    }
}

fn validate_base_url(field: &'static str, value: &str) -> Result<(), ConfigValidationError> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(parsed) => Err(ConfigValidationError::new(
            field,
            format!("unsupported scheme '{}', expected http or https", parsed.scheme()),
        )),
        Err(e) => Err(ConfigValidationError::new(
            field,
            format!("'{value}' is not a valid URL: {e}"),
        )),
    }
}
