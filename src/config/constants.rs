//! Configuration constants.
//!
//! This module defines the endpoints, generation parameters, risk thresholds and
//! user-facing messages used throughout the lookup pipeline.

// Reputation service (AbuseIPDB)
/// Base URL of the AbuseIPDB API
pub const ABUSEIPDB_BASE_URL: &str = "https://api.abuseipdb.com";
/// Path of the single-IP check endpoint, relative to the base URL
pub const ABUSEIPDB_CHECK_PATH: &str = "/api/v2/check";
/// Environment variable holding the AbuseIPDB API key
pub const ABUSEIPDB_API_KEY_ENV: &str = "ABUSEIPDB_API_KEY";

// Summary service (Gemini)
/// Base URL of the Gemini generative language API
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Model used for risk summaries unless overridden
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

// Generation parameters sent with every summary request
pub const SUMMARY_TEMPERATURE: f32 = 0.7;
pub const SUMMARY_TOP_K: u32 = 40;
pub const SUMMARY_TOP_P: f32 = 0.95;
pub const SUMMARY_MAX_OUTPUT_TOKENS: u32 = 512;

/// Safety category relaxed for summaries (never blocked)
pub const SUMMARY_SAFETY_CATEGORY: &str = "HARM_CATEGORY_HARASSMENT";
pub const SUMMARY_SAFETY_THRESHOLD: &str = "BLOCK_NONE";

// Risk banding of the abuse confidence score
/// Scores strictly below this are low risk
pub const LOW_RISK_UPPER_BOUND: u8 = 20;
/// Scores up to and including this are medium risk; anything above is high
pub const MEDIUM_RISK_UPPER_BOUND: u8 = 60;
/// Largest abuse confidence score AbuseIPDB reports
pub const MAX_CONFIDENCE_SCORE: u8 = 100;

// Tier colours (background, border)
pub const LOW_RISK_BACKGROUND: &str = "#E8F5E9";
pub const LOW_RISK_BORDER: &str = "#388E3C";
pub const MEDIUM_RISK_BACKGROUND: &str = "#FFFDE7";
pub const MEDIUM_RISK_BORDER: &str = "#FBC02D";
pub const HIGH_RISK_BACKGROUND: &str = "#FFEBEE";
pub const HIGH_RISK_BORDER: &str = "#D32F2F";

// User-facing messages
pub const EMPTY_DOMAIN_MESSAGE: &str = "Please enter a domain name";
pub const RESOLUTION_FAILED_MESSAGE: &str = "Could not resolve domain to IP.";
pub const REPUTATION_FAILED_MESSAGE: &str = "Could not retrieve IP data from AbuseIPDB.";
pub const NO_SUMMARY_MESSAGE: &str = "No summary generated.";

/// Maximum domain length accepted from user input (RFC 1035 limit for a full name)
pub const MAX_DOMAIN_LENGTH: usize = 253;

/// DNS query timeout in seconds
/// Most lookups finish well under a second; a single attempt is made.
pub const DNS_TIMEOUT_SECS: u64 = 5;

/// User-Agent sent to both APIs
pub const USER_AGENT: &str = concat!("domain_risk/", env!("CARGO_PKG_VERSION"));
