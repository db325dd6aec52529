//! Natural-language risk summaries via Gemini.
//!
//! The prompt embeds the AbuseIPDB body exactly as received. Only the first
//! candidate's first text part is used.

mod client;
mod prompt;
mod request;
mod response;

// Re-export public API
pub use client::{GeminiClient, Summarizer};
pub use prompt::build_prompt;
pub use response::extract_summary_text;
