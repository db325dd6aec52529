//! Lookup orchestration.
//!
//! [`LookupOrchestrator`] chains DNS resolution, the reputation check and the
//! summary for a single domain. [`LookupSession`] sits in front of it when
//! lookups can overlap and makes sure only the newest one is shown.

mod orchestrator;
mod session;

// Re-export public API
pub use orchestrator::{LookupOrchestrator, LookupStage};
pub use session::{LookupSession, Submission};

#[cfg(test)]
mod tests;
