//! Presentation of lookup outcomes.
//!
//! This module provides:
//! - [`to_display`]: outcome → [`DisplayModel`] (risk tier, colours, optional rows)
//! - [`DisplaySink`] and the terminal/JSON sinks used by the CLI

mod mapper;
mod sink;
mod types;

// Re-export public API
pub use mapper::to_display;
pub use sink::{render_json, render_plain, DisplaySink, JsonSink, TerminalSink};
pub use types::{DisplayModel, ResultsPanel, RiskTier, TierColors};
