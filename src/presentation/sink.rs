//! Display sinks.
//!
//! A sink receives each published [`DisplayModel`] together with the domain it
//! was submitted for. The CLI uses [`TerminalSink`] or [`JsonSink`]; embedders
//! can plug in their own.

use std::io::{IsTerminal, Write};

use colored::{ColoredString, Colorize};
use serde::Serialize;

use super::types::{DisplayModel, ResultsPanel, RiskTier};

/// Receives lookups ready to be shown.
pub trait DisplaySink: Send + Sync {
    fn show(&self, query: &str, model: &DisplayModel);
}

/// Human-readable output on stdout, tinted by risk tier when stdout is a terminal.
#[derive(Debug, Clone)]
pub struct TerminalSink {
    colorize: bool,
}

impl TerminalSink {
    pub fn new() -> Self {
        Self {
            colorize: std::io::stdout().is_terminal(),
        }
    }
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for TerminalSink {
    fn show(&self, query: &str, model: &DisplayModel) {
        let rendered = render_plain(query, model, self.colorize);
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{rendered}") {
            log::error!("Failed to write lookup result: {e}");
        }
    }
}

/// One JSON object per lookup on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSink;

impl DisplaySink for JsonSink {
    fn show(&self, query: &str, model: &DisplayModel) {
        match render_json(query, model) {
            Ok(line) => {
                let mut stdout = std::io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{line}") {
                    log::error!("Failed to write lookup result: {e}");
                }
            }
            Err(e) => log::error!("Failed to serialize lookup result: {e}"),
        }
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    query: &'a str,
    #[serde(flatten)]
    model: &'a DisplayModel,
}

/// Serializes a model as a single JSON line tagged with its query.
pub fn render_json(query: &str, model: &DisplayModel) -> serde_json::Result<String> {
    serde_json::to_string(&JsonLine { query, model })
}

/// Renders a model as an indented text block.
///
/// Rows whose value is absent are omitted.
pub fn render_plain(query: &str, model: &DisplayModel, colorize: bool) -> String {
    let paint = |text: ColoredString| {
        if colorize {
            text.to_string()
        } else {
            text.clear().to_string()
        }
    };

    match model {
        DisplayModel::Failure { message } => {
            format!("{} {}", paint(query.bold()), paint(format!("✗ {message}").red()))
        }
        DisplayModel::Results(panel) => {
            let mut out = format!(
                "{} → {}\n",
                paint(query.bold()),
                paint(panel.ip_address.as_str().normal())
            );
            let score = format!("{} ({} risk)", panel.confidence, panel.tier);
            push_row(&mut out, "Abuse confidence", &paint(tinted(&score, panel)));
            push_row(&mut out, "ISP", &panel.isp);
            push_row(&mut out, "Location", &panel.location);
            for (label, value) in [
                ("Usage type", &panel.usage_type),
                ("ASN", &panel.asn),
                ("Hostnames", &panel.hostnames),
                ("Domain", &panel.domain),
            ] {
                if let Some(value) = value {
                    push_row(&mut out, label, value);
                }
            }
            push_row(&mut out, "Summary", &panel.summary);
            out.truncate(out.trim_end().len());
            out
        }
    }
}

fn push_row(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("  {:<18}{}\n", format!("{label}:"), value));
}

/// Score text in the tier's border colour.
fn tinted(text: &str, panel: &ResultsPanel) -> ColoredString {
    match hex_rgb(panel.colors.border) {
        Some((r, g, b)) => text.truecolor(r, g, b).bold(),
        None => match panel.tier {
            RiskTier::Low => text.green(),
            RiskTier::Medium => text.yellow(),
            RiskTier::High => text.red(),
        },
    }
}

fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
