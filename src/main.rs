//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_risk` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use domain_risk::initialization::init_logger_with;
use domain_risk::{run_lookups, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load API keys from .env if present: current directory first, then next
    // to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_lookups(config).await {
        Ok(report) => {
            // Stderr keeps stdout clean for --output json
            eprintln!("{}", report.summary);
            Ok(())
        }
        Err(e) => {
            eprintln!("domain_risk error: {:#}", e);
            process::exit(1);
        }
    }
}
