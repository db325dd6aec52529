//! Tests for command-line parsing of `Config`.

use clap::Parser;
use domain_risk::config::{AddressPreference, LogFormat, LogLevel, OutputFormat, SummaryPolicy};
use domain_risk::Config;

fn parse(args: &[&str]) -> Result<Config, clap::Error> {
    let mut argv = vec!["domain_risk", "--abuseipdb-key", "abuse", "--gemini-key", "gem"];
    argv.extend_from_slice(args);
    Config::try_parse_from(argv)
}

#[test]
fn test_defaults() {
    let config = parse(&["example.com"]).expect("should parse");

    assert_eq!(config.domains, vec!["example.com".to_string()]);
    assert_eq!(config.abuseipdb_key.expose(), "abuse");
    assert_eq!(config.gemini_key.expose(), "gem");
    assert_eq!(config.gemini_model, "gemini-2.0-flash");
    assert_eq!(config.address_preference, AddressPreference::First);
    assert_eq!(config.summary_policy, SummaryPolicy::Degrade);
    assert_eq!(config.timeout_seconds, None);
    assert_eq!(config.output, OutputFormat::Plain);
    assert!(matches!(config.log_level, LogLevel::Warn));
    assert!(matches!(config.log_format, LogFormat::Plain));
    assert_eq!(config.abuseipdb_url, "https://api.abuseipdb.com");
    assert_eq!(config.gemini_url, "https://generativelanguage.googleapis.com");
    assert!(config.validate().is_ok());
}

#[test]
fn test_every_option() {
    let config = parse(&[
        "--gemini-model",
        "gemini-1.5-flash",
        "--address-preference",
        "ipv6",
        "--summary-policy",
        "strict",
        "--timeout-seconds",
        "15",
        "--output",
        "json",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--abuseipdb-url",
        "http://127.0.0.1:8080",
        "--gemini-url",
        "http://127.0.0.1:8081",
        "example.com",
        "example.org",
    ])
    .expect("should parse");

    assert_eq!(config.domains, vec!["example.com", "example.org"]);
    assert_eq!(config.gemini_model, "gemini-1.5-flash");
    assert_eq!(config.address_preference, AddressPreference::Ipv6);
    assert_eq!(config.summary_policy, SummaryPolicy::Strict);
    assert_eq!(config.timeout_seconds, Some(15));
    assert_eq!(config.output, OutputFormat::Json);
    assert!(matches!(config.log_level, LogLevel::Debug));
    assert!(matches!(config.log_format, LogFormat::Json));
    assert_eq!(config.abuseipdb_url, "http://127.0.0.1:8080");
    assert_eq!(config.gemini_url, "http://127.0.0.1:8081");
}

#[test]
fn test_stdin_marker_is_a_domain_argument() {
    let config = parse(&["-"]).expect("should parse");
    assert_eq!(config.domains, vec!["-"]);
}

#[test]
fn test_domain_is_required() {
    let err = parse(&[]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_invalid_enum_values_are_rejected() {
    for args in [
        ["--address-preference", "ipv5", "example.com"],
        ["--summary-policy", "lenient", "example.com"],
        ["--output", "xml", "example.com"],
    ] {
        let err = parse(&args).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue, "{args:?}");
    }
}

#[test]
fn test_api_keys_from_environment() {
    // The only test in this file that touches these variables.
    std::env::set_var("ABUSEIPDB_API_KEY", "env-abuse");
    std::env::set_var("GEMINI_API_KEY", "env-gem");
    let config = Config::try_parse_from(["domain_risk", "example.com"]).expect("should parse");
    assert_eq!(config.abuseipdb_key.expose(), "env-abuse");
    assert_eq!(config.gemini_key.expose(), "env-gem");

    std::env::remove_var("ABUSEIPDB_API_KEY");
    std::env::remove_var("GEMINI_API_KEY");
    let err = Config::try_parse_from(["domain_risk", "example.com"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_keys_do_not_leak_into_debug_output() {
    let config = parse(&["example.com"]).unwrap();
    let debug = format!("{config:?}");
    assert!(!debug.contains("abuse\""));
    assert!(!debug.contains("\"gem\""));
}
