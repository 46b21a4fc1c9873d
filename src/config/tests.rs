//! Configuration tests
//!
//! Round-trip guards: whatever to_toml() writes must parse back through
//! FileConfig. When you add a new field, these tests fail until both
//! sides agree on the format.

use super::*;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that serialized config can be parsed back.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

/// Values set on the config must survive the trip through TOML.
#[test]
fn test_config_roundtrip_preserves_values() {
    let mut config = Config::default();
    config.news_api_key = Some("pub_1234".to_string());
    config.openai_api_key = Some("sk-test".to_string());
    config.cors_origin = Some("https://naijahub.example".to_string());
    config.news_ttl_secs = 120;
    config.summary_model = "gpt-4o".to_string();
    config.logging.level = "debug".to_string();
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Never;

    let toml_str = config.to_toml();
    let parsed: FileConfig = toml::from_str(&toml_str).expect("config should round-trip");

    assert_eq!(parsed.news_api_key, Some("pub_1234".to_string()));
    assert_eq!(parsed.openai_api_key, Some("sk-test".to_string()));
    assert_eq!(
        parsed.cors_origin,
        Some("https://naijahub.example".to_string())
    );
    assert_eq!(parsed.news_ttl_secs, Some(120));
    assert_eq!(parsed.summary_model, Some("gpt-4o".to_string()));

    let logging = parsed.logging.expect("logging section should be present");
    assert_eq!(logging.level, Some("debug".to_string()));
    assert_eq!(logging.file_enabled, Some(true));
    assert_eq!(logging.file_rotation, Some("never".to_string()));
}

/// The default template ships without secrets: key lines stay commented out
/// and parse back as None.
#[test]
fn test_default_template_comments_out_secrets() {
    let toml_str = Config::default().to_toml();

    assert!(toml_str.contains("# news_api_key"));
    assert!(toml_str.contains("# openai_api_key"));

    let parsed: FileConfig = toml::from_str(&toml_str).expect("template should parse");
    assert_eq!(parsed.news_api_key, None);
    assert_eq!(parsed.openai_api_key, None);
    assert_eq!(parsed.cors_origin, None);
}

// ─────────────────────────────────────────────────────────────────────────────
// Defaults
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_defaults_match_documented_values() {
    let config = Config::default();

    assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
    assert_eq!(config.news_api_url, "https://newsdata.io/api/1");
    assert_eq!(config.openai_api_url, "https://api.openai.com");
    assert_eq!(config.news_ttl_secs, 60);
    assert_eq!(config.summary_model, "gpt-4o-mini");
    assert_eq!(config.news_api_key, None);
    assert_eq!(config.openai_api_key, None);
    assert_eq!(config.cors_origin, None);
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_log_rotation_from_str() {
    assert_eq!(LogRotation::from_str("hourly"), LogRotation::Hourly);
    assert_eq!(LogRotation::from_str("DAILY"), LogRotation::Daily);
    assert_eq!(LogRotation::from_str("never"), LogRotation::Never);
    // Unknown values fall back to daily
    assert_eq!(LogRotation::from_str("weekly"), LogRotation::Daily);
}

#[test]
fn test_logging_from_file_merges_partial_sections() {
    let file = FileLogging {
        level: Some("debug".to_string()),
        file_enabled: Some(true),
        file_dir: None,
        file_rotation: Some("hourly".to_string()),
        file_prefix: None,
    };

    let logging = LoggingConfig::from_file(Some(file));

    assert_eq!(logging.level, "debug");
    assert!(logging.file_enabled);
    assert_eq!(logging.file_dir, PathBuf::from("./logs"));
    assert_eq!(logging.file_rotation, LogRotation::Hourly);
    assert_eq!(logging.file_prefix, "naijagate");
}

#[test]
fn test_logging_from_file_absent_section_gives_defaults() {
    let logging = LoggingConfig::from_file(None);

    assert_eq!(logging.level, "info");
    assert!(!logging.file_enabled);
    assert_eq!(logging.file_rotation, LogRotation::Daily);
}
