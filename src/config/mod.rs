//! Configuration for the gateway
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/naijagate/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the gateway to
    pub bind_addr: SocketAddr,

    /// News provider base URL (version path included)
    pub news_api_url: String,

    /// AI provider base URL
    pub openai_api_url: String,

    /// News provider API key; requests fail with 500 when unset
    pub news_api_key: Option<String>,

    /// AI provider API key; requests fail with 500 when unset
    pub openai_api_key: Option<String>,

    /// How long a news snapshot stays fresh, in seconds
    pub news_ttl_secs: u64,

    /// Chat model used for summaries
    pub summary_model: String,

    /// Exact origin allowed by CORS; None means allow any (local development)
    pub cors_origin: Option<String>,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().unwrap(),
            news_api_url: "https://newsdata.io/api/1".to_string(),
            openai_api_url: "https://api.openai.com".to_string(),
            news_api_key: None,
            openai_api_key: None,
            news_ttl_secs: 60,
            summary_model: "gpt-4o-mini".to_string(),
            cors_origin: None,
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Log Rotation
// ─────────────────────────────────────────────────────────────────────────────

/// Log file rotation strategy
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LogRotation {
    /// Rotate log files hourly
    Hourly,
    /// Rotate log files daily (default)
    #[default]
    Daily,
    /// Never rotate - single log file
    Never,
}

impl LogRotation {
    /// Parse rotation string from config
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "daily" => Self::Daily,
            "never" => Self::Never,
            _ => Self::Daily, // Default to daily for unknown values
        }
    }

    /// Convert to string for TOML serialization
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Enable file logging (in addition to stdout)
    pub file_enabled: bool,
    /// Directory for log files
    pub file_dir: PathBuf,
    /// Log file rotation strategy
    pub file_rotation: LogRotation,
    /// Prefix for log file names (e.g., "naijagate" -> "naijagate.2024-01-15.log")
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false, // Opt-in feature
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "naijagate".to_string(),
        }
    }
}

/// Logging settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            level: file.level.unwrap_or(defaults.level),
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file
                .file_dir
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_rotation: file
                .file_rotation
                .map(|s| LogRotation::from_str(&s))
                .unwrap_or(defaults.file_rotation),
            file_prefix: file.file_prefix.unwrap_or(defaults.file_prefix),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub bind_addr: Option<String>,
    pub news_api_url: Option<String>,
    pub openai_api_url: Option<String>,
    pub news_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub news_ttl_secs: Option<u64>,
    pub summary_model: Option<String>,
    pub cors_origin: Option<String>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/naijagate/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("naijagate").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        // Don't overwrite existing config
        if path.exists() {
            return;
        }

        // Create parent directory
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Silently fail - config is optional
            }
        }

        // Use Config::default().to_toml() as single source of truth
        let template = Self::default().to_toml();

        // Write config (ignore errors - config is optional)
        let _ = std::fs::write(&path, template);
    }

    /// Load file config if it exists
    ///
    /// Exits the process when the file exists but cannot be parsed; a broken
    /// config must not degrade to defaults behind the user's back.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    // A present-but-broken file fails fast instead of being
                    // silently papered over with defaults
                    eprintln!("Config error: {} is not valid TOML", path.display());
                    eprintln!("  {}", e);
                    eprintln!("Fix the file, or run `naijagate config --reset`.");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("Config error: cannot read {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();

        // Bind address: env > file > default
        let bind_addr = std::env::var("NAIJAGATE_BIND")
            .ok()
            .or(file.bind_addr)
            .unwrap_or_else(|| "127.0.0.1:3000".to_string())
            .parse()
            .expect("Invalid bind address");

        // News provider URL: env > file > default
        let news_api_url = std::env::var("NEWSDATA_API_URL")
            .ok()
            .or(file.news_api_url)
            .unwrap_or_else(|| "https://newsdata.io/api/1".to_string());

        // AI provider URL: env > file > default
        let openai_api_url = std::env::var("OPENAI_API_URL")
            .ok()
            .or(file.openai_api_url)
            .unwrap_or_else(|| "https://api.openai.com".to_string());

        // Provider keys: env > file, no default - requests report the gap
        let news_api_key = std::env::var("NEWSDATA_API_KEY").ok().or(file.news_api_key);
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .or(file.openai_api_key);

        // News snapshot TTL: env > file > default (60s keeps the free-tier
        // provider quota intact under a burst of frontend tabs)
        let news_ttl_secs = std::env::var("NAIJAGATE_NEWS_TTL")
            .ok()
            .and_then(|v| v.parse().ok())
            .or(file.news_ttl_secs)
            .unwrap_or(60);

        // Summary model: env > file > default
        let summary_model = std::env::var("NAIJAGATE_SUMMARY_MODEL")
            .ok()
            .or(file.summary_model)
            .unwrap_or_else(|| "gpt-4o-mini".to_string());

        // CORS origin: env > file, no default (permissive when unset)
        let cors_origin = std::env::var("NAIJAGATE_CORS_ORIGIN")
            .ok()
            .or(file.cors_origin);

        // Subconfig loading with from_file() helpers
        let logging = LoggingConfig::from_file(file.logging);

        Self {
            bind_addr,
            news_api_url,
            openai_api_url,
            news_api_key,
            openai_api_key,
            news_ttl_secs,
            summary_model,
            cors_origin,
            logging,
        }
    }
}
