// Startup module - displays banner and provider status
//
// This module provides a professional startup experience showing:
// - Version info and branding
// - Configuration loaded from file
// - Provider credential status with checkmarks

use crate::config::{Config, VERSION};
use sha2::{Digest, Sha256};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Provider credential state for display
pub struct ProviderStatus {
    pub name: &'static str,
    pub env_var: &'static str,
    pub fingerprint: Option<String>,
}

/// Print the startup banner and provider status
pub fn print_startup(config: &Config) {
    use colors::*;

    // Banner
    println!();
    println!("  {BOLD}{CYAN}naijagate{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}API gateway for the NaijaHub web client{RESET}");
    println!();

    // Config file status
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    // Provider credentials
    println!("  {DIM}Checking providers...{RESET}");

    let providers = get_provider_status(config);
    for provider in &providers {
        print_provider_status(provider);
    }

    println!();

    // Gateway info
    println!(
        "  {MAGENTA}▸{RESET} Gateway listening on {BOLD}{}{RESET}",
        config.bind_addr
    );
    println!(
        "  {MAGENTA}▸{RESET} News cache TTL: {BOLD}{}s{RESET}",
        config.news_ttl_secs
    );
    match &config.cors_origin {
        Some(origin) => println!("  {MAGENTA}▸{RESET} CORS pinned to {BOLD}{origin}{RESET}"),
        None => println!(
            "  {YELLOW}▸{RESET} {YELLOW}CORS open to any origin{RESET} {DIM}(set cors_origin to pin){RESET}"
        ),
    }
    println!();
}

/// Get credential status for both providers
fn get_provider_status(config: &Config) -> Vec<ProviderStatus> {
    vec![
        ProviderStatus {
            name: "news",
            env_var: "NEWSDATA_API_KEY",
            fingerprint: config.news_api_key.as_deref().map(fingerprint),
        },
        ProviderStatus {
            name: "summaries",
            env_var: "OPENAI_API_KEY",
            fingerprint: config.openai_api_key.as_deref().map(fingerprint),
        },
    ]
}

/// Print a single provider's credential status
fn print_provider_status(provider: &ProviderStatus) {
    use colors::*;

    match &provider.fingerprint {
        Some(fp) => println!(
            "    {GREEN}✓{RESET} {:<12} {DIM}key sha256:{}{RESET}",
            provider.name, fp
        ),
        None => println!(
            "    {DIM}○{RESET} {DIM}{:<12}{RESET} {YELLOW}{} not set{RESET}",
            provider.name, provider.env_var
        ),
    }
}

/// Print startup messages to the log stream
/// Mirrors the banner so file logs capture the same boot state
pub fn log_startup(config: &Config) {
    tracing::info!("naijagate v{} starting", VERSION);

    for provider in &get_provider_status(config) {
        match &provider.fingerprint {
            Some(fp) => tracing::info!("{} provider key loaded (sha256:{})", provider.name, fp),
            None => tracing::warn!(
                "{} not set - {} requests will fail with 500",
                provider.env_var,
                provider.name
            ),
        }
    }

    tracing::info!("News cache TTL: {}s", config.news_ttl_secs);
    tracing::info!("Summary model: {}", config.summary_model);
    match &config.cors_origin {
        Some(origin) => tracing::info!("CORS origin pinned to {}", origin),
        None => tracing::info!("CORS open to any origin"),
    }

    tracing::info!("Ready. Waiting for the frontend on {}", config.bind_addr);
}

/// Short SHA-256 fingerprint of an API key (never log the actual key!)
pub(crate) fn fingerprint(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    let hash = hasher.finalize();
    format!("{:x}", hash)[..16].to_string()
}
