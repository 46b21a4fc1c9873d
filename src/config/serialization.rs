//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Serialize config to TOML string (single source of truth for format)
    pub fn to_toml(&self) -> String {
        format!(
            r#"# naijagate configuration

# Gateway bind address
bind_addr = "{bind}"

# News provider base URL (version path included)
news_api_url = "{news_url}"

# AI provider base URL
openai_api_url = "{openai_url}"

# Provider API keys (NEWSDATA_API_KEY / OPENAI_API_KEY env vars take
# precedence and keep secrets out of this file)
{news_key}{openai_key}
# Seconds a news snapshot stays fresh (all callers share one snapshot)
news_ttl_secs = {ttl}

# Chat model used for summaries
summary_model = "{model}"

# Exact origin allowed by CORS; comment out to allow any origin
{cors_origin}
# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to stdout)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            bind = self.bind_addr,
            news_url = self.news_api_url,
            openai_url = self.openai_api_url,
            news_key = self
                .news_api_key
                .as_ref()
                .map(|k| format!("news_api_key = \"{}\"\n", k))
                .unwrap_or_else(|| "# news_api_key = \"pub_...\"\n".to_string()),
            openai_key = self
                .openai_api_key
                .as_ref()
                .map(|k| format!("openai_api_key = \"{}\"\n", k))
                .unwrap_or_else(|| "# openai_api_key = \"sk-...\"\n".to_string()),
            ttl = self.news_ttl_secs,
            model = self.summary_model,
            cors_origin = self
                .cors_origin
                .as_ref()
                .map(|o| format!("cors_origin = \"{}\"\n", o))
                .unwrap_or_else(|| "# cors_origin = \"https://naijahub.example\"\n".to_string()),
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
