//! Gateway state shared across request handlers

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;

use super::cache::NewsCache;

/// Shared state for the gateway server
///
/// Cloned per request by axum; everything mutable sits behind the cache's
/// own lock, the rest is read-only after startup.
#[derive(Clone)]
pub struct ProxyState {
    /// HTTP client for forwarding requests
    pub(super) client: reqwest::Client,
    /// Single-snapshot cache for the news feed
    pub(super) news_cache: Arc<NewsCache>,
    /// News provider base URL
    pub(super) news_api_url: String,
    /// Completion provider base URL
    pub(super) openai_api_url: String,
    /// News provider credential; absent means the route fails with 500
    pub(super) news_api_key: Option<String>,
    /// Completion provider credential; absent means the route fails with 500
    pub(super) openai_api_key: Option<String>,
    /// Model identifier for summary requests
    pub(super) summary_model: String,
}

impl ProxyState {
    pub fn from_config(config: &Config, client: reqwest::Client) -> Self {
        Self {
            client,
            news_cache: Arc::new(NewsCache::new(Duration::from_secs(config.news_ttl_secs))),
            news_api_url: config.news_api_url.clone(),
            openai_api_url: config.openai_api_url.clone(),
            news_api_key: config.news_api_key.clone(),
            openai_api_key: config.openai_api_key.clone(),
            summary_model: config.summary_model.clone(),
        }
    }
}

#[cfg(test)]
impl ProxyState {
    /// State wired to a mock upstream, for handler tests
    pub(super) fn for_tests(
        base_url: &str,
        news_key: Option<&str>,
        openai_key: Option<&str>,
        ttl: Duration,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            news_cache: Arc::new(NewsCache::new(ttl)),
            news_api_url: base_url.to_string(),
            openai_api_url: base_url.to_string(),
            news_api_key: news_key.map(String::from),
            openai_api_key: openai_key.map(String::from),
            summary_model: "gpt-4o-mini".to_string(),
        }
    }
}
