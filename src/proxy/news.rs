//! GET /api/news - cached passthrough to the news provider
//!
//! Caller query parameters are forwarded verbatim (country, language, size,
//! whatever the provider grows next) with the server-held `apikey` merged in
//! on top. The provider's JSON body comes back unmodified on success.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use serde_json::Value;

use super::error::ProxyError;
use super::state::ProxyState;
use super::upstream::{dispatch, UpstreamOutcome};

const PROVIDER: &str = "News provider";

/// Serve the shared snapshot when fresh, otherwise refresh it upstream
///
/// The cache is consulted before the credential check, so a warm gateway
/// keeps serving headlines even if the key disappears from the environment
/// mid-run.
pub async fn get_news(
    State(state): State<ProxyState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ProxyError> {
    if let Some(payload) = state.news_cache.fresh() {
        return Ok(Json(payload));
    }

    let Some(api_key) = state.news_api_key.clone() else {
        return Err(ProxyError::MissingKey("NEWSDATA_API_KEY"));
    };

    let url = format!("{}/news", state.news_api_url);
    let query = merge_query(params, &api_key);

    tracing::debug!("news cache stale, fetching with {} params", query.len());

    match dispatch(state.client.get(&url).query(&query), PROVIDER).await {
        UpstreamOutcome::Success(payload) => {
            state.news_cache.write(payload.clone());
            Ok(Json(payload))
        }
        UpstreamOutcome::ErrorStatus { status, body } => Err(ProxyError::Provider {
            label: PROVIDER,
            status,
            body,
        }),
        UpstreamOutcome::TransportFailure(e) => Err(ProxyError::Transport {
            label: PROVIDER,
            source: e,
        }),
    }
}

/// Copy the caller's parameters, then insert the server credential
///
/// Inserting `apikey` last means a caller-supplied value is always replaced;
/// callers cannot smuggle their own key through the gateway.
fn merge_query(mut params: HashMap<String, String>, api_key: &str) -> HashMap<String, String> {
    params.insert("apikey".to_string(), api_key.to_string());
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_merge_query_inserts_server_key() {
        let mut params = HashMap::new();
        params.insert("country".to_string(), "ng".to_string());

        let merged = merge_query(params, "secret");

        assert_eq!(merged.get("apikey").map(String::as_str), Some("secret"));
        assert_eq!(merged.get("country").map(String::as_str), Some("ng"));
    }

    #[test]
    fn test_merge_query_server_key_wins() {
        let mut params = HashMap::new();
        params.insert("apikey".to_string(), "attacker-supplied".to_string());

        let merged = merge_query(params, "secret");

        assert_eq!(merged.get("apikey").map(String::as_str), Some("secret"));
        assert_eq!(merged.len(), 1);
    }

    #[tokio::test]
    async fn test_fresh_cache_coalesces_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .and(query_param("apikey", "key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "results": [{"title": "Fuel subsidy update"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let state =
            ProxyState::for_tests(&server.uri(), Some("key"), None, Duration::from_secs(60));

        let first = get_news(State(state.clone()), Query(HashMap::new()))
            .await
            .unwrap();
        let second = get_news(State(state), Query(HashMap::new()))
            .await
            .unwrap();

        // Identical payload, and expect(1) verifies one upstream call on drop
        assert_eq!(first.0, second.0);
    }

    #[tokio::test]
    async fn test_expired_cache_refetches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(2)
            .mount(&server)
            .await;

        let state =
            ProxyState::for_tests(&server.uri(), Some("key"), None, Duration::from_millis(20));

        get_news(State(state.clone()), Query(HashMap::new()))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        get_news(State(state), Query(HashMap::new()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_cache_is_shared_across_query_parameters() {
        // The snapshot is global: a caller asking for different parameters
        // within the TTL window gets the payload already in the slot.
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .and(query_param("country", "ng"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"title": "Lagos headline", "country": "ng"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let state =
            ProxyState::for_tests(&server.uri(), Some("key"), None, Duration::from_secs(60));

        let mut ng = HashMap::new();
        ng.insert("country".to_string(), "ng".to_string());
        let first = get_news(State(state.clone()), Query(ng)).await.unwrap();

        // No mock matches country=us; this only succeeds because the cached
        // ng payload is served instead of a second fetch
        let mut us = HashMap::new();
        us.insert("country".to_string(), "us".to_string());
        let second = get_news(State(state), Query(us)).await.unwrap();

        assert_eq!(first.0, second.0);
        assert_eq!(second.0["results"][0]["country"], "ng");
    }

    #[tokio::test]
    async fn test_missing_key_without_cache_is_rejected() {
        let state = ProxyState::for_tests(
            "http://127.0.0.1:9",
            None,
            None,
            Duration::from_secs(60),
        );

        let err = get_news(State(state), Query(HashMap::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, ProxyError::MissingKey("NEWSDATA_API_KEY")));
    }

    #[tokio::test]
    async fn test_warm_cache_outlives_the_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
            .expect(1)
            .mount(&server)
            .await;

        let state =
            ProxyState::for_tests(&server.uri(), Some("key"), None, Duration::from_secs(60));
        get_news(State(state.clone()), Query(HashMap::new()))
            .await
            .unwrap();

        // Same cache, key gone: the snapshot still serves
        let mut keyless = state.clone();
        keyless.news_api_key = None;
        let served = get_news(State(keyless), Query(HashMap::new())).await;

        assert!(served.is_ok());
    }

    #[tokio::test]
    async fn test_provider_error_passes_body_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .respond_with(ResponseTemplate::new(503).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let state =
            ProxyState::for_tests(&server.uri(), Some("key"), None, Duration::from_secs(60));

        let err = get_news(State(state), Query(HashMap::new()))
            .await
            .unwrap_err();

        match err {
            ProxyError::Provider { status, body, .. } => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(body, "rate limited");
            }
            other => panic!("Expected Provider, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(2)
            .mount(&server)
            .await;

        let state =
            ProxyState::for_tests(&server.uri(), Some("key"), None, Duration::from_secs(60));

        // Both calls reach the provider: nothing was written to the slot
        assert!(get_news(State(state.clone()), Query(HashMap::new()))
            .await
            .is_err());
        assert!(get_news(State(state), Query(HashMap::new())).await.is_err());
    }
}
