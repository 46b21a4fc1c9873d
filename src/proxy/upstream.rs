//! Upstream dispatch and outcome classification
//!
//! Both provider calls funnel through [`dispatch`], which collapses a reqwest
//! call into one of three outcomes. The handlers translate outcomes into
//! client responses; nothing here decides HTTP status codes for the caller.

use std::time::Instant;

use serde_json::Value;

/// What came back from an upstream provider
#[derive(Debug)]
pub enum UpstreamOutcome {
    /// 2xx with a JSON body
    Success(Value),
    /// Non-2xx response - the raw body is kept for the caller's `details`
    ErrorStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    /// The exchange never completed: connect failure, timeout, or a 2xx
    /// body that was not valid JSON
    TransportFailure(reqwest::Error),
}

/// Execute a prepared request and classify the result
///
/// A 2xx body that fails to parse as JSON counts as a transport failure:
/// the provider broke its contract and there is nothing usable to hand to
/// the caller.
pub async fn dispatch(request: reqwest::RequestBuilder, label: &'static str) -> UpstreamOutcome {
    let start = Instant::now();

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => return UpstreamOutcome::TransportFailure(e),
    };

    let status = response.status();
    tracing::debug!("{} answered {} in {:?}", label, status, start.elapsed());

    if !status.is_success() {
        return match response.text().await {
            Ok(body) => UpstreamOutcome::ErrorStatus { status, body },
            Err(e) => UpstreamOutcome::TransportFailure(e),
        };
    }

    match response.json::<Value>().await {
        Ok(payload) => UpstreamOutcome::Success(payload),
        Err(e) => UpstreamOutcome::TransportFailure(e),
    }
}
