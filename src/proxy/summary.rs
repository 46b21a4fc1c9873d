//! POST /api/ai-summary - Nigeria-focused chat completion
//!
//! Takes a topic plus optional Wikipedia search results, builds a fixed
//! prompt around them, and returns whatever the model wrote as
//! `{"summary": "..."}`. The provider's response shape is never trusted:
//! extraction is best-effort and degrades to an empty string.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::ProxyError;
use super::state::ProxyState;
use super::upstream::{dispatch, UpstreamOutcome};

const PROVIDER: &str = "AI provider";

const SYSTEM_PROMPT: &str = "You are a knowledgeable assistant specializing in Nigerian history, \
     culture, and current affairs. Provide informative, accurate summaries.";

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    query: Option<String>,
    #[serde(default, rename = "wikiResults")]
    wiki_results: Vec<WikiResult>,
}

#[derive(Debug, Deserialize)]
pub struct WikiResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Summarize a topic for the Nigerian-affairs frontend
pub async fn ai_summary(
    State(state): State<ProxyState>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<Value>, ProxyError> {
    let query = match request.query.as_deref() {
        Some(q) if !q.is_empty() => q,
        _ => return Err(ProxyError::BadRequest("Missing query")),
    };

    let Some(api_key) = state.openai_api_key.clone() else {
        return Err(ProxyError::MissingKey("OPENAI_API_KEY"));
    };

    let context = build_context(&request.wiki_results);
    let prompt = build_prompt(query, &context);

    let payload = ChatRequest {
        model: state.summary_model.clone(),
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
        max_tokens: 500,
        temperature: 0.7,
    };

    let url = format!("{}/v1/chat/completions", state.openai_api_url);
    tracing::debug!("requesting summary for {:?} via {}", query, state.summary_model);

    match dispatch(
        state.client.post(&url).bearer_auth(api_key).json(&payload),
        PROVIDER,
    )
    .await
    {
        UpstreamOutcome::Success(body) => Ok(Json(json!({ "summary": extract_summary(&body) }))),
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

/// Join search results into "<title>: <snippet>" blocks
fn build_context(results: &[WikiResult]) -> String {
    results
        .iter()
        .map(|r| format!("{}: {}", r.title, r.snippet))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One of two fixed prompt templates, depending on whether context exists
fn build_prompt(query: &str, context: &str) -> String {
    if context.is_empty() {
        format!(
            "Provide a comprehensive but concise summary about \"{}\" in 2-3 paragraphs, \
             focusing on its significance to Nigeria.",
            query
        )
    } else {
        format!(
            "Based on the following Wikipedia information about \"{}\", provide a comprehensive \
             but concise summary in 2-3 paragraphs. Focus on key facts and historical \
             significance relevant to Nigeria.\n\n{}",
            query, context
        )
    }
}

/// Pull `choices[0].message.content` out of the completion, or ""
fn extract_summary(body: &Value) -> String {
    body.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .unwrap_or("")
        .to_string()
}
