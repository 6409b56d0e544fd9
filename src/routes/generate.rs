//! AI generation endpoints
//!
//! Each handler builds a prompt from the typed request, delegates to the
//! generation provider, and shapes the model's text back into the typed
//! response. Script generation streams; everything else is unary.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
    Json,
};
use futures::StreamExt;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use crate::{
    error::{AppError, AppResult},
    gemini::{GenerateContentResponse, GenerateOutcome, GenerativeProvider},
    models::{
        AuditReport, AuditRequest, ElaborateRequest, ElaborateResponse, GenerateAssertionsRequest,
        GenerateAssertionsResponse, GenerateFromNotesRequest, GenerateFromNotesResponse,
        GenerateScriptRequest, GenerateTestCasesRequest, GenerateTestCasesResponse,
        SummarizeRequest, SummarizeResponse, TestCase,
    },
    prompts,
    sse::{self, SseLineBuffer, DATA_PREFIX, DONE_SENTINEL},
    AppState,
};

// The model is asked for bare JSON but often wraps it in prose or fences.
// Greedy match from the first bracket to the last, as the original backend
// does.
static JSON_ARRAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[.*\]").expect("valid regex"));
static JSON_OBJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

/// The configured provider, or 503 when no API key is set.
fn provider(state: &AppState) -> AppResult<&Arc<dyn GenerativeProvider>> {
    state
        .provider
        .as_ref()
        .ok_or_else(|| AppError::ServiceUnavailable("AI service unavailable".to_string()))
}

/// Unwrap a generation outcome, treating "no text" as an upstream fault.
fn require_text(outcome: GenerateOutcome) -> AppResult<String> {
    match outcome {
        GenerateOutcome::Text(text) => Ok(text),
        GenerateOutcome::NoText => Err(AppError::UpstreamError(
            "Model response contained no text".to_string(),
        )),
    }
}

fn extract_json_array(text: &str) -> Option<&str> {
    JSON_ARRAY_RE.find(text).map(|m| m.as_str())
}

fn extract_json_object(text: &str) -> Option<&str> {
    JSON_OBJECT_RE.find(text).map(|m| m.as_str())
}

/// Handle `POST /api/ai/generate-testcases`
pub async fn generate_test_cases(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateTestCasesRequest>,
) -> AppResult<Json<GenerateTestCasesResponse>> {
    let provider = provider(&state)?;
    let prompt = prompts::test_cases(&request);

    let text = require_text(provider.generate(&prompt).await?)?;
    let json = extract_json_array(&text).ok_or_else(|| {
        AppError::UpstreamError("Failed to parse test cases from AI response".to_string())
    })?;

    let test_cases: Vec<TestCase> = serde_json::from_str(json).map_err(|e| {
        warn!(error = %e, "Model returned a malformed test case array");
        AppError::UpstreamError(format!("Failed to parse test cases: {}", e))
    })?;

    info!(count = test_cases.len(), "Generated test cases");
    Ok(Json(GenerateTestCasesResponse {
        test_cases,
        model: provider.model().to_string(),
    }))
}

/// Handle `POST /api/ai/generate-script` (streaming)
///
/// Relays the provider's stream to the client, reframed as
/// `data: {"text": ...}` events and terminated by `data: [DONE]`. Errors
/// after the stream opened are emitted inline as `data: {"error": ...}`.
pub async fn generate_script(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateScriptRequest>,
) -> AppResult<Response> {
    let provider = provider(&state)?;
    let prompt = prompts::script(&request);

    let mut upstream = provider.generate_stream(&prompt).await?;

    let events = async_stream::stream! {
        let mut buffer = SseLineBuffer::new();

        while let Some(chunk) = upstream.next().await {
            let bytes = match chunk {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(error = %e, "Upstream stream failed mid-flight");
                    yield Ok::<_, std::convert::Infallible>(sse::format_error_event(&e.to_string()));
                    return;
                }
            };

            for line in buffer.feed(&bytes) {
                let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
                    continue;
                };
                // The upstream end marker is not forwarded; we emit our own
                // after the loop.
                if payload == DONE_SENTINEL {
                    continue;
                }
                match serde_json::from_str::<GenerateContentResponse>(payload) {
                    Ok(response) => {
                        if let GenerateOutcome::Text(text) = response.extract_text() {
                            if !text.is_empty() {
                                yield Ok(sse::format_text_event(&text));
                            }
                        }
                    }
                    Err(e) => {
                        // One malformed chunk should not kill the stream
                        warn!(error = %e, "Skipping malformed upstream chunk");
                    }
                }
            }
        }

        yield Ok(sse::format_done_event());
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .body(Body::from_stream(events))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build response: {}", e)))
}

/// Handle `POST /api/ai/audit-accessibility`
pub async fn audit_accessibility(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AuditRequest>,
) -> AppResult<Json<AuditReport>> {
    let provider = provider(&state)?;
    let prompt = prompts::accessibility_audit(&request);

    let text = require_text(provider.generate(&prompt).await?)?;
    let json = extract_json_object(&text).ok_or_else(|| {
        AppError::UpstreamError("Failed to parse audit results".to_string())
    })?;

    let report: AuditReport = serde_json::from_str(json)
        .map_err(|e| AppError::UpstreamError(format!("Failed to parse audit results: {}", e)))?;

    Ok(Json(report))
}

/// Handle `POST /api/ai/summarize`
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummarizeRequest>,
) -> AppResult<Json<SummarizeResponse>> {
    let provider = provider(&state)?;
    let prompt = prompts::summarize(&request);

    let summary = require_text(provider.generate(&prompt).await?)?;
    Ok(Json(SummarizeResponse { summary }))
}

/// Handle `POST /api/ai/generate-assertions`
pub async fn generate_assertions(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateAssertionsRequest>,
) -> AppResult<Json<GenerateAssertionsResponse>> {
    let provider = provider(&state)?;
    let prompt = prompts::assertions(&request);

    let text = require_text(provider.generate(&prompt).await?)?;

    // No assertions is a valid answer, not an error
    let assertions = match extract_json_array(&text) {
        Some(json) => serde_json::from_str(json).map_err(|e| {
            AppError::UpstreamError(format!("Failed to parse assertions: {}", e))
        })?,
        None => Vec::new(),
    };

    Ok(Json(GenerateAssertionsResponse { assertions }))
}

/// Handle `POST /api/ai/elaborate`
pub async fn elaborate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ElaborateRequest>,
) -> AppResult<Json<ElaborateResponse>> {
    let provider = provider(&state)?;
    let prompt = prompts::elaborate(&request);

    let elaborated = require_text(provider.generate(&prompt).await?)?;
    Ok(Json(ElaborateResponse { elaborated }))
}

/// Handle `POST /api/ai/generate-from-notes`
pub async fn generate_from_notes(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateFromNotesRequest>,
) -> AppResult<Json<GenerateFromNotesResponse>> {
    let provider = provider(&state)?;
    let prompt = prompts::from_notes(&request);

    let text = require_text(provider.generate(&prompt).await?)?;
    let json = extract_json_object(&text).ok_or_else(|| {
        AppError::UpstreamError("Failed to parse generated content".to_string())
    })?;

    let generated: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| AppError::UpstreamError(format!("Failed to parse generated content: {}", e)))?;

    Ok(Json(GenerateFromNotesResponse { generated }))
}
