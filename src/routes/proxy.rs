//! Outbound request proxy
//!
//! Executes API requests on behalf of the browser client, which cannot make
//! cross-origin calls itself. The target's response is reported verbatim,
//! including failure statuses; only a transport-level failure produces the
//! status-0 shape.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use tracing::{debug, warn};

use crate::{
    error::{AppError, AppResult},
    models::{ProxyExecuteRequest, ProxyExecuteResponse},
    AppState,
};

/// Handle `POST /api/proxy/execute`
pub async fn execute(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProxyExecuteRequest>,
) -> AppResult<(StatusCode, Json<ProxyExecuteResponse>)> {
    let method = reqwest::Method::from_bytes(request.method.as_bytes())
        .map_err(|_| AppError::BadRequest(format!("Invalid HTTP method: {}", request.method)))?;

    debug!(method = %method, url = %request.url, "Executing proxied request");
    let start = Instant::now();

    let mut builder = state.http_client.request(method.clone(), &request.url);
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    if method != reqwest::Method::GET {
        if let Some(body) = &request.body {
            builder = match body {
                // String bodies go out as-is; structured bodies as JSON
                serde_json::Value::String(s) => builder.body(s.clone()),
                other => builder.json(other),
            };
        }
    }

    match builder.send().await {
        Ok(response) => {
            let status = response.status();
            let headers: HashMap<String, String> = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.to_string(), v.to_string()))
                })
                .collect();
            let body = response.text().await.unwrap_or_default();

            Ok((
                StatusCode::OK,
                Json(ProxyExecuteResponse {
                    status: status.as_u16(),
                    status_text: status.canonical_reason().unwrap_or("").to_string(),
                    headers,
                    body,
                    time: start.elapsed().as_millis() as u64,
                }),
            ))
        }
        Err(e) => {
            warn!(url = %request.url, error = %e, "Proxied request failed");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ProxyExecuteResponse {
                    status: 0,
                    status_text: "Error".to_string(),
                    headers: HashMap::new(),
                    body: e.to_string(),
                    time: 0,
                }),
            ))
        }
    }
}
