//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::models::HealthResponse;
use crate::AppState;

/// Full health check endpoint
///
/// Reports whether the generation backend is configured and which model it
/// uses, so the UI can disable AI features instead of failing on use.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let model = state.provider.as_ref().map(|p| p.model().to_string());

    Json(HealthResponse {
        status: "ok".to_string(),
        gemini_connected: model.is_some(),
        model,
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
