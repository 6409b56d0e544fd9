//! HTTP routes for QA Studio
//!
//! All endpoints live under `/api`, matching the path layout the browser
//! client and the relay client share.

pub mod data;
pub mod generate;
pub mod health;
pub mod proxy;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/health", get(health::health_check))
        .route("/ai/generate-testcases", post(generate::generate_test_cases))
        .route("/ai/generate-script", post(generate::generate_script))
        .route(
            "/ai/audit-accessibility",
            post(generate::audit_accessibility),
        )
        .route("/ai/summarize", post(generate::summarize))
        .route(
            "/ai/generate-assertions",
            post(generate::generate_assertions),
        )
        .route("/ai/elaborate", post(generate::elaborate))
        .route(
            "/ai/generate-from-notes",
            post(generate::generate_from_notes),
        )
        .route("/proxy/execute", post(proxy::execute))
        .route(
            "/data/test-cases",
            get(data::get_test_cases).post(data::save_test_cases),
        )
        .route(
            "/data/user-stories",
            get(data::get_user_stories).post(data::save_user_stories),
        )
        .route("/data/bugs", get(data::get_bugs).post(data::save_bugs))
        .route(
            "/data/test-plans",
            get(data::get_test_plans).post(data::save_test_plans),
        )
        .route(
            "/data/api-collections",
            get(data::get_api_collections).post(data::save_api_collections),
        );

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
