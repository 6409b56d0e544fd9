//! Artifact persistence endpoints
//!
//! Each collection is saved and loaded wholesale. The client owns merge
//! logic; the server just swaps the stored snapshot.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::debug;

use crate::{
    models::{
        ApiCollection, Bug, SaveApiCollectionsRequest, SaveBugsRequest, SaveResponse,
        SaveTestCasesRequest, SaveTestPlansRequest, SaveUserStoriesRequest, TestCase, TestPlan,
        UserStory,
    },
    AppState,
};

pub async fn get_test_cases(State(state): State<Arc<AppState>>) -> Json<Vec<TestCase>> {
    Json(state.storage.test_cases())
}

pub async fn save_test_cases(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveTestCasesRequest>,
) -> Json<SaveResponse> {
    debug!(count = request.test_cases.len(), "Saving test cases");
    state.storage.replace_test_cases(request.test_cases);
    Json(SaveResponse { success: true })
}

pub async fn get_user_stories(State(state): State<Arc<AppState>>) -> Json<Vec<UserStory>> {
    Json(state.storage.user_stories())
}

pub async fn save_user_stories(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveUserStoriesRequest>,
) -> Json<SaveResponse> {
    debug!(count = request.stories.len(), "Saving user stories");
    state.storage.replace_user_stories(request.stories);
    Json(SaveResponse { success: true })
}

pub async fn get_bugs(State(state): State<Arc<AppState>>) -> Json<Vec<Bug>> {
    Json(state.storage.bugs())
}

pub async fn save_bugs(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveBugsRequest>,
) -> Json<SaveResponse> {
    debug!(count = request.bugs.len(), "Saving bugs");
    state.storage.replace_bugs(request.bugs);
    Json(SaveResponse { success: true })
}

pub async fn get_test_plans(State(state): State<Arc<AppState>>) -> Json<Vec<TestPlan>> {
    Json(state.storage.test_plans())
}

pub async fn save_test_plans(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveTestPlansRequest>,
) -> Json<SaveResponse> {
    debug!(count = request.plans.len(), "Saving test plans");
    state.storage.replace_test_plans(request.plans);
    Json(SaveResponse { success: true })
}

pub async fn get_api_collections(State(state): State<Arc<AppState>>) -> Json<Vec<ApiCollection>> {
    Json(state.storage.api_collections())
}

pub async fn save_api_collections(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveApiCollectionsRequest>,
) -> Json<SaveResponse> {
    debug!(count = request.collections.len(), "Saving API collections");
    state.storage.replace_api_collections(request.collections);
    Json(SaveResponse { success: true })
}
