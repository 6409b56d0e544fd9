//! Artifact persistence integration tests

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{test_data, TestApp};

#[tokio::test]
async fn test_collections_start_empty() {
    let app = TestApp::without_ai().await;

    for endpoint in [
        "/api/data/test-cases",
        "/api/data/user-stories",
        "/api/data/bugs",
        "/api/data/test-plans",
        "/api/data/api-collections",
    ] {
        let response = app.server.get(endpoint).await;
        response.assert_status_ok();
        let json: Value = response.json();
        assert_eq!(json, json!([]), "{} should start empty", endpoint);
    }
}

#[tokio::test]
async fn test_test_cases_round_trip() {
    let app = TestApp::without_ai().await;

    let saved = json!([
        test_data::sample_test_case("TC-001"),
        test_data::sample_test_case("TC-002"),
    ]);

    let response = app
        .server
        .post("/api/data/test-cases")
        .json(&json!({ "testCases": saved }))
        .await;
    response.assert_status_ok();
    let ack: Value = response.json();
    assert_eq!(ack, json!({ "success": true }));

    let response = app.server.get("/api/data/test-cases").await;
    response.assert_status_ok();
    let loaded: Value = response.json();
    assert_eq!(loaded, saved);
}

#[tokio::test]
async fn test_save_replaces_whole_collection() {
    let app = TestApp::without_ai().await;

    app.server
        .post("/api/data/bugs")
        .json(&json!({ "bugs": [test_data::sample_bug("BUG-1"), test_data::sample_bug("BUG-2")] }))
        .await
        .assert_status_ok();

    app.server
        .post("/api/data/bugs")
        .json(&json!({ "bugs": [test_data::sample_bug("BUG-3")] }))
        .await
        .assert_status_ok();

    let loaded: Value = app.server.get("/api/data/bugs").await.json();
    let bugs = loaded.as_array().unwrap();
    assert_eq!(bugs.len(), 1);
    assert_eq!(bugs[0]["id"], "BUG-3");
}

#[tokio::test]
async fn test_collections_do_not_interfere() {
    let app = TestApp::without_ai().await;

    app.server
        .post("/api/data/user-stories")
        .json(&json!({ "stories": [test_data::sample_user_story("US-1")] }))
        .await
        .assert_status_ok();

    let stories: Value = app.server.get("/api/data/user-stories").await.json();
    assert_eq!(stories.as_array().unwrap().len(), 1);

    let bugs: Value = app.server.get("/api/data/bugs").await.json();
    assert_eq!(bugs, json!([]));
}

#[tokio::test]
async fn test_api_collections_round_trip() {
    let app = TestApp::without_ai().await;

    let saved = json!([{
        "id": "COL-1",
        "name": "User service",
        "requests": [{
            "method": "GET",
            "url": "https://api.example.com/users",
            "headers": { "Accept": "application/json" }
        }]
    }]);

    app.server
        .post("/api/data/api-collections")
        .json(&json!({ "collections": saved }))
        .await
        .assert_status_ok();

    let loaded: Value = app.server.get("/api/data/api-collections").await.json();
    assert_eq!(loaded, saved);
}
