//! Health endpoint integration tests

use serde_json::Value;

use crate::common::{constants, TestApp};

#[tokio::test]
async fn test_health_reports_disconnected_without_api_key() {
    let app = TestApp::without_ai().await;

    let response = app.server.get("/api/health").await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["geminiConnected"], false);
    assert!(json["model"].is_null());
}

#[tokio::test]
async fn test_health_reports_connected_model() {
    let app = TestApp::with_ai().await;

    let response = app.server.get("/api/health").await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["geminiConnected"], true);
    assert_eq!(json["model"], constants::TEST_GEMINI_MODEL);
}

#[tokio::test]
async fn test_health_returns_version_and_timestamp() {
    let app = TestApp::without_ai().await;

    let response = app.server.get("/api/health").await;
    response.assert_status_ok();

    let json: Value = response.json();

    let version = json["version"].as_str().unwrap();
    assert!(version.contains('.'), "Version should be in semver format");

    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(
        chrono::DateTime::parse_from_rfc3339(timestamp).is_ok(),
        "Timestamp should be valid RFC3339"
    );

    assert!(json["uptimeSeconds"].as_u64().is_some());
}
