//! Outbound proxy integration tests

use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::TestApp;

#[tokio::test]
async fn test_execute_reports_target_response() {
    let app = TestApp::without_ai().await;

    let target = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(header("x-api-key", "secret"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"[{"id":1}]"#, "application/json"),
        )
        .mount(&target)
        .await;

    let response = app
        .server
        .post("/api/proxy/execute")
        .json(&json!({
            "method": "GET",
            "url": format!("{}/users", target.uri()),
            "headers": { "x-api-key": "secret" }
        }))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], 200);
    assert_eq!(json["statusText"], "OK");
    assert_eq!(json["body"], r#"[{"id":1}]"#);
    assert_eq!(json["headers"]["content-type"], "application/json");
    assert!(json["time"].as_u64().is_some());
}

#[tokio::test]
async fn test_execute_passes_target_failure_through() {
    let app = TestApp::without_ai().await;

    let target = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/users/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such user"))
        .mount(&target)
        .await;

    let response = app
        .server
        .post("/api/proxy/execute")
        .json(&json!({
            "method": "DELETE",
            "url": format!("{}/users/404", target.uri())
        }))
        .await;

    // The envelope is a success even when the target request is not
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], 404);
    assert_eq!(json["statusText"], "Not Found");
    assert_eq!(json["body"], "no such user");
}

#[tokio::test]
async fn test_execute_forwards_post_body() {
    let app = TestApp::without_ai().await;

    let target = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(wiremock::matchers::body_json(json!({ "name": "ada" })))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .mount(&target)
        .await;

    let response = app
        .server
        .post("/api/proxy/execute")
        .json(&json!({
            "method": "POST",
            "url": format!("{}/users", target.uri()),
            "body": { "name": "ada" }
        }))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], 201);
    assert_eq!(json["statusText"], "Created");
}

#[tokio::test]
async fn test_execute_rejects_invalid_method() {
    let app = TestApp::without_ai().await;

    let response = app
        .server
        .post("/api/proxy/execute")
        .json(&json!({
            "method": "NOT A METHOD",
            "url": "https://example.com"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_execute_unreachable_target_uses_status_zero() {
    let app = TestApp::without_ai().await;

    // Port 1 is never listening
    let response = app
        .server
        .post("/api/proxy/execute")
        .json(&json!({
            "method": "GET",
            "url": "http://127.0.0.1:1/"
        }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["status"], 0);
    assert_eq!(json["statusText"], "Error");
    assert_eq!(json["time"], 0);
    assert!(!json["body"].as_str().unwrap().is_empty());
}
