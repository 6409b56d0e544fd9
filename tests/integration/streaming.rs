//! Relay stream integration tests
//!
//! Exercise the cancellable stream reader and the registry over real HTTP
//! responses: fragment ordering, inline errors, cancellation, and request id
//! lifecycle.

use futures::StreamExt;
use serde_json::json;
use tokio_test::assert_ok;

use qa_studio::models::{GenerateScriptRequest, ScriptFramework};
use qa_studio::relay::{RelayClient, RelayError, StreamFragment};

use crate::mocks::backend::MockBackend;

const SCRIPT_ENDPOINT: &str = "/ai/generate-script";

fn script_request() -> GenerateScriptRequest {
    GenerateScriptRequest {
        framework: ScriptFramework::Playwright,
        language: "typescript".to_string(),
        browser: "chromium".to_string(),
        headless: true,
        use_fixtures: false,
        scenario: "Log in and verify the dashboard".to_string(),
        test_data: None,
        api_request: None,
    }
}

#[tokio::test]
async fn test_fragments_arrive_in_order_and_done_is_swallowed() {
    let backend = MockBackend::start().await;
    backend
        .mock_sse(
            SCRIPT_ENDPOINT,
            concat!(
                "data: {\"text\":\"import { test }\"}\n\n",
                "data: {\"text\":\" from '@playwright/test';\"}\n\n",
                "data: [DONE]\n\n",
            ),
        )
        .await;

    let client = RelayClient::new(backend.api_base());
    let stream = client
        .stream_generate_script(&script_request(), "req-1")
        .await
        .unwrap();

    let fragments: Vec<StreamFragment> = stream.collect().await;
    assert_eq!(
        fragments,
        vec![
            StreamFragment::Text("import { test }".to_string()),
            StreamFragment::Text(" from '@playwright/test';".to_string()),
        ]
    );

    // Natural completion releases the id
    assert!(!client.registry().is_active("req-1"));
}

#[tokio::test]
async fn test_inline_error_is_surfaced_as_fragment() {
    let backend = MockBackend::start().await;
    backend
        .mock_sse(
            SCRIPT_ENDPOINT,
            concat!(
                "data: {\"text\":\"partial\"}\n\n",
                "data: {\"error\":\"model overloaded\"}\n\n",
                "data: [DONE]\n\n",
            ),
        )
        .await;

    let client = RelayClient::new(backend.api_base());
    let stream = client
        .stream_generate_script(&script_request(), "req-1")
        .await
        .unwrap();

    let fragments: Vec<StreamFragment> = stream.collect().await;
    assert_eq!(
        fragments,
        vec![
            StreamFragment::Text("partial".to_string()),
            StreamFragment::Error("model overloaded".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_fragments_reassembled_across_chunk_boundaries() {
    // One SSE event split awkwardly is still a single fragment: the line
    // buffer only releases complete lines.
    let backend = MockBackend::start().await;
    backend
        .mock_sse(
            SCRIPT_ENDPOINT,
            "data: {\"text\":\"const page = await browser.newPage();\"}\n\ndata: [DONE]\n\n",
        )
        .await;

    let client = RelayClient::new(backend.api_base());
    let stream = client
        .stream_generate_script(&script_request(), "req-1")
        .await
        .unwrap();

    let fragments: Vec<StreamFragment> = stream.collect().await;
    assert_eq!(
        fragments,
        vec![StreamFragment::Text(
            "const page = await browser.newPage();".to_string()
        )]
    );
}

#[tokio::test]
async fn test_cancel_ends_stream_without_error_fragment() {
    let backend = MockBackend::start().await;
    backend
        .mock_sse(
            SCRIPT_ENDPOINT,
            "data: {\"text\":\"never delivered\"}\n\ndata: [DONE]\n\n",
        )
        .await;

    let client = RelayClient::new(backend.api_base());
    let stream = client
        .stream_generate_script(&script_request(), "req-1")
        .await
        .unwrap();

    // Cancel before consuming; the abort wins over the buffered body
    client.stop_stream("req-1");

    let fragments: Vec<StreamFragment> = stream.collect().await;
    assert!(fragments.is_empty(), "cancellation must end silently");
    assert!(!client.registry().is_active("req-1"));
}

#[tokio::test]
async fn test_cancel_unknown_id_is_noop() {
    let backend = MockBackend::start().await;
    let client = RelayClient::new(backend.api_base());

    client.stop_stream("never-started");
    assert!(!client.registry().is_active("never-started"));
}

#[tokio::test]
async fn test_duplicate_request_id_rejected_while_stream_open() {
    let backend = MockBackend::start().await;
    backend
        .mock_sse(SCRIPT_ENDPOINT, "data: {\"text\":\"a\"}\n\ndata: [DONE]\n\n")
        .await;

    let client = RelayClient::new(backend.api_base());
    let first = client
        .stream_generate_script(&script_request(), "req-1")
        .await
        .unwrap();

    let second = client
        .stream_generate_script(&script_request(), "req-1")
        .await;
    assert!(matches!(
        second,
        Err(RelayError::DuplicateRequestId(id)) if id == "req-1"
    ));

    // The rejected attempt must not have disturbed the open stream
    let fragments: Vec<StreamFragment> = first.collect().await;
    assert_eq!(fragments, vec![StreamFragment::Text("a".to_string())]);
}

#[tokio::test]
async fn test_request_id_reusable_after_completion() {
    let backend = MockBackend::start().await;
    backend
        .mock_sse(SCRIPT_ENDPOINT, "data: {\"text\":\"a\"}\n\ndata: [DONE]\n\n")
        .await;

    let client = RelayClient::new(backend.api_base());

    let first = client
        .stream_generate_script(&script_request(), "req-1")
        .await
        .unwrap();
    let _: Vec<StreamFragment> = first.collect().await;

    let second = client
        .stream_generate_script(&script_request(), "req-1")
        .await;
    assert_ok!(second);
}

#[tokio::test]
async fn test_failed_open_returns_error_and_releases_id() {
    let backend = MockBackend::start().await;
    backend
        .mock_error(SCRIPT_ENDPOINT, 503, "AI service unavailable")
        .await;

    let client = RelayClient::new(backend.api_base());
    let result = client
        .stream_generate_script(&script_request(), "req-1")
        .await;

    assert!(matches!(
        result,
        Err(RelayError::Http { status: 503, ref message }) if message == "AI service unavailable"
    ));
    // A failed open must not leak the id
    assert!(!client.registry().is_active("req-1"));
    assert!(client
        .stream_generate_script(&script_request(), "req-1")
        .await
        .is_err_and(|e| matches!(e, RelayError::Http { .. })));
}

#[tokio::test]
async fn test_request_body_sent_for_stream_open() {
    let backend = MockBackend::start().await;
    backend
        .mock_sse(SCRIPT_ENDPOINT, "data: [DONE]\n\n")
        .await;

    let client = RelayClient::new(backend.api_base());
    let stream = client
        .stream_generate_script(&script_request(), "req-1")
        .await
        .unwrap();
    let _: Vec<StreamFragment> = stream.collect().await;

    let sent = backend.last_request_body(SCRIPT_ENDPOINT).await.unwrap();
    assert_eq!(sent["framework"], json!("playwright"));
    assert_eq!(sent["headless"], json!(true));
}
