//! Mock Gemini API server
//!
//! Wiremock stand-in for the generative-language API, serving both the
//! unary `generateContent` and the SSE `streamGenerateContent` endpoints.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::constants::TEST_GEMINI_MODEL;

pub struct MockGemini {
    server: MockServer,
}

impl MockGemini {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    fn generate_path() -> String {
        format!("/models/{}:generateContent", TEST_GEMINI_MODEL)
    }

    fn stream_path() -> String {
        format!("/models/{}:streamGenerateContent", TEST_GEMINI_MODEL)
    }

    /// Respond to unary generation with a single candidate carrying `text`.
    pub async fn mock_generate_text(&self, text: &str) {
        Mock::given(method("POST"))
            .and(path(Self::generate_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [
                    {
                        "content": {
                            "parts": [{ "text": text }]
                        }
                    }
                ]
            })))
            .mount(&self.server)
            .await;
    }

    /// Respond to unary generation with a candidate that has no content.
    pub async fn mock_generate_empty(&self) {
        Mock::given(method("POST"))
            .and(path(Self::generate_path()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "candidates": [{}] })),
            )
            .mount(&self.server)
            .await;
    }

    /// Respond to unary generation with 429 and a Retry-After hint.
    pub async fn mock_generate_rate_limited(&self, retry_after_secs: u64) {
        Mock::given(method("POST"))
            .and(path(Self::generate_path()))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("Retry-After", retry_after_secs.to_string().as_str())
                    .set_body_json(json!({
                        "error": { "code": 429, "message": "Resource exhausted" }
                    })),
            )
            .mount(&self.server)
            .await;
    }

    /// Respond to streaming generation with an SSE body where each chunk is
    /// one candidate carrying one text part.
    pub async fn mock_stream_texts(&self, texts: &[&str]) {
        let mut body = String::new();
        for text in texts {
            let chunk = json!({
                "candidates": [
                    {
                        "content": {
                            "parts": [{ "text": text }]
                        }
                    }
                ]
            });
            body.push_str(&format!("data: {}\n\n", chunk));
        }
        body.push_str("data: [DONE]\n\n");

        Mock::given(method("POST"))
            .and(path(Self::stream_path()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(body)
                    .insert_header("content-type", "text/event-stream")
                    .insert_header("cache-control", "no-cache"),
            )
            .mount(&self.server)
            .await;
    }
}
