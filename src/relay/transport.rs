//! Transport primitive
//!
//! Performs exactly one network call per invocation and translates the HTTP
//! exchange into the relay's result shape. No retry logic lives here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE, RETRY_AFTER};
use tracing::debug;

use crate::relay::error::{RelayError, RelayResult};

/// Fallback Retry-After hint when the server omits the header
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

/// Retry policy attached to a request descriptor.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the first attempt (total attempts = retries + 1)
    pub retries: u32,
    /// Base backoff delay; attempt n waits `base_delay * 2^n`
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

/// Immutable description of one request.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub path: String,
    pub method: reqwest::Method,
    pub body: Option<serde_json::Value>,
    pub retry: RetryPolicy,
}

impl RequestDescriptor {
    /// Describe a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: reqwest::Method::GET,
            body: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Describe a POST request with a JSON body.
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            path: path.into(),
            method: reqwest::Method::POST,
            body: Some(body),
            retry: RetryPolicy::default(),
        }
    }

    /// Override the default retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Trait for the single-call transport layer.
///
/// The executor counts attempts against this seam, so tests can verify retry
/// behavior with a fake transport and no network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform exactly one network call for the descriptor.
    async fn send(&self, descriptor: &RequestDescriptor) -> RelayResult<serde_json::Value>;
}

/// Production transport over reqwest
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport rooted at the backend base path.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, descriptor: &RequestDescriptor) -> RelayResult<serde_json::Value> {
        let url = format!("{}{}", self.base_url, descriptor.path);
        debug!(method = %descriptor.method, url = %url, "Sending relay request");

        let mut request = self
            .client
            .request(descriptor.method.clone(), &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(body) = &descriptor.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(status = %status, url = %url, "Relay response status");

        if !status.is_success() {
            return Err(translate_failure(response).await);
        }

        let text = response.text().await?;
        let value = serde_json::from_str(&text)?;
        Ok(value)
    }
}

/// Translate a non-2xx response into the relay's failure shape.
///
/// Shared with the stream reader's open path so streaming and unary calls
/// fail identically.
pub(crate) async fn translate_failure(response: reqwest::Response) -> RelayError {
    let status = response.status();

    if status.as_u16() == 429 {
        let retry_after_secs = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        return RelayError::RateLimited { retry_after_secs };
    }

    let reason = status.canonical_reason().unwrap_or("HTTP error").to_string();
    let message = match response.text().await {
        Ok(text) => extract_error_message(&text).unwrap_or(reason),
        Err(_) => reason,
    };

    RelayError::Http {
        status: status.as_u16(),
        message,
    }
}

/// Best-effort decode of an error body's human-readable message.
///
/// Accepts the server's `{"error": {"code", "message"}}` shape as well as
/// flat `{"message": ...}` and `{"error": "..."}` bodies.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    if let Some(message) = value
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
    {
        return Some(message.to_string());
    }
    if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }
    if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
        return Some(message.to_string());
    }
    None
}
