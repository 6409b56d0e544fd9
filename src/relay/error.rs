//! Relay client error taxonomy

use thiserror::Error;

/// Failures surfaced by the relay client.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Connection-level failure before any response arrived
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response received with a status outside 2xx (other than 429)
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// HTTP 429. Never retried automatically: the upstream quota is shared
    /// (15 requests/minute on the free tier) and blind retry compounds the
    /// pressure. The caller informs the operator instead.
    #[error("Rate limited. Retry after {retry_after_secs} seconds.")]
    RateLimited { retry_after_secs: u64 },

    /// A 2xx body that was not the JSON the endpoint promised
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A stream was opened with a request id that is still live
    #[error("A stream is already open for request id {0}")]
    DuplicateRequestId(String),
}

impl RelayError {
    /// Whether the retry executor may try this request again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RelayError::Network(_) | RelayError::Http { .. })
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
