//! Provider abstraction for generation backends
//!
//! The routes program against this trait so tests can substitute a mock
//! backend without touching the network.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

use crate::error::AppResult;
use crate::gemini::models::GenerateOutcome;

/// Stream type for raw streaming responses from a generation backend
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// Trait defining the interface for generation backends
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Model identifier used by this provider, for health reporting
    fn model(&self) -> &str;

    /// Generate a complete response for the prompt.
    async fn generate(&self, prompt: &str) -> AppResult<GenerateOutcome>;

    /// Generate a streamed response for the prompt.
    ///
    /// Returns the raw SSE byte stream; the route layer reframes it into the
    /// `data: {"text": ...}` events the browser client consumes.
    async fn generate_stream(&self, prompt: &str) -> AppResult<ByteStream>;
}
