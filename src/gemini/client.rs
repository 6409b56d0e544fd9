//! Gemini API client
//!
//! HTTP client for the hosted generative-language API.

use async_trait::async_trait;
use tracing::{debug, error, instrument};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    gemini::models::{GenerateContentRequest, GenerateContentResponse, GenerateOutcome},
    gemini::provider::{ByteStream, GenerativeProvider},
};

/// Fallback Retry-After hint when the upstream omits the header
const DEFAULT_RETRY_AFTER_SECS: u64 = 5;

/// Gemini API client
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// Returns `None` when no API key is configured; the server then reports
    /// the AI endpoints as unavailable instead of failing at startup.
    pub fn new(client: reqwest::Client, config: &Config) -> Option<Self> {
        let api_key = config.gemini_api_key.clone()?;
        Some(Self {
            client,
            base_url: config.gemini_api_url.clone(),
            api_key,
            model: config.gemini_model.clone(),
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    fn stream_url(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse&key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Translate a non-success upstream response into an error.
    ///
    /// 429 carries the Retry-After hint through so the UI can tell the
    /// operator when to try again; the free tier caps at 15 requests/minute.
    async fn upstream_error(response: reqwest::Response) -> AppError {
        let status = response.status();

        if status.as_u16() == 429 {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return AppError::RateLimited {
                message: format!("Rate limited. Retry after {} seconds.", retry_after_secs),
                retry_after_secs,
            };
        }

        let text = response.text().await.unwrap_or_default();
        error!(status = %status, body = %text, "Gemini request failed");
        AppError::UpstreamError(format!("Gemini API error {}: {}", status, text))
    }
}

#[async_trait]
impl GenerativeProvider for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> AppResult<GenerateOutcome> {
        let request = GenerateContentRequest::from_prompt(prompt);

        debug!(model = %self.model, "Sending generate request to Gemini");

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "Gemini generate response status");

        if !status.is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let body = response.text().await?;

        let result: GenerateContentResponse = match serde_json::from_str(&body) {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, body = %body, "Failed to parse Gemini response");
                return Err(AppError::UpstreamError(format!(
                    "Failed to parse Gemini response: {}",
                    e
                )));
            }
        };

        Ok(result.extract_text())
    }

    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate_stream(&self, prompt: &str) -> AppResult<ByteStream> {
        let request = GenerateContentRequest::from_prompt(prompt);

        debug!(model = %self.model, "Opening generate stream to Gemini");

        let response = self
            .client
            .post(self.stream_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "Gemini stream response status");

        if !status.is_success() {
            return Err(Self::upstream_error(response).await);
        }

        Ok(Box::pin(response.bytes_stream()))
    }
}
