//! QA Studio - AI-assisted QA workflow backend and relay client
//!
//! This library provides the backend server for QA Studio (test case
//! generation, automation scripting, accessibility audits, artifact
//! persistence, API proxying) and the relay client that talks to it with
//! retry, streaming, and cancellation support.

pub mod config;
pub mod error;
pub mod gemini;
pub mod models;
pub mod prompts;
pub mod relay;
pub mod routes;
pub mod sse;
pub mod storage;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};

pub use crate::config::Config;
pub use crate::error::{AppError, AppResult};
pub use crate::gemini::{GeminiClient, GenerativeProvider};
pub use crate::relay::{RelayClient, RelayError, RetryPolicy, StreamFragment};
pub use crate::storage::Storage;

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    pub start_time: Instant,
    pub storage: Arc<Storage>,
    /// AI generation backend, absent when no API key is configured. AI
    /// endpoints answer 503 in that case; everything else keeps working.
    pub provider: Option<Arc<dyn GenerativeProvider>>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // Initialize HTTP client with connection pooling
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .timeout(std::time::Duration::from_secs(300))
            .build()?;

        let provider = match GeminiClient::new(http_client.clone(), &config) {
            Some(client) => {
                info!(model = %config.gemini_model, "Gemini client initialized");
                Some(Arc::new(client) as Arc<dyn GenerativeProvider>)
            }
            None => {
                warn!("GEMINI_API_KEY not set, AI endpoints will return 503");
                None
            }
        };

        Ok(Self {
            config,
            http_client,
            start_time: Instant::now(),
            storage: Arc::new(Storage::new()),
            provider,
        })
    }

    /// Create application state with an explicit provider, for tests that
    /// substitute a mock generation backend.
    pub fn with_provider(config: Config, provider: Option<Arc<dyn GenerativeProvider>>) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
            start_time: Instant::now(),
            storage: Arc::new(Storage::new()),
            provider,
        }
    }
}
