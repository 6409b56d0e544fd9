//! Configuration management for QA Studio
//!
//! Configuration is loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Generative-language API base URL
    pub gemini_api_url: String,
    /// Generative-language API key; AI endpoints return 503 when unset
    pub gemini_api_key: Option<String>,
    /// Model identifier used for all generation requests
    pub gemini_model: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("QA_STUDIO_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("QA_STUDIO_PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .context("Invalid QA_STUDIO_PORT")?,

            gemini_api_url: env::var("GEMINI_API_URL").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta".to_string()
            }),
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
        })
    }
}
