//! Generative-language upstream integration
//!
//! All "hard" operations are delegated to an external model API. This module
//! holds the typed wire shapes, the provider trait the routes program
//! against, and the production Gemini client.

pub mod client;
pub mod models;
pub mod provider;

pub use client::GeminiClient;
pub use models::{GenerateContentRequest, GenerateContentResponse, GenerateOutcome};
pub use provider::{ByteStream, GenerativeProvider};
