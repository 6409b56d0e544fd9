//! Wire types for the generative-language API
//!
//! The response nests generated text under `candidates -> content -> parts ->
//! text`. Extraction goes through these typed structs, and "no text present"
//! is a named outcome rather than a null that callers have to interpret.

use serde::{Deserialize, Serialize};

/// Request body for `:generateContent` and `:streamGenerateContent`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Wrap a single prompt string in the nested request shape.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

/// One content block (request or response side).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One part of a content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// One response candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

/// Response body for `:generateContent`, and for each streamed chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Outcome of extracting text from a model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The concatenated text of the first candidate's parts.
    Text(String),
    /// The response decoded but carried no text (empty candidates, blocked
    /// content, or a metadata-only stream chunk).
    NoText,
}

impl GenerateContentResponse {
    /// Extract text from the first candidate, concatenating its parts.
    pub fn extract_text(&self) -> GenerateOutcome {
        let Some(candidate) = self.candidates.first() else {
            return GenerateOutcome::NoText;
        };
        let Some(content) = &candidate.content else {
            return GenerateOutcome::NoText;
        };
        if content.parts.is_empty() {
            return GenerateOutcome::NoText;
        }

        let mut text = String::new();
        for part in &content.parts {
            text.push_str(&part.text);
        }
        GenerateOutcome::Text(text)
    }
}
