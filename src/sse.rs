//! SSE (Server-Sent Events) framing
//!
//! The backend streams script generation as newline-delimited events, each
//! line prefixed with `data: ` and carrying either a JSON payload or the
//! literal `[DONE]` sentinel. This module owns that framing for both sides:
//! the routes emit it and the relay client parses it back.

use bytes::Bytes;
use serde::Serialize;

/// Prefix carried by every meaningful SSE line.
pub const DATA_PREFIX: &str = "data: ";

/// Literal payload that terminates a stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Buffer for accumulating incomplete SSE lines across chunk boundaries.
///
/// Stream chunks arrive as bytes that may not align with line boundaries.
/// This buffer accumulates incomplete lines until a complete line (ending
/// with `\n`) is available for processing.
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    /// Accumulated incomplete line data
    incomplete: String,
}

impl SseLineBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            incomplete: String::new(),
        }
    }

    /// Feed bytes into the buffer and return any complete lines.
    ///
    /// Complete lines are those ending with `\n`; the newline is stripped.
    /// Empty lines (SSE event separators) are skipped. Incomplete trailing
    /// data is retained for the next call. Invalid UTF-8 is replaced rather
    /// than rejected.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        let text = String::from_utf8_lossy(bytes);
        self.incomplete.push_str(&text);

        let mut complete_lines = Vec::new();
        while let Some(newline_pos) = self.incomplete.find('\n') {
            let line = self.incomplete[..newline_pos].to_string();
            self.incomplete = self.incomplete[newline_pos + 1..].to_string();

            if !line.is_empty() {
                complete_lines.push(line);
            }
        }

        complete_lines
    }

    /// Check if there's any incomplete data remaining in the buffer.
    pub fn has_incomplete(&self) -> bool {
        !self.incomplete.is_empty()
    }

    /// Get any remaining incomplete data.
    ///
    /// Call this at end of stream to check for truncated data.
    pub fn remaining(&self) -> &str {
        &self.incomplete
    }
}

/// Payload for a text delta event.
#[derive(Debug, Serialize)]
struct TextEvent<'a> {
    text: &'a str,
}

/// Payload for an inline error event.
#[derive(Debug, Serialize)]
struct ErrorEvent<'a> {
    error: &'a str,
}

/// Format a text delta as an SSE data event: `data: {"text":...}\n\n`.
pub fn format_text_event(text: &str) -> Bytes {
    let json = serde_json::to_string(&TextEvent { text })
        .expect("TextEvent should always serialize");
    Bytes::from(format!("{}{}\n\n", DATA_PREFIX, json))
}

/// Format an inline error as an SSE data event: `data: {"error":...}\n\n`.
///
/// Errors share the channel with text deltas so consumers see them in
/// arrival order; the `error` field is what distinguishes them.
pub fn format_error_event(message: &str) -> Bytes {
    let json = serde_json::to_string(&ErrorEvent { error: message })
        .expect("ErrorEvent should always serialize");
    Bytes::from(format!("{}{}\n\n", DATA_PREFIX, json))
}

/// Format the stream termination marker: `data: [DONE]\n\n`.
pub fn format_done_event() -> Bytes {
    Bytes::from_static(b"data: [DONE]\n\n")
}
