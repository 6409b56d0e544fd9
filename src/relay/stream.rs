//! Cancellable stream reader
//!
//! Reads a streaming response body, reassembles SSE lines across chunk
//! boundaries, and yields fragments in arrival order until the `[DONE]`
//! sentinel, a terminal read failure, or cancellation via the relay
//! registry. Cancellation ends the stream silently: the abortable read
//! simply stops yielding, no error fragment is produced.

use std::sync::Arc;

use async_stream::stream;
use futures::future::AbortRegistration;
use futures::stream::Abortable;
use futures::{Stream, StreamExt};
use tracing::debug;

use crate::relay::registry::RelayRegistry;
use crate::sse::{SseLineBuffer, DATA_PREFIX, DONE_SENTINEL};

/// One incremental unit of a streamed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFragment {
    /// A textual delta. Boundaries carry no semantic meaning; a line of
    /// generated code may span several fragments.
    Text(String),
    /// An inline error delivered on the same channel as the text
    Error(String),
}

/// Parse one SSE payload into a fragment.
///
/// JSON with a `text` field projects that field out; JSON with an `error`
/// field becomes an error fragment; anything else passes through raw, so one
/// malformed line never kills the stream.
fn parse_fragment(payload: &str) -> StreamFragment {
    match serde_json::from_str::<serde_json::Value>(payload) {
        Ok(value) => {
            if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
                StreamFragment::Error(message.to_string())
            } else if let Some(text) = value.get("text").and_then(|t| t.as_str()) {
                StreamFragment::Text(text.to_string())
            } else {
                StreamFragment::Text(payload.to_string())
            }
        }
        Err(_) => StreamFragment::Text(payload.to_string()),
    }
}

/// Turn an open streaming response into a lazy, finite fragment stream.
///
/// The stream is pull-based and not restartable; a fresh call produces a
/// fresh stream. The registry entry for `request_id` is removed when the
/// stream ends, whatever the reason.
pub(crate) fn read_fragments(
    response: reqwest::Response,
    registration: AbortRegistration,
    registry: Arc<RelayRegistry>,
    request_id: String,
) -> impl Stream<Item = StreamFragment> + Send {
    stream! {
        let mut body = Abortable::new(response.bytes_stream(), registration);
        let mut buffer = SseLineBuffer::new();

        'read: while let Some(chunk) = body.next().await {
            let bytes = match chunk {
                Ok(bytes) => bytes,
                Err(e) => {
                    // Read-level failure after the stream opened: forward
                    // once, then terminate.
                    yield StreamFragment::Error(e.to_string());
                    break 'read;
                }
            };

            for line in buffer.feed(&bytes) {
                let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
                    continue;
                };
                if payload == DONE_SENTINEL {
                    break 'read;
                }
                yield parse_fragment(payload);
            }
        }

        debug!(request_id = %request_id, "Stream finished");
        registry.end(&request_id);
    }
}
