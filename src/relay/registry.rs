//! Relay registry
//!
//! Tracks which request ids have a stream in flight and owns the only path
//! to cancelling them. One instance per client session, constructor-injected
//! rather than global, so tests can run isolated registries.

use std::collections::HashMap;
use std::sync::Mutex;

use futures::future::{AbortHandle, AbortRegistration};
use tracing::debug;

use crate::relay::error::{RelayError, RelayResult};

/// Mapping from request id to the abort handle of its in-flight stream.
///
/// Invariant: at most one entry per request id. `begin` rejects duplicates
/// instead of overwriting, which would orphan a live abort handle.
#[derive(Debug, Default)]
pub struct RelayRegistry {
    entries: Mutex<HashMap<String, AbortHandle>>,
}

impl RelayRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new in-flight stream for `request_id`.
    ///
    /// Returns the registration the stream reader arms its abortable read
    /// with. Fails with `DuplicateRequestId` if an entry is still live.
    pub fn begin(&self, request_id: &str) -> RelayResult<AbortRegistration> {
        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(request_id) {
            return Err(RelayError::DuplicateRequestId(request_id.to_string()));
        }

        let (handle, registration) = AbortHandle::new_pair();
        entries.insert(request_id.to_string(), handle);
        debug!(request_id = %request_id, "Registered stream");
        Ok(registration)
    }

    /// Cancel the stream for `request_id` and remove its entry.
    ///
    /// No-op for unknown or already-finished ids.
    pub fn cancel(&self, request_id: &str) {
        let handle = self.entries.lock().unwrap().remove(request_id);
        if let Some(handle) = handle {
            handle.abort();
            debug!(request_id = %request_id, "Cancelled stream");
        }
    }

    /// Remove the entry without cancelling, on natural stream completion.
    ///
    /// Idempotent: calling it twice leaves the registry in the same state.
    pub fn end(&self, request_id: &str) {
        self.entries.lock().unwrap().remove(request_id);
    }

    /// Whether a stream is currently registered for `request_id`.
    pub fn is_active(&self, request_id: &str) -> bool {
        self.entries.lock().unwrap().contains_key(request_id)
    }
}
