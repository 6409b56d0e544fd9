//! Retrying request executor
//!
//! Wraps a transport with bounded exponential backoff. Network and HTTP
//! failures are retried up to the descriptor's policy; rate limiting is
//! terminal and surfaces immediately so the caller can inform the operator.

use tracing::{debug, warn};

use crate::relay::error::RelayResult;
use crate::relay::transport::{RequestDescriptor, Transport};

/// Executes requests against a transport with retry-with-backoff.
pub struct RequestExecutor<T: Transport> {
    transport: T,
}

impl<T: Transport> RequestExecutor<T> {
    /// Create an executor over the given transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Access the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Execute the request, retrying per the descriptor's policy.
    ///
    /// Attempt `n` (zero-based) sleeps `base_delay * 2^n` before the next
    /// try. The final failure propagates unchanged so the caller still sees
    /// the original status code.
    pub async fn execute(&self, descriptor: &RequestDescriptor) -> RelayResult<serde_json::Value> {
        let policy = descriptor.retry;
        let mut attempt: u32 = 0;

        loop {
            match self.transport.send(descriptor).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < policy.retries && err.is_retryable() => {
                    let delay = policy.base_delay * 2u32.pow(attempt);
                    warn!(
                        path = %descriptor.path,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "Request failed, backing off before retry"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    debug!(path = %descriptor.path, error = %err, "Request failed, surfacing to caller");
                    return Err(err);
                }
            }
        }
    }
}
