//! Actuation dispatcher — bounded publish of a resolved control.

use std::time::Duration;

use gesturehub_domain::error::{HubError, TransportError};
use gesturehub_domain::event::ActuationPayload;

use crate::ports::ActuationPublisher;

/// Default upper bound for a single publish.
pub const DEFAULT_PUBLISH_TIMEOUT: Duration = Duration::from_secs(3);

/// Publishes payloads and turns a stalled publish into a transport error.
pub struct ActuationDispatcher<P> {
    publisher: P,
    timeout: Duration,
}

impl<P: ActuationPublisher> ActuationDispatcher<P> {
    pub fn new(publisher: P) -> Self {
        Self::with_timeout(publisher, DEFAULT_PUBLISH_TIMEOUT)
    }

    pub fn with_timeout(publisher: P, timeout: Duration) -> Self {
        Self { publisher, timeout }
    }

    /// Publish `payload`, waiting at most the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Transport`] when the bus refuses the publish or the
    /// timeout elapses.
    #[tracing::instrument(skip_all, fields(mode = %payload.mode, control = %payload.control))]
    pub async fn dispatch(&self, payload: &ActuationPayload) -> Result<(), HubError> {
        match tokio::time::timeout(self.timeout, self.publisher.publish(payload)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "actuation publish timed out");
                Err(TransportError::Timeout(self.timeout).into())
            }
        }
    }
}
