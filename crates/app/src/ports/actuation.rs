//! Actuation port — the message bus that carries IR commands to devices.

use std::future::Future;

use gesturehub_domain::error::HubError;
use gesturehub_domain::event::ActuationPayload;

/// Publishes actuation payloads to the message bus.
pub trait ActuationPublisher {
    /// Publish `payload`. A refused publish is a [`HubError::Transport`].
    fn publish(
        &self,
        payload: &ActuationPayload,
    ) -> impl Future<Output = Result<(), HubError>> + Send;
}

impl<T: ActuationPublisher + Send + Sync> ActuationPublisher for std::sync::Arc<T> {
    fn publish(
        &self,
        payload: &ActuationPayload,
    ) -> impl Future<Output = Result<(), HubError>> + Send {
        (**self).publish(payload)
    }
}
