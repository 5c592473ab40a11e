//! MQTT adapter error types.

use gesturehub_domain::error::{HubError, TransportError};

/// Errors specific to the MQTT adapter.
#[derive(Debug, thiserror::Error)]
pub enum MqttError {
    /// The rumqttc client refused the request.
    #[error("MQTT client error")]
    Client(#[source] rumqttc::ClientError),

    /// No broker connection is established.
    #[error("not connected to the MQTT broker")]
    NotConnected,

    /// Failed to encode an outgoing payload as JSON.
    #[error("failed to encode MQTT payload")]
    PayloadEncode(#[source] serde_json::Error),
}

impl MqttError {
    /// Convert into a [`HubError`] for propagation across port boundaries.
    ///
    /// A refused publish is a transport failure; anything else is an
    /// adapter failure.
    pub fn into_domain(self) -> HubError {
        match self {
            Self::Client(err) => TransportError::Rejected(err.to_string()).into(),
            Self::NotConnected => TransportError::Rejected(Self::NotConnected.to_string()).into(),
            other => HubError::Storage(Box::new(other)),
        }
    }
}

impl From<MqttError> for HubError {
    fn from(err: MqttError) -> Self {
        err.into_domain()
    }
}
