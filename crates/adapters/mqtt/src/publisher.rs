//! rumqttc-backed [`ActuationPublisher`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rumqttc::{AsyncClient, Event, EventLoop, MqttOptions, Packet, QoS};
use tokio::task::JoinHandle;

use gesturehub_app::ports::ActuationPublisher;
use gesturehub_domain::error::HubError;
use gesturehub_domain::event::ActuationPayload;

use crate::config::MqttConfig;
use crate::error::MqttError;

/// Publishes actuation payloads as JSON to a fixed topic.
///
/// A background task drives the rumqttc event loop; it is aborted when the
/// publisher is dropped. Publishes are refused while the broker connection is
/// down or the request buffer is full.
pub struct MqttPublisher {
    client: AsyncClient,
    topic: String,
    connected: Arc<AtomicBool>,
    event_loop: Option<JoinHandle<()>>,
}

impl MqttPublisher {
    /// Create the client and spawn its event loop.
    ///
    /// Connecting happens in the background; publishes issued before the
    /// broker acknowledged the connection are rejected.
    #[must_use]
    pub fn connect(config: &MqttConfig) -> Self {
        let mut options = MqttOptions::new(
            config.client_id.clone(),
            config.broker_host.clone(),
            config.broker_port,
        );
        options.set_keep_alive(config.keep_alive());

        let (client, event_loop) = AsyncClient::new(options, config.channel_capacity);
        let connected = Arc::new(AtomicBool::new(false));
        let handle = tokio::spawn(drive(
            event_loop,
            Arc::clone(&connected),
            config.reconnect_delay(),
        ));
        tracing::info!(
            host = %config.broker_host,
            port = config.broker_port,
            topic = %config.topic,
            "MQTT publisher started"
        );

        Self {
            client,
            topic: config.topic.clone(),
            connected,
            event_loop: Some(handle),
        }
    }

    fn send(&self, payload: &ActuationPayload) -> Result<(), MqttError> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(MqttError::NotConnected);
        }
        let body = serde_json::to_vec(payload).map_err(MqttError::PayloadEncode)?;
        self.client
            .try_publish(self.topic.as_str(), QoS::AtLeastOnce, false, body)
            .map_err(MqttError::Client)
    }
}

impl Drop for MqttPublisher {
    fn drop(&mut self) {
        if let Some(handle) = self.event_loop.take() {
            handle.abort();
        }
    }
}

impl ActuationPublisher for MqttPublisher {
    async fn publish(&self, payload: &ActuationPayload) -> Result<(), HubError> {
        self.send(payload)?;
        tracing::debug!(topic = %self.topic, code = %payload.code, "actuation published");
        Ok(())
    }
}

async fn drive(
    mut event_loop: EventLoop,
    connected: Arc<AtomicBool>,
    reconnect_delay: std::time::Duration,
) {
    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                connected.store(true, Ordering::SeqCst);
                tracing::info!("connected to MQTT broker");
            }
            Ok(_) => {}
            Err(err) => {
                connected.store(false, Ordering::SeqCst);
                tracing::warn!(error = %err, "MQTT connection error, retrying");
                tokio::time::sleep(reconnect_delay).await;
            }
        }
    }
}
