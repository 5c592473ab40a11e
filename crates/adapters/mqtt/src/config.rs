//! MQTT publisher configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the MQTT actuation publisher.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MqttConfig {
    /// MQTT broker hostname or IP address.
    pub broker_host: String,
    /// MQTT broker port.
    pub broker_port: u16,
    /// MQTT client identifier.
    pub client_id: String,
    /// Topic the IR bridge subscribes to.
    pub topic: String,
    /// Keep-alive interval in seconds.
    pub keep_alive_secs: u16,
    /// Pause before polling again after a connection error, in seconds.
    pub reconnect_delay_secs: u16,
    /// Number of requests buffered between the client and the event loop.
    pub channel_capacity: usize,
}

impl MqttConfig {
    pub(crate) fn keep_alive(&self) -> Duration {
        Duration::from_secs(u64::from(self.keep_alive_secs))
    }

    pub(crate) fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(u64::from(self.reconnect_delay_secs))
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self {
            broker_host: "localhost".to_string(),
            broker_port: 1883,
            client_id: "gesturehub".to_string(),
            topic: "gesturehub/ir".to_string(),
            keep_alive_secs: 30,
            reconnect_delay_secs: 5,
            channel_capacity: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_sensible_defaults() {
        let config = MqttConfig::default();
        assert_eq!(config.broker_host, "localhost");
        assert_eq!(config.broker_port, 1883);
        assert_eq!(config.client_id, "gesturehub");
        assert_eq!(config.topic, "gesturehub/ir");
        assert_eq!(config.keep_alive(), Duration::from_secs(30));
        assert_eq!(config.reconnect_delay(), Duration::from_secs(5));
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            broker_host = "mqtt.example.com"
            broker_port = 8883
            client_id = "living-room"
            topic = "home/ir"
            keep_alive_secs = 60
        "#;
        let config: MqttConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.broker_host, "mqtt.example.com");
        assert_eq!(config.broker_port, 8883);
        assert_eq!(config.client_id, "living-room");
        assert_eq!(config.topic, "home/ir");
        assert_eq!(config.keep_alive_secs, 60);
    }

    #[test]
    fn should_use_defaults_for_missing_fields() {
        let toml = r#"broker_host = "192.168.1.100""#;
        let config: MqttConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.broker_host, "192.168.1.100");
        assert_eq!(config.broker_port, 1883);
        assert_eq!(config.topic, "gesturehub/ir");
    }
}
