//! # gesturehub-adapter-mqtt
//!
//! MQTT adapter — carries IR actuation commands to the device bridge.
//!
//! ## Responsibilities
//! - Connect to an MQTT broker and keep the connection alive
//! - Implement the `ActuationPublisher` port by publishing each payload as
//!   JSON to the configured topic
//!
//! ## Dependency rule
//! Same as other adapters: depends on `gesturehub-app` and `gesturehub-domain`.

mod config;
mod error;
mod publisher;

pub use config::MqttConfig;
pub use error::MqttError;
pub use publisher::MqttPublisher;
