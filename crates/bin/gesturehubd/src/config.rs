//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `gesturehub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use gesturehub_adapter_mqtt::MqttConfig;
use gesturehub_adapter_trainer_process::TrainerConfig;
use gesturehub_app::retrain_scheduler::SchedulerConfig;
use gesturehub_domain::id::Gesture;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Message bus settings.
    pub mqtt: MqttConfig,
    /// Actuation publish settings.
    pub actuation: ActuationConfig,
    /// Retrain scheduler settings.
    pub scheduler: SchedulerSection,
    /// External trainer settings.
    pub trainer: TrainerConfig,
    /// Recognizer gesture vocabulary.
    pub gestures: GesturesConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ActuationConfig {
    /// Upper bound for one publish, in milliseconds.
    pub publish_timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SchedulerSection {
    /// Run the retrain scheduler at all.
    pub enabled: bool,
    /// Seconds between two retrain checks.
    pub interval_secs: u64,
    /// Upper bound for one training run, in seconds.
    pub training_timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GesturesConfig {
    /// Gesture identifiers the recognizer can produce.
    pub vocabulary: Vec<String>,
}

impl Config {
    /// Load configuration from `gesturehub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("gesturehub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("GESTUREHUB_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("GESTUREHUB_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("GESTUREHUB_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("GESTUREHUB_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("GESTUREHUB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("GESTUREHUB_MQTT_HOST") {
            self.mqtt.broker_host = val;
        }
        if let Some(port) = var("GESTUREHUB_MQTT_PORT").and_then(|v| v.parse().ok()) {
            self.mqtt.broker_port = port;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.scheduler.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "scheduler interval must be non-zero".to_string(),
            ));
        }
        if self.actuation.publish_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "publish timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    #[must_use]
    pub fn publish_timeout(&self) -> Duration {
        Duration::from_millis(self.actuation.publish_timeout_ms)
    }

    #[must_use]
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            interval: Duration::from_secs(self.scheduler.interval_secs),
            training_timeout: Duration::from_secs(self.scheduler.training_timeout_secs),
        }
    }

    /// The vocabulary as domain gestures, blanks dropped.
    #[must_use]
    pub fn vocabulary(&self) -> Vec<Gesture> {
        self.gestures
            .vocabulary
            .iter()
            .map(Gesture::new)
            .filter(|g| !g.is_blank())
            .collect()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:gesturehub.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "gesturehubd=info,gesturehub=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for ActuationConfig {
    fn default() -> Self {
        Self {
            publish_timeout_ms: 3000,
        }
    }
}

impl Default for SchedulerSection {
    fn default() -> Self {
        let defaults = SchedulerConfig::default();
        Self {
            enabled: true,
            interval_secs: defaults.interval.as_secs(),
            training_timeout_secs: defaults.training_timeout.as_secs(),
        }
    }
}

impl Default for GesturesConfig {
    fn default() -> Self {
        let vocabulary = [
            "one",
            "two",
            "three",
            "four",
            "ok",
            "small_heart",
            "thumbs_up",
            "thumbs_down",
            "rock",
            "call",
            "fist",
            "palm",
        ];
        Self {
            vocabulary: vocabulary.into_iter().map(str::to_string).collect(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite:gesturehub.db?mode=rwc");
        assert_eq!(config.mqtt.topic, "gesturehub/ir");
        assert!(config.scheduler.enabled);
        assert_eq!(config.scheduler.interval_secs, 600);
        assert_eq!(config.publish_timeout(), Duration::from_secs(3));
        assert!(config.trainer.command.is_none());
        assert_eq!(config.vocabulary().len(), 12);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.mqtt.broker_port, 1883);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [database]
            url = 'sqlite:test.db'

            [logging]
            filter = 'debug'

            [mqtt]
            broker_host = 'broker.local'
            topic = 'home/ir'

            [actuation]
            publish_timeout_ms = 750

            [scheduler]
            enabled = false
            interval_secs = 60
            training_timeout_secs = 30

            [trainer]
            command = 'python3'
            args = ['train.py']
            dataset_path = '/tmp/train.jsonl'

            [gestures]
            vocabulary = ['one', 'ok', ' ']
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.mqtt.broker_host, "broker.local");
        assert_eq!(config.mqtt.topic, "home/ir");
        assert_eq!(config.mqtt.client_id, "gesturehub");
        assert_eq!(config.publish_timeout(), Duration::from_millis(750));
        assert!(!config.scheduler.enabled);
        assert_eq!(
            config.scheduler_config(),
            SchedulerConfig {
                interval: Duration::from_secs(60),
                training_timeout: Duration::from_secs(30),
            }
        );
        assert_eq!(config.trainer.command.as_deref(), Some("python3"));
        assert_eq!(config.trainer.dataset_path, PathBuf::from("/tmp/train.jsonl"));
        assert_eq!(config.vocabulary(), [Gesture::new("one"), Gesture::new("ok")]);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_apply_overrides_over_file_values() {
        let vars = HashMap::from([
            ("GESTUREHUB_BIND", "127.0.0.1:8088"),
            ("GESTUREHUB_DATABASE_URL", "sqlite::memory:"),
            ("GESTUREHUB_LOG", "warn"),
            ("GESTUREHUB_MQTT_HOST", "mqtt.lan"),
            ("GESTUREHUB_MQTT_PORT", "8883"),
        ]);
        let mut config = Config::default();

        config.apply_overrides(|key| vars.get(key).map(|v| (*v).to_string()));

        assert_eq!(config.bind_addr(), "127.0.0.1:8088");
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.logging.filter, "warn");
        assert_eq!(config.mqtt.broker_host, "mqtt.lan");
        assert_eq!(config.mqtt.broker_port, 8883);
    }

    #[test]
    fn should_ignore_unparseable_port_override() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "GESTUREHUB_PORT").then(|| "http".to_string()));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_scheduler_interval() {
        let mut config = Config::default();
        config.scheduler.interval_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_accept_valid_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
