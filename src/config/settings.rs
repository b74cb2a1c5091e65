use config::ConfigError;
use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for both the server and the message broker.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub broker: BrokerSettings,
}

/// Configuration settings for the server.
///
/// Defines the host and port the server will bind to.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Operational limits for the broker.
///
/// `max_connections` caps live WebSocket members across all rooms;
/// `max_message_bytes` caps the size of a published payload.
#[derive(Debug, Deserialize, Clone)]
pub struct BrokerSettings {
    pub max_connections: usize,
    pub max_message_bytes: usize,
}

impl Settings {
    /// Rejects merged values the broker cannot operate with.
    ///
    /// A zero connection cap would refuse every join and a zero payload cap
    /// would reject every publish, so both are configuration mistakes, not
    /// usable settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::Message(
                "server.host must not be empty".to_string(),
            ));
        }
        if self.broker.max_connections == 0 {
            return Err(ConfigError::Message(
                "broker.max_connections must be at least 1".to_string(),
            ));
        }
        if self.broker.max_message_bytes == 0 {
            return Err(ConfigError::Message(
                "broker.max_message_bytes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            max_connections: 1000,
            max_message_bytes: 1024 * 1024,
        }
    }
}

/// Provides default values for `Settings`.
///
/// These are also what `load_config` seeds the loader with, so a missing
/// file or variable falls back to them field by field.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            broker: BrokerSettings::default(),
        }
    }
}
