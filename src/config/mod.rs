mod settings;

use config::{Config, ConfigError, Environment, File};

pub use settings::{BrokerSettings, ServerSettings, Settings};

/// Loads the configuration for the process.
///
/// The built-in defaults are seeded into the loader first, so
/// `config/default.toml` (if present) and environment variables only need
/// to name the values they override. The merged result is validated before
/// the broker ever sees it.
pub fn load_config() -> Result<Settings, ConfigError> {
    let default = Settings::default();

    let config = Config::builder()
        .set_default("server.host", default.server.host)?
        .set_default("server.port", i64::from(default.server.port))?
        .set_default("broker.max_connections", default.broker.max_connections as i64)?
        .set_default(
            "broker.max_message_bytes",
            default.broker.max_message_bytes as i64,
        )?
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("_"))
        .build()?;

    let settings: Settings = config.try_deserialize()?;
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests;
