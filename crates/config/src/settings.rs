//! Main settings module

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ObservabilityConfig, RelayConfig};

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Relay configuration
    #[serde(default)]
    pub relay: RelayConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    /// Load settings from an optional file plus the environment.
    ///
    /// Environment variables use the `VOICE_RELAY_` prefix with `__`
    /// separating sections, e.g. `VOICE_RELAY_RELAY__CHANNEL_CAPACITY`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let loaded = builder
            .add_source(Environment::with_prefix("VOICE_RELAY").separator("__"))
            .build()?;

        let settings: Settings = loaded.try_deserialize()?;
        settings.validate()?;

        tracing::debug!(
            channel_capacity = settings.relay.channel_capacity,
            "configuration loaded"
        );

        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.relay.channel_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "relay.channel_capacity".to_string(),
                message: "capacity must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
