//! Observability configuration and tracing setup

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::ConfigError;

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log filter directive (`tracing_subscriber::EnvFilter` syntax)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Install the global tracing subscriber.
///
/// Call once at process start; a second call fails because the global
/// subscriber is already set.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_new(&config.log_level).map_err(|e| ConfigError::InvalidValue {
        field: "observability.log_level".to_string(),
        message: e.to_string(),
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| ConfigError::Observability(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        assert_eq!(ObservabilityConfig::default().log_level, "info");
    }

    #[test]
    fn test_init_with_defaults() {
        assert!(init_tracing(&ObservabilityConfig::default()).is_ok());
    }

    #[test]
    fn test_bad_filter_is_rejected() {
        let config = ObservabilityConfig {
            log_level: "not==a==filter".to_string(),
        };

        let result = init_tracing(&config);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
