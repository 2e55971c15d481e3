//! Configuration for the voice relay
//!
//! Layered settings in the usual shape: defaults in code, optional file,
//! `VOICE_RELAY_*` environment overlay on top.

pub mod observability;
pub mod relay;
pub mod settings;

pub use observability::{init_tracing, ObservabilityConfig};
pub use relay::RelayConfig;
pub use settings::Settings;

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A field failed validation
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Loading or deserializing the sources failed
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Tracing subscriber could not be installed
    #[error("Observability init failed: {0}")]
    Observability(String),
}
