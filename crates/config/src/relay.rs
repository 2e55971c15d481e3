//! Relay configuration

use serde::{Deserialize, Serialize};

/// Relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Bound of the merged output channel; a full channel suspends the
    /// relay instead of dropping events
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Emit an `agent_end` marker after each turn's chunks
    #[serde(default = "default_true")]
    pub emit_turn_end: bool,

    /// Budget for each wait on the next reply fragment (ms); 0 waits
    /// indefinitely. Exceeding it fails the turn, not the relay.
    #[serde(default = "default_turn_timeout")]
    pub turn_timeout_ms: u64,
}

fn default_channel_capacity() -> usize {
    64
}
fn default_turn_timeout() -> u64 {
    30_000
}
fn default_true() -> bool {
    true
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            channel_capacity: default_channel_capacity(),
            emit_turn_end: default_true(),
            turn_timeout_ms: default_turn_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();

        assert_eq!(config.channel_capacity, 64);
        assert!(config.emit_turn_end);
        assert_eq!(config.turn_timeout_ms, 30_000);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: RelayConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.channel_capacity, 64);
    }
}
