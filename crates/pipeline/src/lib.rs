//! Voice event relay pipeline
//!
//! Merges an upstream sequence of voice events with agent reply chunks:
//! - `StreamRelay` forwards every upstream event unchanged and in order
//! - `TurnCorrelator` runs one agent turn per finalized transcript,
//!   splicing the reply chunks in right after the trigger
//!
//! At most one turn is in flight per relay run. A failed turn surfaces
//! as a single `error` event; the relay keeps serving later events.

pub mod relay;
pub mod turn;

pub use relay::StreamRelay;
pub use turn::TurnCorrelator;

use thiserror::Error;

/// Relay errors
#[derive(Error, Debug)]
pub enum RelayError {
    /// Agent producer failed during a turn
    #[error("Agent error: {0}")]
    Agent(#[from] voice_relay_agent::AgentError),

    /// Downstream consumer went away
    #[error("Output channel closed")]
    ChannelClosed,
}
