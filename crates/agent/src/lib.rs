//! Agent response producer boundary
//!
//! Features:
//! - `AgentProducer` trait for streaming reply backends
//! - `ScriptedProducer` in-memory backend for tests and development
//!
//! The engine executing the agent (model, prompt, tools, memory store)
//! lives behind the trait; this crate only defines the contract the
//! relay pipeline consumes.

pub mod producer;
pub mod scripted;

pub use producer::{AgentProducer, FragmentStream, ResponseFragment};
pub use scripted::{ScriptedProducer, ScriptedReply, TurnRequest};

use thiserror::Error;

/// Agent producer errors
#[derive(Error, Debug, Clone)]
pub enum AgentError {
    /// Backend rejected or failed the request
    #[error("Agent backend error: {0}")]
    Backend(String),

    /// Transport to the backend failed
    #[error("Connection error: {0}")]
    Connection(String),

    /// Backend produced a fragment the producer could not interpret
    #[error("Malformed fragment: {0}")]
    MalformedFragment(String),

    /// No fragment arrived within the turn's budget
    #[error("Timed out waiting for the next fragment")]
    Timeout,
}
