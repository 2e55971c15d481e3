//! Streaming reply producer trait

use std::pin::Pin;

use serde::{Deserialize, Serialize};
use tokio_stream::Stream;

use voice_relay_core::ThreadId;

use crate::AgentError;

/// One incremental piece of an agent's streamed reply.
///
/// Fragments may be empty; consumers decide whether empty text is
/// meaningful (the relay filters it out).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFragment {
    /// Fragment text
    pub text: String,
}

impl ResponseFragment {
    /// Create a fragment
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Is the fragment empty?
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Lazily produced sequence of reply fragments
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<ResponseFragment, AgentError>> + Send>>;

/// Agent backend trait
///
/// Implementations maintain their own memory of prior turns keyed by
/// thread id; callers never inspect or reset that memory directly.
#[async_trait::async_trait]
pub trait AgentProducer: Send + Sync {
    /// Submit one user message scoped to `thread` and stream the reply.
    ///
    /// The returned stream yields fragments in the order the backend
    /// produces them, ending when the reply is complete. Mid-reply
    /// failures surface as an `Err` item.
    async fn stream_reply(
        &self,
        message: &str,
        thread: &ThreadId,
    ) -> Result<FragmentStream, AgentError>;
}
