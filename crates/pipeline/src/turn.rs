//! Turn correlation
//!
//! One turn: a finalized transcript is submitted to the agent producer
//! scoped to the run's thread id, and the producer's reply fragments are
//! re-emitted as chunk events in the order produced.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::sync::mpsc;

use voice_relay_agent::{AgentError, AgentProducer};
use voice_relay_config::RelayConfig;
use voice_relay_core::{ThreadId, VoiceEvent};

use crate::RelayError;

/// Turn correlator
///
/// Owns the per-turn reply stream it opens; the thread id and the output
/// channel belong to the relay that drives it.
pub struct TurnCorrelator {
    producer: Arc<dyn AgentProducer>,
    emit_turn_end: bool,
    fragment_budget: Option<Duration>,
}

impl TurnCorrelator {
    /// Create a correlator
    pub fn new(producer: Arc<dyn AgentProducer>, config: &RelayConfig) -> Self {
        Self {
            producer,
            emit_turn_end: config.emit_turn_end,
            fragment_budget: (config.turn_timeout_ms > 0)
                .then(|| Duration::from_millis(config.turn_timeout_ms)),
        }
    }

    /// Run one agent turn, sending each chunk event into `out`.
    ///
    /// Chunks are emitted strictly in producer order, with no coalescing;
    /// empty fragments yield no event. When the reply ends, one
    /// `agent_end` marker follows if configured. Returns the number of
    /// chunks emitted.
    pub async fn run_turn(
        &self,
        transcript: &str,
        thread: &ThreadId,
        out: &mpsc::Sender<VoiceEvent>,
    ) -> Result<usize, RelayError> {
        let mut fragments = self.producer.stream_reply(transcript, thread).await?;
        let mut emitted = 0usize;

        loop {
            let item = match self.fragment_budget {
                Some(budget) => tokio::time::timeout(budget, fragments.next())
                    .await
                    .map_err(|_| RelayError::Agent(AgentError::Timeout))?,
                None => fragments.next().await,
            };

            let fragment = match item {
                Some(fragment) => fragment?,
                None => break,
            };

            if fragment.is_empty() {
                continue;
            }

            out.send(VoiceEvent::agent_chunk(fragment.text))
                .await
                .map_err(|_| RelayError::ChannelClosed)?;
            emitted += 1;
        }

        if self.emit_turn_end {
            out.send(VoiceEvent::AgentEnd)
                .await
                .map_err(|_| RelayError::ChannelClosed)?;
        }

        tracing::debug!(thread = %thread, chunks = emitted, "agent turn complete");

        Ok(emitted)
    }
}
