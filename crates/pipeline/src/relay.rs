//! Stream relay
//!
//! Forwards upstream voice events unchanged and in order, splicing each
//! agent turn's chunks in immediately after the transcript that
//! triggered it.

use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use voice_relay_agent::AgentProducer;
use voice_relay_config::RelayConfig;
use voice_relay_core::{ThreadId, VoiceEvent};

use crate::{RelayError, TurnCorrelator};

type ThreadIdGen = Box<dyn Fn() -> ThreadId + Send + Sync>;

/// Stream relay
///
/// Holds its dependencies (agent producer, thread-id generator) at
/// construction; one value drives one stream run.
pub struct StreamRelay {
    producer: Arc<dyn AgentProducer>,
    config: RelayConfig,
    thread_ids: ThreadIdGen,
}

impl StreamRelay {
    /// Create a relay
    pub fn new(producer: Arc<dyn AgentProducer>, config: RelayConfig) -> Self {
        Self {
            producer,
            config,
            thread_ids: Box::new(ThreadId::generate),
        }
    }

    /// Override the thread-id generator (tests pin identifiers here)
    pub fn with_thread_ids<F>(mut self, generate: F) -> Self
    where
        F: Fn() -> ThreadId + Send + Sync + 'static,
    {
        self.thread_ids = Box::new(generate);
        self
    }

    /// Spawn the relay over `upstream` and return the merged stream.
    ///
    /// A fresh thread id scopes every turn of this run. The merged
    /// channel is bounded by `channel_capacity`; a full channel suspends
    /// the relay rather than dropping events. The run ends when upstream
    /// ends, after in-flight turn output has drained. Dropping the
    /// returned stream cancels the run cooperatively: the relay stops at
    /// its next send and the in-flight reply stream is dropped with it.
    pub fn spawn<S>(self, upstream: S) -> ReceiverStream<VoiceEvent>
    where
        S: Stream<Item = VoiceEvent> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(self.config.channel_capacity);
        let thread = (self.thread_ids)();
        let correlator = TurnCorrelator::new(Arc::clone(&self.producer), &self.config);

        tokio::spawn(async move {
            tracing::info!(thread = %thread, "relay run started");

            let mut upstream = Box::pin(upstream);

            while let Some(event) = upstream.next().await {
                let trigger = event.trigger_transcript().map(str::to_owned);

                if tx.send(event).await.is_err() {
                    tracing::debug!(thread = %thread, "downstream closed, stopping relay");
                    return;
                }

                let Some(transcript) = trigger else { continue };

                tracing::debug!(thread = %thread, "final transcript triggered agent turn");

                match correlator.run_turn(&transcript, &thread, &tx).await {
                    Ok(_) => {}
                    Err(RelayError::ChannelClosed) => {
                        tracing::debug!(thread = %thread, "downstream closed mid-turn, stopping relay");
                        return;
                    }
                    Err(RelayError::Agent(err)) => {
                        tracing::warn!(thread = %thread, error = %err, "agent turn failed");
                        if tx.send(VoiceEvent::error(err.to_string())).await.is_err() {
                            return;
                        }
                    }
                }
            }

            tracing::info!(thread = %thread, "relay run complete");
        });

        ReceiverStream::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voice_relay_agent::{ScriptedProducer, ScriptedReply};

    #[tokio::test]
    async fn test_pass_through_preserves_order() {
        let events = vec![
            VoiceEvent::stt_chunk("he"),
            VoiceEvent::stt_chunk("hello"),
            VoiceEvent::TtsChunk {
                audio: "AAAA".to_string(),
            },
        ];

        let relay = StreamRelay::new(
            Arc::new(ScriptedProducer::new([])),
            RelayConfig::default(),
        );
        let merged: Vec<VoiceEvent> = relay
            .spawn(tokio_stream::iter(events.clone()))
            .collect()
            .await;

        assert_eq!(merged, events);
    }

    #[tokio::test]
    async fn test_pinned_thread_ids() {
        let producer = Arc::new(ScriptedProducer::new([ScriptedReply::fragments(&["ok"])]));
        let relay = StreamRelay::new(Arc::clone(&producer) as Arc<dyn AgentProducer>, RelayConfig::default())
            .with_thread_ids(|| ThreadId::from("pinned"));

        let upstream = tokio_stream::iter(vec![VoiceEvent::stt_output("hello")]);
        let _merged: Vec<VoiceEvent> = relay.spawn(upstream).collect().await;

        assert_eq!(producer.requests()[0].thread, ThreadId::from("pinned"));
    }
}
