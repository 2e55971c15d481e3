//! Scripted agent producer
//!
//! In-memory backend that replays preset replies, one per turn, and
//! records every request it serves. Used by the pipeline tests and
//! benchmarks; also handy for wiring a demo without a live model.

use std::collections::VecDeque;
use std::time::Duration;

use futures::StreamExt;
use parking_lot::Mutex;

use voice_relay_core::ThreadId;

use crate::{AgentError, AgentProducer, FragmentStream, ResponseFragment};

/// One preset reply
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Yield each fragment in order, then end the turn
    Fragments(Vec<String>),
    /// Fail when the reply stream is opened
    FailOnOpen(String),
    /// Yield the fragments, then fail mid-reply
    FailAfter(Vec<String>, String),
}

impl ScriptedReply {
    /// Reply built from string slices
    pub fn fragments(parts: &[&str]) -> Self {
        Self::Fragments(parts.iter().map(|s| s.to_string()).collect())
    }
}

/// One recorded turn request
#[derive(Debug, Clone, PartialEq)]
pub struct TurnRequest {
    /// Message submitted for the turn
    pub message: String,
    /// Thread the turn was scoped to
    pub thread: ThreadId,
}

/// Scripted producer
pub struct ScriptedProducer {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<TurnRequest>>,
    fragment_delay: Duration,
}

impl ScriptedProducer {
    /// Create a producer that serves `replies` in order.
    ///
    /// Once the script is exhausted, further turns fail with a backend
    /// error.
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            fragment_delay: Duration::ZERO,
        }
    }

    /// Pause before each fragment, simulating a slow backend
    pub fn with_fragment_delay(mut self, delay: Duration) -> Self {
        self.fragment_delay = delay;
        self
    }

    /// Requests served so far, in order
    pub fn requests(&self) -> Vec<TurnRequest> {
        self.requests.lock().clone()
    }

    /// Number of turns served so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait::async_trait]
impl AgentProducer for ScriptedProducer {
    async fn stream_reply(
        &self,
        message: &str,
        thread: &ThreadId,
    ) -> Result<FragmentStream, AgentError> {
        self.requests.lock().push(TurnRequest {
            message: message.to_string(),
            thread: thread.clone(),
        });

        let reply = self
            .replies
            .lock()
            .pop_front()
            .ok_or_else(|| AgentError::Backend("scripted replies exhausted".to_string()))?;

        let items: Vec<Result<ResponseFragment, AgentError>> = match reply {
            ScriptedReply::Fragments(parts) => parts
                .into_iter()
                .map(|text| Ok(ResponseFragment::new(text)))
                .collect(),
            ScriptedReply::FailOnOpen(message) => return Err(AgentError::Backend(message)),
            ScriptedReply::FailAfter(parts, message) => parts
                .into_iter()
                .map(|text| Ok(ResponseFragment::new(text)))
                .chain(std::iter::once(Err(AgentError::Backend(message))))
                .collect(),
        };

        let delay = self.fragment_delay;
        if delay.is_zero() {
            Ok(Box::pin(tokio_stream::iter(items)))
        } else {
            Ok(Box::pin(tokio_stream::iter(items).then(move |item| async move {
                tokio::time::sleep(delay).await;
                item
            })))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_replies_in_order() {
        let producer = ScriptedProducer::new([
            ScriptedReply::fragments(&["first"]),
            ScriptedReply::fragments(&["second"]),
        ]);
        let thread = ThreadId::from("t-1");

        let mut stream = producer.stream_reply("one", &thread).await.unwrap();
        assert_eq!(
            stream.next().await.unwrap().unwrap(),
            ResponseFragment::new("first")
        );
        assert!(stream.next().await.is_none());

        let mut stream = producer.stream_reply("two", &thread).await.unwrap();
        assert_eq!(
            stream.next().await.unwrap().unwrap(),
            ResponseFragment::new("second")
        );
    }

    #[tokio::test]
    async fn test_records_requests() {
        let producer = ScriptedProducer::new([ScriptedReply::fragments(&["hi"])]);
        let thread = ThreadId::from("t-7");

        producer.stream_reply("hello there", &thread).await.unwrap();

        let requests = producer.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].message, "hello there");
        assert_eq!(requests[0].thread, thread);
    }

    #[tokio::test]
    async fn test_exhausted_script_fails() {
        let producer = ScriptedProducer::new([]);
        let thread = ThreadId::generate();

        let result = producer.stream_reply("anything", &thread).await;
        assert!(matches!(result, Err(AgentError::Backend(_))));
    }

    #[tokio::test]
    async fn test_fail_after_yields_fragments_first() {
        let producer = ScriptedProducer::new([ScriptedReply::FailAfter(
            vec!["partial".to_string()],
            "backend dropped".to_string(),
        )]);
        let thread = ThreadId::generate();

        let mut stream = producer.stream_reply("msg", &thread).await.unwrap();
        assert!(stream.next().await.unwrap().is_ok());
        assert!(stream.next().await.unwrap().is_err());
        assert!(stream.next().await.is_none());
    }
}
