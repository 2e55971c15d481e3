//! Voice event vocabulary
//!
//! Every event carries a `type` discriminator on the wire so downstream
//! consumers can dispatch on kind without inspecting payload shape.

use serde::{Deserialize, Serialize};

/// One unit in the merged voice stream.
///
/// Known kinds are modeled explicitly; anything else an upstream source
/// emits is captured as [`VoiceEvent::Opaque`] and forwarded unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VoiceEvent {
    /// Partial (non-final) transcript from the STT source
    SttChunk { transcript: String },
    /// Finalized transcript from the STT source
    SttOutput { transcript: String },
    /// One increment of the agent's streamed reply
    AgentChunk { text: String },
    /// Terminal marker for one agent turn
    AgentEnd,
    /// Tool invocation surfaced by the agent runtime
    ToolCall {
        name: String,
        args: serde_json::Value,
    },
    /// Tool output surfaced by the agent runtime
    ToolResult { name: String, result: String },
    /// Synthesized audio chunk (base64-encoded PCM)
    TtsChunk { audio: String },
    /// Turn-scoped failure; the relay keeps running after emitting this
    Error { message: String },
    /// Upstream kind this crate does not interpret
    #[serde(untagged)]
    Opaque(serde_json::Value),
}

impl VoiceEvent {
    /// Create a partial transcript event
    pub fn stt_chunk(transcript: impl Into<String>) -> Self {
        Self::SttChunk {
            transcript: transcript.into(),
        }
    }

    /// Create a finalized transcript event
    pub fn stt_output(transcript: impl Into<String>) -> Self {
        Self::SttOutput {
            transcript: transcript.into(),
        }
    }

    /// Create an agent reply chunk event
    pub fn agent_chunk(text: impl Into<String>) -> Self {
        Self::AgentChunk { text: text.into() }
    }

    /// Create a turn failure event
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Discriminator as it appears on the wire.
    ///
    /// Opaque events report the `type` field of their payload, or
    /// `"unknown"` when the payload carries none.
    pub fn kind(&self) -> &str {
        match self {
            Self::SttChunk { .. } => "stt_chunk",
            Self::SttOutput { .. } => "stt_output",
            Self::AgentChunk { .. } => "agent_chunk",
            Self::AgentEnd => "agent_end",
            Self::ToolCall { .. } => "tool_call",
            Self::ToolResult { .. } => "tool_result",
            Self::TtsChunk { .. } => "tts_chunk",
            Self::Error { .. } => "error",
            Self::Opaque(value) => value
                .get("type")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown"),
        }
    }

    /// Transcript text if this event should trigger an agent turn.
    ///
    /// Only finalized transcripts with non-whitespace content qualify;
    /// empty transcripts never start a turn.
    pub fn trigger_transcript(&self) -> Option<&str> {
        match self {
            Self::SttOutput { transcript } if !transcript.trim().is_empty() => {
                Some(transcript.as_str())
            }
            _ => None,
        }
    }
}
