//! Core types for the voice relay
//!
//! This crate provides foundational types used across all other crates:
//! - The `VoiceEvent` vocabulary flowing through the relay
//! - Conversation thread identifiers

pub mod event;
pub mod thread;

pub use event::VoiceEvent;
pub use thread::ThreadId;
