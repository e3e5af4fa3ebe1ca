//! Wire Protocol for the Chat Relay
//!
//! Types shared between the relay daemon and its clients. The request shape
//! matches what the assistant backend expects on `/sse/chat-completion`; the
//! relay forwards it unchanged. Streamed events arrive as one JSON object
//! per line, of which only `"chunk"` events carry assistant text.

use serde::{Deserialize, Serialize};

/// Event kind marker for streamed assistant text.
pub const CHUNK_EVENT: &str = "chunk";

/// Who authored a chat turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End-user input
    User,
    /// Assistant output
    Assistant,
    /// System instruction
    System,
}

/// A single role/content pair sent to the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Who authored the turn
    pub role: Role,
    /// The turn's text
    pub content: String,
}

impl ChatTurn {
    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Request body for `POST /api/chat` (and the backend completion endpoint).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation turns, oldest first
    pub messages: Vec<ChatTurn>,
    /// Conversation continuity token, absent on a fresh session
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

impl ChatRequest {
    /// Create a request from a list of turns
    #[must_use]
    pub fn new(messages: Vec<ChatTurn>) -> Self {
        Self {
            messages,
            thread_id: None,
        }
    }

    /// Attach a thread identifier for conversation continuity
    #[must_use]
    pub fn with_thread(mut self, thread_id: Option<String>) -> Self {
        self.thread_id = thread_id;
        self
    }

    /// One-token probe request used for connection checks
    #[must_use]
    pub fn probe() -> Self {
        Self::new(vec![ChatTurn::user("test")])
    }
}

/// One streamed event as carried on the wire.
///
/// The backend emits more event kinds than clients consume; everything that
/// is not a [`CHUNK_EVENT`] with text is passed through the relay untouched
/// and ignored by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkEvent {
    /// Event kind discriminator (`"chunk"` for assistant text)
    #[serde(rename = "type")]
    pub kind: String,
    /// Assistant text fragment, empty for non-text events
    #[serde(default)]
    pub content: String,
    /// Thread identifier assigned by the backend, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
}

impl ChunkEvent {
    /// Create a chunk event carrying assistant text
    pub fn chunk(content: impl Into<String>, thread_id: Option<String>) -> Self {
        Self {
            kind: CHUNK_EVENT.to_string(),
            content: content.into(),
            thread_id,
        }
    }

    /// Whether this event contributes assistant text
    #[must_use]
    pub fn is_chunk(&self) -> bool {
        self.kind == CHUNK_EVENT && !self.content.is_empty()
    }
}
