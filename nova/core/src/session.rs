//! Session Management
//!
//! A session is one client-side conversation: an ordered message list plus
//! the thread identifier that ties it to a backend conversation. Sessions
//! live in memory only; nothing here survives a process restart.
//!
//! # Design Philosophy
//!
//! Messages are append-only. An assistant reply starts as an empty
//! streaming placeholder and grows one delta at a time; once streaming
//! ends the message is immutable. The session's `last_message` and
//! `timestamp` always mirror the most recent mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::protocol::Role;

/// Session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new unique session ID
    ///
    /// Uses an atomic counter combined with a timestamp so that ids stay
    /// unique even when multiple sessions are created in the same
    /// millisecond.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        use std::time::{SystemTime, UNIX_EPOCH};

        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let count = COUNTER.fetch_add(1, Ordering::SeqCst);
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        Self(format!("session_{timestamp}_{count}"))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Message identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Generate a new unique message ID
    pub fn new() -> Self {
        Self(format!("msg_{}", uuid::Uuid::new_v4()))
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

/// A message in the conversation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message ID
    pub id: MessageId,
    /// Who sent this message
    pub role: Role,
    /// Message content
    pub content: String,
    /// When the message was created
    pub timestamp: DateTime<Utc>,
    /// Whether the message is still being streamed
    pub streaming: bool,
}

impl ChatMessage {
    /// Create a new complete message
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            streaming: false,
        }
    }

    /// Create an empty placeholder whose content arrives in deltas
    #[must_use]
    pub fn streaming(role: Role) -> Self {
        Self {
            id: MessageId::new(),
            role,
            content: String::new(),
            timestamp: Utc::now(),
            streaming: true,
        }
    }

    /// Append a streamed delta
    pub fn append(&mut self, text: &str) {
        self.content.push_str(text);
    }

    /// Mark streaming as complete
    pub fn complete(&mut self) {
        self.streaming = false;
    }
}

/// A conversation session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Unique session ID
    pub id: SessionId,
    /// Backend conversation token; `None` until the backend assigns one
    pub thread_id: Option<String>,
    /// Display title
    pub title: String,
    /// Content of the most recent mutation, for the session list preview
    pub last_message: String,
    /// When the session was last touched
    pub timestamp: DateTime<Utc>,
    /// Conversation history, oldest first
    pub messages: Vec<ChatMessage>,
    /// Currently streaming message (if any)
    current_streaming_id: Option<MessageId>,
}

impl Session {
    /// Create a new empty session
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            thread_id: None,
            title: "New Chat".to_string(),
            last_message: "Start a new conversation".to_string(),
            timestamp: Utc::now(),
            messages: Vec::new(),
            current_streaming_id: None,
        }
    }

    /// The seeded greeting session shown on first launch
    #[must_use]
    pub fn welcome() -> Self {
        let mut session = Self::new();
        session.title = "Welcome Chat".to_string();
        session.push_message(ChatMessage::new(
            Role::Assistant,
            "Hello! I'm Nova, your AI assistant. How can I help you today?",
        ));
        session.last_message = "Hello! I'm Nova, your AI assistant.".to_string();
        session
    }

    /// Append a message and refresh the derived preview fields
    pub fn push_message(&mut self, message: ChatMessage) {
        self.last_message = message.content.clone();
        self.timestamp = Utc::now();
        self.messages.push(message);
    }

    /// Append a user message, returning its id
    pub fn add_user_message(&mut self, content: impl Into<String>) -> MessageId {
        let message = ChatMessage::new(Role::User, content);
        let id = message.id.clone();
        self.push_message(message);
        id
    }

    /// Open an empty assistant placeholder for a streaming reply
    pub fn start_assistant_response(&mut self) -> MessageId {
        let message = ChatMessage::streaming(Role::Assistant);
        let id = message.id.clone();
        self.current_streaming_id = Some(id.clone());
        self.push_message(message);
        id
    }

    /// Append a delta to the current streaming reply
    ///
    /// Looks the placeholder up by id so deltas land on the right message
    /// even after unrelated appends. No-op when nothing is streaming.
    pub fn append_streaming(&mut self, text: &str) -> Option<&ChatMessage> {
        let streaming_id = self.current_streaming_id.clone()?;
        let message = self.messages.iter_mut().find(|m| m.id == streaming_id)?;
        message.append(text);
        self.last_message = message.content.clone();
        self.timestamp = Utc::now();
        self.messages.iter().find(|m| m.id == streaming_id)
    }

    /// Seal the current streaming reply; it is immutable afterwards
    pub fn complete_streaming(&mut self) -> Option<&ChatMessage> {
        let streaming_id = self.current_streaming_id.take()?;
        let message = self.messages.iter_mut().find(|m| m.id == streaming_id)?;
        message.complete();
        self.timestamp = Utc::now();
        self.messages.iter().find(|m| m.id == streaming_id)
    }

    /// Replace the streaming reply's content after a transport failure
    ///
    /// The placeholder stays in the transcript so the user sees what
    /// happened; the session preview reads "Error occurred".
    pub fn fail_streaming(&mut self, notice: &str) {
        if let Some(streaming_id) = self.current_streaming_id.take() {
            if let Some(message) = self.messages.iter_mut().find(|m| m.id == streaming_id) {
                message.content = notice.to_string();
                message.complete();
            }
            self.last_message = "Error occurred".to_string();
            self.timestamp = Utc::now();
        }
    }

    /// Adopt a backend-assigned thread identifier.
    ///
    /// The thread id is fixed for the session's lifetime once set; a later
    /// conflicting value is ignored.
    pub fn adopt_thread(&mut self, thread_id: &str) {
        match &self.thread_id {
            None => self.thread_id = Some(thread_id.to_string()),
            Some(existing) if existing != thread_id => {
                tracing::debug!(
                    existing = %existing,
                    offered = %thread_id,
                    "ignoring conflicting thread id"
                );
            }
            Some(_) => {}
        }
    }

    /// Whether an assistant reply is currently streaming
    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.current_streaming_id.is_some()
    }

    /// Get message by ID
    #[must_use]
    pub fn get_message(&self, id: &MessageId) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| &m.id == id)
    }

    /// Number of messages in the session
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
