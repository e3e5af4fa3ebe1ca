//! Chat Store
//!
//! The single owner of all chat state: the session list, the active
//! session, and the loading/connection flags the UI renders. Every
//! mutation funnels through a store operation; there is no global state.
//!
//! # Failure Semantics
//!
//! No operation here panics or surfaces a raw error to the UI. Transport
//! failures become a fixed notice inside the transcript plus a status-flag
//! change; mutations aimed at an unknown session are silently ignored.
//! Nothing is retried automatically.

use std::sync::Arc;

use crate::client::{ChatBackend, StreamingToken};
use crate::protocol::{ChatRequest, ChatTurn};
use crate::session::{ChatMessage, Session, SessionId};

/// Notice injected into the transcript when a send fails.
pub const SEND_FAILURE_NOTICE: &str =
    "Sorry, I encountered an error while processing your message. Please try again.";

/// Relay connectivity as shown by the UI status dot.
///
/// Purely informational; no operation gates on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Probe answered
    Connected,
    /// Probe in flight
    Connecting,
    /// Probe failed
    Error,
    /// Never probed
    #[default]
    Disconnected,
}

/// The chat store - owns sessions and drives message round trips
pub struct ChatStore<B: ChatBackend> {
    /// Chat transport
    backend: Arc<B>,
    /// All sessions, newest first by creation
    sessions: Vec<Session>,
    /// Currently selected session, if any
    active_session_id: Option<SessionId>,
    /// Whether a send is in flight
    is_loading: bool,
    /// Whether the chat view is fullscreen
    is_fullscreen: bool,
    /// Whether the chat session sidebar is open
    is_sidebar_open: bool,
    /// Last probe result
    connection_status: ConnectionStatus,
}

impl<B: ChatBackend> ChatStore<B> {
    /// Create a store seeded with the welcome session
    pub fn new(backend: B) -> Self {
        let welcome = Session::welcome();
        let active = welcome.id.clone();
        Self {
            backend: Arc::new(backend),
            sessions: vec![welcome],
            active_session_id: Some(active),
            is_loading: false,
            is_fullscreen: false,
            is_sidebar_open: false,
            connection_status: ConnectionStatus::default(),
        }
    }

    /// All sessions, newest first by creation
    #[must_use]
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Id of the selected session, if any
    #[must_use]
    pub fn active_session_id(&self) -> Option<&SessionId> {
        self.active_session_id.as_ref()
    }

    /// The selected session, when the active id resolves.
    ///
    /// Selecting an id that is not in the collection is legal; this then
    /// returns `None` and the UI shows its empty state.
    #[must_use]
    pub fn active_session(&self) -> Option<&Session> {
        let id = self.active_session_id.as_ref()?;
        self.sessions.iter().find(|s| &s.id == id)
    }

    /// Whether a send is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether the chat view is fullscreen
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    /// Toggle the fullscreen flag
    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.is_fullscreen = fullscreen;
    }

    /// Whether the chat session sidebar is open
    #[must_use]
    pub fn is_sidebar_open(&self) -> bool {
        self.is_sidebar_open
    }

    /// Toggle the chat session sidebar
    pub fn set_sidebar_open(&mut self, open: bool) {
        self.is_sidebar_open = open;
    }

    /// Last probe result
    #[must_use]
    pub fn connection_status(&self) -> ConnectionStatus {
        self.connection_status
    }

    /// Create a new session at the front of the list and select it
    pub fn create_session(&mut self) -> SessionId {
        let session = Session::new();
        let id = session.id.clone();
        tracing::debug!(session_id = %id.0, "creating session");
        self.sessions.insert(0, session);
        self.active_session_id = Some(id.clone());
        id
    }

    /// Select a session by id.
    ///
    /// The id is not validated; selecting an unknown id leaves the UI in
    /// its "no active session" state.
    pub fn select_session(&mut self, id: SessionId) {
        self.active_session_id = Some(id);
    }

    /// Append a message to the named session.
    ///
    /// Silent no-op when the session id is unknown.
    pub fn add_message(&mut self, session_id: &SessionId, message: ChatMessage) {
        match self.session_mut(session_id) {
            Some(session) => session.push_message(message),
            None => {
                tracing::debug!(session_id = %session_id.0, "dropping message for unknown session");
            }
        }
    }

    /// Send a user message on the active session and stream the reply.
    ///
    /// Appends the user message, opens an assistant placeholder, and
    /// applies each streamed delta to the placeholder in arrival order.
    /// A thread id carried in-band is adopted by the session. On transport
    /// failure the placeholder is replaced with [`SEND_FAILURE_NOTICE`].
    /// No-op without a resolvable active session.
    pub async fn send_message(&mut self, content: &str) {
        let Some(active_id) = self.active_session_id.clone() else {
            return;
        };

        let thread_id = {
            let Some(session) = self.session_mut(&active_id) else {
                return;
            };
            session.add_user_message(content);
            session.start_assistant_response();
            session.thread_id.clone()
        };
        self.is_loading = true;

        let request = ChatRequest::new(vec![ChatTurn::user(content)]).with_thread(thread_id);
        let backend = Arc::clone(&self.backend);

        match backend.send_streaming(&request).await {
            Ok(mut stream) => {
                while let Some(token) = stream.next().await {
                    match token {
                        StreamingToken::Chunk { content, thread_id } => {
                            if let Some(session) = self.session_mut(&active_id) {
                                session.append_streaming(&content);
                                if let Some(thread_id) = thread_id {
                                    session.adopt_thread(&thread_id);
                                }
                            }
                        }
                        StreamingToken::Complete { .. } => {
                            if let Some(session) = self.session_mut(&active_id) {
                                session.complete_streaming();
                            }
                            break;
                        }
                        StreamingToken::Error(error) => {
                            tracing::warn!(error = %error, "chat stream failed");
                            if let Some(session) = self.session_mut(&active_id) {
                                session.fail_streaming(SEND_FAILURE_NOTICE);
                            }
                            break;
                        }
                    }
                }
                // Channel closed without a terminal token: seal what we have
                if let Some(session) = self.session_mut(&active_id) {
                    if session.is_streaming() {
                        session.complete_streaming();
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, backend = backend.name(), "failed to reach chat relay");
                if let Some(session) = self.session_mut(&active_id) {
                    session.fail_streaming(SEND_FAILURE_NOTICE);
                }
            }
        }

        self.is_loading = false;
    }

    /// Probe the relay and record the result for the status dot
    pub async fn test_connection(&mut self) -> bool {
        self.connection_status = ConnectionStatus::Connecting;
        if self.backend.health_check().await {
            self.connection_status = ConnectionStatus::Connected;
            true
        } else {
            self.connection_status = ConnectionStatus::Error;
            false
        }
    }

    fn session_mut(&mut self, id: &SessionId) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| &s.id == id)
    }
}
