//! Nova Client Core - Headless State and Streaming for the Nova Assistant
//!
//! This crate holds everything the Nova chat front-end needs that is not
//! rendering: the session/message model, the chat store, the streaming
//! client that consumes the relay's line-delimited event stream, and the
//! small state containers behind the persona, memory, knowledge, and
//! navigation views. It has **zero** dependencies on any UI framework and
//! can drive a web surface, a TUI, or a headless test harness.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         UI Surface                           │
//! │        (renders state, forwards user actions)                │
//! └───────────────────────────┬──────────────────────────────────┘
//!                             │
//! ┌───────────────────────────┼──────────────────────────────────┐
//! │                      NOVA CORE                               │
//! │  ┌────────────────────────┴───────────────────────────────┐  │
//! │  │                      ChatStore                          │  │
//! │  │  ┌──────────┐  ┌──────────┐  ┌─────────────────────┐   │  │
//! │  │  │ Sessions │  │ Status   │  │  ChatBackend (HTTP) │   │  │
//! │  │  └──────────┘  └──────────┘  └──────────┬──────────┘   │  │
//! │  └──────────────────────────────────────────┼─────────────┘  │
//! └─────────────────────────────────────────────┼────────────────┘
//!                                               │ NDJSON stream
//!                                    ┌──────────┴──────────┐
//!                                    │     nova-relay      │
//!                                    │  (SSE -> JSON lines)│
//!                                    └─────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ChatStore`]: owns all chat sessions and funnels every mutation
//! - [`Session`] / [`ChatMessage`]: the conversation model
//! - [`ChatBackend`]: transport seam; [`RelayClient`] is the HTTP impl
//! - [`ChatStream`]: cancellable stream of [`StreamingToken`] values
//! - [`PersonaStore`], [`MemoryLog`], [`KnowledgeLibrary`]: side panels
//!
//! # Module Overview
//!
//! - [`client`]: chat transport trait, relay HTTP client, token stream
//! - [`config`]: TOML configuration with environment overrides
//! - [`framing`]: byte-level line framing shared with the relay
//! - [`knowledge`]: knowledge-source library state
//! - [`memory`]: memory log with tag search
//! - [`persona`]: persona model and customization state
//! - [`protocol`]: wire types for the relay chat API
//! - [`session`]: sessions, messages, streaming append
//! - [`store`]: the chat store and its operations
//! - [`ui_state`]: sidebar and auth state containers

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod framing;
pub mod knowledge;
pub mod memory;
pub mod persona;
pub mod protocol;
pub mod session;
pub mod store;
pub mod ui_state;

// Re-exports for convenience
pub use client::{ChatBackend, ChatStream, RelayClient, StreamingToken};
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, NovaConfig,
};
pub use framing::LineBuffer;
pub use knowledge::{IndexStatus, KnowledgeItem, KnowledgeLibrary, SourceKind};
pub use memory::{Memory, MemoryKind, MemoryLog};
pub use persona::{Persona, PersonaStore, PersonaTrait, PersonaUpdate};
pub use protocol::{ChatRequest, ChatTurn, ChunkEvent, Role};
pub use session::{ChatMessage, MessageId, Session, SessionId};
pub use store::{ChatStore, ConnectionStatus};
pub use ui_state::{AuthState, SidebarState};
