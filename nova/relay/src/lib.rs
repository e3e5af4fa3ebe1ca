//! Nova Relay - Chat Stream Relay for the Nova Assistant
//!
//! Bridges the assistant backend's Server-Sent-Event completion endpoint to
//! a browser-friendly stream of newline-delimited JSON. Clients POST the
//! conversation to `/api/chat` and read one JSON object per line as the
//! assistant produces text.
//!
//! The heavy lifting (line framing, wire types, configuration) lives in
//! `nova-core`; this crate adds the HTTP surface and the daemon lifecycle.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod server;

pub use error::RelayError;
pub use server::{build_router, RelayState};
