//! Relay HTTP Server
//!
//! One route: `POST /api/chat`. The handler forwards the conversation to
//! the backend's SSE completion endpoint and re-frames every `data:` event
//! payload as a JSON line. Clients read a plain chunked byte stream; no
//! SSE parsing is needed on their side.
//!
//! Failure policy: any problem opening the backend stream - unreachable
//! host, non-2xx status, malformed request body - collapses to the same
//! HTTP 500 with a generic error body. The detail is logged here and never
//! surfaced to the client. Mid-stream failures terminate the output stream.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use futures::StreamExt;
use tokio_stream::wrappers::ReceiverStream;

use nova_core::framing::{LineBuffer, sse_data};
use nova_core::protocol::ChatRequest;

use crate::error::RelayError;

/// Client-facing error message for any backend failure.
const BACKEND_FAILURE_BODY: &str = "Failed to connect to chat service";

/// Shared server state
pub struct RelayState {
    /// Assistant backend base URL, without a trailing slash
    backend_url: String,
    /// HTTP client for backend requests
    http_client: reqwest::Client,
}

impl RelayState {
    /// Create state for the given backend base URL.
    ///
    /// The client carries no overall timeout; completions stream for as
    /// long as the backend keeps producing.
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Get the backend completion endpoint URL
    fn completion_url(&self) -> String {
        format!("{}/sse/chat-completion", self.backend_url)
    }
}

/// Build the Axum router.
pub fn build_router(state: Arc<RelayState>) -> Router {
    Router::new()
        .route("/api/chat", post(handle_chat))
        .with_state(state)
}

async fn handle_chat(State(state): State<Arc<RelayState>>, body: Bytes) -> Response {
    match handle_chat_inner(state, body).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(error = %err, "chat relay failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": BACKEND_FAILURE_BODY })),
            )
                .into_response()
        }
    }
}

async fn handle_chat_inner(
    state: Arc<RelayState>,
    body: Bytes,
) -> Result<Response, RelayError> {
    let request: ChatRequest = serde_json::from_slice(&body)?;

    let upstream = state
        .http_client
        .post(state.completion_url())
        .json(&request)
        .send()
        .await?;

    if !upstream.status().is_success() {
        return Err(RelayError::BackendStatus(upstream.status()));
    }

    Ok(relay_response(upstream))
}

/// Stream the backend body to the client, one JSON line per event.
fn relay_response(upstream: reqwest::Response) -> Response {
    let (tx, rx) = tokio::sync::mpsc::channel::<Result<Bytes, Infallible>>(64);

    tokio::spawn(async move {
        let mut stream = upstream.bytes_stream();
        let mut lines = LineBuffer::new();

        while let Some(chunk) = stream.next().await {
            match chunk {
                Ok(bytes) => {
                    lines.push(&bytes);
                    while let Some(line) = lines.next_line() {
                        if let Some(payload) = reframe_event_line(&line) {
                            if tx.send(Ok(payload)).await.is_err() {
                                // Client went away, stop relaying
                                return;
                            }
                        }
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "backend stream error");
                    return;
                }
            }
        }

        // Best-effort parse of an unterminated trailing event
        if let Some(line) = lines.flush() {
            if let Some(payload) = reframe_event_line(&line) {
                let _ = tx.send(Ok(payload)).await;
            }
        }
    });

    let body = Body::from_stream(ReceiverStream::new(rx));
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-cache")
        .header(header::CONNECTION, "keep-alive")
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, "Cache-Control")
        .body(body)
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// Re-frame one backend line as a JSON line for the client.
///
/// Only `data: ` lines with a parseable JSON payload are forwarded;
/// unparseable payloads are dropped with a diagnostic, everything else
/// (comments, `event:` fields, keep-alive blanks) is ignored.
fn reframe_event_line(line: &str) -> Option<Bytes> {
    let data = sse_data(line)?;
    match serde_json::from_str::<serde_json::Value>(data) {
        Ok(value) => {
            let mut out = value.to_string();
            out.push('\n');
            Some(Bytes::from(out))
        }
        Err(e) => {
            tracing::warn!(error = %e, data, "dropping unparseable event payload");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_completion_url_trims_trailing_slash() {
        let state = RelayState::new("http://localhost:8000/");
        assert_eq!(
            state.completion_url(),
            "http://localhost:8000/sse/chat-completion"
        );
    }

    #[test]
    fn test_reframe_forwards_event_payloads() {
        let payload =
            reframe_event_line(r#"data: {"type":"chunk","content":"Hel","thread_id":"t1"}"#)
                .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(value["type"], "chunk");
        assert_eq!(value["content"], "Hel");
        assert_eq!(value["thread_id"], "t1");
        assert!(payload.ends_with(b"\n"));
    }

    #[test]
    fn test_reframe_drops_everything_else() {
        assert!(reframe_event_line("").is_none());
        assert!(reframe_event_line(": keep-alive").is_none());
        assert!(reframe_event_line("event: ping").is_none());
        assert!(reframe_event_line("data: ").is_none());
        assert!(reframe_event_line("data: not json").is_none());
    }

    #[test]
    fn test_reframe_is_event_kind_agnostic() {
        // The relay forwards any parseable event; filtering is the client's job
        let payload = reframe_event_line(r#"data: {"type":"done"}"#).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(value["type"], "done");
    }
}
