//! Relay HTTP Client
//!
//! [`ChatBackend`] implementation that talks to the relay daemon. The relay
//! answers `POST /api/chat` with a stream of newline-delimited JSON events;
//! this client re-assembles lines across network reads, filters for text
//! chunks, and feeds a [`ChatStream`].

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::mpsc;

use super::{ChatBackend, ChatStream, StreamingToken};
use crate::config::ClientConfig;
use crate::framing::LineBuffer;
use crate::protocol::{ChatRequest, ChunkEvent};

/// HTTP client for the chat relay
#[derive(Clone)]
pub struct RelayClient {
    /// Relay base URL, without a trailing slash
    base_url: String,
    /// HTTP client
    http_client: reqwest::Client,
}

impl RelayClient {
    /// Create a client for the given relay base URL.
    ///
    /// No overall timeout is applied to chat requests; a streamed reply
    /// runs for as long as the backend keeps talking.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Create from [`ClientConfig`]
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.relay_url.clone())
    }

    /// Create from the `NOVA_RELAY_URL` environment variable
    #[must_use]
    pub fn from_env() -> Self {
        let url = std::env::var("NOVA_RELAY_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string());
        Self::new(url)
    }

    /// Get the chat endpoint URL
    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

#[async_trait]
impl ChatBackend for RelayClient {
    fn name(&self) -> &'static str {
        "relay"
    }

    async fn health_check(&self) -> bool {
        self.http_client
            .post(self.chat_url())
            .timeout(Duration::from_secs(5))
            .json(&ChatRequest::probe())
            .send()
            .await
            .map(|response| response.status().is_success())
            .unwrap_or(false)
    }

    async fn send_streaming(&self, request: &ChatRequest) -> anyhow::Result<ChatStream> {
        let response = self
            .http_client
            .post(self.chat_url())
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("chat relay returned {}", response.status());
        }

        let (tx, rx) = mpsc::channel(100);
        let mut thread = request.thread_id.clone();
        let mut stream = response.bytes_stream();

        let task = tokio::spawn(async move {
            let mut lines = LineBuffer::new();
            let mut full_response = String::new();

            while let Some(chunk) = stream.next().await {
                match chunk {
                    Ok(bytes) => {
                        lines.push(&bytes);
                        while let Some(line) = lines.next_line() {
                            if !deliver_line(&line, &mut thread, &mut full_response, &tx).await {
                                // Receiver dropped, stop streaming
                                return;
                            }
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(StreamingToken::Error(e.to_string())).await;
                        return;
                    }
                }
            }

            // Best-effort parse of an unterminated trailing line
            if let Some(line) = lines.flush() {
                if !deliver_line(&line, &mut thread, &mut full_response, &tx).await {
                    return;
                }
            }

            let _ = tx
                .send(StreamingToken::Complete {
                    content: full_response,
                })
                .await;
        });

        Ok(ChatStream::new(rx, task))
    }
}

/// Parse one stream line and forward its text, if any.
///
/// An in-band thread id becomes the fallback for later chunks that omit
/// one. Returns `false` when the receiver is gone and streaming should
/// stop.
async fn deliver_line(
    line: &str,
    thread: &mut Option<String>,
    full_response: &mut String,
    tx: &mpsc::Sender<StreamingToken>,
) -> bool {
    let Some((content, thread_id)) = chunk_from_line(line, thread) else {
        return true;
    };
    if thread_id.is_some() {
        thread.clone_from(&thread_id);
    }
    full_response.push_str(&content);
    tx.send(StreamingToken::Chunk { content, thread_id })
        .await
        .is_ok()
}

/// Extract assistant text from one stream line.
///
/// Only JSON objects with `type == "chunk"` and non-empty content carry
/// text. The event's thread id wins over the caller-supplied fallback.
/// Unparseable lines are skipped with a diagnostic; blank lines and
/// parseable non-chunk events are skipped silently.
fn chunk_from_line(
    line: &str,
    fallback_thread: &Option<String>,
) -> Option<(String, Option<String>)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str::<ChunkEvent>(line) {
        Ok(event) if event.is_chunk() => {
            let thread_id = event.thread_id.or_else(|| fallback_thread.clone());
            Some((event.content, thread_id))
        }
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(error = %e, line, "skipping unparseable stream line");
            None
        }
    }
}
