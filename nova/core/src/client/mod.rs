//! Chat Transport
//!
//! Trait definitions for the chat transport seam. The store talks to a
//! [`ChatBackend`]; [`RelayClient`] is the HTTP implementation that speaks
//! to the relay daemon. Test harnesses substitute scripted backends.
//!
//! # Design Philosophy
//!
//! A send returns a [`ChatStream`]: an ordered sequence of
//! [`StreamingToken`] values with explicit `Complete`/`Error` terminal
//! states and a cancellation handle. Consumers pull tokens one at a time,
//! so deltas are applied strictly in arrival order.

mod relay;

pub use relay::RelayClient;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;

use crate::protocol::ChatRequest;

/// Token stream events from a chat send
#[derive(Clone, Debug)]
pub enum StreamingToken {
    /// A fragment of assistant text
    Chunk {
        /// The text fragment
        content: String,
        /// Thread identifier for the conversation, when known
        thread_id: Option<String>,
    },
    /// Response completed successfully
    Complete {
        /// The full accumulated text
        content: String,
    },
    /// Error occurred during streaming
    Error(String),
}

/// A cancellable stream of [`StreamingToken`] values.
///
/// Dropping the stream stops the producer at its next send; [`cancel`]
/// aborts the in-flight transfer immediately.
///
/// [`cancel`]: ChatStream::cancel
#[derive(Debug)]
pub struct ChatStream {
    rx: mpsc::Receiver<StreamingToken>,
    task: JoinHandle<()>,
}

impl ChatStream {
    /// Wrap a token receiver and the producer task feeding it
    #[must_use]
    pub fn new(rx: mpsc::Receiver<StreamingToken>, task: JoinHandle<()>) -> Self {
        Self { rx, task }
    }

    /// Receive the next token; `None` once the stream is exhausted
    pub async fn next(&mut self) -> Option<StreamingToken> {
        self.rx.recv().await
    }

    /// Abort the in-flight transfer
    pub fn cancel(&self) {
        self.task.abort();
    }

    /// Whether the producer has finished
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Convert into a [`futures::Stream`] of tokens.
    ///
    /// The producer task is detached; cancellation is no longer available
    /// beyond dropping the returned stream.
    #[must_use]
    pub fn into_stream(self) -> ReceiverStream<StreamingToken> {
        ReceiverStream::new(self.rx)
    }
}

/// Chat transport trait
///
/// Implement this to plug in a different transport (or a scripted backend
/// in tests) without touching store logic.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Get the transport name (e.g. "relay")
    fn name(&self) -> &str;

    /// Probe the transport with a one-token message; `true` when it answers
    async fn health_check(&self) -> bool;

    /// Send a request and stream the reply.
    ///
    /// Errors cover only the request setup (connect failure, non-2xx
    /// response); once a stream is returned, failures arrive in-band as
    /// [`StreamingToken::Error`].
    async fn send_streaming(&self, request: &ChatRequest) -> anyhow::Result<ChatStream>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted_stream(tokens: Vec<StreamingToken>) -> ChatStream {
        let (tx, rx) = mpsc::channel(16);
        let task = tokio::spawn(async move {
            for token in tokens {
                if tx.send(token).await.is_err() {
                    return;
                }
            }
        });
        ChatStream::new(rx, task)
    }

    #[tokio::test]
    async fn test_stream_yields_tokens_in_order() {
        let mut stream = scripted_stream(vec![
            StreamingToken::Chunk {
                content: "a".to_string(),
                thread_id: None,
            },
            StreamingToken::Complete {
                content: "a".to_string(),
            },
        ]);

        assert!(matches!(
            stream.next().await,
            Some(StreamingToken::Chunk { content, .. }) if content == "a"
        ));
        assert!(matches!(
            stream.next().await,
            Some(StreamingToken::Complete { .. })
        ));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_cancel_stops_producer() {
        let (tx, rx) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            loop {
                if tx
                    .send(StreamingToken::Chunk {
                        content: "tick".to_string(),
                        thread_id: None,
                    })
                    .await
                    .is_err()
                {
                    return;
                }
            }
        });
        let mut stream = ChatStream::new(rx, task);

        assert!(stream.next().await.is_some());
        stream.cancel();
        // Drain whatever was buffered; the channel must then close
        while stream.next().await.is_some() {}
        assert!(stream.is_finished());
    }
}
