//! Line Framing for Byte Streams
//!
//! Both the relay and the chat client consume line-oriented byte streams:
//! `data:`-prefixed event lines from the backend, newline-delimited JSON
//! from the relay. Network reads split lines at arbitrary byte offsets, so
//! complete lines are carved out of a growing buffer and the unterminated
//! tail is kept for the next read. Buffering happens at the byte level;
//! a UTF-8 sequence split across two reads is reassembled before decoding.

/// Accumulates raw bytes and yields complete `\n`-terminated lines.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    /// Create an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes from a network read
    pub fn push(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Remove and return the next complete line, without its newline.
    ///
    /// Returns `None` while only an unterminated tail remains.
    pub fn next_line(&mut self) -> Option<String> {
        let pos = self.buf.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.buf.drain(..=pos).collect();
        Some(String::from_utf8_lossy(&line[..line.len() - 1]).into_owned())
    }

    /// Drain the unterminated tail at end of stream.
    ///
    /// Returns `None` when nothing but whitespace is left.
    pub fn flush(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buf);
        let text = String::from_utf8_lossy(&rest).into_owned();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Whether any bytes are currently buffered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Extract the payload of a `data: `-prefixed event line.
///
/// Returns `None` for any other line (comments, `event:` fields, blank
/// keep-alive lines) and for `data: ` lines with a blank payload.
#[must_use]
pub fn sse_data(line: &str) -> Option<&str> {
    let data = line.strip_prefix("data: ")?;
    if data.trim().is_empty() {
        None
    } else {
        Some(data)
    }
}
