//! In-memory output buffer.

use super::OutputSink;
use crate::error::Result;
use std::fmt;

/// Growable in-memory text buffer.
///
/// This is the default destination owned by every template. Its contents
/// accumulate across render calls and are never reset by the runtime; callers
/// that want a fresh buffer use [`StringBuffer::clear`] explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringBuffer {
    text: String,
}

impl StringBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
        }
    }

    /// Accumulated text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length of the accumulated text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text appended since byte offset `start`.
    pub fn since(&self, start: usize) -> &str {
        &self.text[start..]
    }

    /// Append text directly, bypassing any template.
    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Discard all accumulated text.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl OutputSink for StringBuffer {
    fn write_str(&mut self, text: &str) -> Result<()> {
        self.text.push_str(text);
        Ok(())
    }
}

impl fmt::Write for StringBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.text.push_str(s);
        Ok(())
    }
}

impl fmt::Display for StringBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<String> for StringBuffer {
    fn from(text: String) -> Self {
        Self { text }
    }
}

impl From<&str> for StringBuffer {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}
