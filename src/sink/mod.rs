//! Output destinations for rendered text.
//!
//! A template writes into exactly one active [`OutputSink`] per execution:
//! either its own [`StringBuffer`] or a destination supplied by the caller for
//! the duration of a single render call.
//!
//! # Ordering
//!
//! Writes are append-only and reach the destination in the order they were
//! issued, whether they came through the synchronous or asynchronous path.
//! Only destinations that are themselves asynchronous ever suspend; the
//! in-memory buffer completes every write immediately.

mod adapters;
mod buffer;


pub use adapters::{AsyncWriteSink, IoSink};
pub use buffer::StringBuffer;

use crate::error::Result;
use async_trait::async_trait;

/// A destination that rendered text is appended to.
#[async_trait]
pub trait OutputSink: Send {
    /// Append text synchronously.
    fn write_str(&mut self, text: &str) -> Result<()>;

    /// Append text, suspending only if the destination is asynchronous.
    async fn write_str_async(&mut self, text: &str) -> Result<()> {
        self.write_str(text)
    }

    /// Push any staged text through to the underlying destination.
    async fn flush_async(&mut self) -> Result<()> {
        Ok(())
    }
}

impl OutputSink for String {
    fn write_str(&mut self, text: &str) -> Result<()> {
        self.push_str(text);
        Ok(())
    }
}
