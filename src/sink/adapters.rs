//! Sinks over external writers.
//!
//! - [`IoSink`] wraps any blocking [`std::io::Write`].
//! - [`AsyncWriteSink`] wraps a tokio [`AsyncWrite`]. Synchronous writes are
//!   staged in order and drained ahead of the next asynchronous write or
//!   flush, so a body's synchronous primitives never block on the network.

use super::OutputSink;
use crate::error::Result;
use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Sink over a blocking writer.
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
}

impl<W: Write + Send> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[async_trait]
impl<W: Write + Send> OutputSink for IoSink<W> {
    fn write_str(&mut self, text: &str) -> Result<()> {
        self.inner.write_all(text.as_bytes())?;
        Ok(())
    }

    async fn flush_async(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}

/// Sink over an asynchronous writer.
#[derive(Debug)]
pub struct AsyncWriteSink<W> {
    inner: W,
    staged: String,
}

impl<W: AsyncWrite + Unpin + Send> AsyncWriteSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            staged: String::new(),
        }
    }

    /// Text written synchronously that has not reached the writer yet.
    pub fn staged(&self) -> &str {
        &self.staged
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwrap the writer. Staged text is discarded; render entry points flush
    /// before returning, otherwise call [`OutputSink::flush_async`] first.
    pub fn into_inner(self) -> W {
        self.inner
    }

    async fn drain(&mut self) -> Result<()> {
        if !self.staged.is_empty() {
            self.inner.write_all(self.staged.as_bytes()).await?;
            self.staged.clear();
        }
        Ok(())
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> OutputSink for AsyncWriteSink<W> {
    fn write_str(&mut self, text: &str) -> Result<()> {
        self.staged.push_str(text);
        Ok(())
    }

    async fn write_str_async(&mut self, text: &str) -> Result<()> {
        self.drain().await?;
        self.inner.write_all(text.as_bytes()).await?;
        Ok(())
    }

    async fn flush_async(&mut self) -> Result<()> {
        self.drain().await?;
        self.inner.flush().await?;
        Ok(())
    }
}
