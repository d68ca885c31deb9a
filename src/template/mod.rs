//! Template runtime.
//!
//! Generated template code implements [`TemplateBody`]: one `execute` method
//! that calls the [`RenderContext`] primitives in program order. A
//! [`RazorTemplate`] wraps a body together with its own output buffer and
//! exposes the render entry points:
//!
//! - [`RazorTemplate::render`] / [`RazorTemplate::render_async`] append to the
//!   template's own buffer and return the text appended by this call.
//! - [`RazorTemplate::render_to`] / [`RazorTemplate::render_async_to`] write to
//!   a caller-supplied sink and leave the own buffer untouched.
//!
//! Every render call executes the body again. Nothing is cached between calls,
//! and the own buffer accumulates: rendering twice appends twice.
//!
//! # Composition
//!
//! Writing a template into another template renders it once, in place, and
//! never escapes its output.

mod context;
mod layout;


pub use context::RenderContext;

use crate::config::RenderConfig;
use crate::encoding::EncodedContent;
use crate::error::{RenderError, Result};
use crate::sink::{OutputSink, StringBuffer};
use crate::value::Value;
use async_trait::async_trait;
use futures::FutureExt;
use tokio_util::sync::CancellationToken;

/// The body of a template: what the template compiler generates.
#[async_trait]
pub trait TemplateBody: Send + Sync {
    async fn execute(&self, ctx: &mut RenderContext<'_>) -> Result<()>;
}

/// A template that can be rendered inside another template's output.
#[async_trait]
pub trait NestedTemplate: Send + Sync {
    /// Execute once, writing straight into `sink`.
    async fn render_nested(&self, sink: &mut dyn OutputSink) -> Result<()>;
}

/// Render a nested template without suspending.
pub(crate) fn render_now(template: &dyn NestedTemplate, sink: &mut dyn OutputSink) -> Result<()> {
    template
        .render_nested(sink)
        .now_or_never()
        .unwrap_or(Err(RenderError::NestedSuspended))
}

/// Run a body, then any layouts it selected, against `sink`.
async fn execute_body(
    body: &dyn TemplateBody,
    sink: &mut dyn OutputSink,
    config: &RenderConfig,
    cancellation: CancellationToken,
) -> Result<()> {
    let mut ctx = RenderContext::new(&mut *sink, config, cancellation.clone());
    body.execute(&mut ctx).await?;
    let mut next = ctx.finish()?;

    while let Some(call) = next {
        tracing::debug!(sections = call.input.sections.len(), "applying layout");
        let mut ctx =
            RenderContext::for_layout(&mut *sink, config, cancellation.clone(), call.input);
        call.layout.execute(&mut ctx).await?;
        next = ctx.finish()?;
    }

    Ok(())
}

async fn execute_cancellable(
    body: &dyn TemplateBody,
    sink: &mut dyn OutputSink,
    config: &RenderConfig,
    cancellation: CancellationToken,
) -> Result<()> {
    tokio::select! {
        biased;
        _ = cancellation.cancelled() => Err(RenderError::Cancelled),
        result = execute_body(body, sink, config, cancellation.clone()) => result,
    }
}

/// A template body plus the buffer it renders into by default.
///
/// The buffer is created at construction and belongs to this template. Render
/// calls without a destination append to it and never clear it, so anything
/// written to it directly beforehand stays in front of the rendered output.
#[derive(Debug)]
pub struct RazorTemplate<B> {
    body: B,
    output: StringBuffer,
    config: RenderConfig,
}

impl<B: TemplateBody> RazorTemplate<B> {
    pub fn new(body: B) -> Self {
        Self::with_config(body, RenderConfig::default())
    }

    pub fn with_config(body: B, config: RenderConfig) -> Self {
        Self {
            output: StringBuffer::with_capacity(config.buffer_capacity),
            body,
            config,
        }
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The template's own buffer.
    pub fn output(&self) -> &StringBuffer {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut StringBuffer {
        &mut self.output
    }

    /// Render into the own buffer, returning the text this call appended.
    pub fn render(&mut self) -> Result<String> {
        futures::executor::block_on(self.render_async())
    }

    /// Render into `destination`. The own buffer is not touched.
    pub fn render_to(&self, destination: &mut dyn OutputSink) -> Result<()> {
        futures::executor::block_on(self.render_async_to(destination))
    }

    /// Asynchronous [`render`](Self::render).
    pub async fn render_async(&mut self) -> Result<String> {
        self.render_async_cancellable(CancellationToken::new()).await
    }

    /// Asynchronous [`render_to`](Self::render_to).
    pub async fn render_async_to(&self, destination: &mut dyn OutputSink) -> Result<()> {
        self.render_async_to_cancellable(destination, CancellationToken::new())
            .await
    }

    /// Render into the own buffer, stopping with [`RenderError::Cancelled`]
    /// once `cancellation` fires. Output written before that point stays in
    /// the buffer.
    pub async fn render_async_cancellable(
        &mut self,
        cancellation: CancellationToken,
    ) -> Result<String> {
        let start = self.output.len();
        tracing::debug!(destination = "buffer", "render started");

        execute_cancellable(&self.body, &mut self.output, &self.config, cancellation).await?;

        let rendered = self.output.since(start).to_string();
        tracing::debug!(
            destination = "buffer",
            bytes = rendered.len(),
            "render finished"
        );
        Ok(rendered)
    }

    /// Render into `destination`, stopping with [`RenderError::Cancelled`]
    /// once `cancellation` fires. Output written before that point, or before
    /// a body failure, stays in the destination and is flushed.
    pub async fn render_async_to_cancellable(
        &self,
        destination: &mut dyn OutputSink,
        cancellation: CancellationToken,
    ) -> Result<()> {
        tracing::debug!(destination = "external", "render started");

        let result =
            execute_cancellable(&self.body, &mut *destination, &self.config, cancellation).await;
        // Staged output is flushed even when the body failed or was cancelled.
        let flushed = destination.flush_async().await;
        result?;
        flushed?;

        tracing::debug!(destination = "external", "render finished");
        Ok(())
    }
}

#[async_trait]
impl<B: TemplateBody> NestedTemplate for RazorTemplate<B> {
    async fn render_nested(&self, sink: &mut dyn OutputSink) -> Result<()> {
        execute_body(&self.body, sink, &self.config, CancellationToken::new()).await
    }
}

impl<B: TemplateBody> EncodedContent for RazorTemplate<B> {
    fn write_to(&self, sink: &mut dyn OutputSink) -> Result<()> {
        render_now(self, sink)
    }
}

impl<'v, B: TemplateBody> From<&'v RazorTemplate<B>> for Value<'v> {
    fn from(template: &'v RazorTemplate<B>) -> Self {
        Value::Template(template)
    }
}

/// A template body backed by a synchronous closure.
pub struct FnBody<F>(F);

/// Build a template body from a closure over the render context.
pub fn from_fn<F>(body: F) -> FnBody<F>
where
    F: for<'c, 'r> Fn(&'c mut RenderContext<'r>) -> Result<()> + Send + Sync,
{
    FnBody(body)
}

#[async_trait]
impl<F> TemplateBody for FnBody<F>
where
    F: for<'c, 'r> Fn(&'c mut RenderContext<'r>) -> Result<()> + Send + Sync,
{
    async fn execute(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        (self.0)(ctx)
    }
}
