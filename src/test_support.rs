use crate::error::Result;
use crate::sink::OutputSink;
use crate::template::{RazorTemplate, RenderContext, TemplateBody, from_fn};
use async_trait::async_trait;
use std::future::Future;
use std::task::Poll;

/// A template whose body writes `text` as a single literal.
pub(crate) fn literal_template(text: &'static str) -> RazorTemplate<impl TemplateBody> {
    RazorTemplate::new(from_fn(move |ctx| ctx.write_literal(text)))
}

/// Suspend exactly once, waking immediately.
pub(crate) fn yield_once() -> impl Future<Output = ()> + Send {
    let mut yielded = false;
    futures::future::poll_fn(move |cx| {
        if yielded {
            Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
}

/// Writes its parts in order, suspending between each pair of writes.
pub(crate) struct Suspending {
    pub(crate) parts: Vec<&'static str>,
}

#[async_trait]
impl TemplateBody for Suspending {
    async fn execute(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        for part in &self.parts {
            ctx.write(*part)?;
            yield_once().await;
        }
        Ok(())
    }
}

/// Records every write it receives, tagged with the path it came through.
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub(crate) calls: Vec<String>,
    pub(crate) flushes: usize,
}

impl RecordingSink {
    pub(crate) fn text(&self) -> String {
        self.calls
            .iter()
            .map(|call| call.split_once(':').map_or("", |(_, text)| text))
            .collect()
    }
}

#[async_trait]
impl OutputSink for RecordingSink {
    fn write_str(&mut self, text: &str) -> Result<()> {
        self.calls.push(format!("sync:{}", text));
        Ok(())
    }

    async fn write_str_async(&mut self, text: &str) -> Result<()> {
        self.calls.push(format!("async:{}", text));
        Ok(())
    }

    async fn flush_async(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}
