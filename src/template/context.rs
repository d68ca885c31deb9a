//! The primitives generated template bodies call.

use super::layout::{Capture, CaptureKind, LayoutCall, LayoutInput};
use super::{NestedTemplate, TemplateBody, render_now};
use crate::attribute::AttributeWriter;
use crate::config::{OutputEncoding, RenderConfig};
use crate::encoding::{EncodedText, HtmlString};
use crate::error::{RenderError, Result};
use crate::sink::OutputSink;
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Execution state for one pass over a template body.
///
/// Exactly one sink is active per execution. Writes go to the innermost open
/// capture (section or layout page body) if there is one, otherwise straight
/// to the sink selected by the render entry point.
pub struct RenderContext<'a> {
    sink: TrackedSink<'a>,
    config: &'a RenderConfig,
    attributes: AttributeWriter,
    captures: Vec<Capture>,
    layout: Option<Arc<dyn TemplateBody>>,
    sections: HashMap<String, HtmlString>,
    layout_input: Option<LayoutInput>,
    cancellation: CancellationToken,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(
        sink: &'a mut dyn OutputSink,
        config: &'a RenderConfig,
        cancellation: CancellationToken,
    ) -> Self {
        Self {
            sink: TrackedSink {
                inner: sink,
                written: false,
            },
            config,
            attributes: AttributeWriter::new(config.strict_attribute_count),
            captures: Vec::new(),
            layout: None,
            sections: HashMap::new(),
            layout_input: None,
            cancellation,
        }
    }

    pub(crate) fn for_layout(
        sink: &'a mut dyn OutputSink,
        config: &'a RenderConfig,
        cancellation: CancellationToken,
        input: LayoutInput,
    ) -> Self {
        Self {
            layout_input: Some(input),
            ..Self::new(sink, config, cancellation)
        }
    }

    pub fn config(&self) -> &RenderConfig {
        self.config
    }

    pub fn encoding(&self) -> OutputEncoding {
        self.config.encoding
    }

    fn destination(&mut self) -> &mut dyn OutputSink {
        match self.captures.last_mut() {
            Some(capture) => &mut capture.buffer,
            None => &mut self.sink,
        }
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Write literal markup. Never escaped.
    pub fn write_literal(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.destination().write_str(text)
    }

    /// Write literal markup through the destination's asynchronous path.
    pub async fn write_literal_async(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.destination().write_str_async(text).await
    }

    /// Write a value.
    ///
    /// Plain values are escaped with the configured encoding; safe text,
    /// encoded content and nested templates are written verbatim.
    pub fn write<'v>(&mut self, value: impl Into<Value<'v>>) -> Result<()> {
        let encoding = self.encoding();
        match value.into() {
            Value::Plain(text) => EncodedText::dynamic(text).emit_to(self.destination(), encoding),
            Value::Safe(text) => EncodedText::raw(text).emit_to(self.destination(), encoding),
            Value::Encoded(content) => content.write_to(self.destination()),
            Value::Template(template) => render_now(template, self.destination()),
        }
    }

    /// Render a nested template in place, awaiting it if it suspends.
    pub async fn write_template_async(&mut self, template: &dyn NestedTemplate) -> Result<()> {
        template.render_nested(self.destination()).await
    }

    /// Mark a value as safe so `write` emits it without escaping.
    pub fn raw(&self, value: impl fmt::Display) -> HtmlString {
        HtmlString::new(value.to_string())
    }

    /// Push staged output through to an asynchronous destination.
    ///
    /// Does nothing while output is being captured for a layout or section.
    pub async fn flush(&mut self) -> Result<()> {
        if !self.captures.is_empty() {
            return Ok(());
        }
        self.sink.flush_async().await
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub fn begin_write_attribute(
        &mut self,
        name: &str,
        prefix: &str,
        prefix_offset: usize,
        suffix: &str,
        suffix_offset: usize,
        attribute_values_count: usize,
    ) {
        self.attributes.begin(
            name,
            prefix,
            prefix_offset,
            suffix,
            suffix_offset,
            attribute_values_count,
        );
    }

    pub fn write_attribute_value<'v>(
        &mut self,
        prefix: &str,
        prefix_offset: usize,
        value: impl Into<Value<'v>>,
        value_offset: usize,
        value_length: usize,
        is_literal: bool,
    ) -> Result<()> {
        let value = value.into().resolve()?.into_owned();
        self.attributes.write_fragment(
            prefix,
            prefix_offset,
            value,
            value_offset,
            value_length,
            is_literal,
        );
        Ok(())
    }

    pub fn end_write_attribute(&mut self) -> Result<()> {
        let encoding = self.encoding();
        let Self {
            sink,
            captures,
            attributes,
            ..
        } = self;

        let destination: &mut dyn OutputSink = match captures.last_mut() {
            Some(capture) => &mut capture.buffer,
            None => sink,
        };
        attributes.end(destination, encoding)?;
        Ok(())
    }

    // =========================================================================
    // Layouts and sections
    // =========================================================================

    /// Render this page inside `layout`.
    ///
    /// Must be called before the page writes anything to its destination.
    pub fn set_layout(&mut self, layout: Arc<dyn TemplateBody>) -> Result<()> {
        if self.sink.written {
            return Err(RenderError::LayoutAfterOutput);
        }
        let capturing_body = self
            .captures
            .first()
            .is_some_and(|capture| capture.kind == CaptureKind::Body);
        if !capturing_body {
            self.captures
                .insert(0, Capture::new(CaptureKind::Body, self.config.buffer_capacity));
        }
        self.layout = Some(layout);
        Ok(())
    }

    pub fn begin_section(&mut self, name: &str) -> Result<()> {
        if let Some(open) = self.open_section() {
            panic!(
                "begin_section('{}') called while section '{}' is still open",
                name, open
            );
        }
        if self.sections.contains_key(name) {
            return Err(RenderError::SectionAlreadyDefined(name.to_string()));
        }
        self.captures.push(Capture::new(
            CaptureKind::Section(name.to_string()),
            self.config.buffer_capacity,
        ));
        Ok(())
    }

    pub fn end_section(&mut self) {
        match self.captures.pop() {
            Some(Capture {
                kind: CaptureKind::Section(name),
                buffer,
            }) => {
                self.sections
                    .insert(name, HtmlString::new(buffer.into_string()));
            }
            _ => panic!("end_section called without begin_section"),
        }
    }

    fn open_section(&self) -> Option<&str> {
        self.captures.iter().find_map(|capture| match &capture.kind {
            CaptureKind::Section(name) => Some(name.as_str()),
            CaptureKind::Body => None,
        })
    }

    /// Whether the page rendered by this layout defined `name`.
    pub fn is_section_defined(&self, name: &str) -> bool {
        self.layout_input
            .as_ref()
            .is_some_and(|input| input.sections.contains_key(name))
    }

    /// Write the page body. Only valid inside a layout.
    pub fn render_body(&mut self) -> Result<()> {
        let Some(mut input) = self.layout_input.take() else {
            return Err(RenderError::NotInLayout);
        };
        let result = self.destination().write_str(input.body.as_str());
        input.body_rendered = true;
        self.layout_input = Some(input);
        result
    }

    /// Write a section the page must have defined.
    pub fn render_section(&mut self, name: &str) -> Result<()> {
        if self.render_section_optional(name)? {
            Ok(())
        } else {
            Err(RenderError::SectionNotDefined(name.to_string()))
        }
    }

    /// Write a section if the page defined it. Returns whether it did.
    pub fn render_section_optional(&mut self, name: &str) -> Result<bool> {
        let Some(input) = self.layout_input.take() else {
            return Err(RenderError::NotInLayout);
        };
        let result = match input.sections.get(name) {
            Some(section) => self.destination().write_str(section.as_str()).map(|()| true),
            None => Ok(false),
        };
        self.layout_input = Some(input);
        result
    }

    // =========================================================================
    // Cancellation
    // =========================================================================

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Fail with [`RenderError::Cancelled`] if the render was cancelled.
    pub fn ensure_not_cancelled(&self) -> Result<()> {
        if self.cancellation.is_cancelled() {
            Err(RenderError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Close out this pass, returning the layout to run next, if any.
    pub(crate) fn finish(mut self) -> Result<Option<LayoutCall>> {
        if let Some(pending) = self.attributes.pending() {
            panic!(
                "template finished with attribute '{}' still open",
                pending.name
            );
        }
        if let Some(open) = self.open_section() {
            panic!("template finished with section '{}' still open", open);
        }

        if let Some(input) = &self.layout_input {
            if self.config.require_layout_body && !input.body_rendered {
                return Err(RenderError::LayoutBodyNotRendered);
            }
        }

        let Some(layout) = self.layout.take() else {
            if !self.sections.is_empty() {
                tracing::debug!(
                    sections = self.sections.len(),
                    "sections defined without a layout were discarded"
                );
            }
            return Ok(None);
        };

        let body = match self.captures.pop() {
            Some(Capture {
                kind: CaptureKind::Body,
                buffer,
            }) => HtmlString::new(buffer.into_string()),
            _ => HtmlString::default(),
        };

        Ok(Some(LayoutCall {
            layout,
            input: LayoutInput {
                body,
                sections: self.sections,
                body_rendered: false,
            },
        }))
    }
}

/// The render destination, remembering whether any text reached it.
struct TrackedSink<'a> {
    inner: &'a mut dyn OutputSink,
    written: bool,
}

#[async_trait]
impl OutputSink for TrackedSink<'_> {
    fn write_str(&mut self, text: &str) -> Result<()> {
        self.written |= !text.is_empty();
        self.inner.write_str(text)
    }

    async fn write_str_async(&mut self, text: &str) -> Result<()> {
        self.written |= !text.is_empty();
        self.inner.write_str_async(text).await
    }

    async fn flush_async(&mut self) -> Result<()> {
        self.inner.flush_async().await
    }
}
