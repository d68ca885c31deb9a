//! Encoded content: text tagged as safe to emit verbatim or needing escaping.
//!
//! Every value a template writes passes through one of these types so that
//! literal markup and composed template output are emitted exactly as given,
//! while values of unknown safety are escaped exactly once.
//!
//! - [`EncodedText`] carries a string plus its safety flag.
//! - [`HtmlString`] is owned text that is already safe.
//! - [`EncodedContent`] is implemented by anything that knows how to write
//!   itself to a sink without further escaping, including rendered templates.

mod escape;


pub use escape::{escape_html, write_encoded, write_escaped};

use crate::config::OutputEncoding;
use crate::error::Result;
use crate::sink::OutputSink;
use std::borrow::Cow;
use std::fmt;

/// Content that writes itself to a sink verbatim.
pub trait EncodedContent: Send + Sync {
    fn write_to(&self, sink: &mut dyn OutputSink) -> Result<()>;
}

/// Owned text that is safe to emit without escaping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HtmlString(String);

impl HtmlString {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl EncodedContent for HtmlString {
    fn write_to(&self, sink: &mut dyn OutputSink) -> Result<()> {
        sink.write_str(&self.0)
    }
}

impl fmt::Display for HtmlString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for HtmlString {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for HtmlString {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

/// A string together with whether it may be emitted verbatim.
///
/// Raw text (literal markup, composed output) is always safe. A dynamic value
/// is escaped on emission unless it was explicitly marked safe. An absent
/// dynamic value emits nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText<'a> {
    text: Option<Cow<'a, str>>,
    safe: bool,
}

impl<'a> EncodedText<'a> {
    /// Literal text, never escaped.
    pub fn raw(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            text: Some(text.into()),
            safe: true,
        }
    }

    /// A dynamic value, escaped on emission. `None` is the absent value.
    pub fn dynamic(text: Option<Cow<'a, str>>) -> Self {
        Self { text, safe: false }
    }

    /// Exempt this value from escaping.
    pub fn mark_safe(self) -> Self {
        Self { safe: true, ..self }
    }

    pub fn is_safe(&self) -> bool {
        self.safe
    }

    /// True for a missing or empty value.
    pub fn is_absent(&self) -> bool {
        self.text.as_deref().is_none_or(str::is_empty)
    }

    /// The unescaped text; empty when absent.
    pub fn as_str(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Detach from any borrowed text.
    pub fn into_owned(self) -> EncodedText<'static> {
        EncodedText {
            text: self.text.map(|text| Cow::Owned(text.into_owned())),
            safe: self.safe,
        }
    }

    /// Write this content, escaping with `encoding` unless it is safe.
    pub fn emit_to(&self, sink: &mut dyn OutputSink, encoding: OutputEncoding) -> Result<()> {
        let text = self.as_str();
        if text.is_empty() {
            return Ok(());
        }
        if self.safe {
            sink.write_str(text)
        } else {
            write_encoded(sink, text, encoding)
        }
    }
}

impl EncodedContent for EncodedText<'_> {
    fn write_to(&self, sink: &mut dyn OutputSink) -> Result<()> {
        self.emit_to(sink, OutputEncoding::Html)
    }
}
