//! Values written by template bodies.
//!
//! [`Value`] is the closed set of things a body can hand to `write`: a plain
//! value that needs escaping, text already known to be safe, encoded content
//! that writes itself, or a nested template. The variant is chosen by the
//! `From` conversion at the call site.

use crate::encoding::{EncodedContent, EncodedText, HtmlString};
use crate::error::Result;
use crate::template::{NestedTemplate, render_now};
use std::borrow::Cow;
use std::fmt;

/// A value passed to a template write primitive.
pub enum Value<'v> {
    /// A value of unknown safety; escaped on emission. `None` is absent.
    Plain(Option<Cow<'v, str>>),
    /// Text that is emitted verbatim.
    Safe(Cow<'v, str>),
    /// Content that writes itself verbatim.
    Encoded(&'v dyn EncodedContent),
    /// A template rendered in place; its output is never re-escaped.
    Template(&'v dyn NestedTemplate),
}

impl<'v> Value<'v> {
    /// The absent value.
    pub fn absent() -> Self {
        Value::Plain(None)
    }

    /// A plain value from anything displayable.
    pub fn display(value: impl fmt::Display) -> Self {
        Value::Plain(Some(Cow::Owned(value.to_string())))
    }

    /// Text exempt from escaping.
    pub fn safe(text: impl Into<Cow<'v, str>>) -> Self {
        Value::Safe(text.into())
    }

    /// Resolve into tagged text, rendering encoded content and templates
    /// synchronously.
    pub(crate) fn resolve(self) -> Result<EncodedText<'v>> {
        match self {
            Value::Plain(text) => Ok(EncodedText::dynamic(text)),
            Value::Safe(text) => Ok(EncodedText::raw(text)),
            Value::Encoded(content) => {
                let mut rendered = String::new();
                content.write_to(&mut rendered)?;
                Ok(EncodedText::raw(rendered))
            }
            Value::Template(template) => {
                let mut rendered = String::new();
                render_now(template, &mut rendered)?;
                Ok(EncodedText::raw(rendered))
            }
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Plain(text) => f.debug_tuple("Plain").field(text).finish(),
            Value::Safe(text) => f.debug_tuple("Safe").field(text).finish(),
            Value::Encoded(_) => f.write_str("Encoded(..)"),
            Value::Template(_) => f.write_str("Template(..)"),
        }
    }
}

impl<'v> From<&'v str> for Value<'v> {
    fn from(text: &'v str) -> Self {
        Value::Plain(Some(Cow::Borrowed(text)))
    }
}

impl<'v> From<&'v String> for Value<'v> {
    fn from(text: &'v String) -> Self {
        Value::Plain(Some(Cow::Borrowed(text.as_str())))
    }
}

impl From<String> for Value<'_> {
    fn from(text: String) -> Self {
        Value::Plain(Some(Cow::Owned(text)))
    }
}

impl<'v> From<Cow<'v, str>> for Value<'v> {
    fn from(text: Cow<'v, str>) -> Self {
        Value::Plain(Some(text))
    }
}

impl<'v> From<Option<&'v str>> for Value<'v> {
    fn from(text: Option<&'v str>) -> Self {
        Value::Plain(text.map(Cow::Borrowed))
    }
}

impl<'v> From<&'v Option<String>> for Value<'v> {
    fn from(text: &'v Option<String>) -> Self {
        Value::Plain(text.as_deref().map(Cow::Borrowed))
    }
}

impl From<Option<String>> for Value<'_> {
    fn from(text: Option<String>) -> Self {
        Value::Plain(text.map(Cow::Owned))
    }
}

impl<'v> From<&'v HtmlString> for Value<'v> {
    fn from(html: &'v HtmlString) -> Self {
        Value::Safe(Cow::Borrowed(html.as_str()))
    }
}

impl From<HtmlString> for Value<'_> {
    fn from(html: HtmlString) -> Self {
        Value::Safe(Cow::Owned(html.into_string()))
    }
}

impl<'v> From<&'v dyn EncodedContent> for Value<'v> {
    fn from(content: &'v dyn EncodedContent) -> Self {
        Value::Encoded(content)
    }
}

impl<'v> From<&'v dyn NestedTemplate> for Value<'v> {
    fn from(template: &'v dyn NestedTemplate) -> Self {
        Value::Template(template)
    }
}

impl<'v> From<&'v serde_json::Value> for Value<'v> {
    fn from(json: &'v serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Plain(None),
            serde_json::Value::String(text) => Value::Plain(Some(Cow::Borrowed(text.as_str()))),
            other => Value::Plain(Some(Cow::Owned(other.to_string()))),
        }
    }
}

macro_rules! display_values {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value<'_> {
                fn from(value: $ty) -> Self {
                    Value::display(value)
                }
            }
        )*
    };
}

display_values!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char);
