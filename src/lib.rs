//! Razorblade: execution runtime for compiled Razor-style templates.
//!
//! A template compiler turns markup-plus-code into a type implementing
//! [`TemplateBody`]. This crate supplies everything that body runs against:
//! literal and value writes with HTML escaping, conditional attributes,
//! composition of templates without double escaping, layouts with sections,
//! and synchronous or asynchronous rendering into the template's own buffer or
//! into a caller-supplied [`OutputSink`].
//!
//! ```
//! use razorblade::{RazorTemplate, from_fn};
//!
//! let mut template = RazorTemplate::new(from_fn(|ctx| {
//!     ctx.write_literal("<p>")?;
//!     ctx.write("Tom & Jerry")?;
//!     ctx.write_literal("</p>")
//! }));
//!
//! assert_eq!(template.render()?, "<p>Tom &amp; Jerry</p>");
//! # Ok::<(), razorblade::RenderError>(())
//! ```

pub mod attribute;
pub mod config;
pub mod encoding;
pub mod error;
pub mod sink;
pub mod template;
pub mod value;

#[cfg(test)]
mod test_support;

pub use config::{OutputEncoding, RenderConfig};
pub use encoding::{EncodedContent, EncodedText, HtmlString, escape_html};
pub use error::{RenderError, Result};
pub use sink::{AsyncWriteSink, IoSink, OutputSink, StringBuffer};
pub use template::{FnBody, NestedTemplate, RazorTemplate, RenderContext, TemplateBody, from_fn};
pub use value::Value;
