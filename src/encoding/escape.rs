//! HTML entity escaping.

use crate::config::OutputEncoding;
use crate::error::Result;
use crate::sink::OutputSink;
use std::borrow::Cow;

fn entity_for(ch: char) -> Option<&'static str> {
    match ch {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#x27;"),
        _ => None,
    }
}

/// Escape a string for safe insertion into HTML text or attribute values.
///
/// Replaces `&`, `<`, `>`, `"` and `'` with their entities. Borrows the input
/// when nothing needs replacing.
#[must_use]
pub fn escape_html(input: &str) -> Cow<'_, str> {
    let Some(first) = input.find(|ch| entity_for(ch).is_some()) else {
        return Cow::Borrowed(input);
    };

    let mut output = String::with_capacity(input.len() + 16);
    output.push_str(&input[..first]);
    for ch in input[first..].chars() {
        match entity_for(ch) {
            Some(entity) => output.push_str(entity),
            None => output.push(ch),
        }
    }
    Cow::Owned(output)
}

/// Stream the escaped form of `input` into `sink` without allocating.
pub fn write_escaped(sink: &mut dyn OutputSink, input: &str) -> Result<()> {
    let mut last = 0;
    for (idx, ch) in input.char_indices() {
        if let Some(entity) = entity_for(ch) {
            if last < idx {
                sink.write_str(&input[last..idx])?;
            }
            sink.write_str(entity)?;
            last = idx + ch.len_utf8();
        }
    }
    if last < input.len() {
        sink.write_str(&input[last..])?;
    }
    Ok(())
}

/// Write `input` with the given encoding applied.
pub fn write_encoded(sink: &mut dyn OutputSink, input: &str, encoding: OutputEncoding) -> Result<()> {
    match encoding {
        OutputEncoding::Html => write_escaped(sink, input),
        OutputEncoding::Raw => sink.write_str(input),
    }
}
