//! Conditional attribute rendering.
//!
//! Generated code writes an attribute as a `begin`, a run of fragments, and an
//! `end`. Nothing reaches the sink until `end`, which decides whether the
//! attribute renders at all:
//!
//! - an attribute with no fragments, any literal fragment, or any non-empty
//!   dynamic fragment is emitted as `prefix`, each fragment's prefix and
//!   value in call order, then `suffix`;
//! - an attribute whose fragments are all dynamic and all null or empty is
//!   suppressed entirely, including its prefix and suffix.
//!
//! The prefix carries the attribute name and opening quote (` class="`), the
//! suffix the closing quote.
//!
//! Calling `write_fragment` or `end` with no open attribute, or `begin` while
//! one is open, means generated code and runtime disagree about the call
//! protocol. Those calls panic.


use crate::config::OutputEncoding;
use crate::encoding::EncodedText;
use crate::error::Result;
use crate::sink::OutputSink;

/// One literal or dynamic piece of an attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeFragment {
    pub prefix: String,
    pub prefix_offset: usize,
    pub value: EncodedText<'static>,
    pub value_offset: usize,
    pub value_length: usize,
    pub literal: bool,
}

impl AttributeFragment {
    /// Literal fragments always count, even when blank.
    fn is_present(&self) -> bool {
        self.literal || !self.value.is_absent()
    }
}

/// Header and fragments of the attribute currently being written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAttribute {
    pub name: String,
    pub prefix: String,
    pub prefix_offset: usize,
    pub suffix: String,
    pub suffix_offset: usize,
    pub expected_fragments: usize,
    pub fragments: Vec<AttributeFragment>,
}

impl PendingAttribute {
    /// Whether the attribute renders at all.
    pub fn should_emit(&self) -> bool {
        self.fragments.is_empty() || self.fragments.iter().any(AttributeFragment::is_present)
    }

    fn write_to(&self, sink: &mut dyn OutputSink, encoding: OutputEncoding) -> Result<()> {
        sink.write_str(&self.prefix)?;
        for fragment in &self.fragments {
            if !fragment.prefix.is_empty() {
                sink.write_str(&fragment.prefix)?;
            }
            if fragment.literal {
                sink.write_str(fragment.value.as_str())?;
            } else {
                fragment.value.emit_to(sink, encoding)?;
            }
        }
        sink.write_str(&self.suffix)
    }
}

/// Accumulates attribute fragments between `begin` and `end`.
#[derive(Debug, Default)]
pub struct AttributeWriter {
    pending: Option<PendingAttribute>,
    strict_count: bool,
}

impl AttributeWriter {
    /// Create a writer. With `strict_count`, closing an attribute whose
    /// fragment count differs from the declared count panics.
    pub fn new(strict_count: bool) -> Self {
        Self {
            pending: None,
            strict_count,
        }
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// The attribute currently being written, if any.
    pub fn pending(&self) -> Option<&PendingAttribute> {
        self.pending.as_ref()
    }

    pub fn begin(
        &mut self,
        name: &str,
        prefix: &str,
        prefix_offset: usize,
        suffix: &str,
        suffix_offset: usize,
        expected_fragments: usize,
    ) {
        if let Some(open) = &self.pending {
            panic!(
                "begin_write_attribute('{}') called while attribute '{}' is still open",
                name, open.name
            );
        }

        self.pending = Some(PendingAttribute {
            name: name.to_string(),
            prefix: prefix.to_string(),
            prefix_offset,
            suffix: suffix.to_string(),
            suffix_offset,
            expected_fragments,
            fragments: Vec::with_capacity(expected_fragments),
        });
    }

    pub fn write_fragment(
        &mut self,
        prefix: &str,
        prefix_offset: usize,
        value: EncodedText<'static>,
        value_offset: usize,
        value_length: usize,
        literal: bool,
    ) {
        let Some(pending) = self.pending.as_mut() else {
            panic!("write_attribute_value called without begin_write_attribute");
        };

        pending.fragments.push(AttributeFragment {
            prefix: prefix.to_string(),
            prefix_offset,
            value,
            value_offset,
            value_length,
            literal,
        });
    }

    /// Close the open attribute and write it if it is not suppressed.
    ///
    /// Returns whether the attribute was emitted.
    pub fn end(&mut self, sink: &mut dyn OutputSink, encoding: OutputEncoding) -> Result<bool> {
        let Some(pending) = self.pending.take() else {
            panic!("end_write_attribute called without begin_write_attribute");
        };

        if pending.fragments.len() != pending.expected_fragments {
            if self.strict_count {
                panic!(
                    "attribute '{}' declared {} fragments but received {}",
                    pending.name,
                    pending.expected_fragments,
                    pending.fragments.len()
                );
            }
            tracing::warn!(
                attribute = %pending.name,
                expected = pending.expected_fragments,
                received = pending.fragments.len(),
                "attribute fragment count mismatch"
            );
        }

        if !pending.should_emit() {
            tracing::trace!(attribute = %pending.name, "attribute suppressed");
            return Ok(false);
        }

        tracing::trace!(
            attribute = %pending.name,
            fragments = pending.fragments.len(),
            "attribute emitted"
        );
        pending.write_to(sink, encoding)?;
        Ok(true)
    }
}
