//! Layout and section bookkeeping.
//!
//! A page that sets a layout has the rest of its output captured. Once the
//! page body returns, the captured body and the sections it defined are handed
//! to the layout, which renders them into the real destination.

use super::TemplateBody;
use crate::encoding::HtmlString;
use crate::sink::StringBuffer;
use std::collections::HashMap;
use std::sync::Arc;

/// What a capture buffer collects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CaptureKind {
    /// The page body, once a layout was set.
    Body,
    /// A named section.
    Section(String),
}

#[derive(Debug)]
pub(crate) struct Capture {
    pub(crate) kind: CaptureKind,
    pub(crate) buffer: StringBuffer,
}

impl Capture {
    pub(crate) fn new(kind: CaptureKind, capacity: usize) -> Self {
        Self {
            kind,
            buffer: StringBuffer::with_capacity(capacity),
        }
    }
}

/// Page output made available to a layout.
#[derive(Debug, Default)]
pub(crate) struct LayoutInput {
    pub(crate) body: HtmlString,
    pub(crate) sections: HashMap<String, HtmlString>,
    pub(crate) body_rendered: bool,
}

/// A layout waiting to run over a finished page.
pub(crate) struct LayoutCall {
    pub(crate) layout: Arc<dyn TemplateBody>,
    pub(crate) input: LayoutInput,
}
