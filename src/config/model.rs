//! RenderConfig struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for template rendering.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Encoding applied to dynamic values (default: html).
    #[serde(default)]
    pub encoding: OutputEncoding,

    /// Initial capacity of the default buffer and capture buffers.
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,

    /// Treat a fragment count that differs from the declared count as a
    /// code generation mismatch instead of logging it.
    #[serde(default)]
    pub strict_attribute_count: bool,

    /// Fail when a layout completes without rendering the page body.
    #[serde(default = "default_true")]
    pub require_layout_body: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            encoding: OutputEncoding::default(),
            buffer_capacity: default_buffer_capacity(),
            strict_attribute_count: false,
            require_layout_body: default_true(),
        }
    }
}

impl RenderConfig {
    /// Config for plain-text templates: identical to the default except that
    /// dynamic values are written without escaping.
    pub fn raw() -> Self {
        Self {
            encoding: OutputEncoding::Raw,
            ..Self::default()
        }
    }
}
