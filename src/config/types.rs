//! Configuration types and defaults for razorblade.
//!
//! This module defines enums, constants, and default value functions
//! used by the RenderConfig struct.

use serde::{Deserialize, Serialize};

/// How dynamic values are encoded before they reach the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputEncoding {
    /// HTML entity escaping of `&`, `<`, `>`, `"` and `'` (default).
    #[default]
    Html,
    /// No escaping; for plain-text templates.
    Raw,
}

impl OutputEncoding {
    /// Parse an encoding from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "html" => Some(Self::Html),
            "raw" => Some(Self::Raw),
            _ => None,
        }
    }
}

/// Largest accepted `buffer_capacity` (16 MiB).
pub const MAX_BUFFER_CAPACITY: usize = 16 * 1024 * 1024;

pub(crate) fn default_buffer_capacity() -> usize {
    1024
}

pub(crate) fn default_true() -> bool {
    true
}
