//! Render configuration for razorblade.
//!
//! This module defines the `RenderConfig` struct that controls how a template
//! encodes dynamic values and sizes its buffers. It supports forward-compatible
//! YAML parsing (unknown fields are ignored), sensible defaults for every
//! field, and validation of config values.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::RenderConfig;
pub use types::OutputEncoding;
