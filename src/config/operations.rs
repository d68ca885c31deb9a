//! Config loading, validation, and serialization.

use super::model::RenderConfig;
use super::types::MAX_BUFFER_CAPACITY;
use crate::error::{RenderError, Result};
use std::path::Path;

impl RenderConfig {
    /// Read, parse and validate a YAML config file. Unknown fields are ignored.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            RenderError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: RenderConfig = serde_yaml::from_str(yaml)
            .map_err(|e| RenderError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            RenderError::Config(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Reject a zero or oversized `buffer_capacity`.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_capacity == 0 {
            return Err(RenderError::Config(
                "config validation failed: buffer_capacity must be greater than 0".to_string(),
            ));
        }

        if self.buffer_capacity > MAX_BUFFER_CAPACITY {
            return Err(RenderError::Config(format!(
                "config validation failed: buffer_capacity must be at most {} (found {})",
                MAX_BUFFER_CAPACITY, self.buffer_capacity
            )));
        }

        Ok(())
    }
}
