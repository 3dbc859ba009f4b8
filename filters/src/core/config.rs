use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::constants::{DEFAULT_MAX_FILTERS, DEFAULT_MAX_REQUEST_BYTES, DEFAULT_MAX_VALUE_LENGTH};

// =============================================================================
// File Config (all optional, merged onto defaults)
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct FilterFileConfig {
    pub max_filters: Option<usize>,
    pub max_value_length: Option<usize>,
    pub max_request_bytes: Option<usize>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FilterFileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading filter config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed filter config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in filter config file (possible typos)"
            );
        }
    }
}

// =============================================================================
// Resolved Config
// =============================================================================

/// Limits enforced on every filter request before any resolver runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterLimits {
    /// Maximum number of filters in one request
    pub max_filters: usize,
    /// Maximum length of a single raw value, in bytes
    pub max_value_length: usize,
    /// Maximum size of a JSON-encoded request, in bytes
    pub max_request_bytes: usize,
}

impl Default for FilterLimits {
    fn default() -> Self {
        Self {
            max_filters: DEFAULT_MAX_FILTERS,
            max_value_length: DEFAULT_MAX_VALUE_LENGTH,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    pub limits: FilterLimits,
}

impl FilterConfig {
    /// Load configuration
    ///
    /// Without a path the defaults are returned. With a path, values present
    /// in the JSON file override the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            let file_config = FilterFileConfig::load_from_file(path)?;
            file_config.warn_unknown_fields();
            config.merge(file_config);
        }

        config.validate()?;
        tracing::debug!(limits = ?config.limits, "Filter configuration loaded");
        Ok(config)
    }

    fn merge(&mut self, file: FilterFileConfig) {
        if let Some(max_filters) = file.max_filters {
            self.limits.max_filters = max_filters;
        }
        if let Some(max_value_length) = file.max_value_length {
            self.limits.max_value_length = max_value_length;
        }
        if let Some(max_request_bytes) = file.max_request_bytes {
            self.limits.max_request_bytes = max_request_bytes;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.limits.max_filters == 0 {
            anyhow::bail!("max_filters must be greater than 0");
        }
        if self.limits.max_value_length == 0 {
            anyhow::bail!("max_value_length must be greater than 0");
        }
        if self.limits.max_request_bytes == 0 {
            anyhow::bail!("max_request_bytes must be greater than 0");
        }
        Ok(())
    }
}
