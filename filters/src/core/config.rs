use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::filters::CombinationMode;

use super::constants::{
    DEFAULT_MAX_FILTER_JSON_BYTES, DEFAULT_MAX_FILTERS, DEFAULT_PARAMETER_HASH_LEN,
    DEFAULT_PARAMETER_PREFIX, ENV_ESCAPE_LIKE, ENV_MAX_FILTERS, ENV_MODE, ENV_PARAMETER_PREFIX,
    MAX_PARAMETER_HASH_LEN,
};

// =============================================================================
// Filters Configuration
// =============================================================================

/// Settings shared by filter compilation and JSON filter parsing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FiltersConfig {
    /// Combination mode used when the caller does not pick one
    pub mode: CombinationMode,
    /// Prefix of generated bind parameter names
    pub parameter_prefix: String,
    /// Number of md5 hex chars in generated bind parameter names
    pub parameter_hash_len: usize,
    /// Escape `%`, `_` and `\` in LIKE values before wrapping them
    pub escape_like: bool,
    /// Maximum number of entries accepted from JSON input
    pub max_filters: usize,
    /// Maximum size of JSON input in bytes
    pub max_filter_json_bytes: usize,
    /// Unrecognised fields from the config file
    #[serde(flatten, skip_serializing)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            mode: CombinationMode::And,
            parameter_prefix: DEFAULT_PARAMETER_PREFIX.to_string(),
            parameter_hash_len: DEFAULT_PARAMETER_HASH_LEN,
            escape_like: false,
            max_filters: DEFAULT_MAX_FILTERS,
            max_filter_json_bytes: DEFAULT_MAX_FILTER_JSON_BYTES,
            extra: serde_json::Map::new(),
        }
    }
}

impl FiltersConfig {
    /// Load configuration
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. JSON config file (when a path is given)
    /// 3. `QUERY_FILTERS_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        tracing::debug!("Loading filters configuration");

        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.warn_unknown_fields();
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        tracing::trace!(config = ?config, "Filters configuration loaded");
        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if !self.extra.is_empty() {
            let keys_str: String = self
                .extra
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Apply environment overrides, reading variables through `lookup`
    fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup(ENV_MODE) {
            self.mode = mode
                .parse()
                .with_context(|| format!("Invalid {}: {}", ENV_MODE, mode))?;
            tracing::trace!(mode = %self.mode, "Mode from environment");
        }
        if let Some(escape) = lookup(ENV_ESCAPE_LIKE) {
            self.escape_like = parse_bool(&escape)
                .with_context(|| format!("Invalid {}: {}", ENV_ESCAPE_LIKE, escape))?;
        }
        if let Some(prefix) = lookup(ENV_PARAMETER_PREFIX) {
            self.parameter_prefix = prefix;
        }
        if let Some(max) = lookup(ENV_MAX_FILTERS) {
            self.max_filters = max
                .parse()
                .with_context(|| format!("Invalid {}: {}", ENV_MAX_FILTERS, max))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        // Parameter names end up as `:name` placeholders
        let mut chars = self.parameter_prefix.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => anyhow::bail!(
                "Configuration error: parameter_prefix must start with an ASCII letter"
            ),
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            anyhow::bail!(
                "Configuration error: parameter_prefix may only contain letters, digits and '_'"
            );
        }

        if !(1..=MAX_PARAMETER_HASH_LEN).contains(&self.parameter_hash_len) {
            anyhow::bail!(
                "Configuration error: parameter_hash_len must be between 1 and {}",
                MAX_PARAMETER_HASH_LEN
            );
        }

        if self.max_filters == 0 {
            anyhow::bail!("Configuration error: max_filters must be greater than 0");
        }
        if self.max_filter_json_bytes == 0 {
            anyhow::bail!("Configuration error: max_filter_json_bytes must be greater than 0");
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {:?}", other),
    }
}
