//! Editor configuration
//!
//! Loaded from TOML or YAML depending on the file extension. Every section
//! is optional; an empty file yields the builtin catalog and `info` logging.

use crate::aggregations::Settings;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct EditorConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Overrides applied on top of the builtin catalog.
///
/// Type names are the snake_case wire names (`date_histogram`, `raw_data`, ...).
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CatalogConfig {
    /// Metric type appended by `add_metric` and used when the list is reset
    #[serde(default)]
    pub default_metric_type: Option<String>,
    /// Bucket type appended by `add_bucket_aggregation`
    #[serde(default)]
    pub default_bucket_type: Option<String>,
    #[serde(default)]
    pub metrics: BTreeMap<String, MetricOverride>,
    #[serde(default)]
    pub buckets: BTreeMap<String, BucketOverride>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct MetricOverride {
    #[serde(default)]
    pub is_single_metric: Option<bool>,
    #[serde(default)]
    pub has_settings: Option<bool>,
    #[serde(default)]
    pub has_meta: Option<bool>,
    #[serde(default)]
    pub default_settings: Option<Settings>,
    #[serde(default)]
    pub default_meta: Option<Settings>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct BucketOverride {
    #[serde(default)]
    pub default_settings: Option<Settings>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// Log output format: "pretty" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl EditorConfig {
    /// Load config from a `.toml`, `.yaml` or `.yml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: EditorConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            other => {
                return Err(Error::Config(format!(
                    "Unsupported config format {:?} for {}",
                    other.unwrap_or(""),
                    path.display()
                )))
            }
        };
        tracing::debug!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}
