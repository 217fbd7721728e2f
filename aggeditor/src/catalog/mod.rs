//! Default catalog: per-type default instances and capability flags.
//!
//! The catalog is read-only once built and is shared by both reducers.

mod builtin;

use crate::aggregations::{
    BucketAggregation, BucketType, MetricAggregation, MetricType, Settings,
};
use crate::config::CatalogConfig;
use crate::error::{Error, Result};
use crate::reducers::normalize_settings;
use serde::Serialize;

/// Capabilities and defaults of one metric type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTypeConfig {
    pub label: String,
    pub requires_field: bool,
    /// Reads the output of another metric (referenced through `field`)
    pub is_pipeline_agg: bool,
    /// Reads several metrics through `pipelineVariables` instead of `field`
    pub supports_multiple_bucket_paths: bool,
    /// Must be the only metric, and forbids bucket aggregations
    pub is_single_metric: bool,
    pub has_settings: bool,
    pub has_meta: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_settings: Option<Settings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_meta: Option<Settings>,
}

impl MetricTypeConfig {
    /// Instance created when this type is added to a query
    pub fn default_instance(&self, agg_type: MetricType, id: impl Into<String>) -> MetricAggregation {
        let mut metric = MetricAggregation::new(id, agg_type);
        if self.has_settings {
            metric.settings = self.default_settings.clone();
        }
        if self.has_meta {
            metric.meta = self.default_meta.clone();
        }
        metric
    }
}

/// Capabilities and defaults of one bucket type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketTypeConfig {
    pub label: String,
    pub requires_field: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_settings: Option<Settings>,
}

impl BucketTypeConfig {
    pub fn default_instance(&self, agg_type: BucketType, id: impl Into<String>) -> BucketAggregation {
        let mut bucket = BucketAggregation::new(id, agg_type);
        bucket.settings = self.default_settings.clone();
        bucket
    }
}

/// Lookup table from aggregation type to its defaults and flags.
///
/// Entries are stored by enum discriminant, so every known type always has
/// an entry.
#[derive(Debug, Clone)]
pub struct Catalog {
    metrics: Vec<MetricTypeConfig>,
    buckets: Vec<BucketTypeConfig>,
    default_metric_type: MetricType,
    default_bucket_type: BucketType,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Built-in Elasticsearch aggregation catalog
    pub fn builtin() -> Self {
        Self {
            metrics: MetricType::ALL.iter().map(|t| builtin::metric(*t)).collect(),
            buckets: BucketType::ALL.iter().map(|t| builtin::bucket(*t)).collect(),
            default_metric_type: MetricType::Count,
            default_bucket_type: BucketType::DateHistogram,
        }
    }

    /// Builtin catalog with configured overrides applied.
    ///
    /// Empty-string values in metric `default_settings` are dropped. The
    /// resolved default metric type must not be single-metric, since the
    /// default metric sits next to a default bucket and is appended by
    /// `add_metric`.
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let mut catalog = Self::builtin();

        if let Some(ref name) = config.default_metric_type {
            catalog.default_metric_type = name.parse()?;
        }
        if let Some(ref name) = config.default_bucket_type {
            catalog.default_bucket_type = name.parse()?;
        }

        for (name, overrides) in &config.metrics {
            let agg_type: MetricType = name.parse()?;
            let entry = &mut catalog.metrics[agg_type as usize];
            if let Some(v) = overrides.is_single_metric {
                entry.is_single_metric = v;
            }
            if let Some(v) = overrides.has_settings {
                entry.has_settings = v;
            }
            if let Some(v) = overrides.has_meta {
                entry.has_meta = v;
            }
            if let Some(ref settings) = overrides.default_settings {
                entry.default_settings = Some(normalize_settings(settings.clone()));
            }
            if let Some(ref meta) = overrides.default_meta {
                entry.default_meta = Some(meta.clone());
            }
            tracing::debug!("Applied catalog overrides for metric type '{}'", agg_type);
        }

        for (name, overrides) in &config.buckets {
            let agg_type: BucketType = name.parse()?;
            let entry = &mut catalog.buckets[agg_type as usize];
            if let Some(ref settings) = overrides.default_settings {
                entry.default_settings = Some(settings.clone());
            }
            tracing::debug!("Applied catalog overrides for bucket type '{}'", agg_type);
        }

        if catalog.is_single_metric(catalog.default_metric_type) {
            return Err(Error::Config(format!(
                "default metric type '{}' is single-metric",
                catalog.default_metric_type
            )));
        }

        Ok(catalog)
    }

    pub fn metric(&self, agg_type: MetricType) -> &MetricTypeConfig {
        &self.metrics[agg_type as usize]
    }

    pub fn bucket(&self, agg_type: BucketType) -> &BucketTypeConfig {
        &self.buckets[agg_type as usize]
    }

    pub fn default_metric_type(&self) -> MetricType {
        self.default_metric_type
    }

    pub fn default_bucket_type(&self) -> BucketType {
        self.default_bucket_type
    }

    pub fn default_metric(&self, id: impl Into<String>) -> MetricAggregation {
        let agg_type = self.default_metric_type;
        self.metric(agg_type).default_instance(agg_type, id)
    }

    pub fn default_bucket(&self, id: impl Into<String>) -> BucketAggregation {
        let agg_type = self.default_bucket_type;
        self.bucket(agg_type).default_instance(agg_type, id)
    }

    pub fn is_single_metric(&self, agg_type: MetricType) -> bool {
        self.metric(agg_type).is_single_metric
    }

    pub fn metrics(&self) -> impl Iterator<Item = (MetricType, &MetricTypeConfig)> {
        MetricType::ALL.iter().copied().zip(self.metrics.iter())
    }

    pub fn buckets(&self) -> impl Iterator<Item = (BucketType, &BucketTypeConfig)> {
        BucketType::ALL.iter().copied().zip(self.buckets.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BucketOverride, MetricOverride};

    #[test]
    fn test_builtin_entries_line_up_with_types() {
        let catalog = Catalog::builtin();
        for (agg_type, config) in catalog.metrics() {
            assert_eq!(catalog.metric(agg_type), config);
        }
        assert_eq!(catalog.metric(MetricType::Avg).label, "Average");
        assert_eq!(catalog.bucket(BucketType::Terms).label, "Terms");
    }

    #[test]
    fn test_single_metric_types() {
        let catalog = Catalog::builtin();
        let single: Vec<MetricType> = catalog
            .metrics()
            .filter(|(_, c)| c.is_single_metric)
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            single,
            vec![MetricType::RawDocument, MetricType::RawData, MetricType::Logs]
        );
    }

    #[test]
    fn test_pipeline_flags() {
        let catalog = Catalog::builtin();
        assert!(catalog.metric(MetricType::Derivative).is_pipeline_agg);
        assert!(!catalog.metric(MetricType::Derivative).supports_multiple_bucket_paths);
        assert!(catalog.metric(MetricType::BucketScript).supports_multiple_bucket_paths);
        assert!(!catalog.metric(MetricType::Avg).is_pipeline_agg);
    }

    #[test]
    fn test_default_instances() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.default_metric("1"),
            MetricAggregation::new("1", MetricType::Count)
        );
        assert_eq!(
            catalog.default_bucket("1"),
            BucketAggregation::new("1", BucketType::DateHistogram).with_setting("interval", "auto")
        );
    }

    #[test]
    fn test_extended_stats_default_carries_meta() {
        let catalog = Catalog::builtin();
        let config = catalog.metric(MetricType::ExtendedStats);
        let metric = config.default_instance(MetricType::ExtendedStats, "4");
        assert_eq!(metric.meta, config.default_meta);
        assert!(metric.meta.is_some());
    }

    #[test]
    fn test_from_config_overrides() {
        let mut config = CatalogConfig {
            default_metric_type: Some("avg".to_string()),
            default_bucket_type: Some("terms".to_string()),
            ..Default::default()
        };
        config.metrics.insert(
            "avg".to_string(),
            MetricOverride {
                default_settings: Some(Settings::from([(
                    "missing".to_string(),
                    "0".to_string(),
                )])),
                ..Default::default()
            },
        );
        config.buckets.insert(
            "terms".to_string(),
            BucketOverride {
                default_settings: Some(Settings::from([("size".to_string(), "5".to_string())])),
            },
        );

        let catalog = Catalog::from_config(&config).unwrap();
        assert_eq!(
            catalog.default_metric("1"),
            MetricAggregation::new("1", MetricType::Avg).with_setting("missing", "0")
        );
        assert_eq!(
            catalog.default_bucket("1"),
            BucketAggregation::new("1", BucketType::Terms).with_setting("size", "5")
        );
    }

    #[test]
    fn test_from_config_rejects_single_metric_default() {
        let config = CatalogConfig {
            default_metric_type: Some("raw_data".to_string()),
            ..Default::default()
        };
        let err = Catalog::from_config(&config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_config_rejects_unknown_type() {
        let mut config = CatalogConfig::default();
        config
            .metrics
            .insert("median".to_string(), MetricOverride::default());

        let err = Catalog::from_config(&config).unwrap_err();
        assert!(matches!(err, Error::UnknownType(ref s) if s == "median"));
    }
}
