use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Settings and meta maps. Ordered so that two aggregations compare equal
/// regardless of the order their keys were written in.
pub type Settings = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Count,
    Avg,
    Sum,
    Max,
    Min,
    ExtendedStats,
    Percentiles,
    Cardinality,
    TopMetrics,
    Rate,
    MovingAvg,
    MovingFn,
    Derivative,
    SerialDiff,
    CumulativeSum,
    BucketScript,
    RawDocument,
    RawData,
    Logs,
}

impl MetricType {
    pub const ALL: [MetricType; 19] = [
        MetricType::Count,
        MetricType::Avg,
        MetricType::Sum,
        MetricType::Max,
        MetricType::Min,
        MetricType::ExtendedStats,
        MetricType::Percentiles,
        MetricType::Cardinality,
        MetricType::TopMetrics,
        MetricType::Rate,
        MetricType::MovingAvg,
        MetricType::MovingFn,
        MetricType::Derivative,
        MetricType::SerialDiff,
        MetricType::CumulativeSum,
        MetricType::BucketScript,
        MetricType::RawDocument,
        MetricType::RawData,
        MetricType::Logs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Count => "count",
            MetricType::Avg => "avg",
            MetricType::Sum => "sum",
            MetricType::Max => "max",
            MetricType::Min => "min",
            MetricType::ExtendedStats => "extended_stats",
            MetricType::Percentiles => "percentiles",
            MetricType::Cardinality => "cardinality",
            MetricType::TopMetrics => "top_metrics",
            MetricType::Rate => "rate",
            MetricType::MovingAvg => "moving_avg",
            MetricType::MovingFn => "moving_fn",
            MetricType::Derivative => "derivative",
            MetricType::SerialDiff => "serial_diff",
            MetricType::CumulativeSum => "cumulative_sum",
            MetricType::BucketScript => "bucket_script",
            MetricType::RawDocument => "raw_document",
            MetricType::RawData => "raw_data",
            MetricType::Logs => "logs",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MetricType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownType(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketType {
    Terms,
    Filters,
    GeohashGrid,
    DateHistogram,
    Histogram,
    Nested,
}

impl BucketType {
    pub const ALL: [BucketType; 6] = [
        BucketType::Terms,
        BucketType::Filters,
        BucketType::GeohashGrid,
        BucketType::DateHistogram,
        BucketType::Histogram,
        BucketType::Nested,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BucketType::Terms => "terms",
            BucketType::Filters => "filters",
            BucketType::GeohashGrid => "geohash_grid",
            BucketType::DateHistogram => "date_histogram",
            BucketType::Histogram => "histogram",
            BucketType::Nested => "nested",
        }
    }
}

impl fmt::Display for BucketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BucketType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BucketType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::UnknownType(s.to_string()))
    }
}

/// Named input of a pipeline aggregation that reads several bucket paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineVariable {
    pub name: String,
    pub pipeline_agg: String,
}

/// A metric stage. `settings` and `meta` are only populated for types whose
/// catalog entry advertises them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricAggregation {
    pub id: String,
    #[serde(rename = "type")]
    pub agg_type: MetricType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Settings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_variables: Option<Vec<PipelineVariable>>,
    /// Top-level attributes without a dedicated field (e.g. `inlineScript`).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A bucket stage. Parent/child relations are positional within the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketAggregation {
    pub id: String,
    #[serde(rename = "type")]
    pub agg_type: BucketType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Common view over both aggregation families.
pub trait Aggregation {
    fn id(&self) -> &str;
}

impl Aggregation for MetricAggregation {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Aggregation for BucketAggregation {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metric_type_names_roundtrip() {
        for t in MetricType::ALL {
            assert_eq!(t.as_str().parse::<MetricType>().unwrap(), t);
            assert_eq!(serde_json::to_value(t).unwrap(), json!(t.as_str()));
        }
    }

    #[test]
    fn test_bucket_type_names_roundtrip() {
        for t in BucketType::ALL {
            assert_eq!(t.as_str().parse::<BucketType>().unwrap(), t);
            assert_eq!(serde_json::to_value(t).unwrap(), json!(t.as_str()));
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = "median".parse::<MetricType>().unwrap_err();
        assert!(matches!(err, Error::UnknownType(ref s) if s == "median"));
        assert!("bogus".parse::<BucketType>().is_err());
    }

    #[test]
    fn test_metric_serializes_without_absent_fields() {
        let metric = MetricAggregation::new("1", MetricType::Count);
        assert_eq!(
            serde_json::to_value(&metric).unwrap(),
            json!({"id": "1", "type": "count"})
        );
    }

    #[test]
    fn test_metric_deserializes_unknown_attributes_into_extra() {
        let metric: MetricAggregation = serde_json::from_value(json!({
            "id": "3",
            "type": "bucket_script",
            "pipelineVariables": [{"name": "var1", "pipelineAgg": "1"}],
            "inlineScript": "params.var1 * 2"
        }))
        .unwrap();

        assert_eq!(metric.agg_type, MetricType::BucketScript);
        assert_eq!(
            metric.pipeline_variables.as_deref(),
            Some(&[PipelineVariable {
                name: "var1".to_string(),
                pipeline_agg: "1".to_string()
            }][..])
        );
        assert_eq!(metric.extra.get("inlineScript"), Some(&json!("params.var1 * 2")));
    }

    #[test]
    fn test_settings_equality_ignores_insertion_order() {
        let a = BucketAggregation::new("1", BucketType::Terms)
            .with_setting("size", "10")
            .with_setting("order", "desc");
        let b = BucketAggregation::new("1", BucketType::Terms)
            .with_setting("order", "desc")
            .with_setting("size", "10");
        assert_eq!(a, b);
    }
}
