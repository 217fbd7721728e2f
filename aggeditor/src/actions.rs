//! Action surface shared by both reducers.
//!
//! The same action value is replayed against the metric list and the
//! bucket list; each reducer ignores what falls outside its domain.

use crate::aggregations::{BucketType, MetricType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorAction {
    AddMetric,
    RemoveMetric {
        id: String,
    },
    ChangeMetricType {
        id: String,
        metric_type: MetricType,
    },
    ChangeMetricField {
        id: String,
        field: String,
    },
    ToggleMetricVisibility {
        id: String,
    },
    ChangeMetricSetting {
        id: String,
        setting: String,
        value: String,
    },
    ChangeMetricMeta {
        id: String,
        meta: String,
        value: String,
    },
    /// Shallow merge of an arbitrary top-level attribute, bypassing
    /// capability checks
    ChangeMetricAttribute {
        id: String,
        attribute: String,
        value: Value,
    },
    AddBucketAggregation,
    RemoveBucketAggregation {
        id: String,
    },
    ChangeBucketAggregationType {
        id: String,
        bucket_type: BucketType,
    },
    ChangeBucketAggregationField {
        id: String,
        field: String,
    },
    ChangeBucketAggregationSetting {
        id: String,
        setting: String,
        value: String,
    },
}

impl EditorAction {
    pub fn add_metric() -> Self {
        EditorAction::AddMetric
    }

    pub fn remove_metric(id: impl Into<String>) -> Self {
        EditorAction::RemoveMetric { id: id.into() }
    }

    pub fn change_metric_type(id: impl Into<String>, metric_type: MetricType) -> Self {
        EditorAction::ChangeMetricType {
            id: id.into(),
            metric_type,
        }
    }

    pub fn change_metric_field(id: impl Into<String>, field: impl Into<String>) -> Self {
        EditorAction::ChangeMetricField {
            id: id.into(),
            field: field.into(),
        }
    }

    pub fn toggle_metric_visibility(id: impl Into<String>) -> Self {
        EditorAction::ToggleMetricVisibility { id: id.into() }
    }

    pub fn change_metric_setting(
        id: impl Into<String>,
        setting: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        EditorAction::ChangeMetricSetting {
            id: id.into(),
            setting: setting.into(),
            value: value.into(),
        }
    }

    pub fn change_metric_meta(
        id: impl Into<String>,
        meta: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        EditorAction::ChangeMetricMeta {
            id: id.into(),
            meta: meta.into(),
            value: value.into(),
        }
    }

    pub fn change_metric_attribute(
        id: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        EditorAction::ChangeMetricAttribute {
            id: id.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    pub fn add_bucket_aggregation() -> Self {
        EditorAction::AddBucketAggregation
    }

    pub fn remove_bucket_aggregation(id: impl Into<String>) -> Self {
        EditorAction::RemoveBucketAggregation { id: id.into() }
    }

    pub fn change_bucket_aggregation_type(id: impl Into<String>, bucket_type: BucketType) -> Self {
        EditorAction::ChangeBucketAggregationType {
            id: id.into(),
            bucket_type,
        }
    }

    pub fn change_bucket_aggregation_field(id: impl Into<String>, field: impl Into<String>) -> Self {
        EditorAction::ChangeBucketAggregationField {
            id: id.into(),
            field: field.into(),
        }
    }

    pub fn change_bucket_aggregation_setting(
        id: impl Into<String>,
        setting: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        EditorAction::ChangeBucketAggregationSetting {
            id: id.into(),
            setting: setting.into(),
            value: value.into(),
        }
    }

    /// Wire name of the action, as used in the `type` tag
    pub fn name(&self) -> &'static str {
        match self {
            EditorAction::AddMetric => "add_metric",
            EditorAction::RemoveMetric { .. } => "remove_metric",
            EditorAction::ChangeMetricType { .. } => "change_metric_type",
            EditorAction::ChangeMetricField { .. } => "change_metric_field",
            EditorAction::ToggleMetricVisibility { .. } => "toggle_metric_visibility",
            EditorAction::ChangeMetricSetting { .. } => "change_metric_setting",
            EditorAction::ChangeMetricMeta { .. } => "change_metric_meta",
            EditorAction::ChangeMetricAttribute { .. } => "change_metric_attribute",
            EditorAction::AddBucketAggregation => "add_bucket_aggregation",
            EditorAction::RemoveBucketAggregation { .. } => "remove_bucket_aggregation",
            EditorAction::ChangeBucketAggregationType { .. } => "change_bucket_aggregation_type",
            EditorAction::ChangeBucketAggregationField { .. } => "change_bucket_aggregation_field",
            EditorAction::ChangeBucketAggregationSetting { .. } => {
                "change_bucket_aggregation_setting"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_unit_action() {
        let action: EditorAction = serde_json::from_value(json!({"type": "add_metric"})).unwrap();
        assert_eq!(action, EditorAction::add_metric());
    }

    #[test]
    fn test_deserialize_change_metric_type() {
        let action: EditorAction = serde_json::from_value(json!({
            "type": "change_metric_type",
            "id": "1",
            "metric_type": "raw_data"
        }))
        .unwrap();
        assert_eq!(
            action,
            EditorAction::change_metric_type("1", MetricType::RawData)
        );
    }

    #[test]
    fn test_deserialize_attribute_keeps_raw_value() {
        let action: EditorAction = serde_json::from_value(json!({
            "type": "change_metric_attribute",
            "id": "2",
            "attribute": "inlineScript",
            "value": {"source": "doc['x'].value"}
        }))
        .unwrap();
        match action {
            EditorAction::ChangeMetricAttribute { value, .. } => {
                assert_eq!(value, json!({"source": "doc['x'].value"}));
            }
            _ => panic!("Expected ChangeMetricAttribute"),
        }
    }

    #[test]
    fn test_unknown_bucket_type_is_rejected() {
        let result: Result<EditorAction, _> = serde_json::from_value(json!({
            "type": "change_bucket_aggregation_type",
            "id": "1",
            "bucket_type": "significant_terms"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_name_matches_serde_tag() {
        let actions = [
            EditorAction::add_metric(),
            EditorAction::remove_metric("1"),
            EditorAction::change_metric_attribute("1", "alias", "x"),
            EditorAction::add_bucket_aggregation(),
            EditorAction::change_bucket_aggregation_setting("1", "size", "5"),
        ];
        for action in actions {
            let value = serde_json::to_value(&action).unwrap();
            assert_eq!(value["type"], json!(action.name()));
        }
    }
}
