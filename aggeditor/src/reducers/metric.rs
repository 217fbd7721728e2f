use super::{contains_id, next_id, normalize_settings, update_by_id, Reducer};
use crate::actions::EditorAction;
use crate::aggregations::{MetricAggregation, MetricType};
use crate::catalog::Catalog;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Reducer owning the ordered list of metric aggregations.
///
/// The list is never empty after a reduction that starts from a non-empty
/// list: removing the last metric substitutes the catalog default with id `"1"`.
#[derive(Debug, Clone)]
pub struct MetricAggregationReducer {
    catalog: Arc<Catalog>,
}

impl MetricAggregationReducer {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    fn add(&self, state: &[MetricAggregation]) -> Vec<MetricAggregation> {
        let mut next = state.to_vec();
        next.push(self.catalog.default_metric(next_id(state)));
        next
    }

    fn remove(&self, state: &[MetricAggregation], id: &str) -> Vec<MetricAggregation> {
        let removed = if contains_id(state, id) {
            self.removal_set(state, id)
        } else {
            tracing::warn!("remove_metric: no metric with id '{}'", id);
            BTreeSet::new()
        };

        let remaining: Vec<MetricAggregation> = state
            .iter()
            .filter(|metric| !removed.contains(&metric.id))
            .cloned()
            .collect();

        if remaining.is_empty() {
            return vec![self.catalog.default_metric("1")];
        }
        remaining
    }

    /// `id` plus every pipeline metric that reads from it, transitively
    fn removal_set(&self, state: &[MetricAggregation], id: &str) -> BTreeSet<String> {
        let mut removed = BTreeSet::from([id.to_string()]);
        let mut pending = vec![id.to_string()];

        while let Some(parent) = pending.pop() {
            for metric in state {
                if !removed.contains(&metric.id) && self.reads_from(metric, &parent) {
                    removed.insert(metric.id.clone());
                    pending.push(metric.id.clone());
                }
            }
        }
        removed
    }

    fn reads_from(&self, metric: &MetricAggregation, parent_id: &str) -> bool {
        let config = self.catalog.metric(metric.agg_type);
        if config.supports_multiple_bucket_paths {
            return metric
                .pipeline_variables
                .as_ref()
                .is_some_and(|vars| vars.iter().any(|v| v.pipeline_agg == parent_id));
        }
        config.is_pipeline_agg && metric.field.as_deref() == Some(parent_id)
    }

    fn change_type(
        &self,
        state: &[MetricAggregation],
        id: &str,
        new_type: MetricType,
    ) -> Vec<MetricAggregation> {
        if !contains_id(state, id) {
            tracing::warn!("change_metric_type: no metric with id '{}'", id);
            return state.to_vec();
        }

        // A single-metric type evicts every other metric.
        let single = self.catalog.is_single_metric(new_type);

        // Prior field, settings and meta are not carried across types.
        state
            .iter()
            .filter(|metric| !single || metric.id == id)
            .map(|metric| {
                if metric.id == id {
                    MetricAggregation::new(metric.id.clone(), new_type)
                } else {
                    metric.clone()
                }
            })
            .collect()
    }

    fn change_setting(
        &self,
        state: &[MetricAggregation],
        id: &str,
        setting: &str,
        value: &str,
    ) -> Vec<MetricAggregation> {
        update_by_id(state, id, |metric| {
            if !self.catalog.metric(metric.agg_type).has_settings {
                tracing::warn!(
                    "change_metric_setting: '{}' metrics have no settings (id '{}')",
                    metric.agg_type,
                    metric.id
                );
                return metric.clone();
            }

            let mut settings = metric.settings.clone().unwrap_or_default();
            settings.insert(setting.to_string(), value.to_string());

            MetricAggregation {
                settings: Some(normalize_settings(settings)),
                ..metric.clone()
            }
        })
    }

    fn change_meta(
        &self,
        state: &[MetricAggregation],
        id: &str,
        meta: &str,
        value: &str,
    ) -> Vec<MetricAggregation> {
        update_by_id(state, id, |metric| {
            if !self.catalog.metric(metric.agg_type).has_meta {
                tracing::warn!(
                    "change_metric_meta: '{}' metrics have no meta (id '{}')",
                    metric.agg_type,
                    metric.id
                );
                return metric.clone();
            }

            // Unlike settings, empty meta values are kept.
            let mut entries = metric.meta.clone().unwrap_or_default();
            entries.insert(meta.to_string(), value.to_string());

            MetricAggregation {
                meta: Some(entries),
                ..metric.clone()
            }
        })
    }
}

/// Shallow merge of a top-level attribute through the serialized form.
///
/// Known attributes (`field`, `hide`, `pipelineVariables`, ...) land in their
/// typed fields; anything else is kept in `extra`.
fn merge_attribute(metric: &MetricAggregation, attribute: &str, value: &Value) -> MetricAggregation {
    let merged = serde_json::to_value(metric).and_then(|mut object| {
        if let Value::Object(ref mut map) = object {
            map.insert(attribute.to_string(), value.clone());
        }
        serde_json::from_value::<MetricAggregation>(object)
    });

    match merged {
        Ok(metric) => metric,
        Err(e) => {
            tracing::warn!(
                "change_metric_attribute: cannot set '{}' on metric '{}': {}",
                attribute,
                metric.id,
                e
            );
            metric.clone()
        }
    }
}

impl Reducer for MetricAggregationReducer {
    type Item = MetricAggregation;

    fn reduce(&self, state: &[MetricAggregation], action: &EditorAction) -> Vec<MetricAggregation> {
        match action {
            EditorAction::AddMetric => self.add(state),

            EditorAction::RemoveMetric { id } => self.remove(state, id),

            EditorAction::ChangeMetricType { id, metric_type } => {
                self.change_type(state, id, *metric_type)
            }

            EditorAction::ChangeMetricField { id, field } => update_by_id(state, id, |metric| {
                MetricAggregation {
                    field: Some(field.clone()),
                    ..metric.clone()
                }
            }),

            EditorAction::ToggleMetricVisibility { id } => update_by_id(state, id, |metric| {
                MetricAggregation {
                    hide: Some(!metric.hide.unwrap_or(false)),
                    ..metric.clone()
                }
            }),

            EditorAction::ChangeMetricSetting { id, setting, value } => {
                self.change_setting(state, id, setting, value)
            }

            EditorAction::ChangeMetricMeta { id, meta, value } => {
                self.change_meta(state, id, meta, value)
            }

            EditorAction::ChangeMetricAttribute {
                id,
                attribute,
                value,
            } => update_by_id(state, id, |metric| merge_attribute(metric, attribute, value)),

            EditorAction::AddBucketAggregation
            | EditorAction::RemoveBucketAggregation { .. }
            | EditorAction::ChangeBucketAggregationType { .. }
            | EditorAction::ChangeBucketAggregationField { .. }
            | EditorAction::ChangeBucketAggregationSetting { .. } => state.to_vec(),
        }
    }
}
