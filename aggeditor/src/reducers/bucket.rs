use super::{next_id, update_by_id, Reducer};
use crate::actions::EditorAction;
use crate::aggregations::{BucketAggregation, BucketType};
use crate::catalog::Catalog;
use std::sync::Arc;

/// Reducer owning the ordered list of bucket aggregations.
///
/// Also reacts to `change_metric_type`: a single-metric type empties the
/// list, and leaving single-metric mode on an empty list restores one default
/// bucket.
#[derive(Debug, Clone)]
pub struct BucketAggregationReducer {
    catalog: Arc<Catalog>,
}

impl BucketAggregationReducer {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    fn add(&self, state: &[BucketAggregation]) -> Vec<BucketAggregation> {
        let mut next = state.to_vec();
        next.push(self.catalog.default_bucket(next_id(state)));
        next
    }

    /// Removes `id` together with every bucket nested below it, i.e. the
    /// whole suffix of the list starting at `id`.
    fn remove(&self, state: &[BucketAggregation], id: &str) -> Vec<BucketAggregation> {
        match state.iter().position(|agg| agg.id == id) {
            Some(index) => state[..index].to_vec(),
            None => {
                tracing::warn!("remove_bucket_aggregation: no bucket with id '{}'", id);
                state.to_vec()
            }
        }
    }

    fn change_type(
        &self,
        state: &[BucketAggregation],
        id: &str,
        new_type: BucketType,
    ) -> Vec<BucketAggregation> {
        // Field and settings survive a bucket type change.
        update_by_id(state, id, |agg| BucketAggregation {
            agg_type: new_type,
            ..agg.clone()
        })
    }

    fn change_setting(
        &self,
        state: &[BucketAggregation],
        id: &str,
        setting: &str,
        value: &str,
    ) -> Vec<BucketAggregation> {
        update_by_id(state, id, |agg| {
            let mut settings = agg.settings.clone().unwrap_or_default();
            settings.insert(setting.to_string(), value.to_string());
            BucketAggregation {
                settings: Some(settings),
                ..agg.clone()
            }
        })
    }
}

impl Reducer for BucketAggregationReducer {
    type Item = BucketAggregation;

    fn reduce(&self, state: &[BucketAggregation], action: &EditorAction) -> Vec<BucketAggregation> {
        match action {
            EditorAction::AddBucketAggregation => self.add(state),

            EditorAction::RemoveBucketAggregation { id } => self.remove(state, id),

            EditorAction::ChangeBucketAggregationType { id, bucket_type } => {
                self.change_type(state, id, *bucket_type)
            }

            EditorAction::ChangeBucketAggregationField { id, field } => {
                update_by_id(state, id, |agg| BucketAggregation {
                    field: Some(field.clone()),
                    ..agg.clone()
                })
            }

            EditorAction::ChangeBucketAggregationSetting { id, setting, value } => {
                self.change_setting(state, id, setting, value)
            }

            EditorAction::ChangeMetricType { metric_type, .. } => {
                if self.catalog.is_single_metric(*metric_type) {
                    return Vec::new();
                }
                if state.is_empty() {
                    return vec![self.catalog.default_bucket("1")];
                }
                state.to_vec()
            }

            EditorAction::AddMetric
            | EditorAction::RemoveMetric { .. }
            | EditorAction::ChangeMetricField { .. }
            | EditorAction::ToggleMetricVisibility { .. }
            | EditorAction::ChangeMetricSetting { .. }
            | EditorAction::ChangeMetricMeta { .. }
            | EditorAction::ChangeMetricAttribute { .. } => state.to_vec(),
        }
    }
}
