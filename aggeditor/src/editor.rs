//! Coordinator that replays each action against both reducers and commits
//! the two resulting lists as one snapshot.

use crate::actions::EditorAction;
use crate::aggregations::{BucketAggregation, MetricAggregation};
use crate::catalog::Catalog;
use crate::reducers::{BucketAggregationReducer, MetricAggregationReducer, Reducer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The aggregation part of a query
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    #[serde(default)]
    pub metrics: Vec<MetricAggregation>,
    #[serde(default)]
    pub bucket_aggs: Vec<BucketAggregation>,
}

impl EditorState {
    /// One default metric and one default bucket aggregation
    pub fn initial(catalog: &Catalog) -> Self {
        Self {
            metrics: vec![catalog.default_metric("1")],
            bucket_aggs: vec![catalog.default_bucket("1")],
        }
    }

    /// Restore the list invariants on a state loaded from outside the editor.
    ///
    /// - an empty metric list gets the default metric
    /// - a single-metric type keeps only the first such metric and no buckets
    /// - otherwise an empty bucket list gets the default bucket
    /// - empty-string metric settings are dropped
    pub fn repaired(mut self, catalog: &Catalog) -> Self {
        if self.metrics.is_empty() {
            tracing::debug!("Repair: adding default metric to empty metric list");
            self.metrics.push(catalog.default_metric("1"));
        }

        let single = self
            .metrics
            .iter()
            .position(|m| catalog.is_single_metric(m.agg_type));

        match single {
            Some(index) => {
                if self.metrics.len() > 1 || !self.bucket_aggs.is_empty() {
                    tracing::debug!(
                        "Repair: '{}' is a single-metric type, dropping other aggregations",
                        self.metrics[index].agg_type
                    );
                }
                let metric = self.metrics.swap_remove(index);
                self.metrics = vec![metric];
                self.bucket_aggs.clear();
            }
            None if self.bucket_aggs.is_empty() => {
                tracing::debug!("Repair: adding default bucket aggregation");
                self.bucket_aggs.push(catalog.default_bucket("1"));
            }
            None => {}
        }

        for metric in &mut self.metrics {
            if let Some(settings) = metric.settings.as_mut() {
                settings.retain(|_, v| !v.is_empty());
            }
        }

        self
    }
}

/// Owns the committed [`EditorState`] and both reducers.
#[derive(Debug, Clone)]
pub struct QueryEditor {
    catalog: Arc<Catalog>,
    metric_reducer: MetricAggregationReducer,
    bucket_reducer: BucketAggregationReducer,
    state: EditorState,
}

impl QueryEditor {
    /// Editor starting from [`EditorState::initial`]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let state = EditorState::initial(&catalog);
        Self::with_state(catalog, state)
    }

    /// Editor starting from an existing state, taken as is
    pub fn with_state(catalog: Arc<Catalog>, state: EditorState) -> Self {
        Self {
            metric_reducer: MetricAggregationReducer::new(catalog.clone()),
            bucket_reducer: BucketAggregationReducer::new(catalog.clone()),
            catalog,
            state,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn into_state(self) -> EditorState {
        self.state
    }

    /// Pure transition: both lists are derived from the same snapshot.
    ///
    /// A `change_metric_type` naming an absent metric leaves the whole state
    /// unchanged, so the bucket list never reacts to a type nobody holds.
    pub fn reduce(&self, state: &EditorState, action: &EditorAction) -> EditorState {
        if let EditorAction::ChangeMetricType { id, .. } = action {
            if !state.metrics.iter().any(|m| &m.id == id) {
                tracing::warn!("change_metric_type: no metric with id '{}'", id);
                return state.clone();
            }
        }

        EditorState {
            metrics: self.metric_reducer.reduce(&state.metrics, action),
            bucket_aggs: self.bucket_reducer.reduce(&state.bucket_aggs, action),
        }
    }

    /// Apply `action` and commit the new metric and bucket lists together
    pub fn dispatch(&mut self, action: &EditorAction) -> &EditorState {
        let next = self.reduce(&self.state, action);
        tracing::debug!(
            action = action.name(),
            metrics = next.metrics.len(),
            bucket_aggs = next.bucket_aggs.len(),
            "Dispatched editor action"
        );
        self.state = next;
        &self.state
    }

    /// Apply actions in order
    pub fn dispatch_all<'a, I>(&mut self, actions: I) -> &EditorState
    where
        I: IntoIterator<Item = &'a EditorAction>,
    {
        for action in actions {
            self.dispatch(action);
        }
        &self.state
    }
}
