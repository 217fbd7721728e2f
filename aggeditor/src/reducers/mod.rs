//! Pure reducers over the metric and bucket lists.

mod bucket;
mod metric;

pub use bucket::BucketAggregationReducer;
pub use metric::MetricAggregationReducer;

use crate::actions::EditorAction;
use crate::aggregations::{Aggregation, Settings};

/// `(current list, action) -> new list`. Never mutates its input and never
/// fails; actions outside the reducer's domain return the list unchanged.
pub trait Reducer {
    type Item;

    fn reduce(&self, state: &[Self::Item], action: &EditorAction) -> Vec<Self::Item>;
}

/// Next id for a list: one past the largest numeric id. Non-numeric ids do
/// not take part in numbering.
pub(crate) fn next_id<A: Aggregation>(state: &[A]) -> String {
    let max = state
        .iter()
        .filter_map(|agg| agg.id().parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

/// Copy of `state` with `f` applied to the entry whose id is `id`.
///
/// A missing id leaves every entry untouched and logs a warning.
pub(crate) fn update_by_id<A, F>(state: &[A], id: &str, f: F) -> Vec<A>
where
    A: Aggregation + Clone,
    F: Fn(&A) -> A,
{
    if !contains_id(state, id) {
        tracing::warn!("No aggregation with id '{}', list left unchanged", id);
        return state.to_vec();
    }

    state
        .iter()
        .map(|agg| if agg.id() == id { f(agg) } else { agg.clone() })
        .collect()
}

pub(crate) fn contains_id<A: Aggregation>(state: &[A], id: &str) -> bool {
    state.iter().any(|agg| agg.id() == id)
}

/// Drop every key whose value is the empty string
pub(crate) fn normalize_settings(settings: Settings) -> Settings {
    settings.into_iter().filter(|(_, v)| !v.is_empty()).collect()
}
