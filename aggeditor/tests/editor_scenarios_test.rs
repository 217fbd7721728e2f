//! End-to-end editing scenarios through the public API.

use aggeditor::{
    BucketAggregation, BucketAggregationReducer, BucketType, Catalog, EditorAction, EditorState,
    MetricAggregation, MetricAggregationReducer, MetricType, QueryEditor, Reducer, Settings,
};
use serde_json::json;
use std::sync::Arc;

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::builtin())
}

#[test]
fn test_add_on_empty_metric_list() {
    let reducer = MetricAggregationReducer::new(catalog());

    let state = reducer.reduce(&[], &EditorAction::add_metric());
    assert_eq!(state, vec![MetricAggregation::new("1", MetricType::Count)]);

    let state = reducer.reduce(&state, &EditorAction::add_metric());
    assert_eq!(state[1], MetricAggregation::new("2", MetricType::Count));
}

#[test]
fn test_change_bucket_type_scenario() {
    let reducer = BucketAggregationReducer::new(catalog());
    let state = vec![
        BucketAggregation::new("1", BucketType::DateHistogram),
        BucketAggregation::new("2", BucketType::DateHistogram),
    ];

    let next = reducer.reduce(
        &state,
        &EditorAction::change_bucket_aggregation_type("2", BucketType::Histogram),
    );
    assert_eq!(
        next,
        vec![
            BucketAggregation::new("1", BucketType::DateHistogram),
            BucketAggregation::new("2", BucketType::Histogram),
        ]
    );
}

#[test]
fn test_raw_data_collapses_and_restores_pipeline() {
    let mut editor = QueryEditor::with_state(
        catalog(),
        EditorState {
            metrics: vec![MetricAggregation::new("1", MetricType::Avg)],
            bucket_aggs: vec![BucketAggregation::new("1", BucketType::DateHistogram)],
        },
    );

    let state = editor.dispatch(&EditorAction::change_metric_type("1", MetricType::RawData));
    assert_eq!(state.metrics.len(), 1);
    assert_eq!(state.bucket_aggs.len(), 0);

    let state = editor.dispatch(&EditorAction::change_metric_type("1", MetricType::Max));
    assert_eq!(state.bucket_aggs.len(), 1);
}

#[test]
fn test_bucket_setting_scenario() {
    let reducer = BucketAggregationReducer::new(catalog());
    let state = vec![BucketAggregation::new("1", BucketType::DateHistogram)
        .with_setting("min_doc_count", "0")];

    let next = reducer.reduce(
        &state,
        &EditorAction::change_bucket_aggregation_setting("1", "min_doc_count", "1"),
    );
    assert_eq!(
        next[0].settings,
        Some(Settings::from([("min_doc_count".to_string(), "1".to_string())]))
    );
}

#[test]
fn test_cascading_bucket_removal() {
    let reducer = BucketAggregationReducer::new(catalog());
    let state = vec![
        BucketAggregation::new("1", BucketType::Terms),
        BucketAggregation::new("2", BucketType::Terms),
        BucketAggregation::new("3", BucketType::DateHistogram),
    ];

    assert!(reducer
        .reduce(&state, &EditorAction::remove_bucket_aggregation("1"))
        .is_empty());
}

#[test]
fn test_full_editing_session() {
    let mut editor = QueryEditor::new(catalog());

    let actions = vec![
        EditorAction::change_metric_type("1", MetricType::Avg),
        EditorAction::change_metric_field("1", "response_time"),
        EditorAction::change_metric_setting("1", "missing", "0"),
        EditorAction::add_metric(),
        EditorAction::change_metric_type("2", MetricType::Derivative),
        EditorAction::change_metric_field("2", "1"),
        EditorAction::change_bucket_aggregation_field("1", "@timestamp"),
        EditorAction::add_bucket_aggregation(),
        EditorAction::change_bucket_aggregation_type("2", BucketType::Terms),
        EditorAction::change_bucket_aggregation_field("2", "host"),
    ];
    editor.dispatch_all(&actions);

    let expected: EditorState = serde_json::from_value(json!({
        "metrics": [
            {"id": "1", "type": "avg", "field": "response_time", "settings": {"missing": "0"}},
            {"id": "2", "type": "derivative", "field": "1"}
        ],
        "bucketAggs": [
            {"id": "1", "type": "date_histogram", "field": "@timestamp", "settings": {"interval": "auto"}},
            {"id": "2", "type": "terms", "field": "host", "settings": {"interval": "auto"}}
        ]
    }))
    .unwrap();
    assert_eq!(editor.state(), &expected);

    // Removing the avg also removes the derivative reading from it, which
    // leaves the default metric in place.
    let state = editor.dispatch(&EditorAction::remove_metric("1"));
    assert_eq!(state.metrics, vec![MetricAggregation::new("1", MetricType::Count)]);
    assert_eq!(state.bucket_aggs.len(), 2);
}

#[test]
fn test_state_serializes_in_query_shape() {
    let editor = QueryEditor::new(catalog());
    let value = serde_json::to_value(editor.state()).unwrap();
    assert_eq!(
        value,
        json!({
            "metrics": [{"id": "1", "type": "count"}],
            "bucketAggs": [{"id": "1", "type": "date_histogram", "settings": {"interval": "auto"}}]
        })
    );
}
