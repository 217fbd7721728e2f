//! State engine for an aggregation pipeline editor.
//!
//! A query holds two ordered lists: metric aggregations and bucket
//! aggregations. Every edit is an [`EditorAction`] that is replayed against
//! both lists by pure reducers; the [`QueryEditor`] commits the two results
//! together.
//!
//! Bucket aggregations form an implicit tree by position: the bucket at
//! index `i` is the parent of every bucket after it. Selecting a
//! single-metric type (such as `raw_data`) collapses the pipeline to that
//! one metric and empties the bucket list.

pub mod actions;
pub mod aggregations;
pub mod catalog;
pub mod config;
pub mod editor;
pub mod error;
pub mod reducers;

pub use actions::EditorAction;
pub use aggregations::{
    BucketAggregation, BucketType, MetricAggregation, MetricType, PipelineVariable, Settings,
};
pub use catalog::{BucketTypeConfig, Catalog, MetricTypeConfig};
pub use config::EditorConfig;
pub use editor::{EditorState, QueryEditor};
pub use error::{Error, Result};
pub use reducers::{BucketAggregationReducer, MetricAggregationReducer, Reducer};
