mod builder;
pub mod types;

pub use types::{
    Aggregation, BucketAggregation, BucketType, MetricAggregation, MetricType, PipelineVariable,
    Settings,
};
