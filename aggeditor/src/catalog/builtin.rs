use super::{BucketTypeConfig, MetricTypeConfig};
use crate::aggregations::{BucketType, MetricType, Settings};

fn settings(pairs: &[(&str, &str)]) -> Option<Settings> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

struct Flags {
    requires_field: bool,
    is_pipeline_agg: bool,
    supports_multiple_bucket_paths: bool,
    is_single_metric: bool,
    has_settings: bool,
    has_meta: bool,
}

const PLAIN: Flags = Flags {
    requires_field: true,
    is_pipeline_agg: false,
    supports_multiple_bucket_paths: false,
    is_single_metric: false,
    has_settings: true,
    has_meta: false,
};

const PIPELINE: Flags = Flags {
    is_pipeline_agg: true,
    ..PLAIN
};

const SINGLE: Flags = Flags {
    requires_field: false,
    is_single_metric: true,
    ..PLAIN
};

pub(super) fn metric(agg_type: MetricType) -> MetricTypeConfig {
    let (label, flags, default_settings, default_meta) = match agg_type {
        MetricType::Count => (
            "Count",
            Flags {
                requires_field: false,
                has_settings: false,
                ..PLAIN
            },
            None,
            None,
        ),
        MetricType::Avg => ("Average", PLAIN, None, None),
        MetricType::Sum => ("Sum", PLAIN, None, None),
        MetricType::Max => ("Max", PLAIN, None, None),
        MetricType::Min => ("Min", PLAIN, None, None),
        MetricType::ExtendedStats => (
            "Extended Stats",
            Flags {
                has_meta: true,
                ..PLAIN
            },
            Some(Settings::new()),
            settings(&[
                ("avg", "true"),
                ("max", "true"),
                ("min", "true"),
                ("std_deviation", "true"),
                ("std_deviation_bounds_lower", "true"),
                ("std_deviation_bounds_upper", "true"),
            ]),
        ),
        MetricType::Percentiles => (
            "Percentiles",
            PLAIN,
            settings(&[("percents", "25,50,75,95,99")]),
            None,
        ),
        MetricType::Cardinality => ("Unique Count", PLAIN, None, None),
        MetricType::TopMetrics => (
            "Top Metrics",
            Flags {
                requires_field: false,
                ..PLAIN
            },
            settings(&[("order", "desc")]),
            None,
        ),
        MetricType::Rate => ("Rate", PLAIN, None, None),
        MetricType::MovingAvg => (
            "Moving Average",
            PIPELINE,
            settings(&[("model", "simple"), ("window", "5")]),
            None,
        ),
        MetricType::MovingFn => (
            "Moving Function",
            PIPELINE,
            settings(&[("window", "5")]),
            None,
        ),
        MetricType::Derivative => ("Derivative", PIPELINE, None, None),
        MetricType::SerialDiff => ("Serial Difference", PIPELINE, settings(&[("lag", "1")]), None),
        MetricType::CumulativeSum => ("Cumulative Sum", PIPELINE, None, None),
        MetricType::BucketScript => (
            "Bucket Script",
            Flags {
                requires_field: false,
                supports_multiple_bucket_paths: true,
                ..PIPELINE
            },
            None,
            None,
        ),
        MetricType::RawDocument => ("Raw Document", SINGLE, settings(&[("size", "500")]), None),
        MetricType::RawData => ("Raw Data", SINGLE, settings(&[("size", "500")]), None),
        MetricType::Logs => ("Logs", SINGLE, settings(&[("limit", "500")]), None),
    };

    MetricTypeConfig {
        label: label.to_string(),
        requires_field: flags.requires_field,
        is_pipeline_agg: flags.is_pipeline_agg,
        supports_multiple_bucket_paths: flags.supports_multiple_bucket_paths,
        is_single_metric: flags.is_single_metric,
        has_settings: flags.has_settings,
        has_meta: flags.has_meta,
        default_settings,
        default_meta,
    }
}

pub(super) fn bucket(agg_type: BucketType) -> BucketTypeConfig {
    let (label, requires_field, default_settings) = match agg_type {
        BucketType::Terms => (
            "Terms",
            true,
            settings(&[
                ("min_doc_count", "1"),
                ("order", "desc"),
                ("orderBy", "_term"),
                ("size", "10"),
            ]),
        ),
        BucketType::Filters => ("Filters", false, None),
        BucketType::GeohashGrid => ("Geo Hash Grid", true, settings(&[("precision", "3")])),
        BucketType::DateHistogram => ("Date Histogram", true, settings(&[("interval", "auto")])),
        BucketType::Histogram => (
            "Histogram",
            true,
            settings(&[("interval", "1000"), ("min_doc_count", "0")]),
        ),
        BucketType::Nested => ("Nested (experimental)", true, None),
    };

    BucketTypeConfig {
        label: label.to_string(),
        requires_field,
        default_settings,
    }
}
