use crate::aggregations::types::{
    BucketAggregation, BucketType, MetricAggregation, MetricType, PipelineVariable, Settings,
};
use std::collections::BTreeMap;

impl MetricAggregation {
    pub fn new(id: impl Into<String>, agg_type: MetricType) -> Self {
        Self {
            id: id.into(),
            agg_type,
            hide: None,
            field: None,
            settings: None,
            meta: None,
            pipeline_variables: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_hide(mut self, hide: bool) -> Self {
        self.hide = Some(hide);
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings
            .get_or_insert_with(Settings::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta
            .get_or_insert_with(Settings::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_pipeline_variable(
        mut self,
        name: impl Into<String>,
        pipeline_agg: impl Into<String>,
    ) -> Self {
        self.pipeline_variables
            .get_or_insert_with(Vec::new)
            .push(PipelineVariable {
                name: name.into(),
                pipeline_agg: pipeline_agg.into(),
            });
        self
    }
}

impl BucketAggregation {
    pub fn new(id: impl Into<String>, agg_type: BucketType) -> Self {
        Self {
            id: id.into(),
            agg_type,
            hide: None,
            field: None,
            settings: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings
            .get_or_insert_with(Settings::new)
            .insert(key.into(), value.into());
        self
    }
}
