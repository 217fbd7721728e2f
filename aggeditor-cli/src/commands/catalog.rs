use aggeditor::Catalog;
use anyhow::Result;
use serde_json::json;

fn flag(set: bool, name: &str) -> Option<&str> {
    set.then_some(name)
}

/// Print the catalog as a table, or as JSON
pub fn run_catalog(catalog: &Catalog, as_json: bool) -> Result<()> {
    if as_json {
        let metrics: serde_json::Map<String, serde_json::Value> = catalog
            .metrics()
            .map(|(t, c)| -> Result<(String, serde_json::Value)> {
                Ok((t.to_string(), serde_json::to_value(c)?))
            })
            .collect::<Result<_>>()?;
        let buckets: serde_json::Map<String, serde_json::Value> = catalog
            .buckets()
            .map(|(t, c)| -> Result<(String, serde_json::Value)> {
                Ok((t.to_string(), serde_json::to_value(c)?))
            })
            .collect::<Result<_>>()?;

        let body = json!({
            "default_metric_type": catalog.default_metric_type(),
            "default_bucket_type": catalog.default_bucket_type(),
            "metrics": metrics,
            "buckets": buckets,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("Metric aggregations (default: {})", catalog.default_metric_type());
    println!("--------------------------------------------------------------------------------");
    for (agg_type, config) in catalog.metrics() {
        let flags: Vec<&str> = [
            flag(config.requires_field, "field"),
            flag(config.is_pipeline_agg, "pipeline"),
            flag(config.supports_multiple_bucket_paths, "multi-path"),
            flag(config.is_single_metric, "single-metric"),
            flag(config.has_settings, "settings"),
            flag(config.has_meta, "meta"),
        ]
        .into_iter()
        .flatten()
        .collect();
        println!("  {:<16} {:<20} {}", agg_type, config.label, flags.join(", "));
    }

    println!();
    println!("Bucket aggregations (default: {})", catalog.default_bucket_type());
    println!("--------------------------------------------------------------------------------");
    for (agg_type, config) in catalog.buckets() {
        println!(
            "  {:<16} {:<20} {}",
            agg_type,
            config.label,
            if config.requires_field { "field" } else { "" }
        );
    }

    Ok(())
}
