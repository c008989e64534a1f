//! Result printing for the CLI commands.

use crate::OutputFormat;
use anyhow::Result;
use lib_types::{ExperimentData, SignalMetricsData, SignalMetricsMeasurementCollection};

/// Print one named metrics summary.
pub fn print_metrics(name: &str, metrics: &SignalMetricsData, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{name} [{}]", metrics.unit.name);
            println!("  value: {:.6e}", metrics.value);
            println!("  mean:  {:.6e}", metrics.mean);
            println!("  min:   {:.6e}", metrics.min);
            println!("  max:   {:.6e}", metrics.max);
            println!("  std:   {:.6e}", metrics.standard_deviation);
            println!("  count: {}", metrics.count);
        }
        OutputFormat::Json => {
            let json = serde_json::json!({ "name": name, "metrics": metrics });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }
    Ok(())
}

/// Print a whole measurement collection in table row order.
pub fn print_measurement_collection(
    collection: &SignalMetricsMeasurementCollection,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{} measurement(s)", collection.len());
            for (name, metrics) in collection.iter() {
                println!(
                    "  {name}: value={:.6e} mean={:.6e} min={:.6e} max={:.6e} std={:.6e} count={}",
                    metrics.value,
                    metrics.mean,
                    metrics.min,
                    metrics.max,
                    metrics.standard_deviation,
                    metrics.count
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(collection)?);
        }
    }
    Ok(())
}

/// Print a composed experiment summary, or the full dataset as JSON.
pub fn print_experiment_data(data: &ExperimentData, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("Experiment: {}", data.experiment.name);
            println!("  Kind: {:?}", data.experiment.measurement_kind);
            println!("  Sweep points: {}", data.experiment.parameters.len());
            for parameter in &data.experiment.parameters {
                println!("    {parameter}");
            }
            if let Some(dir) = &data.experiment.parent_directory {
                println!("  Directory: {:?}", dir);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
    }
    Ok(())
}
