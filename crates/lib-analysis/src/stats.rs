//! Summary statistics over sample slices.

use crate::error::{AnalysisError, AnalysisResult};
use lib_types::SignalMetricsData;

/// Min/max/mean/population-std/count over a non-empty slice.
///
/// `value` is set to the mean. Callers attach the unit from context.
pub fn summary_statistics(samples: &[f64]) -> AnalysisResult<SignalMetricsData> {
    if samples.is_empty() {
        return Err(AnalysisError::RangeEmpty(
            "cannot summarize an empty sample set".to_string(),
        ));
    }

    let count = samples.len();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &v in samples {
        min = min.min(v);
        max = max.max(v);
        sum += v;
    }
    let mean = sum / count as f64;

    let variance = samples.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / count as f64;
    let standard_deviation = variance.sqrt();

    Ok(SignalMetricsData::new(
        mean,
        mean,
        min,
        max,
        standard_deviation,
        count as u64,
    ))
}
