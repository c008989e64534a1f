//! DC power and resistance reduction over sweep collections.

use crate::error::{AnalysisError, AnalysisResult};
use crate::stats::summary_statistics;
use lib_types::{SignalDC, SignalDCCollection, SignalMetricsData, SignalTraceDC, UnitKind, OHM, V, W};

/// Compute or pass through the power trace of a DC sweep collection.
///
/// If a power-role trace already exists it is returned as-is (wrapped in a
/// fresh [`SignalDC`], unit watt); otherwise power is the elementwise
/// product of the voltage and current traces found among the inputs.
///
/// The threshold ratios window the trace to the samples whose input
/// voltage falls within the given fractions of the voltage span
/// (inclusive). The defaults `(0, 1)` keep every sample and require no
/// voltage trace on the pass-through path.
pub fn calculate_power_signal_from_collection(
    collection: &SignalDCCollection,
    lower_threshold_ratio: f64,
    upper_threshold_ratio: f64,
) -> AnalysisResult<SignalDC> {
    if !(0.0..=1.0).contains(&lower_threshold_ratio)
        || !(0.0..=1.0).contains(&upper_threshold_ratio)
        || lower_threshold_ratio >= upper_threshold_ratio
    {
        return Err(AnalysisError::InvalidThreshold {
            lower: lower_threshold_ratio,
            upper: upper_threshold_ratio,
        });
    }

    let power_values = match collection.power_trace_by_kind(UnitKind::Power) {
        Some(trace) if !trace.is_empty() => trace.values.clone(),
        _ => {
            let voltage = collection
                .input_trace_by_kind(UnitKind::Voltage)
                .ok_or_else(|| {
                    AnalysisError::MissingSignal("Voltage trace not found among inputs.".to_string())
                })?;
            let current = collection
                .input_trace_by_kind(UnitKind::Current)
                .ok_or_else(|| {
                    AnalysisError::MissingSignal("Current trace not found among inputs.".to_string())
                })?;
            if voltage.len() != current.len() {
                return Err(AnalysisError::LengthMismatch(
                    "Voltage and Current arrays must be of the same length.".to_string(),
                ));
            }
            voltage
                .values
                .iter()
                .zip(current.values.iter())
                .map(|(v, i)| v * i)
                .collect()
        }
    };

    let windowed = if lower_threshold_ratio == 0.0 && upper_threshold_ratio == 1.0 {
        power_values
    } else {
        window_by_vin_span(
            collection,
            &power_values,
            lower_threshold_ratio,
            upper_threshold_ratio,
        )?
    };

    Ok(SignalDC::new(vec![SignalTraceDC::new(W, windowed)]))
}

/// Keep the samples whose input voltage lies within the given fractions of
/// the voltage span, bounds inclusive.
fn window_by_vin_span(
    collection: &SignalDCCollection,
    power_values: &[f64],
    lower_ratio: f64,
    upper_ratio: f64,
) -> AnalysisResult<Vec<f64>> {
    let vin = input_voltage_values(collection)?;
    if vin.len() != power_values.len() {
        return Err(AnalysisError::LengthMismatch(
            "Input voltage and Power arrays must be of the same length.".to_string(),
        ));
    }

    let (vmin, vmax) = vin
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let span = vmax - vmin;
    let lo = vmin + lower_ratio * span;
    let hi = vmin + upper_ratio * span;

    let windowed: Vec<f64> = vin
        .iter()
        .zip(power_values.iter())
        .filter(|(v, _)| **v >= lo && **v <= hi)
        .map(|(_, p)| *p)
        .collect();

    if windowed.is_empty() {
        return Err(AnalysisError::RangeEmpty(format!(
            "threshold window [{lo}, {hi}] V contains no samples"
        )));
    }
    Ok(windowed)
}

fn input_voltage_values(collection: &SignalDCCollection) -> AnalysisResult<&[f64]> {
    match collection.input_trace_by_kind(UnitKind::Voltage) {
        Some(trace) if !trace.is_empty() => Ok(&trace.values),
        _ => Err(AnalysisError::MissingSignal(
            "Input voltage trace not found or empty.".to_string(),
        )),
    }
}

/// Summary statistics over the sweep's power trace, optionally restricted
/// to samples whose input voltage lies within `vin_range` (inclusive).
pub fn get_power_metrics(
    collection: &SignalDCCollection,
    vin_range: Option<(f64, f64)>,
) -> AnalysisResult<SignalMetricsData> {
    let power_signal = calculate_power_signal_from_collection(collection, 0.0, 1.0)?;
    let power = power_signal
        .values_by_kind(UnitKind::Power)
        .unwrap_or_default();

    let selected: Vec<f64> = match vin_range {
        None => power.to_vec(),
        Some((low, high)) => {
            let vin = input_voltage_values(collection)?;
            if vin.len() != power.len() {
                return Err(AnalysisError::LengthMismatch(
                    "Input voltage and Power arrays must be of the same length.".to_string(),
                ));
            }
            vin.iter()
                .zip(power.iter())
                .filter(|(v, _)| **v >= low && **v <= high)
                .map(|(_, p)| *p)
                .collect()
        }
    };

    if selected.is_empty() {
        return Err(AnalysisError::RangeEmpty(
            "no power samples within the requested input-voltage range".to_string(),
        ));
    }

    Ok(summary_statistics(&selected)?.with_unit(W))
}

/// Map the power extrema back onto the input-voltage axis.
///
/// Returns a voltage-unit summary whose `min`/`max` are the input voltages
/// at the indices of minimum and maximum power (first occurrence wins on
/// ties); `mean` and `standard_deviation` summarize the voltage trace.
pub fn get_power_map_vin_metrics(
    collection: &SignalDCCollection,
) -> AnalysisResult<SignalMetricsData> {
    let vin = input_voltage_values(collection)?;

    let power_signal = calculate_power_signal_from_collection(collection, 0.0, 1.0)?;
    let power = power_signal
        .values_by_kind(UnitKind::Power)
        .unwrap_or_default();

    if vin.len() != power.len() {
        return Err(AnalysisError::LengthMismatch(
            "Input voltage and Power arrays must be of the same length.".to_string(),
        ));
    }

    let mut min_index = 0;
    let mut max_index = 0;
    for (i, &p) in power.iter().enumerate() {
        if p < power[min_index] {
            min_index = i;
        }
        if p > power[max_index] {
            max_index = i;
        }
    }

    let vin_summary = summary_statistics(vin)?;
    Ok(SignalMetricsData {
        value: vin[max_index],
        mean: vin_summary.mean,
        min: vin[min_index],
        max: vin[max_index],
        standard_deviation: vin_summary.standard_deviation,
        count: vin.len() as u64,
        unit: V,
    })
}

/// Summary statistics over the elementwise resistance V/I of the input
/// traces. Samples with zero current (non-finite ratios) are dropped;
/// an all-dropped sweep is a range error, not a zero metric.
pub fn get_resistance_metrics(
    collection: &SignalDCCollection,
) -> AnalysisResult<SignalMetricsData> {
    let voltage = collection
        .input_trace_by_kind(UnitKind::Voltage)
        .ok_or_else(|| {
            AnalysisError::MissingSignal("Voltage trace not found among inputs.".to_string())
        })?;
    let current = collection
        .input_trace_by_kind(UnitKind::Current)
        .ok_or_else(|| {
            AnalysisError::MissingSignal("Current trace not found among inputs.".to_string())
        })?;
    if voltage.len() != current.len() {
        return Err(AnalysisError::LengthMismatch(
            "Voltage and Current arrays must be of the same length.".to_string(),
        ));
    }

    let resistance: Vec<f64> = voltage
        .values
        .iter()
        .zip(current.values.iter())
        .map(|(v, i)| v / i)
        .filter(|r| r.is_finite())
        .collect();

    if resistance.is_empty() {
        return Err(AnalysisError::RangeEmpty(
            "no finite resistance samples (all currents zero?)".to_string(),
        ));
    }

    Ok(summary_statistics(&resistance)?.with_unit(OHM))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_types::{A, V as VOLT, W as WATT};

    fn power_collection() -> SignalDCCollection {
        SignalDCCollection::new(
            vec![SignalDC::new(vec![SignalTraceDC::new(
                VOLT,
                vec![10.0, 20.0, 15.0],
            )])],
            vec![],
            vec![SignalDC::new(vec![SignalTraceDC::new(
                WATT,
                vec![100.0, 200.0, 150.0],
            )])],
        )
    }

    #[test]
    fn test_power_passthrough_unchanged() {
        let result = calculate_power_signal_from_collection(&power_collection(), 0.0, 1.0).unwrap();

        assert_eq!(result.trace_list.len(), 1);
        assert_eq!(result.trace_list[0].values, vec![100.0, 200.0, 150.0]);
        assert_eq!(result.trace_list[0].unit.name, "watt");
        assert_eq!(result.trace_list[0].unit.kind, lib_types::UnitKind::Power);
    }

    #[test]
    fn test_threshold_ordering_validated_eagerly() {
        let err =
            calculate_power_signal_from_collection(&power_collection(), 0.5, 0.3).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidThreshold { .. }));
        assert_eq!(
            err.to_string(),
            "Threshold ratios must satisfy 0 <= lower < upper <= 1."
        );

        // Validation happens before the collection is consulted at all.
        let empty = SignalDCCollection::default();
        assert!(matches!(
            calculate_power_signal_from_collection(&empty, 1.2, 1.5),
            Err(AnalysisError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn test_power_computed_from_voltage_current() {
        let collection = SignalDCCollection::new(
            vec![SignalDC::new(vec![
                SignalTraceDC::new(VOLT, vec![5.0, 15.0, 25.0]),
                SignalTraceDC::new(A, vec![2.0, 4.0, 6.0]),
            ])],
            vec![],
            vec![],
        );

        let result = calculate_power_signal_from_collection(&collection, 0.0, 1.0).unwrap();
        assert_eq!(result.trace_list[0].values, vec![10.0, 60.0, 150.0]);
    }

    #[test]
    fn test_power_computation_missing_current() {
        let collection = SignalDCCollection::new(
            vec![SignalDC::new(vec![SignalTraceDC::new(VOLT, vec![5.0])])],
            vec![],
            vec![],
        );
        assert!(matches!(
            calculate_power_signal_from_collection(&collection, 0.0, 1.0),
            Err(AnalysisError::MissingSignal(_))
        ));
    }

    #[test]
    fn test_threshold_window_filters_by_vin_span() {
        // vin span is [10, 20]; keeping the upper half keeps vin in [15, 20].
        let result = calculate_power_signal_from_collection(&power_collection(), 0.5, 1.0).unwrap();
        assert_eq!(result.trace_list[0].values, vec![200.0, 150.0]);
    }

    #[test]
    fn test_power_metrics_summary() {
        let metrics = get_power_metrics(&power_collection(), None).unwrap();
        assert!((metrics.min - 100.0).abs() < 1e-12);
        assert!((metrics.max - 200.0).abs() < 1e-12);
        assert!((metrics.mean - 150.0).abs() < 1e-12);
        assert_eq!(metrics.count, 3);
        assert_eq!(metrics.unit.kind.datum(), "power");
    }

    #[test]
    fn test_power_metrics_vin_range_filter() {
        let metrics = get_power_metrics(&power_collection(), Some((12.0, 20.0))).unwrap();
        // vin 10 falls outside, leaving power samples 200 and 150.
        assert_eq!(metrics.count, 2);
        assert!((metrics.min - 150.0).abs() < 1e-12);
    }

    #[test]
    fn test_power_metrics_empty_range() {
        let err = get_power_metrics(&power_collection(), Some((100.0, 200.0))).unwrap_err();
        assert!(matches!(err, AnalysisError::RangeEmpty(_)));
    }

    #[test]
    fn test_vin_map_extrema() {
        let metrics = get_power_map_vin_metrics(&power_collection()).unwrap();
        // min power 100 at vin 10, max power 200 at vin 20.
        assert!((metrics.min - 10.0).abs() < 1e-12);
        assert!((metrics.max - 20.0).abs() < 1e-12);
        assert_eq!(metrics.unit.kind.datum(), "voltage");
    }

    #[test]
    fn test_vin_map_first_occurrence_wins_on_ties() {
        let collection = SignalDCCollection::new(
            vec![SignalDC::new(vec![SignalTraceDC::new(
                VOLT,
                vec![10.0, 20.0, 30.0],
            )])],
            vec![],
            vec![SignalDC::new(vec![SignalTraceDC::new(
                WATT,
                vec![100.0, 200.0, 200.0],
            )])],
        );
        let metrics = get_power_map_vin_metrics(&collection).unwrap();
        assert!((metrics.max - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_vin_map_length_mismatch() {
        let collection = SignalDCCollection::new(
            vec![SignalDC::new(vec![SignalTraceDC::new(
                VOLT,
                vec![10.0, 20.0],
            )])],
            vec![],
            vec![SignalDC::new(vec![SignalTraceDC::new(
                WATT,
                vec![100.0, 200.0, 150.0],
            )])],
        );
        let err = get_power_map_vin_metrics(&collection).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Input voltage and Power arrays must be of the same length."
        );
    }

    #[test]
    fn test_vin_map_missing_voltage() {
        let collection = SignalDCCollection::new(
            vec![],
            vec![],
            vec![SignalDC::new(vec![SignalTraceDC::new(
                WATT,
                vec![100.0, 200.0, 150.0],
            )])],
        );
        let err = get_power_map_vin_metrics(&collection).unwrap_err();
        assert_eq!(err.to_string(), "Input voltage trace not found or empty.");
    }

    #[test]
    fn test_resistance_metrics_drops_zero_current() {
        let collection = SignalDCCollection::new(
            vec![SignalDC::new(vec![
                SignalTraceDC::new(VOLT, vec![1.0, 2.0, 3.0]),
                SignalTraceDC::new(A, vec![0.0, 1.0, 1.5]),
            ])],
            vec![],
            vec![],
        );
        let metrics = get_resistance_metrics(&collection).unwrap();
        assert_eq!(metrics.count, 2);
        assert!((metrics.mean - 2.0).abs() < 1e-12);
        assert_eq!(metrics.unit.kind.datum(), "resistance");
    }
}
