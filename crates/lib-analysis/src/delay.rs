//! Propagation delay between reference and DUT waveforms.
//!
//! A delay is the time offset between the first threshold crossings of a
//! paired reference/DUT capture. Crossing instants are linearly
//! interpolated between the straddling samples, so the resolution is
//! better than the capture's sample spacing.

use crate::error::{AnalysisError, AnalysisResult};
use lib_types::{
    PropagationDelayMeasurementDataCollection, SignalMetricsData, TimeSignalData, S,
};

/// Which edge of the waveform counts as a crossing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeKind {
    #[default]
    Rising,
    Falling,
    /// Either direction.
    Any,
}

impl EdgeKind {
    fn matches(&self, previous: f64, current: f64, threshold: f64) -> bool {
        match self {
            Self::Rising => previous < threshold && current >= threshold,
            Self::Falling => previous > threshold && current <= threshold,
            Self::Any => {
                (previous < threshold && current >= threshold)
                    || (previous > threshold && current <= threshold)
            }
        }
    }
}

/// Time of the first threshold crossing, linearly interpolated.
///
/// Returns `None` when the waveform never crosses. A first sample already
/// at or beyond the threshold does not count; a crossing needs a sample on
/// each side.
pub fn find_threshold_crossing(
    signal: &TimeSignalData,
    threshold: f64,
    edge: EdgeKind,
) -> Option<f64> {
    for i in 1..signal.data.len() {
        let previous = signal.data[i - 1];
        let current = signal.data[i];
        if edge.matches(previous, current, threshold) {
            let t0 = signal.time_s[i - 1];
            let t1 = signal.time_s[i];
            // A match implies the samples straddle the threshold, so the
            // denominator is nonzero.
            let fraction = (threshold - previous) / (current - previous);
            return Some(t0 + fraction * (t1 - t0));
        }
    }
    None
}

/// Propagation delay between the reference and DUT threshold crossings.
///
/// Positive when the DUT crossing trails the reference.
pub fn extract_propagation_delay(
    reference: &TimeSignalData,
    dut: &TimeSignalData,
    threshold: f64,
    edge: EdgeKind,
) -> AnalysisResult<f64> {
    if reference.is_empty() {
        return Err(AnalysisError::MissingSignal(
            "Reference waveform is empty.".to_string(),
        ));
    }
    if dut.is_empty() {
        return Err(AnalysisError::MissingSignal(
            "DUT waveform is empty.".to_string(),
        ));
    }

    let reference_t = find_threshold_crossing(reference, threshold, edge).ok_or_else(|| {
        AnalysisError::CrossingNotFound {
            signal: "reference waveform".to_string(),
        }
    })?;
    let dut_t =
        find_threshold_crossing(dut, threshold, edge).ok_or_else(|| {
            AnalysisError::CrossingNotFound {
                signal: "DUT waveform".to_string(),
            }
        })?;

    Ok(dut_t - reference_t)
}

/// Reduce a sweep's extracted data to per-point delay metrics.
///
/// The result is index-aligned with the sweep: a point that lacks either
/// waveform yields `None` (whether to abort or skip such a point is the
/// caller's decision, never made here). A point whose waveforms are
/// present but never cross the threshold is an error, not a silent `None`.
pub fn delay_metrics_from_sweep(
    sweep_data: &PropagationDelayMeasurementDataCollection,
    threshold: f64,
    edge: EdgeKind,
) -> AnalysisResult<Vec<Option<SignalMetricsData>>> {
    let mut metrics = Vec::with_capacity(sweep_data.len());

    for point in sweep_data {
        match (&point.reference_waveform, &point.dut_waveform) {
            (Some(reference), Some(dut)) => {
                let delay = extract_propagation_delay(reference, dut, threshold, edge)?;
                metrics.push(Some(
                    SignalMetricsData::new(delay, delay, delay, delay, 0.0, 1).with_unit(S),
                ));
            }
            _ => {
                tracing::debug!("sweep point without both waveforms, delay unavailable");
                metrics.push(None);
            }
        }
    }

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_types::PropagationDelayMeasurementData;

    fn ramp(t_offset: f64) -> TimeSignalData {
        let time_s: Vec<f64> = (0..5).map(|i| t_offset + i as f64 * 1e-9).collect();
        let data = vec![0.0, 0.25, 0.5, 0.75, 1.0];
        TimeSignalData::try_new(time_s, data, "voltage_V").unwrap()
    }

    #[test]
    fn test_crossing_interpolated() {
        let signal = ramp(0.0);
        // 0.4 lies between samples 1 (0.25) and 2 (0.5).
        let t = find_threshold_crossing(&signal, 0.4, EdgeKind::Rising).unwrap();
        let expected = 1e-9 + (0.4 - 0.25) / 0.25 * 1e-9;
        assert!((t - expected).abs() < 1e-15);
    }

    #[test]
    fn test_no_crossing_is_none() {
        let signal = ramp(0.0);
        assert!(find_threshold_crossing(&signal, 2.0, EdgeKind::Rising).is_none());
        assert!(find_threshold_crossing(&signal, 0.4, EdgeKind::Falling).is_none());
    }

    #[test]
    fn test_falling_edge() {
        let signal = TimeSignalData::try_new(
            vec![0.0, 1e-9, 2e-9],
            vec![1.0, 0.5, 0.0],
            "voltage_V",
        )
        .unwrap();
        let t = find_threshold_crossing(&signal, 0.25, EdgeKind::Falling).unwrap();
        assert!((t - 1.5e-9).abs() < 1e-15);
    }

    #[test]
    fn test_delay_between_shifted_ramps() {
        let reference = ramp(0.0);
        let dut = ramp(2.5e-9);
        let delay = extract_propagation_delay(&reference, &dut, 0.5, EdgeKind::Rising).unwrap();
        assert!((delay - 2.5e-9).abs() < 1e-15);
    }

    #[test]
    fn test_delay_empty_waveform() {
        let reference = ramp(0.0);
        let empty = TimeSignalData::try_new(vec![], vec![], "voltage_V").unwrap();
        assert!(matches!(
            extract_propagation_delay(&reference, &empty, 0.5, EdgeKind::Rising),
            Err(AnalysisError::MissingSignal(_))
        ));
    }

    #[test]
    fn test_sweep_aggregation_index_aligned() {
        let complete = PropagationDelayMeasurementData {
            reference_waveform: Some(ramp(0.0)),
            dut_waveform: Some(ramp(1e-9)),
            ..Default::default()
        };
        let partial = PropagationDelayMeasurementData {
            reference_waveform: Some(ramp(0.0)),
            ..Default::default()
        };

        let sweep = vec![partial, complete];
        let metrics = delay_metrics_from_sweep(&sweep, 0.5, EdgeKind::Rising).unwrap();

        assert_eq!(metrics.len(), 2);
        assert!(metrics[0].is_none());
        let delay = metrics[1].as_ref().unwrap();
        assert!((delay.value - 1e-9).abs() < 1e-15);
        assert_eq!(delay.unit.kind.datum(), "time");
        assert_eq!(delay.count, 1);
    }

    #[test]
    fn test_sweep_no_crossing_fails_loudly() {
        let flat = TimeSignalData::try_new(
            vec![0.0, 1e-9],
            vec![0.0, 0.0],
            "voltage_V",
        )
        .unwrap();
        let point = PropagationDelayMeasurementData {
            reference_waveform: Some(flat.clone()),
            dut_waveform: Some(flat),
            ..Default::default()
        };

        assert!(matches!(
            delay_metrics_from_sweep(&vec![point], 0.5, EdgeKind::Rising),
            Err(AnalysisError::CrossingNotFound { .. })
        ));
    }
}
