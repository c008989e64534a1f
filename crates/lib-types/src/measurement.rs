//! Sweep-point measurement descriptors and their extracted data.
//!
//! A sweep point's files are declared as typed optional slots: a slot that
//! is `None` means the instrument did not export that file, and the
//! extractor simply omits it from the point's data record.

use crate::metrics::SignalMetricsMeasurementCollection;
use crate::timeseries::TimeSignalData;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The kind of measurement a sweep records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    DcSweep,
    PropagationDelay,
    VnaSParameter,
}

/// One sweep point of a propagation-delay measurement: the exported files.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropagationDelayMeasurement {
    pub name: String,

    /// Oscilloscope measurement-statistics table.
    pub measurements_file: Option<PathBuf>,

    /// Reference (input) waveform capture.
    pub reference_waveform_file: Option<PathBuf>,

    /// Device-under-test (output) waveform capture.
    pub dut_waveform_file: Option<PathBuf>,
}

/// The ordered sweep of propagation-delay measurement descriptors.
///
/// Order is index-aligned with the sweep's parameter list; callers must
/// iterate points in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropagationDelayMeasurementCollection {
    pub measurements: Vec<PropagationDelayMeasurement>,
}

/// Extracted data for one propagation-delay sweep point.
///
/// Each slot mirrors the corresponding file slot of the descriptor; a file
/// that was not provided yields `None` here, never an error.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PropagationDelayMeasurementData {
    pub measurements: Option<SignalMetricsMeasurementCollection>,
    pub reference_waveform: Option<TimeSignalData>,
    pub dut_waveform: Option<TimeSignalData>,
}

/// Extracted data for a whole sweep, index-aligned with the descriptors.
pub type PropagationDelayMeasurementDataCollection = Vec<PropagationDelayMeasurementData>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unprovided_files_are_typed_none() {
        let point = PropagationDelayMeasurement {
            name: "vin_0v5".to_string(),
            reference_waveform_file: Some(PathBuf::from("ref.csv")),
            ..Default::default()
        };

        assert!(point.measurements_file.is_none());
        assert!(point.dut_waveform_file.is_none());
        assert!(point.reference_waveform_file.is_some());
    }
}
