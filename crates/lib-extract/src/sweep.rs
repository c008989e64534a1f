//! Whole-sweep extraction for propagation-delay measurements.

use crate::error::ParseError;
use crate::measurement::extract_to_signal_measurement;
use crate::waveform::extract_to_time_signal;
use lib_types::{
    PropagationDelayMeasurementCollection, PropagationDelayMeasurementData,
    PropagationDelayMeasurementDataCollection,
};

/// Extract every sweep point's exported files into typed data.
///
/// Each point is processed independently: a file slot that is `None` is
/// simply omitted from that point's record. A file that is present but
/// unreadable or malformed fails the whole extraction; deciding to
/// skip-and-log instead is the caller's call, never made here.
///
/// Output order mirrors the input order exactly, keeping the collection
/// index-aligned with the sweep's parameter list.
pub fn extract_propagation_delay_measurement_sweep_data(
    sweep: &PropagationDelayMeasurementCollection,
) -> Result<PropagationDelayMeasurementDataCollection, ParseError> {
    let mut sweep_data = Vec::with_capacity(sweep.measurements.len());

    for point in &sweep.measurements {
        let mut data = PropagationDelayMeasurementData::default();

        if let Some(file) = &point.measurements_file {
            data.measurements = Some(extract_to_signal_measurement(file)?);
        }
        if let Some(file) = &point.reference_waveform_file {
            data.reference_waveform = Some(extract_to_time_signal(file)?);
        }
        if let Some(file) = &point.dut_waveform_file {
            data.dut_waveform = Some(extract_to_time_signal(file)?);
        }

        sweep_data.push(data);
    }

    Ok(sweep_data)
}
