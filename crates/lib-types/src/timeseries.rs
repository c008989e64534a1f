//! Time-domain signal data from waveform captures.
//!
//! Unlike a uniformly-sampled synthetic waveform, an oscilloscope export
//! carries an explicit time axis. The axis is expected to be strictly
//! increasing; threshold-crossing detection relies on it.

use serde::{Deserialize, Serialize};

/// A captured time-domain waveform with an explicit time axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeSignalData {
    /// Time axis in seconds, strictly increasing.
    pub time_s: Vec<f64>,

    /// Sample values, index-aligned with `time_s`.
    pub data: Vec<f64>,

    /// Name of the captured quantity, e.g. "voltage_V".
    pub data_name: String,
}

impl TimeSignalData {
    /// Construct a waveform, checking that the axes are index-aligned.
    pub fn try_new(
        time_s: Vec<f64>,
        data: Vec<f64>,
        data_name: impl Into<String>,
    ) -> Result<Self, &'static str> {
        if time_s.len() != data.len() {
            return Err("time axis and data must be of the same length");
        }
        Ok(Self {
            time_s,
            data,
            data_name: data_name.into(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Time span from first to last sample, zero for fewer than two samples.
    pub fn duration_s(&self) -> f64 {
        match (self.time_s.first(), self.time_s.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }
}

/// Several captured channels analysed together, order preserved.
pub type MultiTimeSignal = Vec<TimeSignalData>;
