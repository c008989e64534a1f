//! Oscilloscope waveform capture extraction.
//!
//! Waveform exports carry a header row and several bookkeeping columns;
//! only the columns at index 3 and 4 are consumed, as `time_s` and
//! `voltage_V`. No cross-channel alignment is performed here; that is a
//! caller responsibility.

use crate::error::ParseError;
use crate::record::{numeric_field, parse_record};
use lib_types::{MultiTimeSignal, TimeSignalData};
use std::path::Path;

/// Zero-based column indices of the consumed pair.
const TIME_COLUMN: usize = 3;
const VOLTAGE_COLUMN: usize = 4;

/// Parse a waveform table from file content into `(time_s, voltage_V)`.
pub fn parse_waveform_table(content: &str) -> Result<(Vec<f64>, Vec<f64>), ParseError> {
    let mut time_s = Vec::new();
    let mut voltage_v = Vec::new();

    // First line is the header row.
    for (index, line) in content.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        let fields = parse_record(line, line_number)?;

        if fields.len() <= VOLTAGE_COLUMN {
            return Err(ParseError::ColumnCount {
                line: line_number,
                expected: VOLTAGE_COLUMN + 1,
                actual: fields.len(),
            });
        }

        time_s.push(numeric_field(&fields, TIME_COLUMN, line_number)?);
        voltage_v.push(numeric_field(&fields, VOLTAGE_COLUMN, line_number)?);
    }

    Ok((time_s, voltage_v))
}

/// Read a waveform export file into a typed time signal.
pub fn extract_to_time_signal(file: &Path) -> Result<TimeSignalData, ParseError> {
    let content = std::fs::read_to_string(file)?;
    let (time_s, voltage_v) = parse_waveform_table(&content)?;

    TimeSignalData::try_new(time_s, voltage_v, "voltage_V").map_err(|message| {
        ParseError::InvalidFormat {
            format: "waveform",
            message: message.to_string(),
        }
    })
}

/// Extract each channel file independently, preserving order.
///
/// No alignment or length validation is performed across channels.
pub fn combine_channel_data(channel_files: &[impl AsRef<Path>]) -> Result<MultiTimeSignal, ParseError> {
    let mut signals = Vec::with_capacity(channel_files.len());
    for file in channel_files {
        signals.push(extract_to_time_signal(file.as_ref())?);
    }
    Ok(signals)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_WAVEFORM: &str = "\
record,point,flags,time,ch1
0,0,ok,0.0e0,0.05
0,1,ok,1.0e-9,0.85
0,2,ok,2.0e-9,1.65
";

    #[test]
    fn test_parse_sample_waveform() {
        let (time_s, voltage_v) = parse_waveform_table(SAMPLE_WAVEFORM).unwrap();
        assert_eq!(time_s.len(), 3);
        assert!((time_s[1] - 1.0e-9).abs() < 1e-21);
        assert!((voltage_v[2] - 1.65).abs() < 1e-12);
    }

    #[test]
    fn test_header_row_skipped() {
        // A numeric parse of the header would fail; skipping it must not.
        let content = "a,b,c,time,ch1\n0,0,x,1.0,2.0\n";
        let (time_s, _) = parse_waveform_table(content).unwrap();
        assert_eq!(time_s, vec![1.0]);
    }

    #[test]
    fn test_short_row_rejected() {
        let err = parse_waveform_table("h1,h2,h3,h4,h5\n1,2,3\n").unwrap_err();
        assert!(matches!(err, ParseError::ColumnCount { line: 2, .. }));
    }
}
