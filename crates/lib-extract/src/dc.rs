//! Source-meter DC sweep table extraction.
//!
//! A DC sweep export has a header row naming its columns. The caller
//! declares which columns to pull, the unit each carries, and its role in
//! the resulting collection; unreferenced columns are ignored.

use crate::error::ParseError;
use crate::record::{numeric_field, parse_record};
use lib_types::{SignalDC, SignalDCCollection, SignalTraceDC, Unit};
use std::path::Path;

/// The role a column plays in the assembled collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceRole {
    Input,
    Output,
    Power,
}

/// Declaration of one column to extract.
#[derive(Clone, Debug)]
pub struct ColumnSpec {
    /// Header name of the column (case-insensitive match).
    pub column: String,

    /// Unit carried by the column's samples.
    pub unit: Unit,

    /// Role of the resulting trace.
    pub role: TraceRole,
}

impl ColumnSpec {
    pub fn new(column: impl Into<String>, unit: Unit, role: TraceRole) -> Self {
        Self {
            column: column.into(),
            unit,
            role,
        }
    }
}

/// Parse a DC sweep table, assembling declared columns into a role-grouped
/// collection. Traces of one role share a [`SignalDC`] since they share
/// the sweep's independent variable.
pub fn parse_dc_sweep_table(
    content: &str,
    columns: &[ColumnSpec],
) -> Result<SignalDCCollection, ParseError> {
    let mut lines = content.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => continue,
            Some((index, line)) => break parse_record(line, index + 1)?,
            None => {
                return Err(ParseError::InvalidFormat {
                    format: "dc sweep",
                    message: "file contains no header row".to_string(),
                })
            }
        }
    };

    // Resolve each declared column to its header index.
    let mut indices = Vec::with_capacity(columns.len());
    for spec in columns {
        let index = header
            .iter()
            .position(|name| name.eq_ignore_ascii_case(&spec.column))
            .ok_or_else(|| ParseError::missing_column(&spec.column))?;
        indices.push(index);
    }

    let mut values: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        let fields = parse_record(line, line_number)?;

        for (spec_index, &column_index) in indices.iter().enumerate() {
            if column_index >= fields.len() {
                return Err(ParseError::ColumnCount {
                    line: line_number,
                    expected: column_index + 1,
                    actual: fields.len(),
                });
            }
            values[spec_index].push(numeric_field(&fields, column_index, line_number)?);
        }
    }

    let mut inputs = Vec::new();
    let mut outputs = Vec::new();
    let mut power = Vec::new();
    for (spec, trace_values) in columns.iter().zip(values) {
        let trace = SignalTraceDC::new(spec.unit, trace_values);
        match spec.role {
            TraceRole::Input => inputs.push(trace),
            TraceRole::Output => outputs.push(trace),
            TraceRole::Power => power.push(trace),
        }
    }

    let wrap = |traces: Vec<SignalTraceDC>| {
        if traces.is_empty() {
            Vec::new()
        } else {
            vec![SignalDC::new(traces)]
        }
    };

    Ok(SignalDCCollection::new(wrap(inputs), wrap(outputs), wrap(power)))
}

/// Read and parse a DC sweep export file.
pub fn extract_dc_sweep(
    file: &Path,
    columns: &[ColumnSpec],
) -> Result<SignalDCCollection, ParseError> {
    let content = std::fs::read_to_string(file)?;
    parse_dc_sweep_table(&content, columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_types::{UnitKind, A, V};

    const SAMPLE_SWEEP: &str = "\
vin,iin,vout
0.0,0.000,0.02
0.5,0.001,0.48
1.0,0.002,0.97
";

    fn specs() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::new("vin", V, TraceRole::Input),
            ColumnSpec::new("iin", A, TraceRole::Input),
            ColumnSpec::new("vout", V, TraceRole::Output),
        ]
    }

    #[test]
    fn test_parse_sample_sweep() {
        let collection = parse_dc_sweep_table(SAMPLE_SWEEP, &specs()).unwrap();

        assert_eq!(collection.inputs.len(), 1);
        assert_eq!(collection.inputs[0].trace_list.len(), 2);
        assert_eq!(collection.outputs.len(), 1);
        assert!(collection.power.is_empty());

        let vin = collection.input_trace_by_kind(UnitKind::Voltage).unwrap();
        assert_eq!(vin.values, vec![0.0, 0.5, 1.0]);
        let iin = collection.input_trace_by_kind(UnitKind::Current).unwrap();
        assert!((iin.values[2] - 0.002).abs() < 1e-12);
    }

    #[test]
    fn test_missing_column() {
        let specs = vec![ColumnSpec::new("vdd", V, TraceRole::Input)];
        let err = parse_dc_sweep_table(SAMPLE_SWEEP, &specs).unwrap_err();
        assert!(matches!(err, ParseError::Missing { kind: "column", .. }));
    }

    #[test]
    fn test_header_name_case_insensitive() {
        let specs = vec![ColumnSpec::new("VIN", V, TraceRole::Input)];
        let collection = parse_dc_sweep_table(SAMPLE_SWEEP, &specs).unwrap();
        assert_eq!(collection.inputs[0].trace_list[0].values.len(), 3);
    }
}
