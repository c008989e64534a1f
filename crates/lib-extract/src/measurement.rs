//! Oscilloscope measurement-statistics table extraction.
//!
//! The export is a fixed 9-column CSV with no header: six statistics
//! (value, mean, min, max, standard deviation, count) followed by three
//! name fragments. The fragments are joined into a single sanitized key;
//! colliding keys are disambiguated with a 1-based occurrence suffix so
//! the resulting mapping is unique.

use crate::error::ParseError;
use crate::record::{numeric_field, parse_record};
use lib_types::{SignalMetricsData, SignalMetricsMeasurementCollection};
use std::collections::HashMap;
use std::path::Path;

/// Number of columns in the measurement export.
const MEASUREMENT_COLUMNS: usize = 9;

/// One parsed and name-sanitized row of the measurement table.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementRow {
    pub name: String,
    pub value: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub standard_deviation: f64,
    pub count: f64,
}

/// Parse a measurement table from file content.
pub fn parse_measurement_table(content: &str) -> Result<Vec<MeasurementRow>, ParseError> {
    let mut rows = Vec::new();

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        let fields = parse_record(line, line_number)?;

        if fields.len() != MEASUREMENT_COLUMNS {
            return Err(ParseError::ColumnCount {
                line: line_number,
                expected: MEASUREMENT_COLUMNS,
                actual: fields.len(),
            });
        }

        rows.push(MeasurementRow {
            name: merge_name_fragments(&fields[6], &fields[7], &fields[8]),
            value: numeric_field(&fields, 0, line_number)?,
            mean: numeric_field(&fields, 1, line_number)?,
            min: numeric_field(&fields, 2, line_number)?,
            max: numeric_field(&fields, 3, line_number)?,
            standard_deviation: numeric_field(&fields, 4, line_number)?,
            count: numeric_field(&fields, 5, line_number)?,
        });
    }

    deduplicate_names(&mut rows);
    Ok(rows)
}

/// Join the non-empty name fragments and sanitize the result: spaces and
/// parentheses become underscores, everything lowercased.
fn merge_name_fragments(a: &str, b: &str, c: &str) -> String {
    let merged = [a, b, c]
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    merged
        .chars()
        .map(|ch| match ch {
            ' ' | '(' | ')' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Suffix every occurrence of a colliding name with its 1-based position
/// in original row order, so keys are unique.
fn deduplicate_names(rows: &mut [MeasurementRow]) {
    let mut totals: HashMap<String, usize> = HashMap::new();
    for row in rows.iter() {
        *totals.entry(row.name.clone()).or_insert(0) += 1;
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    for row in rows.iter_mut() {
        if totals[&row.name] > 1 {
            let occurrence = seen.entry(row.name.clone()).or_insert(0);
            *occurrence += 1;
            tracing::debug!("duplicate measurement name '{}', suffixing _{}", row.name, occurrence);
            row.name = format!("{}_{}", row.name, occurrence);
        }
    }
}

/// Map parsed rows into a named metrics collection. No unit is attached
/// at this stage; the quantity each row measures is contextual.
pub fn rows_to_signal_measurement(rows: Vec<MeasurementRow>) -> SignalMetricsMeasurementCollection {
    let mut collection = SignalMetricsMeasurementCollection::new();
    for row in rows {
        collection.insert(
            row.name,
            SignalMetricsData::new(
                row.value,
                row.mean,
                row.min,
                row.max,
                row.standard_deviation,
                row.count as u64,
            ),
        );
    }
    collection
}

/// Read and parse a measurement export file.
pub fn extract_to_signal_measurement(
    file: &Path,
) -> Result<SignalMetricsMeasurementCollection, ParseError> {
    let content = std::fs::read_to_string(file)?;
    let rows = parse_measurement_table(&content)?;
    Ok(rows_to_signal_measurement(rows))
}
