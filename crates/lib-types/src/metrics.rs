//! Scalar statistical summaries and their named collections.

use crate::units::{Unit, RATIO};
use serde::{Deserialize, Serialize};

/// One named scalar statistical summary of a signal quantity.
///
/// `unit` defaults to [`RATIO`] at extraction time; the reducers attach a
/// physical unit when the quantity is known from context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalMetricsData {
    pub value: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub standard_deviation: f64,
    pub count: u64,
    pub unit: Unit,
}

impl SignalMetricsData {
    /// Summary without a contextual unit attached.
    pub fn new(
        value: f64,
        mean: f64,
        min: f64,
        max: f64,
        standard_deviation: f64,
        count: u64,
    ) -> Self {
        Self {
            value,
            mean,
            min,
            max,
            standard_deviation,
            count,
            unit: RATIO,
        }
    }

    /// Attach a physical unit to the summary.
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }
}

/// An ordered mapping from sanitized measurement name to its summary.
///
/// Keys are unique by construction (the extractor suffixes collisions) and
/// insertion order mirrors the source table's row order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalMetricsMeasurementCollection {
    entries: Vec<(String, SignalMetricsData)>,
}

impl SignalMetricsMeasurementCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named summary, replacing any existing entry of that name.
    pub fn insert(&mut self, name: impl Into<String>, data: SignalMetricsData) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = data;
        } else {
            self.entries.push((name, data));
        }
    }

    pub fn get(&self, name: &str) -> Option<&SignalMetricsData> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SignalMetricsData)> {
        self.entries.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// Names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}
