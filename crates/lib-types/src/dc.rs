//! DC signal containers.
//!
//! A DC sweep records several probes against one independent variable
//! (typically the swept input voltage). Traces are grouped by role so the
//! reducers can locate a quantity without knowing channel names.

use crate::units::{Unit, UnitKind};
use serde::{Deserialize, Serialize};

/// A single unit-tagged sequence of samples from a DC sweep.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalTraceDC {
    pub values: Vec<f64>,
    pub unit: Unit,
}

impl SignalTraceDC {
    pub fn new(unit: Unit, values: Vec<f64>) -> Self {
        Self { values, unit }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Multiple traces sharing one independent variable (one sweep point set).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalDC {
    pub trace_list: Vec<SignalTraceDC>,
}

impl SignalDC {
    pub fn new(trace_list: Vec<SignalTraceDC>) -> Self {
        Self { trace_list }
    }

    /// First trace whose unit matches the requested quantity kind.
    pub fn trace_by_kind(&self, kind: UnitKind) -> Option<&SignalTraceDC> {
        self.trace_list.iter().find(|t| t.unit.kind == kind)
    }

    /// Values of the first trace matching the requested quantity kind.
    pub fn values_by_kind(&self, kind: UnitKind) -> Option<&[f64]> {
        self.trace_by_kind(kind).map(|t| t.values.as_slice())
    }
}

/// A DC sweep's signals grouped by role.
///
/// A sweep may record multiple input and output channels, so each role is
/// a list. Power computation requires exactly one voltage-kind and one
/// current-kind trace among the inputs, with matching lengths.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalDCCollection {
    pub inputs: Vec<SignalDC>,
    pub outputs: Vec<SignalDC>,
    pub power: Vec<SignalDC>,
}

impl SignalDCCollection {
    pub fn new(inputs: Vec<SignalDC>, outputs: Vec<SignalDC>, power: Vec<SignalDC>) -> Self {
        Self {
            inputs,
            outputs,
            power,
        }
    }

    /// First trace of the given kind among the input signals.
    pub fn input_trace_by_kind(&self, kind: UnitKind) -> Option<&SignalTraceDC> {
        self.inputs.iter().find_map(|s| s.trace_by_kind(kind))
    }

    /// First trace of the given kind among the power signals.
    pub fn power_trace_by_kind(&self, kind: UnitKind) -> Option<&SignalTraceDC> {
        self.power.iter().find_map(|s| s.trace_by_kind(kind))
    }

    /// First trace of the given kind in any role (inputs, outputs, power).
    pub fn trace_by_kind(&self, kind: UnitKind) -> Option<&SignalTraceDC> {
        self.inputs
            .iter()
            .chain(self.outputs.iter())
            .chain(self.power.iter())
            .find_map(|s| s.trace_by_kind(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{A, V, W};

    #[test]
    fn test_lookup_by_kind() {
        let signal = SignalDC::new(vec![
            SignalTraceDC::new(V, vec![1.0, 2.0]),
            SignalTraceDC::new(A, vec![0.1, 0.2]),
        ]);

        assert_eq!(signal.values_by_kind(UnitKind::Current), Some(&[0.1, 0.2][..]));
        assert!(signal.trace_by_kind(UnitKind::Power).is_none());
    }

    #[test]
    fn test_collection_role_lookup() {
        let collection = SignalDCCollection::new(
            vec![SignalDC::new(vec![SignalTraceDC::new(V, vec![1.0])])],
            vec![],
            vec![SignalDC::new(vec![SignalTraceDC::new(W, vec![5.0])])],
        );

        assert!(collection.input_trace_by_kind(UnitKind::Voltage).is_some());
        assert!(collection.input_trace_by_kind(UnitKind::Power).is_none());
        assert!(collection.power_trace_by_kind(UnitKind::Power).is_some());
        assert!(collection.trace_by_kind(UnitKind::Power).is_some());
    }
}
