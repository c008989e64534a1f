//! Experiment descriptors and the binding of typed data back to them.

use crate::dc::SignalDCCollection;
use crate::frequency::NetworkTransmission;
use crate::measurement::{MeasurementKind, PropagationDelayMeasurementDataCollection};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A sweep/experiment definition: what was varied, in what order, and
/// where its exports live.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub name: String,

    pub measurement_kind: MeasurementKind,

    /// Sweep parameter labels, one per point, in declaration order.
    pub parameters: Vec<String>,

    /// Root directory of the experiment's exports, when known.
    pub parent_directory: Option<PathBuf>,
}

/// Typed measurement data for a whole sweep, one variant per measurement
/// kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MeasurementDataCollection {
    Dc(Vec<SignalDCCollection>),
    PropagationDelay(PropagationDelayMeasurementDataCollection),
    Frequency(Vec<NetworkTransmission>),
}

impl MeasurementDataCollection {
    /// Number of sweep points carried.
    pub fn len(&self) -> usize {
        match self {
            Self::Dc(points) => points.len(),
            Self::PropagationDelay(points) => points.len(),
            Self::Frequency(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The measurement kind this data belongs to.
    pub fn kind(&self) -> MeasurementKind {
        match self {
            Self::Dc(_) => MeasurementKind::DcSweep,
            Self::PropagationDelay(_) => MeasurementKind::PropagationDelay,
            Self::Frequency(_) => MeasurementKind::VnaSParameter,
        }
    }
}

/// Typed measurement data bound to the experiment that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentData {
    pub experiment: Experiment,
    pub data: MeasurementDataCollection,
}

impl ExperimentData {
    /// Bind data to its experiment, enforcing that the data's cardinality
    /// matches the sweep's parameter list and that the kinds agree.
    pub fn try_new(
        experiment: Experiment,
        data: MeasurementDataCollection,
    ) -> Result<Self, String> {
        if data.kind() != experiment.measurement_kind {
            return Err(format!(
                "measurement data kind {:?} does not match experiment kind {:?}",
                data.kind(),
                experiment.measurement_kind
            ));
        }
        if data.len() != experiment.parameters.len() {
            return Err(format!(
                "data cardinality {} does not match sweep cardinality {}",
                data.len(),
                experiment.parameters.len()
            ));
        }
        Ok(Self { experiment, data })
    }
}
