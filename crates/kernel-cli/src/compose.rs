//! Experiment composition: binding a directory of sweep exports to a
//! typed [`ExperimentData`].

use crate::config::{ExperimentConfig, SweepPointConfig};
use lib_analysis::convert_to_network_transmission;
use lib_extract::{extract_dc_sweep, extract_propagation_delay_measurement_sweep_data, ParseError};
use lib_types::{
    Experiment, ExperimentData, MeasurementDataCollection, MeasurementKind, NetworkTransmission,
    PropagationDelayMeasurement, PropagationDelayMeasurementCollection,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while composing an experiment.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Required directory/path could not be determined before any file I/O.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An export failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A loaded network violated its shape contract.
    #[error("Invalid network data in {file:?}: {message}")]
    Network { file: PathBuf, message: String },

    /// The composed data does not bind to the experiment definition.
    #[error("Experiment binding failed: {0}")]
    Binding(String),
}

/// Resolve the experiment's root directory: an explicit argument wins,
/// else the configured parent directory. Fails with a descriptive message
/// before any file I/O is attempted.
pub fn resolve_experiment_directory(
    config: &ExperimentConfig,
    explicit: Option<&Path>,
) -> Result<PathBuf, ComposeError> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    config.parent_directory.clone().ok_or_else(|| {
        ComposeError::Configuration(format!(
            "experiment '{}' has no parent_directory configured and none was supplied; \
             pass --root or set parent_directory",
            config.name
        ))
    })
}

/// Resolve where generated plots belong: an explicit directory wins, else
/// `<experiment dir>/img`. Creation is left to whoever writes into it.
pub fn resolve_plot_directory(experiment_directory: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(dir) => dir.to_path_buf(),
        None => experiment_directory.join("img"),
    }
}

/// Compose the full typed dataset for an experiment from its export
/// directory.
///
/// Sweep points are processed in declaration order; the resulting
/// collection is index-aligned with the sweep parameter list, and the
/// binding enforces that the cardinalities match.
pub fn compose_experiment_data(
    config: &ExperimentConfig,
    explicit_root: Option<&Path>,
) -> Result<ExperimentData, ComposeError> {
    let root = resolve_experiment_directory(config, explicit_root)?;
    tracing::info!("Composing experiment '{}' from {:?}", config.name, root);

    let data = match config.measurement {
        MeasurementKind::PropagationDelay => {
            MeasurementDataCollection::PropagationDelay(compose_propagation_delay(config, &root)?)
        }
        MeasurementKind::DcSweep => MeasurementDataCollection::Dc(compose_dc(config, &root)?),
        MeasurementKind::VnaSParameter => {
            MeasurementDataCollection::Frequency(compose_frequency(config, &root)?)
        }
    };

    let experiment = Experiment {
        name: config.name.clone(),
        measurement_kind: config.measurement,
        parameters: config.sweep.iter().map(|p| p.parameter.clone()).collect(),
        parent_directory: Some(root),
    };

    ExperimentData::try_new(experiment, data).map_err(ComposeError::Binding)
}

fn resolve_file(root: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        root.join(file)
    }
}

fn compose_propagation_delay(
    config: &ExperimentConfig,
    root: &Path,
) -> Result<lib_types::PropagationDelayMeasurementDataCollection, ComposeError> {
    let sweep = PropagationDelayMeasurementCollection {
        measurements: config
            .sweep
            .iter()
            .map(|point| PropagationDelayMeasurement {
                name: point.parameter.clone(),
                measurements_file: point
                    .measurements_file
                    .as_deref()
                    .map(|f| resolve_file(root, f)),
                reference_waveform_file: point
                    .reference_waveform_file
                    .as_deref()
                    .map(|f| resolve_file(root, f)),
                dut_waveform_file: point
                    .dut_waveform_file
                    .as_deref()
                    .map(|f| resolve_file(root, f)),
            })
            .collect(),
    };

    Ok(extract_propagation_delay_measurement_sweep_data(&sweep)?)
}

fn compose_dc(
    config: &ExperimentConfig,
    root: &Path,
) -> Result<Vec<lib_types::SignalDCCollection>, ComposeError> {
    let specs = config
        .dc_columns
        .iter()
        .map(|c| c.to_spec())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ComposeError::Configuration(e.to_string()))?;

    let mut collections = Vec::with_capacity(config.sweep.len());
    for point in &config.sweep {
        let file = required_file(point, point.sweep_file.as_deref(), "sweep_file")?;
        collections.push(extract_dc_sweep(&resolve_file(root, file), &specs)?);
    }
    Ok(collections)
}

fn compose_frequency(
    config: &ExperimentConfig,
    root: &Path,
) -> Result<Vec<NetworkTransmission>, ComposeError> {
    let mut networks = Vec::with_capacity(config.sweep.len());
    for point in &config.sweep {
        let file = required_file(point, point.network_file.as_deref(), "network_file")?;
        let path = resolve_file(root, file);

        let content = std::fs::read_to_string(&path).map_err(ParseError::Io)?;
        let loaded: NetworkTransmission =
            serde_json::from_str(&content).map_err(|e| ComposeError::Network {
                file: path.clone(),
                message: e.to_string(),
            })?;

        // Revalidate through the adaptation boundary: deserialized data
        // has not been through try_new.
        let network = convert_to_network_transmission(&loaded).map_err(|e| {
            ComposeError::Network {
                file: path.clone(),
                message: e.to_string(),
            }
        })?;
        networks.push(network);
    }
    Ok(networks)
}

fn required_file<'a>(
    point: &SweepPointConfig,
    file: Option<&'a Path>,
    field: &str,
) -> Result<&'a Path, ComposeError> {
    file.ok_or_else(|| {
        ComposeError::Configuration(format!(
            "sweep point '{}' is missing its {field}",
            point.parameter
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExperimentConfig;

    fn minimal_config(parent: Option<PathBuf>) -> ExperimentConfig {
        ExperimentConfig {
            name: "delay".to_string(),
            measurement: MeasurementKind::PropagationDelay,
            parent_directory: parent,
            sweep: vec![],
            dc_columns: vec![],
        }
    }

    #[test]
    fn test_explicit_root_wins() {
        let config = minimal_config(Some(PathBuf::from("/configured")));
        let root =
            resolve_experiment_directory(&config, Some(Path::new("/explicit"))).unwrap();
        assert_eq!(root, PathBuf::from("/explicit"));
    }

    #[test]
    fn test_missing_directory_is_configuration_error() {
        let config = minimal_config(None);
        let err = resolve_experiment_directory(&config, None).unwrap_err();
        assert!(matches!(err, ComposeError::Configuration(_)));
        assert!(err.to_string().contains("parent_directory"));
    }

    #[test]
    fn test_plot_directory_defaults_to_img() {
        let dir = resolve_plot_directory(Path::new("/exp"), None);
        assert_eq!(dir, PathBuf::from("/exp/img"));

        let dir = resolve_plot_directory(Path::new("/exp"), Some(Path::new("/plots")));
        assert_eq!(dir, PathBuf::from("/plots"));
    }

    #[test]
    fn test_compose_empty_delay_sweep_binds() {
        // No files declared at any point: composition succeeds with typed
        // empty slots and a zero-point sweep binds to a zero-parameter
        // experiment.
        let config = minimal_config(Some(PathBuf::from("/tmp")));
        let data = compose_experiment_data(&config, None).unwrap();
        assert_eq!(data.experiment.parameters.len(), 0);
        assert_eq!(data.data.len(), 0);
    }
}
