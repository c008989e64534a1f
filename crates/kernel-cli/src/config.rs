//! Experiment configuration loading and validation.

use anyhow::{Context, Result};
use lib_extract::{ColumnSpec, TraceRole};
use lib_types::{MeasurementKind, Unit, UnitKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level experiment definition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Experiment name/description.
    pub name: String,

    /// Kind of measurement recorded at every sweep point.
    pub measurement: MeasurementKind,

    /// Root directory of the experiment's exports. Optional here; it can
    /// also be supplied on the command line.
    pub parent_directory: Option<PathBuf>,

    /// Sweep points in declaration order.
    pub sweep: Vec<SweepPointConfig>,

    /// Column declarations for DC sweep tables.
    #[serde(default)]
    pub dc_columns: Vec<ColumnConfig>,
}

/// One sweep point and the files its instrument exported.
///
/// File paths are relative to the experiment directory. A field left out
/// of the config is a typed `None`: that file simply was not exported.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SweepPointConfig {
    /// Value of the swept parameter at this point, e.g. "0.5".
    pub parameter: String,

    /// Oscilloscope measurement-statistics table.
    pub measurements_file: Option<PathBuf>,

    /// Reference waveform capture.
    pub reference_waveform_file: Option<PathBuf>,

    /// DUT waveform capture.
    pub dut_waveform_file: Option<PathBuf>,

    /// Source-meter DC sweep table.
    pub sweep_file: Option<PathBuf>,

    /// Serialized VNA network transmission (JSON).
    pub network_file: Option<PathBuf>,
}

/// A DC sweep column declaration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Header name of the column.
    pub column: String,

    /// Quantity label, parsed case-insensitively ("voltage", "ampere", ...).
    pub unit: String,

    /// Role in the assembled collection.
    pub role: RoleConfig,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleConfig {
    Input,
    Output,
    Power,
}

impl From<RoleConfig> for TraceRole {
    fn from(role: RoleConfig) -> Self {
        match role {
            RoleConfig::Input => TraceRole::Input,
            RoleConfig::Output => TraceRole::Output,
            RoleConfig::Power => TraceRole::Power,
        }
    }
}

impl ColumnConfig {
    /// Resolve the declared unit label to its canonical unit constant.
    pub fn to_spec(&self) -> Result<ColumnSpec> {
        let kind = UnitKind::parse(&self.unit)
            .with_context(|| format!("Unknown unit label '{}' for column '{}'", self.unit, self.column))?;
        Ok(ColumnSpec::new(self.column.as_str(), Unit::of(kind), self.role.into()))
    }
}

/// Load an experiment configuration from a TOML or JSON file (by
/// extension).
pub fn load_config(path: &Path) -> Result<ExperimentConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: ExperimentConfig = if path.extension().is_some_and(|e| e == "json") {
        serde_json::from_str(&content)
            .with_context(|| "Failed to parse config as JSON")?
    } else {
        toml::from_str(&content).with_context(|| "Failed to parse config as TOML")?
    };

    validate_config(&config)?;

    Ok(config)
}

/// Validate a configuration eagerly, before any export I/O.
fn validate_config(config: &ExperimentConfig) -> Result<()> {
    if config.sweep.is_empty() {
        anyhow::bail!("Experiment '{}' declares no sweep points", config.name);
    }

    match config.measurement {
        MeasurementKind::DcSweep => {
            if config.dc_columns.is_empty() {
                anyhow::bail!("DC sweep experiments must declare dc_columns");
            }
            // Resolve unit labels now so a typo fails before extraction.
            for column in &config.dc_columns {
                column.to_spec()?;
            }
            for point in &config.sweep {
                if point.sweep_file.is_none() {
                    anyhow::bail!(
                        "DC sweep point '{}' is missing its sweep_file",
                        point.parameter
                    );
                }
            }
        }
        MeasurementKind::VnaSParameter => {
            for point in &config.sweep {
                if point.network_file.is_none() {
                    anyhow::bail!(
                        "VNA sweep point '{}' is missing its network_file",
                        point.parameter
                    );
                }
            }
        }
        // A propagation-delay point may legitimately have no files at all.
        MeasurementKind::PropagationDelay => {}
    }

    Ok(())
}
