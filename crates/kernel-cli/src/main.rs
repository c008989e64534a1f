//! PEC-Kernel CLI: measurement extraction and reduction for
//! photonic/electronic codesign experiments.

mod compose;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lib_analysis::{
    delay_metrics_from_sweep, extract_propagation_delay, get_power_map_vin_metrics,
    get_power_metrics, get_resistance_metrics, EdgeKind,
};
use lib_extract::{extract_dc_sweep, extract_to_signal_measurement, extract_to_time_signal};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pec-kernel")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum Edge {
    #[default]
    Rising,
    Falling,
    Any,
}

impl From<Edge> for EdgeKind {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Rising => EdgeKind::Rising,
            Edge::Falling => EdgeKind::Falling,
            Edge::Any => EdgeKind::Any,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an oscilloscope measurement-statistics export
    ExtractMeasurement {
        /// Path to the csv export
        file: PathBuf,
    },

    /// Parse an oscilloscope waveform export
    ExtractWaveform {
        /// Path to the csv export
        file: PathBuf,
    },

    /// Propagation delay between a reference and a DUT waveform
    Delay {
        /// Reference waveform export
        #[arg(short, long)]
        reference: PathBuf,

        /// DUT waveform export
        #[arg(short, long)]
        dut: PathBuf,

        /// Crossing threshold (volts)
        #[arg(short, long, default_value = "0.5")]
        threshold: f64,

        /// Which edge counts as a crossing
        #[arg(short, long, default_value = "rising")]
        edge: Edge,
    },

    /// Power and resistance metrics from a DC sweep export
    PowerMetrics {
        /// Path to the sweep csv export
        file: PathBuf,

        /// Header name of the input-voltage column
        #[arg(long, default_value = "vin")]
        voltage_column: String,

        /// Header name of the input-current column
        #[arg(long, default_value = "iin")]
        current_column: String,

        /// Restrict metrics to this input-voltage range (inclusive)
        #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"])]
        vin_range: Option<Vec<f64>>,
    },

    /// Compose a full experiment dataset from its export directory
    Compose {
        /// Path to the experiment configuration file (TOML or JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Experiment root directory (overrides the configured one)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Crossing threshold for delay reduction (volts)
        #[arg(short, long, default_value = "0.5")]
        threshold: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::ExtractMeasurement { file } => {
            let collection = extract_to_signal_measurement(&file)
                .with_context(|| format!("Failed to extract measurement table {:?}", file))?;
            output::print_measurement_collection(&collection, cli.format)?;
        }
        Commands::ExtractWaveform { file } => {
            let signal = extract_to_time_signal(&file)
                .with_context(|| format!("Failed to extract waveform {:?}", file))?;
            println!("Waveform: {}", signal.data_name);
            println!("  Samples:  {}", signal.len());
            println!("  Duration: {:.3e} s", signal.duration_s());
        }
        Commands::Delay {
            reference,
            dut,
            threshold,
            edge,
        } => {
            let reference_signal = extract_to_time_signal(&reference)
                .with_context(|| format!("Failed to extract reference waveform {:?}", reference))?;
            let dut_signal = extract_to_time_signal(&dut)
                .with_context(|| format!("Failed to extract DUT waveform {:?}", dut))?;

            let delay = extract_propagation_delay(
                &reference_signal,
                &dut_signal,
                threshold,
                edge.into(),
            )?;
            println!("Propagation delay: {:.6e} s", delay);
        }
        Commands::PowerMetrics {
            file,
            voltage_column,
            current_column,
            vin_range,
        } => {
            run_power_metrics(&file, &voltage_column, &current_column, vin_range, cli.format)?;
        }
        Commands::Compose {
            config,
            root,
            threshold,
        } => {
            run_compose(&config, root.as_deref(), threshold, cli.format)?;
        }
    }

    Ok(())
}

fn run_power_metrics(
    file: &std::path::Path,
    voltage_column: &str,
    current_column: &str,
    vin_range: Option<Vec<f64>>,
    format: OutputFormat,
) -> Result<()> {
    use lib_extract::{ColumnSpec, TraceRole};
    use lib_types::{A, V};

    let specs = vec![
        ColumnSpec::new(voltage_column, V, TraceRole::Input),
        ColumnSpec::new(current_column, A, TraceRole::Input),
    ];
    let collection = extract_dc_sweep(file, &specs)
        .with_context(|| format!("Failed to extract DC sweep {:?}", file))?;

    let range = vin_range.map(|r| (r[0], r[1]));
    let power = get_power_metrics(&collection, range)?;
    output::print_metrics("power", &power, format)?;

    let vin_map = get_power_map_vin_metrics(&collection)?;
    output::print_metrics("power_vin_map", &vin_map, format)?;

    let resistance = get_resistance_metrics(&collection)?;
    output::print_metrics("resistance", &resistance, format)?;

    Ok(())
}

fn run_compose(
    config_path: &std::path::Path,
    root: Option<&std::path::Path>,
    threshold: f64,
    format: OutputFormat,
) -> Result<()> {
    let config = config::load_config(config_path)?;
    let data = compose::compose_experiment_data(&config, root)?;

    output::print_experiment_data(&data, format)?;

    // For delay experiments, reduce to per-point delay metrics as well.
    if let lib_types::MeasurementDataCollection::PropagationDelay(sweep) = &data.data {
        let metrics = delay_metrics_from_sweep(sweep, threshold, EdgeKind::Rising)?;
        for (parameter, point) in data.experiment.parameters.iter().zip(metrics.iter()) {
            match point {
                Some(m) => println!("  {parameter}: delay = {:.6e} s", m.value),
                None => println!("  {parameter}: delay unavailable (waveform missing)"),
            }
        }
    }

    Ok(())
}
