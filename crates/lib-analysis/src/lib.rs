//! # lib-analysis
//!
//! Statistical reducers for PEC-Kernel.
//!
//! This crate holds the numeric core of the workspace:
//!
//! - **DC power/resistance**: power traces from V·I, resistance from V/I,
//!   range-filtered summary statistics over a sweep
//! - **Propagation delay**: threshold-crossing detection between paired
//!   reference/DUT waveforms, aggregated across parameter sweeps
//! - **Frequency/network**: adaptation of external network objects into
//!   typed transmissions, phasor arithmetic
//!
//! Every reducer is a pure function over immutable inputs; errors are
//! surfaced to the caller, never retried or defaulted silently.

pub mod error;
pub mod stats;
pub mod power;
pub mod delay;
pub mod frequency;

pub use error::{AnalysisError, AnalysisResult};
pub use power::{
    calculate_power_signal_from_collection, get_power_map_vin_metrics, get_power_metrics,
    get_resistance_metrics,
};
pub use delay::{
    delay_metrics_from_sweep, extract_propagation_delay, find_threshold_crossing, EdgeKind,
};
pub use frequency::{convert_to_network_transmission, offset_phasor_magnitude};
