//! # lib-extract
//!
//! Instrument-export parsers for PEC-Kernel.
//!
//! This crate turns raw laboratory exports into the typed containers of
//! `lib-types`:
//! - oscilloscope measurement-statistics tables (fixed 9-column CSV)
//! - oscilloscope waveform captures (time/voltage column pairs)
//! - source-meter DC sweep tables (named columns with declared units)
//! - whole propagation-delay measurement sweeps
//!
//! Every parser is split into a pure `parse_*(content: &str)` core and a
//! thin `*_file`/`extract_*` wrapper that performs the one-shot read, so
//! the cores stay testable on string fixtures. Record splitting is built
//! on the `nom` parser combinator library and understands double-quoted
//! fields.

pub mod error;
pub mod record;
pub mod measurement;
pub mod waveform;
pub mod dc;
pub mod sweep;

pub use error::ParseError;
pub use measurement::{extract_to_signal_measurement, parse_measurement_table, MeasurementRow};
pub use waveform::{combine_channel_data, extract_to_time_signal, parse_waveform_table};
pub use dc::{extract_dc_sweep, parse_dc_sweep_table, ColumnSpec, TraceRole};
pub use sweep::extract_propagation_delay_measurement_sweep_data;
