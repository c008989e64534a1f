//! # lib-types
//!
//! Core type definitions for the PEC-Kernel measurement toolkit.
//!
//! This crate provides the foundational types shared across the workspace:
//! - Physical units with an enumerated quantity kind
//! - DC signal containers (traces, signals, role-grouped collections)
//! - Time-domain signal data for waveform captures
//! - Statistical metric summaries and their named collections
//! - Frequency-domain types (phasors, network transmissions)
//! - Sweep/measurement descriptors and experiment bindings

pub mod units;
pub mod dc;
pub mod timeseries;
pub mod metrics;
pub mod frequency;
pub mod measurement;
pub mod experiment;

pub use units::*;
pub use dc::*;
pub use timeseries::*;
pub use metrics::*;
pub use frequency::*;
pub use measurement::*;
pub use experiment::*;

/// Re-export num_complex for convenience
pub use num_complex::Complex64;
