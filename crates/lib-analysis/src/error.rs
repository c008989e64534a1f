//! Error types for reduction operations.

use thiserror::Error;

/// Errors that can occur during signal reduction.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A required trace is absent from the collection.
    #[error("{0}")]
    MissingSignal(String),

    /// Paired arrays have different lengths.
    #[error("{0}")]
    LengthMismatch(String),

    /// Threshold ratios violate `0 <= lower < upper <= 1`.
    #[error("Threshold ratios must satisfy 0 <= lower < upper <= 1.")]
    InvalidThreshold { lower: f64, upper: f64 },

    /// A requested sub-range filter left no samples.
    #[error("No samples in range: {0}")]
    RangeEmpty(String),

    /// A waveform never crosses the requested threshold.
    #[error("No threshold crossing found in {signal}")]
    CrossingNotFound { signal: String },

    /// An external network object violates the expected shape.
    #[error("Invalid network data: {0}")]
    InvalidNetwork(String),
}

/// Result type for reduction operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
