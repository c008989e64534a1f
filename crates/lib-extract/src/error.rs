//! Error types for extraction operations.

use thiserror::Error;

/// Errors that can occur while parsing instrument exports.
#[derive(Debug, Error)]
pub enum ParseError {
    /// I/O error reading the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record had the wrong number of columns.
    #[error("Line {line}: expected {expected} columns, got {actual}")]
    ColumnCount {
        line: usize,
        expected: usize,
        actual: usize,
    },

    /// A field that must be numeric was not.
    #[error("Line {line}, column {column}: expected a number, got '{value}'")]
    Numeric {
        line: usize,
        column: usize,
        value: String,
    },

    /// Missing required column or section.
    #[error("Missing required {kind}: {name}")]
    Missing { kind: &'static str, name: String },

    /// Invalid file format.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        format: &'static str,
        message: String,
    },
}

impl ParseError {
    /// Create a missing-column error.
    pub fn missing_column(name: impl Into<String>) -> Self {
        Self::Missing {
            kind: "column",
            name: name.into(),
        }
    }

    pub(crate) fn numeric(line: usize, column: usize, value: &str) -> Self {
        Self::Numeric {
            line,
            column,
            value: value.to_string(),
        }
    }
}
