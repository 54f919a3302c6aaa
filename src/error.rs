// src/error.rs

use thiserror::Error;

/// Errors from the array forms of the oxygen calibration.
///
/// Numeric domain problems are never reported here; they surface as NaN.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalibrationError {
    #[error("{stage}: input '{input}' has {found} samples but '{reference}' has {expected}")]
    LengthMismatch {
        stage: &'static str,
        reference: &'static str,
        expected: usize,
        input: &'static str,
        found: usize,
    },
}

/// Errors raised while reading a YUCO CSV export.
#[derive(Error, Debug)]
pub enum LogParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no header line found")]
    EmptyFile,

    #[error("missing column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}
