//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Building a fixture image failed
    #[error("fixture error: {0}")]
    Core(#[from] pixelart_core::Error),

    /// Value comparison failed
    #[error(
        "value comparison failed at index {index}: expected {expected}, got {actual}, delta {delta}"
    )]
    ValueMismatch {
        index: usize,
        expected: f64,
        actual: f64,
        delta: f64,
    },

    /// Pix comparison failed
    #[error("pix comparison failed at index {index}: {reason}")]
    PixMismatch { index: usize, reason: String },

    /// Boolean check failed
    #[error("check failed at index {index}: {what}")]
    CheckFailed { index: usize, what: String },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
