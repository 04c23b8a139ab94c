//! Error types for pixelart-transform

use thiserror::Error;

/// Errors that can occur during scaling and downscaling
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixelart_core::Error),

    /// Block size that is zero or larger than the image
    #[error("invalid scale factor: {0}")]
    InvalidScale(u32),

    /// A source block with no pixels
    #[error("empty source block at ({x}, {y})")]
    EmptyBlock { x: u32, y: u32 },

    /// Input image format not accepted by this operation
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
