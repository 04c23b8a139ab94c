//! Error types for pixelart-color

use thiserror::Error;

/// Errors that can occur during color processing operations
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixelart_core::Error),

    /// A palette that is empty or cannot be built
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Empty image
    #[error("empty image: no pixels to process")]
    EmptyImage,

    /// libimagequant failure
    #[error("libimagequant error: {0}")]
    ImageQuant(#[from] imagequant::Error),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
