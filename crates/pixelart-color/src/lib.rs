//! pixelart Color - Palette reduction and tone conversion
//!
//! This crate provides the color side of pixel-art processing:
//!
//! - **Color limiting** ([`palette`]): Reduce an image to a small palette,
//!   derived from the image or taken from a palette image
//! - **Quantization** ([`quantize`]): Median cut, max coverage, fast octree
//!   and libimagequant palette generation, with optional k-means refinement
//! - **Remapping** ([`dither`]): Nearest-color and Floyd-Steinberg remapping
//! - **Grayscale** ([`colorspace`]): Luma conversion returned as RGB
//! - **Thresholding** ([`threshold`]): Pure black and white conversion

pub mod colorspace;
pub mod dither;
mod error;
pub mod options;
pub mod palette;
pub mod quantize;
pub mod threshold;

// Re-export core types
pub use pixelart_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

// Re-export method selectors
pub use options::{DitherMethod, QuantizeMethod};

// Re-export color limiting
pub use palette::{LimitColorsOptions, PaletteSource, limit_colors};

// Re-export quantization functions
pub use quantize::{
    MAX_PALETTE_COLORS, fast_octree, kmeans_refine, max_coverage, median_cut, quantize,
};

// Re-export remapping
pub use dither::remap;

// Re-export grayscale and threshold functions
pub use colorspace::{rgb_to_gray, to_grayscale};
pub use threshold::{
    ThresholdOptions, threshold_to_binary, to_black_and_white, to_black_and_white_with_options,
};
