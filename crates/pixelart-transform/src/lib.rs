//! pixelart-transform - Geometric size changes for pixelart
//!
//! This crate provides the size-changing operations of the pixel-art
//! pipeline:
//!
//! - Block downscaling by an integer factor, with optional per-block alpha
//!   averaging and clipping
//! - Nearest-neighbor resizing to an exact size, to a size with preserved
//!   aspect ratio, or by scale factors

pub mod downscale;
mod error;
pub mod scale;

pub use downscale::{DownscaleOptions, downscale, downscale_with_alpha, downscale_with_options};
pub use error::{TransformError, TransformResult};
pub use scale::{resize, scale_by_sampling, scale_to_size};
