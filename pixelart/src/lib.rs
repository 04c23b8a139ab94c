//! pixelart - Pixel-art style image transforms
//!
//! Each operation takes an image and returns a new one:
//!
//! - Block downscaling with optional alpha averaging ([`transform::downscale`])
//! - Nearest-neighbor resizing ([`transform::resize`])
//! - Palette reduction with optional dithering ([`color::limit_colors`])
//! - Grayscale ([`color::to_grayscale`])
//! - Pure black and white ([`color::to_black_and_white`])
//!
//! # Example
//!
//! ```
//! use pixelart::{Pix, PixelDepth};
//! use pixelart::color::{LimitColorsOptions, limit_colors};
//! use pixelart::transform::{downscale, resize};
//!
//! let pix = Pix::new(64, 48, PixelDepth::Bit32).unwrap();
//! let small = downscale(&pix, 4, false, 0.3).unwrap();
//! assert_eq!((small.width(), small.height()), (16, 12));
//!
//! let reduced = limit_colors(&small, &LimitColorsOptions::default()).unwrap();
//! let big = resize(&reduced, (64, 48)).unwrap();
//! assert!(big.has_colormap());
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixelart_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pixelart_color as color;
pub use pixelart_transform as transform;
