//! pixelart-core - Image container for pixel-art transforms
//!
//! This crate provides the data structures shared by the pixelart
//! transform crates:
//!
//! - [`Pix`] / [`PixMut`] - The image container (immutable / mutable)
//! - [`PixColormap`] - Color palette for indexed images
//! - [`color`] - Packing helpers for 32-bit pixels and luma weights
//! - [`interop`] - Conversion to and from the `image` crate's `DynamicImage`

pub mod colormap;
pub mod error;
pub mod interop;
pub mod pix;

pub use colormap::{PixColormap, RgbaQuad};
pub use error::{Error, Result};
pub use pix::{ColorCount, Pix, PixMut, PixelDepth};

/// Color channel helpers for 32-bit RGBA pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// ITU-R 601-2 luma weights in 16-bit fixed point (they sum to 65536).
    pub const LUMA_RED_FIXED: u32 = 19595;
    pub const LUMA_GREEN_FIXED: u32 = 38470;
    pub const LUMA_BLUE_FIXED: u32 = 7471;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }

    /// Drop the alpha byte, leaving `0xRRGGBB00`.
    #[inline]
    pub fn rgb_key(pixel: u32) -> u32 {
        pixel & 0xffff_ff00
    }

    /// Luminance of an RGB triple using ITU-R 601-2 weights, rounded.
    #[inline]
    pub fn luma(r: u8, g: u8, b: u8) -> u8 {
        let sum = LUMA_RED_FIXED * r as u32
            + LUMA_GREEN_FIXED * g as u32
            + LUMA_BLUE_FIXED * b as u32
            + 0x8000;
        (sum >> 16) as u8
    }

}
