//! pixelart-test - Regression test framework for pixelart
//!
//! Every regression test creates a [`RegParams`], records a sequence of
//! numbered checks, and asserts on [`RegParams::cleanup`] at the end.
//! Failures are collected rather than panicking, so one run reports all
//! mismatches of a test.
//!
//! Input images are synthesized in memory by the fixture builders in this
//! crate; no image files are read or written.
//!
//! # Usage
//!
//! ```
//! use pixelart_test::{RegParams, solid_rgb};
//!
//! let pix = solid_rgb(4, 4, (255, 0, 0)).unwrap();
//! let mut rp = RegParams::new("usage");
//! rp.compare_values(4.0, pix.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;

use pixelart_core::{Pix, PixMut, PixelDepth, color};

/// Build a 32 bpp RGB image from a per-pixel color function.
pub fn rgb_from_fn<F>(width: u32, height: u32, f: F) -> TestResult<Pix>
where
    F: Fn(u32, u32) -> (u8, u8, u8),
{
    let mut pix = PixMut::new(width, height, PixelDepth::Bit32)?;
    for y in 0..height {
        for x in 0..width {
            let (r, g, b) = f(x, y);
            pix.set_pixel_unchecked(x, y, color::compose_rgb(r, g, b));
        }
    }
    Ok(pix.into())
}

/// Build a 32 bpp RGBA image from a per-pixel color function.
pub fn rgba_from_fn<F>(width: u32, height: u32, f: F) -> TestResult<Pix>
where
    F: Fn(u32, u32) -> (u8, u8, u8, u8),
{
    let mut pix = PixMut::new(width, height, PixelDepth::Bit32)?;
    pix.set_spp(4)?;
    for y in 0..height {
        for x in 0..width {
            let (r, g, b, a) = f(x, y);
            pix.set_pixel_unchecked(x, y, color::compose_rgba(r, g, b, a));
        }
    }
    Ok(pix.into())
}

/// Build an 8 bpp luminance image from a per-pixel function.
pub fn gray_from_fn<F>(width: u32, height: u32, f: F) -> TestResult<Pix>
where
    F: Fn(u32, u32) -> u8,
{
    let mut pix = PixMut::new(width, height, PixelDepth::Bit8)?;
    for y in 0..height {
        for x in 0..width {
            pix.set_pixel_unchecked(x, y, f(x, y) as u32);
        }
    }
    Ok(pix.into())
}

/// Uniform RGB image.
pub fn solid_rgb(width: u32, height: u32, rgb: (u8, u8, u8)) -> TestResult<Pix> {
    rgb_from_fn(width, height, |_, _| rgb)
}

/// Uniform RGBA image.
pub fn solid_rgba(width: u32, height: u32, rgba: (u8, u8, u8, u8)) -> TestResult<Pix> {
    rgba_from_fn(width, height, |_, _| rgba)
}

/// RGB image with red rising left to right, green rising top to bottom
/// and blue rising along the diagonal.
///
/// Each (x, y) gets its own color, so a 32x32 gradient holds 1024 colors.
pub fn rgb_gradient(width: u32, height: u32) -> TestResult<Pix> {
    let sx = width.saturating_sub(1).max(1);
    let sy = height.saturating_sub(1).max(1);
    rgb_from_fn(width, height, |x, y| {
        let r = (x * 255 / sx) as u8;
        let g = (y * 255 / sy) as u8;
        let b = ((x + y) * 255 / (sx + sy)) as u8;
        (r, g, b)
    })
}

/// 8 bpp horizontal ramp from 0 at the left edge to 255 at the right.
pub fn gray_ramp(width: u32, height: u32) -> TestResult<Pix> {
    let sx = width.saturating_sub(1).max(1);
    gray_from_fn(width, height, |x, _| (x * 255 / sx) as u8)
}

/// RGBA checkerboard of `block`-sized squares.
///
/// All pixels share the color `rgb`; squares alternate between alpha
/// `alpha_even` (top-left square) and `alpha_odd`.
pub fn alpha_checker(
    width: u32,
    height: u32,
    block: u32,
    rgb: (u8, u8, u8),
    alpha_even: u8,
    alpha_odd: u8,
) -> TestResult<Pix> {
    let block = block.max(1);
    let (r, g, b) = rgb;
    rgba_from_fn(width, height, |x, y| {
        let a = if (x / block + y / block) % 2 == 0 {
            alpha_even
        } else {
            alpha_odd
        };
        (r, g, b, a)
    })
}
