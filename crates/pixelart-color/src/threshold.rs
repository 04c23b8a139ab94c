//! Monochrome thresholding
//!
//! Converts an image to pure black and white by comparing each pixel's
//! luminance against a fixed threshold, without dithering. A luminance
//! equal to the threshold is black whether or not the result is inverted.

use crate::ColorResult;
use pixelart_core::pix::{get_data_byte, set_data_bit};
use pixelart_core::{Pix, PixMut, PixelDepth};
use tracing::debug;

/// Options for [`to_black_and_white_with_options`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdOptions {
    /// Luminance compared against each pixel
    pub threshold: u8,
    /// Swap which side of the threshold becomes white
    pub inverse: bool,
}

impl Default for ThresholdOptions {
    fn default() -> Self {
        Self {
            threshold: 128,
            inverse: false,
        }
    }
}

/// Threshold an image of any depth to 1 bpp.
///
/// A set bit is black. Without `inverse`, luminance above `threshold` is
/// white; with it, luminance below `threshold` is white. Everything else,
/// including luminance equal to `threshold`, is black.
pub fn threshold_to_binary(pix: &Pix, threshold: u8, inverse: bool) -> ColorResult<Pix> {
    let gray = pix.convert_to_8()?;
    let (w, h) = (gray.width(), gray.height());
    let mut out = PixMut::new(w, h, PixelDepth::Bit1)?;

    let mut black = 0u64;
    for y in 0..h {
        let src = gray.row_data(y);
        let dst = out.row_data_mut(y);
        for x in 0..w {
            let lum = get_data_byte(src, x) as u8;
            let white = if inverse {
                lum < threshold
            } else {
                lum > threshold
            };
            if !white {
                set_data_bit(dst, x, 1);
                black += 1;
            }
        }
    }

    let total = w as u64 * h as u64;
    debug!(threshold, inverse, black, total, "Thresholded");
    Ok(out.into())
}

/// Convert to pure black and white, returned as RGB.
///
/// See [`threshold_to_binary`] for the rule; the 1 bpp result is expanded
/// so every pixel is (0, 0, 0) or (255, 255, 255).
pub fn to_black_and_white(pix: &Pix, threshold: u8, inverse: bool) -> ColorResult<Pix> {
    let binary = threshold_to_binary(pix, threshold, inverse)?;
    Ok(binary.convert_to_rgb()?)
}

/// [`to_black_and_white`] driven by [`ThresholdOptions`].
pub fn to_black_and_white_with_options(pix: &Pix, options: &ThresholdOptions) -> ColorResult<Pix> {
    to_black_and_white(pix, options.threshold, options.inverse)
}
