//! Grayscale conversion
//!
//! Gray values use ITU-R 601-2 luma weights in 16-bit fixed point:
//! `(19595 * R + 38470 * G + 7471 * B + 0x8000) >> 16`.

use crate::ColorResult;
use pixelart_core::{Pix, color};

/// Convert RGB to a gray value using ITU-R 601-2 luma weights
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    color::luma(r, g, b)
}

/// Convert an image to gray, returned as RGB with R = G = B.
///
/// Any depth is accepted. Colormapped images use their entries' colors
/// and alpha is ignored, so the result is always opaque 32 bpp RGB.
///
/// # Examples
///
/// ```
/// use pixelart_core::{PixMut, PixelDepth};
/// use pixelart_color::to_grayscale;
///
/// let mut pix = PixMut::new(1, 1, PixelDepth::Bit32).unwrap();
/// pix.set_rgb(0, 0, 255, 0, 0).unwrap();
/// let gray = to_grayscale(&pix.into()).unwrap();
/// assert_eq!(gray.get_rgb(0, 0), Some((76, 76, 76)));
/// ```
pub fn to_grayscale(pix: &Pix) -> ColorResult<Pix> {
    let luminance = pix.convert_to_8()?;
    Ok(luminance.convert_to_rgb()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelart_core::{PixMut, PixelDepth};

    #[test]
    fn test_rgb_to_gray() {
        assert_eq!(rgb_to_gray(255, 0, 0), 76);
        assert_eq!(rgb_to_gray(0, 255, 0), 150);
        assert_eq!(rgb_to_gray(0, 0, 255), 29);
        assert_eq!(rgb_to_gray(77, 77, 77), 77);
    }

    #[test]
    fn test_to_grayscale_rgba() {
        let mut pix = PixMut::new(2, 1, PixelDepth::Bit32).unwrap();
        pix.set_spp(4).unwrap();
        pix.set_rgba(0, 0, 0, 255, 0, 0).unwrap();
        pix.set_rgba(1, 0, 10, 20, 30, 128).unwrap();
        let gray = to_grayscale(&pix.into()).unwrap();

        assert!(gray.is_rgb());
        assert_eq!(gray.get_rgba(0, 0), Some((150, 150, 150, 255)));
        let v = rgb_to_gray(10, 20, 30);
        assert_eq!(gray.get_rgb(1, 0), Some((v, v, v)));
    }

    #[test]
    fn test_to_grayscale_luminance_input() {
        let mut pix = PixMut::new(1, 1, PixelDepth::Bit8).unwrap();
        pix.set_pixel(0, 0, 99).unwrap();
        let gray = to_grayscale(&pix.into()).unwrap();
        assert_eq!(gray.get_rgb(0, 0), Some((99, 99, 99)));
    }
}
