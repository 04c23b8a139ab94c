//! Pixel depth conversion functions
//!
//! Functions for converting between the supported pixel formats:
//! luminance (8 bpp), RGB (32 bpp), and the indexed/binary depths.
//!
//! Gray values from color always use ITU-R 601-2 luma weights
//! (see [`color::luma`]).

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Expand a raw 1/2/4 bpp sample (no colormap) to an 8-bit gray value.
///
/// Binary images treat a set bit as black.
#[inline]
fn expand_to_gray(val: u32, depth: PixelDepth) -> u8 {
    match depth {
        PixelDepth::Bit1 => {
            if val == 0 {
                255
            } else {
                0
            }
        }
        PixelDepth::Bit2 => (val * 85) as u8,
        PixelDepth::Bit4 => (val * 17) as u8,
        PixelDepth::Bit8 => val as u8,
        PixelDepth::Bit32 => {
            let (r, g, b) = color::extract_rgb(val);
            color::luma(r, g, b)
        }
    }
}

impl Pix {
    /// Convert any-depth image to 8-bit luminance.
    ///
    /// It always creates a new image (never a clone).
    ///
    /// Conversion rules:
    /// - **1 bpp**: 0 -> 255 (white), 1 -> 0 (black)
    /// - **2 / 4 bpp**: evenly spaced values over 0..=255
    /// - **8 bpp**: copy (lossless)
    /// - **32 bpp**: luma of R, G, B; alpha is ignored
    /// - **colormapped**: luma of each entry's color
    ///
    /// # Examples
    ///
    /// ```
    /// use pixelart_core::{Pix, PixelDepth};
    ///
    /// let pix32 = Pix::new(10, 10, PixelDepth::Bit32).unwrap();
    /// let pix8 = pix32.convert_to_8().unwrap();
    /// assert_eq!(pix8.depth(), PixelDepth::Bit8);
    /// ```
    pub fn convert_to_8(&self) -> Result<Pix> {
        let w = self.width();
        let h = self.height();
        let depth = self.depth();

        let lut: Option<Vec<u8>> = self.colormap().map(|cmap| {
            cmap.colors()
                .iter()
                .map(|c| color::luma(c.red, c.green, c.blue))
                .collect()
        });

        let mut result = PixMut::new(w, h, PixelDepth::Bit8)?;
        for y in 0..h {
            for x in 0..w {
                let val = self.get_pixel_unchecked(x, y);
                let gray = match &lut {
                    Some(lut) => lookup(lut, val)?,
                    None => expand_to_gray(val, depth),
                };
                result.set_pixel_unchecked(x, y, gray as u32);
            }
        }
        Ok(result.into())
    }

    /// Convert 32 bpp RGB or RGBA to 8 bpp luminance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 32 bpp.
    pub fn convert_rgb_to_luminance(&self) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.convert_to_8()
    }

    /// Convert any-depth image to 32 bpp RGB (spp = 3, alpha byte 255).
    ///
    /// Conversion rules:
    /// - **1 bpp**: 0 -> white, 1 -> black
    /// - **2 / 4 / 8 bpp**: gray value replicated into R = G = B
    /// - **colormapped**: the entry's color
    /// - **32 bpp**: copy with the alpha channel dropped
    pub fn convert_to_rgb(&self) -> Result<Pix> {
        if self.has_colormap() {
            return self.remove_colormap();
        }

        let w = self.width();
        let h = self.height();
        let depth = self.depth();

        let mut result = PixMut::new(w, h, PixelDepth::Bit32)?;
        for y in 0..h {
            for x in 0..w {
                let val = self.get_pixel_unchecked(x, y);
                let pixel = if depth == PixelDepth::Bit32 {
                    color::rgb_key(val) | 0xff
                } else {
                    let gray = expand_to_gray(val, depth);
                    color::compose_rgb(gray, gray, gray)
                };
                result.set_pixel_unchecked(x, y, pixel);
            }
        }
        Ok(result.into())
    }

    /// Remove the colormap, expanding each index to its RGB color.
    ///
    /// Images without a colormap are returned as a deep copy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if a pixel refers past the end
    /// of the colormap.
    pub fn remove_colormap(&self) -> Result<Pix> {
        let Some(cmap) = self.colormap() else {
            return Ok(self.deep_clone());
        };

        let lut: Vec<u32> = cmap
            .colors()
            .iter()
            .map(|c| color::compose_rgb(c.red, c.green, c.blue))
            .collect();

        let w = self.width();
        let h = self.height();
        let mut result = PixMut::new(w, h, PixelDepth::Bit32)?;
        for y in 0..h {
            for x in 0..w {
                let val = self.get_pixel_unchecked(x, y);
                result.set_pixel_unchecked(x, y, lookup(&lut, val)?);
            }
        }
        Ok(result.into())
    }
}

#[inline]
fn lookup<T: Copy>(lut: &[T], index: u32) -> Result<T> {
    lut.get(index as usize)
        .copied()
        .ok_or(Error::IndexOutOfBounds {
            index: index as usize,
            len: lut.len(),
        })
}
