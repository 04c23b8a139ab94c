//! Rectangle clipping
//!
//! Extracts an axis-aligned region of an image, clipped to the image
//! bounds. Block downscaling uses this to pull out each source block.

use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};

impl Pix {
    /// Extract the rectangle at (x, y) of size w×h.
    ///
    /// The rectangle is clipped to the image bounds, so the result may be
    /// smaller than requested. Depth, spp and colormap are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the rectangle has a zero
    /// dimension or its origin lies outside the image, i.e. when the
    /// clipped region would hold no pixels.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixelart_core::{Pix, PixelDepth};
    ///
    /// let pix = Pix::new(100, 80, PixelDepth::Bit8).unwrap();
    /// let clipped = pix.clip_rectangle(80, 60, 50, 50).unwrap();
    /// assert_eq!(clipped.width(), 20);
    /// assert_eq!(clipped.height(), 20);
    /// ```
    pub fn clip_rectangle(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Pix> {
        if w == 0 || h == 0 {
            return Err(Error::InvalidParameter(format!(
                "clip rectangle has zero dimension: {w}x{h}"
            )));
        }

        let src_w = self.width();
        let src_h = self.height();
        if x >= src_w || y >= src_h {
            return Err(Error::InvalidParameter(format!(
                "clip rectangle origin ({x}, {y}) is outside image bounds ({src_w}x{src_h})"
            )));
        }

        let clip_w = w.min(src_w - x);
        let clip_h = h.min(src_h - y);

        let mut pixd = PixMut::new(clip_w, clip_h, self.depth())?;
        if self.depth() == PixelDepth::Bit32 {
            pixd.set_spp(self.spp())?;
        }
        pixd.set_colormap(self.colormap().cloned())?;

        for dy in 0..clip_h {
            for dx in 0..clip_w {
                let val = self.get_pixel_unchecked(x + dx, y + dy);
                pixd.set_pixel_unchecked(dx, dy, val);
            }
        }

        Ok(pixd.into())
    }
}
