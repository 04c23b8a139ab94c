//! Distinct color histograms
//!
//! Counts how many pixels carry each RGB color. Quantizers work on this
//! weighted histogram rather than on raw pixels, and palette images are
//! classified by their distinct color count.

use super::{Pix, PixelDepth};
use crate::color;
use crate::error::Result;
use std::collections::HashMap;

/// One distinct color of an image and its pixel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCount {
    /// Color packed as `0xRRGGBB00`
    pub color: u32,
    /// Number of pixels with this color
    pub count: u32,
}

impl ColorCount {
    /// The color as an (r, g, b) triple.
    #[inline]
    pub fn rgb(&self) -> (u8, u8, u8) {
        color::extract_rgb(self.color)
    }
}

impl Pix {
    /// Histogram of distinct RGB colors, sorted by packed color value.
    ///
    /// Alpha is ignored. Non-RGB images are expanded to RGB first, so
    /// colormapped images report the colors their pixels actually use.
    pub fn color_counts(&self) -> Result<Vec<ColorCount>> {
        let expanded;
        let pix = if self.depth() == PixelDepth::Bit32 {
            self
        } else {
            expanded = self.convert_to_rgb()?;
            &expanded
        };

        let mut counts: HashMap<u32, u32> = HashMap::new();
        for y in 0..pix.height() {
            for x in 0..pix.width() {
                let key = color::rgb_key(pix.get_pixel_unchecked(x, y));
                *counts.entry(key).or_insert(0) += 1;
            }
        }

        let mut hist: Vec<ColorCount> = counts
            .into_iter()
            .map(|(color, count)| ColorCount { color, count })
            .collect();
        hist.sort_unstable_by_key(|c| c.color);
        Ok(hist)
    }

    /// Distinct colors, or `None` when there are more than `max_colors`.
    pub fn get_colors(&self, max_colors: usize) -> Result<Option<Vec<ColorCount>>> {
        let hist = self.color_counts()?;
        Ok((hist.len() <= max_colors).then_some(hist))
    }

    /// Number of distinct RGB colors in the image.
    pub fn count_colors(&self) -> Result<usize> {
        Ok(self.color_counts()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PixColormap, PixMut};

    fn three_colors() -> Pix {
        let mut pix = PixMut::new(3, 2, PixelDepth::Bit32).unwrap();
        for y in 0..2 {
            pix.set_rgb(0, y, 255, 0, 0).unwrap();
            pix.set_rgb(1, y, 0, 255, 0).unwrap();
        }
        pix.set_rgb(2, 0, 255, 0, 0).unwrap();
        pix.set_rgb(2, 1, 0, 0, 255).unwrap();
        pix.into()
    }

    #[test]
    fn test_color_counts() {
        let hist = three_colors().color_counts().unwrap();
        assert_eq!(hist.len(), 3);
        // Sorted by packed value: blue < green < red
        assert_eq!(hist[0].rgb(), (0, 0, 255));
        assert_eq!(hist[0].count, 1);
        assert_eq!(hist[1].count, 2);
        assert_eq!(hist[2].rgb(), (255, 0, 0));
        assert_eq!(hist[2].count, 3);
    }

    #[test]
    fn test_get_colors_limit() {
        let pix = three_colors();
        assert!(pix.get_colors(2).unwrap().is_none());
        assert_eq!(pix.get_colors(3).unwrap().map(|h| h.len()), Some(3));
    }

    #[test]
    fn test_alpha_is_ignored() {
        let mut pix = PixMut::new(2, 1, PixelDepth::Bit32).unwrap();
        pix.set_spp(4).unwrap();
        pix.set_rgba(0, 0, 5, 5, 5, 0).unwrap();
        pix.set_rgba(1, 0, 5, 5, 5, 255).unwrap();
        let pix: Pix = pix.into();
        assert_eq!(pix.count_colors().unwrap(), 1);
    }

    #[test]
    fn test_colormapped_counts_used_entries() {
        let cmap = PixColormap::from_rgb(&[(1, 1, 1), (2, 2, 2), (3, 3, 3)]).unwrap();
        let mut pix = PixMut::new(4, 1, PixelDepth::Bit2).unwrap();
        pix.set_colormap(Some(cmap)).unwrap();
        pix.set_pixel(3, 0, 2).unwrap();
        let pix: Pix = pix.into();
        assert_eq!(pix.count_colors().unwrap(), 2);
    }
}
