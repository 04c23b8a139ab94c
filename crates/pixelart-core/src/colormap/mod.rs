//! PixColormap - Color palette for indexed images
//!
//! A colormap is used with 1, 2, 4, and 8 bpp images to map
//! pixel values to RGBA colors. Quantization produces one, and the
//! remap step consumes one.

use crate::error::{Error, Result};

/// RGBA color entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RgbaQuad {
    /// Red component
    pub red: u8,
    /// Green component
    pub green: u8,
    /// Blue component
    pub blue: u8,
    /// Alpha component
    pub alpha: u8,
}

impl RgbaQuad {
    /// Create a new RGBA color
    pub fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Create an RGB color (alpha = 255)
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Create a grayscale color
    pub fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }
}

/// Colormap for indexed images
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixColormap {
    colors: Vec<RgbaQuad>,
    depth: u32,
}

impl PixColormap {
    /// Create a new, empty colormap for the specified depth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] unless depth is 1, 2, 4 or 8.
    pub fn new(depth: u32) -> Result<Self> {
        if !matches!(depth, 1 | 2 | 4 | 8) {
            return Err(Error::InvalidDepth(depth));
        }
        Ok(Self {
            colors: Vec::new(),
            depth,
        })
    }

    /// Build a colormap of the smallest depth that holds `colors`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColormapFull`] for more than 256 colors.
    pub fn from_rgb(colors: &[(u8, u8, u8)]) -> Result<Self> {
        if colors.len() > 256 {
            return Err(Error::ColormapFull(colors.len()));
        }
        let depth = crate::PixelDepth::for_colormap_size(colors.len()).bits();
        let mut cmap = Self::new(depth)?;
        for &(r, g, b) in colors {
            cmap.add_rgb(r, g, b)?;
        }
        Ok(cmap)
    }

    /// Get the depth
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Get the number of colors
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get maximum number of entries
    #[inline]
    pub fn max_entries(&self) -> usize {
        1usize << self.depth
    }

    /// Get a color by index
    pub fn get(&self, index: usize) -> Option<&RgbaQuad> {
        self.colors.get(index)
    }

    /// Add a color to the colormap, returning its index.
    pub fn add_color(&mut self, color: RgbaQuad) -> Result<usize> {
        if self.colors.len() >= self.max_entries() {
            return Err(Error::ColormapFull(self.max_entries()));
        }
        self.colors.push(color);
        Ok(self.colors.len() - 1)
    }

    /// Add an RGB color
    pub fn add_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<usize> {
        self.add_color(RgbaQuad::rgb(r, g, b))
    }

    /// Get RGB values at index
    pub fn get_rgb(&self, index: usize) -> Option<(u8, u8, u8)> {
        self.colors.get(index).map(|c| (c.red, c.green, c.blue))
    }

    /// Get RGBA values at index
    pub fn get_rgba(&self, index: usize) -> Option<(u8, u8, u8, u8)> {
        self.colors
            .get(index)
            .map(|c| (c.red, c.green, c.blue, c.alpha))
    }

    /// Find the nearest color in the colormap.
    ///
    /// Distance is squared Euclidean in RGB; the lowest index wins ties.
    /// Returns `None` only for an empty colormap.
    pub fn find_nearest(&self, r: u8, g: u8, b: u8) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (i, c) in self.colors.iter().enumerate() {
            let dr = r as i32 - c.red as i32;
            let dg = g as i32 - c.green as i32;
            let db = b as i32 - c.blue as i32;
            let dist = (dr * dr + dg * dg + db * db) as u32;
            if dist == 0 {
                return Some(i);
            }
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((i, dist));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Get all colors as a slice
    pub fn colors(&self) -> &[RgbaQuad] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_depth() {
        assert!(PixColormap::new(8).is_ok());
        assert!(matches!(PixColormap::new(32), Err(Error::InvalidDepth(32))));
        assert!(PixColormap::new(3).is_err());
    }

    #[test]
    fn test_add_until_full() {
        let mut cmap = PixColormap::new(1).unwrap();
        assert_eq!(cmap.add_rgb(0, 0, 0).unwrap(), 0);
        assert_eq!(cmap.add_rgb(255, 255, 255).unwrap(), 1);
        assert!(matches!(cmap.add_rgb(1, 1, 1), Err(Error::ColormapFull(2))));
        assert_eq!(cmap.len(), 2);
    }

    #[test]
    fn test_from_rgb_picks_depth() {
        let cmap = PixColormap::from_rgb(&[(1, 2, 3), (4, 5, 6), (7, 8, 9)]).unwrap();
        assert_eq!(cmap.depth(), 2);
        assert_eq!(cmap.get_rgb(2), Some((7, 8, 9)));
        assert_eq!(cmap.get_rgba(0), Some((1, 2, 3, 255)));

        let many: Vec<_> = (0..=255u8).map(|v| (v, v, v)).collect();
        let cmap = PixColormap::from_rgb(&many).unwrap();
        assert_eq!(cmap.depth(), 8);
        assert_eq!(cmap.get_rgb(200), Some((200, 200, 200)));

        let too_many: Vec<_> = (0..257u32).map(|_| (0, 0, 0)).collect();
        assert!(PixColormap::from_rgb(&too_many).is_err());
    }

    #[test]
    fn test_find_nearest() {
        let cmap = PixColormap::from_rgb(&[(0, 0, 0), (255, 0, 0), (0, 0, 255)]).unwrap();
        assert_eq!(cmap.find_nearest(200, 10, 10), Some(1));
        assert_eq!(cmap.find_nearest(10, 10, 200), Some(2));
        assert_eq!(cmap.find_nearest(0, 0, 0), Some(0));
    }

    #[test]
    fn test_find_nearest_tie_prefers_lowest_index() {
        let cmap = PixColormap::from_rgb(&[(0, 0, 0), (20, 0, 0)]).unwrap();
        assert_eq!(cmap.find_nearest(10, 0, 0), Some(0));
    }

    #[test]
    fn test_find_nearest_empty() {
        let cmap = PixColormap::new(8).unwrap();
        assert_eq!(cmap.find_nearest(1, 2, 3), None);
    }
}
