//! PIX - The main image container
//!
//! The `Pix` structure is the image type every pixelart transform consumes
//! and produces. It supports 1, 2, 4, 8 and 32 bpp data, with an optional
//! colormap for the indexed depths.
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - Pixels are packed MSB to LSB within each word
//! - For 32-bit images, channel order is RGBA (red in MSB)
//!
//! # Formats
//!
//! | Format | depth | spp |
//! |---|---|---|
//! | Luminance | 8 | 1 |
//! | RGB | 32 | 3 |
//! | RGBA | 32 | 4 |
//! | Binary (set bit = black) | 1 | 1 |
//! | Indexed | 1, 2, 4, 8 + colormap | 1 |
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership) and is never
//! modified once built. Pixel data is written through [`PixMut`], which is
//! converted into a `Pix` with `Into<Pix>` when complete.

mod access;
mod clip;
pub mod convert;
mod histogram;

pub use access::*;
pub use histogram::ColorCount;

use crate::colormap::PixColormap;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 1-bit binary image
    Bit1 = 1,
    /// 2-bit indexed image
    Bit2 = 2,
    /// 4-bit indexed image
    Bit4 = 4,
    /// 8-bit luminance or indexed color
    Bit8 = 8,
    /// 32-bit RGB or RGBA
    Bit32 = 32,
}

impl PixelDepth {
    /// Smallest indexed depth able to address `ncolors` colormap entries.
    pub fn for_colormap_size(ncolors: usize) -> Self {
        match ncolors {
            0..=2 => PixelDepth::Bit1,
            3..=4 => PixelDepth::Bit2,
            5..=16 => PixelDepth::Bit4,
            _ => PixelDepth::Bit8,
        }
    }

    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Check if a colormap is allowed for this depth.
    ///
    /// Colormaps are supported for 1, 2, 4, and 8 bpp images only.
    pub fn colormap_allowed(self) -> bool {
        !matches!(self, PixelDepth::Bit32)
    }

    /// Get the maximum pixel value representable at this depth.
    pub fn max_value(self) -> u32 {
        match self {
            PixelDepth::Bit32 => u32::MAX,
            _ => (1u32 << self.bits()) - 1,
        }
    }
}

/// Internal PIX data
#[derive(Debug)]
struct PixData {
    width: u32,
    height: u32,
    depth: PixelDepth,
    /// Samples per pixel (1 for gray/indexed, 3 for RGB, 4 for RGBA)
    spp: u32,
    /// 32-bit words per line
    wpl: u32,
    colormap: Option<PixColormap>,
    data: Vec<u32>,
}

impl PixData {
    fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let wpl = compute_wpl(width, depth)?;
        let spp = match depth {
            PixelDepth::Bit32 => 3,
            _ => 1,
        };
        Ok(Self {
            width,
            height,
            depth,
            spp,
            wpl,
            colormap: None,
            data: vec![0u32; wpl as usize * height as usize],
        })
    }
}

/// Compute words per line for given width and depth.
///
/// Uses u64 arithmetic so that very wide rows are reported instead of
/// wrapping.
#[inline]
fn compute_wpl(width: u32, depth: PixelDepth) -> Result<u32> {
    let bits_per_line = u64::from(width) * u64::from(depth.bits());
    u32::try_from(bits_per_line.div_ceil(32)).map_err(|_| {
        Error::InvalidParameter(format!(
            "image row too large: width={width} depth={}",
            depth.bits()
        ))
    })
}

/// PIX - Main image container
///
/// # Examples
///
/// ```
/// use pixelart_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(64, 48, PixelDepth::Bit32).unwrap();
/// assert_eq!(pix.width(), 64);
/// assert_eq!(pix.height(), 48);
/// assert!(pix.is_rgb());
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero; 32 bpp images start as RGB.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        PixMut::new(width, height, depth).map(Into::into)
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get the words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// True for 32 bpp images with three samples.
    #[inline]
    pub fn is_rgb(&self) -> bool {
        self.inner.depth == PixelDepth::Bit32 && self.inner.spp == 3
    }

    /// True for 32 bpp images carrying an alpha sample.
    #[inline]
    pub fn is_rgba(&self) -> bool {
        self.inner.depth == PixelDepth::Bit32 && self.inner.spp == 4
    }

    /// Check whether this image has a colormap attached.
    #[inline]
    pub fn has_colormap(&self) -> bool {
        self.inner.colormap.is_some()
    }

    /// Get a reference to the image's colormap, if present.
    #[inline]
    pub fn colormap(&self) -> Option<&PixColormap> {
        self.inner.colormap.as_ref()
    }

    /// Get the words of a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &self.inner.data[start..end]
    }

    /// Create a zeroed image of a different size that keeps this image's
    /// depth, spp and colormap.
    pub fn create_template_sized(&self, width: u32, height: u32) -> Result<PixMut> {
        let mut pixd = PixMut::new(width, height, self.inner.depth)?;
        pixd.inner.spp = self.inner.spp;
        pixd.inner.colormap = self.inner.colormap.clone();
        Ok(pixd)
    }

    /// Check if two PIX have the same width, height, and depth.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.depth == other.inner.depth
    }

    /// Create a deep copy of this PIX.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        self.to_mut().into()
    }

    /// Create a mutable copy of this PIX.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: PixData {
                width: self.inner.width,
                height: self.inner.height,
                depth: self.inner.depth,
                spp: self.inner.spp,
                wpl: self.inner.wpl,
                colormap: self.inner.colormap.clone(),
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Mutable PIX
///
/// Exclusive owner of image data while it is being written. Convert back
/// to an immutable [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a new zeroed image ready for writing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Ok(PixMut {
            inner: PixData::new(width, height, depth)?,
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.spp
    }

    /// Get words per line.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Set samples per pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for an spp that does not match
    /// the depth (3 or 4 at 32 bpp, 1 otherwise).
    pub fn set_spp(&mut self, spp: u32) -> Result<()> {
        let valid = match self.inner.depth {
            PixelDepth::Bit32 => spp == 3 || spp == 4,
            _ => spp == 1,
        };
        if !valid {
            return Err(Error::InvalidParameter(format!(
                "spp {spp} not valid for {} bpp",
                self.inner.depth.bits()
            )));
        }
        self.inner.spp = spp;
        Ok(())
    }

    /// Get raw access to the image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to a specific row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = (y * self.inner.wpl) as usize;
        let end = start + self.inner.wpl as usize;
        &mut self.inner.data[start..end]
    }

    /// Check whether this image has a colormap attached.
    #[inline]
    pub fn has_colormap(&self) -> bool {
        self.inner.colormap.is_some()
    }

    /// Get a reference to the image's colormap, if present.
    #[inline]
    pub fn colormap(&self) -> Option<&PixColormap> {
        self.inner.colormap.as_ref()
    }

    /// Set or remove the colormap.
    ///
    /// Colormaps are only valid for 1, 2, 4, and 8 bpp images, and the
    /// colormap depth must match the image depth.
    pub fn set_colormap(&mut self, cmap: Option<PixColormap>) -> Result<()> {
        if let Some(ref cm) = cmap {
            if !self.inner.depth.colormap_allowed() {
                return Err(Error::ColormapNotAllowed(self.inner.depth.bits()));
            }
            if cm.depth() != self.inner.depth.bits() {
                return Err(Error::InvalidParameter(format!(
                    "colormap depth {} does not match image depth {}",
                    cm.depth(),
                    self.inner.depth.bits()
                )));
            }
        }
        self.inner.colormap = cmap;
        Ok(())
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_depth() {
        assert_eq!(PixelDepth::Bit8.bits(), 8);
        assert_eq!(PixelDepth::Bit8.max_value(), 255);
        assert!(PixelDepth::Bit8.colormap_allowed());
        assert!(!PixelDepth::Bit32.colormap_allowed());
    }

    #[test]
    fn test_depth_for_colormap_size() {
        assert_eq!(PixelDepth::for_colormap_size(1), PixelDepth::Bit1);
        assert_eq!(PixelDepth::for_colormap_size(2), PixelDepth::Bit1);
        assert_eq!(PixelDepth::for_colormap_size(3), PixelDepth::Bit2);
        assert_eq!(PixelDepth::for_colormap_size(16), PixelDepth::Bit4);
        assert_eq!(PixelDepth::for_colormap_size(17), PixelDepth::Bit8);
        assert_eq!(PixelDepth::for_colormap_size(256), PixelDepth::Bit8);
    }

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 200, PixelDepth::Bit8).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 200);
        assert_eq!(pix.depth(), PixelDepth::Bit8);
        assert_eq!(pix.spp(), 1);

        // 100 * 8 = 800 bits = 25 words
        assert_eq!(pix.wpl(), 25);

        let rgb = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
        assert!(rgb.is_rgb());
        assert!(!rgb.is_rgba());
    }

    #[test]
    fn test_pix_creation_invalid() {
        assert!(matches!(
            Pix::new(0, 100, PixelDepth::Bit8),
            Err(Error::InvalidDimension { width: 0, height: 100 })
        ));
        assert!(Pix::new(100, 0, PixelDepth::Bit8).is_err());
    }

    #[test]
    fn test_pix_deep_clone() {
        let pix1 = Pix::new(100, 100, PixelDepth::Bit8).unwrap();
        let pix2 = pix1.deep_clone();

        assert_ne!(pix1.row_data(0).as_ptr(), pix2.row_data(0).as_ptr());
        assert_eq!(pix1.row_data(99), pix2.row_data(99));
    }

    #[test]
    fn test_wpl_calculation() {
        let pix = Pix::new(32, 1, PixelDepth::Bit1).unwrap();
        assert_eq!(pix.wpl(), 1);

        let pix = Pix::new(33, 1, PixelDepth::Bit1).unwrap();
        assert_eq!(pix.wpl(), 2);

        let pix = Pix::new(10, 1, PixelDepth::Bit32).unwrap();
        assert_eq!(pix.wpl(), 10);
    }

    #[test]
    fn test_set_spp() {
        let mut pix = PixMut::new(4, 4, PixelDepth::Bit32).unwrap();
        pix.set_spp(4).unwrap();
        assert_eq!(pix.spp(), 4);
        assert!(pix.set_spp(2).is_err());

        let mut gray = PixMut::new(4, 4, PixelDepth::Bit8).unwrap();
        assert!(gray.set_spp(3).is_err());
    }

    #[test]
    fn test_create_template_keeps_format() {
        let mut src = PixMut::new(10, 6, PixelDepth::Bit32).unwrap();
        src.set_spp(4).unwrap();
        src.set_rgba(1, 1, 9, 8, 7, 6).unwrap();
        let src: Pix = src.into();

        let sized: Pix = src.create_template_sized(3, 2).unwrap().into();
        assert_eq!((sized.width(), sized.height()), (3, 2));
        assert!(sized.is_rgba());
    }

    #[test]
    fn test_set_colormap_checks_depth() {
        let cmap = PixColormap::new(8).unwrap();
        let mut rgb = PixMut::new(4, 4, PixelDepth::Bit32).unwrap();
        assert!(matches!(
            rgb.set_colormap(Some(cmap.clone())),
            Err(Error::ColormapNotAllowed(32))
        ));

        let mut four = PixMut::new(4, 4, PixelDepth::Bit4).unwrap();
        assert!(four.set_colormap(Some(cmap)).is_err());
    }
}
