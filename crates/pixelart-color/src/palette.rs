//! Color limiting
//!
//! [`limit_colors`] reduces an image to a small palette. Where the palette
//! comes from is decided once, up front, as a [`PaletteSource`]:
//!
//! | Source | When | Palette |
//! |---|---|---|
//! | `External` | palette image with at most 256 colors | its own distinct colors |
//! | `ExternalRaw` | palette image with over 256 colors | `palette_colors` colors via k-means |
//! | `Derived` | no palette image | `limit` colors quantized from the source |
//!
//! The source image is then remapped onto the palette once, with the
//! requested dithering. Dithering never takes part in deriving the palette.

use crate::dither::remap;
use crate::quantize::{MAX_PALETTE_COLORS, check_palette_size, quantize};
use crate::{ColorError, ColorResult, DitherMethod, QuantizeMethod};
use pixelart_core::{Pix, PixColormap};
use tracing::debug;

/// Options for [`limit_colors`]
#[derive(Debug, Clone, Copy)]
pub struct LimitColorsOptions<'a> {
    /// Palette size when the palette is derived from the source
    pub limit: u32,
    /// Image whose colors provide the palette
    pub palette: Option<&'a Pix>,
    /// Palette size when the palette image has more than 256 colors
    pub palette_colors: u32,
    /// Quantizer for derived palettes
    pub method: QuantizeMethod,
    /// Dithering for the final remap
    pub dither: DitherMethod,
    /// Refine derived palettes with up to `limit` k-means passes
    pub use_kmeans: bool,
}

impl Default for LimitColorsOptions<'_> {
    fn default() -> Self {
        Self {
            limit: 16,
            palette: None,
            palette_colors: 256,
            method: QuantizeMethod::MedianCut,
            dither: DitherMethod::None,
            use_kmeans: false,
        }
    }
}

/// Where the palette of [`limit_colors`] comes from
#[derive(Debug, Clone, Copy)]
pub enum PaletteSource<'a> {
    /// Palette image with at most 256 distinct colors, used as is
    External(&'a Pix),
    /// Palette image with more than 256 distinct colors, reduced with
    /// k-means to `palette_colors`
    ExternalRaw(&'a Pix),
    /// Palette quantized from the source image itself
    Derived {
        method: QuantizeMethod,
        /// Maximum k-means passes; 0 disables refinement
        kmeans: u32,
    },
}

impl<'a> PaletteSource<'a> {
    /// Choose the palette source for `options`.
    pub fn select(options: &LimitColorsOptions<'a>) -> ColorResult<Self> {
        match options.palette {
            Some(palette) => {
                let small = palette.get_colors(MAX_PALETTE_COLORS as usize)?.is_some();
                Ok(if small {
                    PaletteSource::External(palette)
                } else {
                    PaletteSource::ExternalRaw(palette)
                })
            }
            None => Ok(PaletteSource::Derived {
                method: options.method,
                kmeans: if options.use_kmeans { options.limit } else { 0 },
            }),
        }
    }

    /// Build the palette for `source`.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidPalette`] if the palette would have no colors.
    pub fn resolve(
        &self,
        source: &Pix,
        options: &LimitColorsOptions<'_>,
    ) -> ColorResult<PixColormap> {
        match *self {
            PaletteSource::External(palette) => {
                let ncolors = palette.count_colors()?;
                quantize(palette, ncolors as u32, QuantizeMethod::MedianCut, 0)
            }
            PaletteSource::ExternalRaw(palette) => {
                let n = options.palette_colors;
                quantize(palette, n, QuantizeMethod::MedianCut, n)
            }
            PaletteSource::Derived { method, kmeans } => {
                quantize(source, options.limit, method, kmeans)
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            PaletteSource::External(_) => "external",
            PaletteSource::ExternalRaw(_) => "external-raw",
            PaletteSource::Derived { .. } => "derived",
        }
    }
}

/// Reduce `pix` to a limited palette.
///
/// Returns a colormapped image whose depth is the smallest of 1, 2, 4 or
/// 8 bpp that indexes the palette. Any input depth is accepted; alpha is
/// ignored and dropped.
///
/// Without a palette image the result has at most `limit` distinct colors
/// for every method.
///
/// # Errors
///
/// - [`ColorError::InvalidPalette`] if the palette would be empty
///   (`limit` of 0 without a palette image, or `palette_colors` of 0 with a
///   palette image of more than 256 colors)
/// - [`ColorError::InvalidParameters`] if `limit` or `palette_colors`
///   exceeds 256
/// - [`ColorError::ImageQuant`] if libimagequant fails
///
/// # Examples
///
/// ```
/// use pixelart_core::{Pix, PixelDepth};
/// use pixelart_color::{LimitColorsOptions, limit_colors};
///
/// let pix = Pix::new(8, 8, PixelDepth::Bit32).unwrap();
/// let out = limit_colors(&pix, &LimitColorsOptions::default()).unwrap();
/// assert!(out.has_colormap());
/// ```
pub fn limit_colors(pix: &Pix, options: &LimitColorsOptions<'_>) -> ColorResult<Pix> {
    for (name, value) in [
        ("limit", options.limit),
        ("palette_colors", options.palette_colors),
    ] {
        if value > MAX_PALETTE_COLORS {
            return Err(ColorError::InvalidParameters(format!(
                "{name} must be at most {MAX_PALETTE_COLORS}, got {value}"
            )));
        }
    }

    let source = PaletteSource::select(options)?;
    if let PaletteSource::Derived { .. } = source {
        check_palette_size(options.limit)?;
    }

    let cmap = source.resolve(pix, options)?;
    debug!(
        source = source.name(),
        colors = cmap.len(),
        dither = %options.dither,
        "Resolved palette"
    );

    remap(pix, &cmap, options.dither)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelart_core::{PixMut, PixelDepth};

    fn gradient(w: u32, h: u32) -> Pix {
        let mut pix = PixMut::new(w, h, PixelDepth::Bit32).unwrap();
        for y in 0..h {
            for x in 0..w {
                pix.set_rgb(x, y, (x * 8) as u8, (y * 8) as u8, 100).unwrap();
            }
        }
        pix.into()
    }

    #[test]
    fn test_default_options() {
        let opts = LimitColorsOptions::default();
        assert_eq!(opts.limit, 16);
        assert!(opts.palette.is_none());
        assert_eq!(opts.palette_colors, 256);
        assert_eq!(opts.method, QuantizeMethod::MedianCut);
        assert_eq!(opts.dither, DitherMethod::None);
        assert!(!opts.use_kmeans);
    }

    #[test]
    fn test_select_source() {
        let small = gradient(4, 4);
        let big = gradient(32, 32);

        let opts = LimitColorsOptions {
            palette: Some(&small),
            ..Default::default()
        };
        assert!(matches!(
            PaletteSource::select(&opts).unwrap(),
            PaletteSource::External(_)
        ));

        let opts = LimitColorsOptions {
            palette: Some(&big),
            ..Default::default()
        };
        assert!(matches!(
            PaletteSource::select(&opts).unwrap(),
            PaletteSource::ExternalRaw(_)
        ));

        let opts = LimitColorsOptions {
            limit: 8,
            use_kmeans: true,
            method: QuantizeMethod::FastOctree,
            ..Default::default()
        };
        assert!(matches!(
            PaletteSource::select(&opts).unwrap(),
            PaletteSource::Derived {
                method: QuantizeMethod::FastOctree,
                kmeans: 8
            }
        ));
    }

    #[test]
    fn test_zero_limit() {
        let pix = gradient(4, 4);
        let opts = LimitColorsOptions {
            limit: 0,
            ..Default::default()
        };
        assert!(matches!(
            limit_colors(&pix, &opts),
            Err(ColorError::InvalidPalette(_))
        ));
    }

    #[test]
    fn test_limit_too_large() {
        let pix = gradient(4, 4);
        let opts = LimitColorsOptions {
            limit: 257,
            ..Default::default()
        };
        assert!(matches!(
            limit_colors(&pix, &opts),
            Err(ColorError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_limit_respected() {
        let pix = gradient(16, 16);
        let opts = LimitColorsOptions {
            limit: 5,
            ..Default::default()
        };
        let out = limit_colors(&pix, &opts).unwrap();
        assert!(out.count_colors().unwrap() <= 5);
        assert_eq!(out.depth(), PixelDepth::Bit4);
    }
}
