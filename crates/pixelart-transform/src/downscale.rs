//! Block downscaling
//!
//! Shrinks an image by an integer block size. Each `scale` x `scale`
//! source block becomes one destination pixel; partial blocks at the right
//! and bottom edges are dropped, so the output is
//! `floor(w / scale)` x `floor(h / scale)`.
//!
//! Two modes exist:
//!
//! - plain: a nearest-neighbor [`resize`](crate::resize) to the reduced size
//! - alpha-preserving (RGBA only): color comes from a single
//!   center sample of the block while alpha is the floor average over the
//!   whole block, snapped to 0 below a clip threshold

use crate::scale::{resize, sample_map};
use crate::{TransformError, TransformResult};
use pixelart_core::{Pix, PixMut, PixelDepth, color};
use tracing::debug;

/// Options for [`downscale_with_options`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DownscaleOptions {
    /// Block size in pixels (at least 1)
    pub scale: u32,
    /// Average alpha per block instead of sampling it
    pub preserve_alpha: bool,
    /// Fraction in [0, 1]; block alpha below it becomes fully transparent
    pub alpha_clip_threshold: f64,
}

impl Default for DownscaleOptions {
    fn default() -> Self {
        Self {
            scale: 1,
            preserve_alpha: false,
            alpha_clip_threshold: 0.3,
        }
    }
}

/// Downscale by `scale`, optionally averaging alpha per block.
///
/// The scale must fit both dimensions; an oversized scale is an
/// [`TransformError::InvalidScale`] error, never an empty image. See
/// [`downscale_with_options`].
///
/// # Examples
///
/// ```
/// use pixelart_core::{Pix, PixelDepth};
/// use pixelart_transform::downscale;
///
/// let pix = Pix::new(17, 9, PixelDepth::Bit32).unwrap();
/// let small = downscale(&pix, 4, false, 0.3).unwrap();
/// assert_eq!((small.width(), small.height()), (4, 2));
/// ```
pub fn downscale(
    pix: &Pix,
    scale: u32,
    preserve_alpha: bool,
    alpha_clip_threshold: f64,
) -> TransformResult<Pix> {
    downscale_with_options(
        pix,
        &DownscaleOptions {
            scale,
            preserve_alpha,
            alpha_clip_threshold,
        },
    )
}

/// Downscale by an integer block size.
///
/// A scale larger than either dimension is rejected rather than producing
/// an empty image, since a `Pix` always has at least one pixel.
///
/// # Errors
///
/// - [`TransformError::InvalidScale`] if the scale is 0 or larger than
///   either image dimension
/// - [`TransformError::InvalidParameters`] if the clip threshold is NaN or
///   outside [0, 1]
/// - [`TransformError::UnsupportedFormat`] if `preserve_alpha` is set and
///   the image is not RGBA
pub fn downscale_with_options(pix: &Pix, options: &DownscaleOptions) -> TransformResult<Pix> {
    let scale = options.scale;
    let threshold = options.alpha_clip_threshold;
    check_params(pix, scale, threshold)?;

    let new_w = pix.width() / scale;
    let new_h = pix.height() / scale;
    debug!(
        scale,
        from_w = pix.width(),
        from_h = pix.height(),
        new_w,
        new_h,
        preserve_alpha = options.preserve_alpha,
        "Downscaling"
    );

    if options.preserve_alpha {
        average_blocks(pix, scale, threshold)
    } else {
        resize(pix, (new_w, new_h))
    }
}

/// Alpha-aware block downscale of an RGBA image.
///
/// For each destination pixel, RGB is the block's 1x1 nearest-neighbor
/// sample, i.e. the pixel at block offset `(bw / 2, bh / 2)`. Alpha is
/// `sum / count` over the block, replaced by 0 when
/// `alpha / 255 < alpha_clip_threshold`.
///
/// # Errors
///
/// Same as [`downscale_with_options`] with `preserve_alpha` set.
pub fn downscale_with_alpha(
    pix: &Pix,
    scale: u32,
    alpha_clip_threshold: f64,
) -> TransformResult<Pix> {
    check_params(pix, scale, alpha_clip_threshold)?;
    average_blocks(pix, scale, alpha_clip_threshold)
}

fn check_params(pix: &Pix, scale: u32, alpha_clip_threshold: f64) -> TransformResult<()> {
    if scale == 0 || scale > pix.width() || scale > pix.height() {
        return Err(TransformError::InvalidScale(scale));
    }
    if !(0.0..=1.0).contains(&alpha_clip_threshold) {
        return Err(TransformError::InvalidParameters(format!(
            "alpha clip threshold must be in [0, 1]: {alpha_clip_threshold}"
        )));
    }
    Ok(())
}

/// Block loop behind [`downscale_with_alpha`]; parameters are checked.
fn average_blocks(pix: &Pix, scale: u32, alpha_clip_threshold: f64) -> TransformResult<Pix> {
    if !pix.is_rgba() {
        return Err(TransformError::UnsupportedFormat(format!(
            "alpha-preserving downscale needs RGBA input, got {} bpp spp={}",
            pix.depth().bits(),
            pix.spp()
        )));
    }

    let new_w = pix.width() / scale;
    let new_h = pix.height() / scale;
    let mut pixd = PixMut::new(new_w, new_h, PixelDepth::Bit32)?;
    pixd.set_spp(4)?;

    let mut clipped = 0u32;
    for j in 0..new_h {
        for i in 0..new_w {
            let block = pix.clip_rectangle(i * scale, j * scale, scale, scale)?;
            let (bw, bh) = (block.width(), block.height());

            let mut alpha_sum = 0u64;
            for y in 0..bh {
                for x in 0..bw {
                    alpha_sum += color::alpha(block.get_pixel_unchecked(x, y)) as u64;
                }
            }
            let count = bw as u64 * bh as u64;
            if count == 0 {
                return Err(TransformError::EmptyBlock { x: i, y: j });
            }
            let mut avg_alpha = (alpha_sum / count) as u8;
            if (avg_alpha as f64 / 255.0) < alpha_clip_threshold {
                if avg_alpha != 0 {
                    clipped += 1;
                }
                avg_alpha = 0;
            }

            let sx = sample_map(bw, 1)[0];
            let sy = sample_map(bh, 1)[0];
            let (r, g, b) = color::extract_rgb(block.get_pixel_unchecked(sx, sy));
            pixd.set_pixel_unchecked(i, j, color::compose_rgba(r, g, b, avg_alpha));
        }
    }

    debug!(blocks = new_w * new_h, clipped, "Averaged block alpha");
    Ok(pixd.into())
}
