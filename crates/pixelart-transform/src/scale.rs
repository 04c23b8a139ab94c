//! Nearest-neighbor scaling
//!
//! All functions here sample with the center rule: destination column `x`
//! reads source column `floor((x + 0.5) * src_w / dst_w)`, and likewise for
//! rows. No pixel values are blended, so depth, spp and colormap pass
//! through unchanged.
//!
//! | Function | Target size |
//! |---|---|
//! | [`resize`] | exact (width, height) |
//! | [`scale_to_size`] | exact, or aspect-preserving when one side is 0 |
//! | [`scale_by_sampling`] | source size times a factor, rounded |

use crate::{TransformError, TransformResult};
use pixelart_core::Pix;
use pixelart_core::pix::{get_data, set_data};

/// Resize to exactly `width` x `height` by nearest-neighbor sampling.
///
/// # Errors
///
/// Returns [`TransformError::Core`] wrapping
/// [`pixelart_core::Error::InvalidDimension`] if either target dimension
/// is 0.
///
/// # Examples
///
/// ```
/// use pixelart_core::{Pix, PixelDepth};
/// use pixelart_transform::resize;
///
/// let pix = Pix::new(8, 8, PixelDepth::Bit8).unwrap();
/// let big = resize(&pix, (32, 16)).unwrap();
/// assert_eq!((big.width(), big.height()), (32, 16));
/// ```
pub fn resize(pix: &Pix, (width, height): (u32, u32)) -> TransformResult<Pix> {
    sample_to(pix, width, height)
}

/// Scale to a target size.
///
/// A target dimension of 0 is derived from the other one so that the
/// aspect ratio is kept (rounded, at least 1).
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] if both dimensions are 0.
pub fn scale_to_size(pix: &Pix, width: u32, height: u32) -> TransformResult<Pix> {
    let (w, h) = (pix.width() as u64, pix.height() as u64);
    let (dw, dh) = match (width, height) {
        (0, 0) => {
            return Err(TransformError::InvalidParameters(
                "at least one target dimension must be nonzero".into(),
            ));
        }
        (0, dh) => (round_div(w * dh as u64, h).max(1), dh as u64),
        (dw, 0) => (dw as u64, round_div(h * dw as u64, w).max(1)),
        (dw, dh) => (dw as u64, dh as u64),
    };
    let dw = u32::try_from(dw).map_err(|_| too_large(dw))?;
    let dh = u32::try_from(dh).map_err(|_| too_large(dh))?;
    sample_to(pix, dw, dh)
}

/// Scale by independent factors using nearest-neighbor sampling.
///
/// The target size is `round(w * scale_x)` x `round(h * scale_y)`, and
/// never less than 1.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] if a factor is not a
/// positive finite number.
pub fn scale_by_sampling(pix: &Pix, scale_x: f32, scale_y: f32) -> TransformResult<Pix> {
    for s in [scale_x, scale_y] {
        if !(s.is_finite() && s > 0.0) {
            return Err(TransformError::InvalidParameters(format!(
                "scale factor must be positive: {s}"
            )));
        }
    }
    let dw = scaled_dim(pix.width(), scale_x)?;
    let dh = scaled_dim(pix.height(), scale_y)?;
    sample_to(pix, dw, dh)
}

/// Source index sampled by each destination index.
///
/// `(2i + 1) * src / (2 * dst)` is the integer form of
/// `floor((i + 0.5) * src / dst)`.
pub(crate) fn sample_map(src: u32, dst: u32) -> Vec<u32> {
    let (src, dst) = (src as u64, dst as u64);
    (0..dst)
        .map(|i| (((2 * i + 1) * src) / (2 * dst)).min(src - 1) as u32)
        .collect()
}

fn sample_to(pix: &Pix, width: u32, height: u32) -> TransformResult<Pix> {
    let mut pixd = pix.create_template_sized(width, height)?;
    let depth = pix.depth();
    let xmap = sample_map(pix.width(), width);
    let ymap = sample_map(pix.height(), height);

    for (dy, &sy) in ymap.iter().enumerate() {
        let src_line = pix.row_data(sy);
        let dst_line = pixd.row_data_mut(dy as u32);
        for (dx, &sx) in xmap.iter().enumerate() {
            set_data(dst_line, dx as u32, depth, get_data(src_line, sx, depth));
        }
    }

    Ok(pixd.into())
}

fn scaled_dim(dim: u32, factor: f32) -> TransformResult<u32> {
    let scaled = (dim as f64 * factor as f64 + 0.5).floor().max(1.0);
    if scaled > u32::MAX as f64 {
        return Err(too_large(scaled as u64));
    }
    Ok(scaled as u32)
}

fn round_div(num: u64, den: u64) -> u64 {
    (2 * num + den) / (2 * den)
}

fn too_large(dim: u64) -> TransformError {
    TransformError::InvalidParameters(format!("target dimension too large: {dim}"))
}
