//! Remapping onto a palette
//!
//! Maps every pixel of an image to an entry of a fixed palette, either to
//! the nearest entry directly or with Floyd-Steinberg error diffusion. The
//! result is a colormapped image at the smallest depth that can index the
//! palette.

use crate::quantize::to_rgb;
use crate::{ColorError, ColorResult, DitherMethod};
use pixelart_core::{Pix, PixColormap, PixMut, PixelDepth, color};
use std::collections::HashMap;

/// Remap `pix` onto `cmap` with the given dithering.
///
/// Any input depth is accepted; the image is expanded to RGB first and
/// alpha is dropped. Nearest means smallest squared RGB distance, with the
/// lowest palette index winning ties.
///
/// Floyd-Steinberg visits pixels in raster order and pushes each pixel's
/// quantization error to its unvisited neighbors with weights 7/16
/// (right), 3/16 (below left), 5/16 (below) and 1/16 (below right).
/// Errors are kept per channel in integers; the working color is clamped
/// to [0, 255] before the nearest-entry search.
///
/// # Errors
///
/// Returns [`ColorError::InvalidPalette`] for an empty palette or one with
/// more than 256 entries.
pub fn remap(pix: &Pix, cmap: &PixColormap, dither: DitherMethod) -> ColorResult<Pix> {
    if cmap.is_empty() {
        return Err(ColorError::InvalidPalette("palette is empty".into()));
    }
    let rgb = to_rgb(pix)?;
    let (w, h) = (rgb.width(), rgb.height());

    // Rebuild the palette at the smallest depth that indexes it
    let colors: Vec<(u8, u8, u8)> = cmap
        .colors()
        .iter()
        .map(|c| (c.red, c.green, c.blue))
        .collect();
    let out_cmap = PixColormap::from_rgb(&colors)
        .map_err(|e| ColorError::InvalidPalette(e.to_string()))?;
    let depth = PixelDepth::for_colormap_size(out_cmap.len());

    let mut out = PixMut::new(w, h, depth)?;
    let mut nearest = NearestCache::new(&out_cmap);
    match dither {
        DitherMethod::None => {
            for y in 0..h {
                for x in 0..w {
                    let (r, g, b) = color::extract_rgb(rgb.get_pixel_unchecked(x, y));
                    out.set_pixel_unchecked(x, y, nearest.index(r, g, b)? as u32);
                }
            }
        }
        DitherMethod::FloydSteinberg => {
            floyd_steinberg(&rgb, &mut out, &mut nearest)?;
        }
    }

    out.set_colormap(Some(out_cmap))?;
    Ok(out.into())
}

/// Floyd-Steinberg error diffusion into `out`.
fn floyd_steinberg(rgb: &Pix, out: &mut PixMut, nearest: &mut NearestCache) -> ColorResult<()> {
    let (w, h) = (rgb.width(), rgb.height());
    // Error rows padded by one column on each side, in 1/16 units
    let row_len = w as usize + 2;
    let mut cur = vec![[0i32; 3]; row_len];
    let mut next = vec![[0i32; 3]; row_len];

    for y in 0..h {
        for x in 0..w {
            let xi = x as usize + 1;
            let (r, g, b) = color::extract_rgb(rgb.get_pixel_unchecked(x, y));
            let want = [r, g, b].map(|v| v as i32);
            let mut adj = [0u8; 3];
            for c in 0..3 {
                adj[c] = (want[c] + cur[xi][c] / 16).clamp(0, 255) as u8;
            }

            let idx = nearest.index(adj[0], adj[1], adj[2])?;
            out.set_pixel_unchecked(x, y, idx as u32);

            let got = nearest.color(idx);
            for c in 0..3 {
                let err = adj[c] as i32 - got[c] as i32;
                cur[xi + 1][c] += err * 7;
                next[xi - 1][c] += err * 3;
                next[xi][c] += err * 5;
                next[xi + 1][c] += err;
            }
        }
        std::mem::swap(&mut cur, &mut next);
        next.fill([0; 3]);
    }
    Ok(())
}

/// Nearest-entry lookup memoized per color
struct NearestCache<'a> {
    cmap: &'a PixColormap,
    cache: HashMap<u32, usize>,
}

impl<'a> NearestCache<'a> {
    fn new(cmap: &'a PixColormap) -> Self {
        Self {
            cmap,
            cache: HashMap::new(),
        }
    }

    fn index(&mut self, r: u8, g: u8, b: u8) -> ColorResult<usize> {
        let key = color::compose_rgb(r, g, b);
        if let Some(&idx) = self.cache.get(&key) {
            return Ok(idx);
        }
        let idx = self
            .cmap
            .find_nearest(r, g, b)
            .ok_or_else(|| ColorError::InvalidPalette("palette is empty".into()))?;
        self.cache.insert(key, idx);
        Ok(idx)
    }

    fn color(&self, idx: usize) -> [u8; 3] {
        self.cmap
            .get_rgb(idx)
            .map(|(r, g, b)| [r, g, b])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_pix(w: u32, h: u32, f: impl Fn(u32, u32) -> (u8, u8, u8)) -> Pix {
        let mut pix = PixMut::new(w, h, PixelDepth::Bit32).unwrap();
        for y in 0..h {
            for x in 0..w {
                let (r, g, b) = f(x, y);
                pix.set_rgb(x, y, r, g, b).unwrap();
            }
        }
        pix.into()
    }

    fn bw() -> PixColormap {
        PixColormap::from_rgb(&[(0, 0, 0), (255, 255, 255)]).unwrap()
    }

    #[test]
    fn test_remap_nearest() {
        let grays = [(10, 10, 10), (200, 200, 200), (127, 127, 127)];
        let pix = rgb_pix(3, 1, |x, _| grays[x as usize]);
        let out = remap(&pix, &bw(), DitherMethod::None).unwrap();
        assert_eq!(out.depth(), PixelDepth::Bit1);
        assert_eq!(out.colormap().map(|c| c.len()), Some(2));
        assert_eq!(out.get_pixel(0, 0), Some(0));
        assert_eq!(out.get_pixel(1, 0), Some(1));
        assert_eq!(out.get_pixel(2, 0), Some(0));
    }

    #[test]
    fn test_remap_depth_follows_palette_size() {
        let pix = rgb_pix(2, 2, |_, _| (0, 0, 0));
        let colors: Vec<_> = (0..5u8).map(|v| (v, v, v)).collect();
        let cmap = PixColormap::from_rgb(&colors).unwrap();
        let out = remap(&pix, &cmap, DitherMethod::None).unwrap();
        assert_eq!(out.depth(), PixelDepth::Bit4);
    }

    #[test]
    fn test_remap_empty_palette() {
        let pix = rgb_pix(1, 1, |_, _| (0, 0, 0));
        let empty = PixColormap::new(8).unwrap();
        assert!(matches!(
            remap(&pix, &empty, DitherMethod::FloydSteinberg),
            Err(ColorError::InvalidPalette(_))
        ));
    }

    #[test]
    fn test_floyd_steinberg_mid_gray_alternates() {
        let pix = rgb_pix(16, 16, |_, _| (128, 128, 128));
        let out = remap(&pix, &bw(), DitherMethod::FloydSteinberg).unwrap();
        let mut white = 0;
        for y in 0..16 {
            for x in 0..16 {
                white += out.get_pixel(x, y).unwrap();
            }
        }
        // Diffusion keeps the mean: about half the pixels are white
        assert!((100..=156).contains(&white), "white = {white}");

        let flat = remap(&pix, &bw(), DitherMethod::None).unwrap();
        assert!((0..16).all(|x| flat.get_pixel(x, 0) == Some(1)));
    }

    #[test]
    fn test_floyd_steinberg_exact_colors_unchanged() {
        let pix = rgb_pix(4, 4, |x, y| {
            if (x + y) % 2 == 0 {
                (0, 0, 0)
            } else {
                (255, 255, 255)
            }
        });
        let dithered = remap(&pix, &bw(), DitherMethod::FloydSteinberg).unwrap();
        let plain = remap(&pix, &bw(), DitherMethod::None).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(dithered.get_pixel(x, y), plain.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn test_remap_colormapped_input() {
        let cmap = PixColormap::from_rgb(&[(250, 0, 0), (0, 0, 250)]).unwrap();
        let mut pix = PixMut::new(2, 1, PixelDepth::Bit1).unwrap();
        pix.set_colormap(Some(cmap)).unwrap();
        pix.set_pixel(1, 0, 1).unwrap();
        let pix: Pix = pix.into();

        let target = PixColormap::from_rgb(&[(0, 0, 255), (255, 0, 0)]).unwrap();
        let out = remap(&pix, &target, DitherMethod::None).unwrap();
        assert_eq!(out.get_pixel(0, 0), Some(1));
        assert_eq!(out.get_pixel(1, 0), Some(0));
    }
}
