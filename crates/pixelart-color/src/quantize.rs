//! Palette derivation
//!
//! Builds a palette of at most N colors from an image. Every back end works
//! on the weighted histogram of distinct RGB colors (see
//! [`Pix::color_counts`]), never on the pixel grid itself, so the cost
//! depends on the number of distinct colors:
//!
//! - Median cut: split the most populated color box at its weighted median
//! - Maximum coverage: same split, but the box spanning the largest volume
//!   of the color cube goes first
//! - Fast octree: keep the most populated 4-bit octcubes
//! - libimagequant: delegate to the `imagequant` crate
//!
//! An optional k-means pass refines any of these palettes. Images that
//! already hold no more than N distinct colors get exactly those colors.

use crate::{ColorError, ColorResult, QuantizeMethod};
use pixelart_core::{ColorCount, Pix, PixColormap, PixelDepth};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{debug, trace};

/// Largest palette any quantizer produces
pub const MAX_PALETTE_COLORS: u32 = 256;

/// Derive a palette of at most `max_colors` colors from `pix`.
///
/// Any depth is accepted; the image is expanded to RGB and alpha is
/// ignored. `kmeans` is the maximum number of k-means refinement passes
/// (0 disables refinement).
///
/// # Errors
///
/// - [`ColorError::InvalidPalette`] if `max_colors` is 0
/// - [`ColorError::InvalidParameters`] if `max_colors` exceeds 256
/// - [`ColorError::ImageQuant`] if libimagequant fails
pub fn quantize(
    pix: &Pix,
    max_colors: u32,
    method: QuantizeMethod,
    kmeans: u32,
) -> ColorResult<PixColormap> {
    check_palette_size(max_colors)?;
    let rgb = to_rgb(pix)?;
    let hist = rgb.color_counts()?;
    if hist.is_empty() {
        return Err(ColorError::EmptyImage);
    }

    let max = max_colors as usize;
    let cmap = if hist.len() <= max {
        exact_palette(&hist)?
    } else {
        match method {
            QuantizeMethod::MedianCut => median_cut(&hist, max)?,
            QuantizeMethod::MaxCoverage => max_coverage(&hist, max)?,
            QuantizeMethod::FastOctree => fast_octree(&hist, max)?,
            QuantizeMethod::LibImageQuant => libimagequant(&rgb, &hist, max)?,
        }
    };
    debug!(
        method = %method,
        requested = max_colors,
        distinct = hist.len(),
        colors = cmap.len(),
        kmeans,
        "Derived palette"
    );

    if kmeans > 0 {
        kmeans_refine(&cmap, &hist, kmeans)
    } else {
        Ok(cmap)
    }
}

/// Reject palette sizes no quantizer can produce.
pub(crate) fn check_palette_size(ncolors: u32) -> ColorResult<()> {
    if ncolors == 0 {
        return Err(ColorError::InvalidPalette("palette must have at least one color".into()));
    }
    if ncolors > MAX_PALETTE_COLORS {
        return Err(ColorError::InvalidParameters(format!(
            "palette size must be at most {MAX_PALETTE_COLORS}, got {ncolors}"
        )));
    }
    Ok(())
}

/// The image as 32 bpp, expanding lower depths and colormaps.
pub(crate) fn to_rgb(pix: &Pix) -> ColorResult<Pix> {
    if pix.depth() == PixelDepth::Bit32 {
        Ok(pix.clone())
    } else {
        Ok(pix.convert_to_rgb()?)
    }
}

/// One palette entry per histogram color.
fn exact_palette(hist: &[ColorCount]) -> ColorResult<PixColormap> {
    let colors: Vec<(u8, u8, u8)> = hist.iter().map(ColorCount::rgb).collect();
    Ok(PixColormap::from_rgb(&colors)?)
}

/// Single-entry palette holding the population-weighted mean color.
fn mean_palette(hist: &[ColorCount]) -> ColorResult<PixColormap> {
    let bx = ColorBox::new(hist.to_vec());
    Ok(PixColormap::from_rgb(&[bx.mean()])?)
}

// =============================================================================
// Box splitting (median cut, maximum coverage)
// =============================================================================

/// Median cut on a color histogram.
///
/// The box holding the most pixels is split first, along its widest
/// channel, at the pixel-weighted median.
pub fn median_cut(hist: &[ColorCount], max_colors: usize) -> ColorResult<PixColormap> {
    split_boxes(hist, max_colors, SplitPriority::Population)
}

/// Maximum coverage on a color histogram.
///
/// Like [`median_cut`], but the box spanning the largest RGB volume is
/// split first, so sparse outlying colors get their own entries.
pub fn max_coverage(hist: &[ColorCount], max_colors: usize) -> ColorResult<PixColormap> {
    split_boxes(hist, max_colors, SplitPriority::Volume)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitPriority {
    Population,
    Volume,
}

fn split_boxes(
    hist: &[ColorCount],
    max_colors: usize,
    priority: SplitPriority,
) -> ColorResult<PixColormap> {
    if hist.is_empty() {
        return Err(ColorError::EmptyImage);
    }
    let max_colors = max_colors.clamp(1, MAX_PALETTE_COLORS as usize);

    let mut heap: BinaryHeap<RankedBox> = BinaryHeap::new();
    // Boxes of a single color cannot be split further
    let mut done: Vec<ColorBox> = Vec::new();
    let mut seq = 0usize;
    let mut push = |heap: &mut BinaryHeap<RankedBox>, bx: ColorBox| {
        let key = match priority {
            SplitPriority::Population => bx.population,
            SplitPriority::Volume => bx.volume(),
        };
        heap.push(RankedBox { key, seq, bx });
        seq += 1;
    };

    push(&mut heap, ColorBox::new(hist.to_vec()));
    while heap.len() + done.len() < max_colors {
        let Some(RankedBox { bx, .. }) = heap.pop() else {
            break;
        };
        if bx.colors.len() < 2 {
            done.push(bx);
            continue;
        }
        let (lo, hi) = bx.split();
        push(&mut heap, lo);
        push(&mut heap, hi);
    }

    let mut boxes: Vec<RankedBox> = heap.into_vec();
    boxes.sort_by_key(|r| r.seq);
    let colors: Vec<(u8, u8, u8)> = done
        .iter()
        .chain(boxes.iter().map(|r| &r.bx))
        .map(ColorBox::mean)
        .collect();
    Ok(PixColormap::from_rgb(&colors)?)
}

/// A box in RGB color space holding weighted histogram colors
#[derive(Debug, Clone)]
struct ColorBox {
    colors: Vec<ColorCount>,
    population: u64,
    min: [u8; 3],
    max: [u8; 3],
}

impl ColorBox {
    fn new(colors: Vec<ColorCount>) -> Self {
        let mut min = [255u8; 3];
        let mut max = [0u8; 3];
        let mut population = 0u64;
        for c in &colors {
            let ch = channels(c);
            for i in 0..3 {
                min[i] = min[i].min(ch[i]);
                max[i] = max[i].max(ch[i]);
            }
            population += c.count as u64;
        }
        Self {
            colors,
            population,
            min,
            max,
        }
    }

    fn volume(&self) -> u64 {
        (0..3)
            .map(|i| (self.max[i] - self.min[i]) as u64 + 1)
            .product()
    }

    /// Split along the widest channel at the weighted median.
    ///
    /// Requires at least two colors; both halves are non-empty.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let ranges = [0, 1, 2].map(|i| self.max[i] - self.min[i]);
        let channel = if ranges[0] >= ranges[1] && ranges[0] >= ranges[2] {
            0
        } else if ranges[1] >= ranges[2] {
            1
        } else {
            2
        };

        self.colors.sort_by_key(|c| (channels(c)[channel], c.color));

        let mut acc = 0u64;
        let mut cut = self.colors.len() / 2;
        for (i, c) in self.colors.iter().enumerate() {
            acc += c.count as u64;
            if acc * 2 >= self.population {
                cut = i + 1;
                break;
            }
        }
        let cut = cut.clamp(1, self.colors.len() - 1);

        let upper = self.colors.split_off(cut);
        (ColorBox::new(self.colors), ColorBox::new(upper))
    }

    /// Population-weighted mean color, rounded.
    fn mean(&self) -> (u8, u8, u8) {
        if self.population == 0 {
            return (0, 0, 0);
        }
        let mut sums = [0u64; 3];
        for c in &self.colors {
            let ch = channels(c);
            for i in 0..3 {
                sums[i] += ch[i] as u64 * c.count as u64;
            }
        }
        let half = self.population / 2;
        let avg = sums.map(|s| ((s + half) / self.population) as u8);
        (avg[0], avg[1], avg[2])
    }
}

#[inline]
fn channels(c: &ColorCount) -> [u8; 3] {
    let (r, g, b) = c.rgb();
    [r, g, b]
}

/// Heap entry; ties go to the box created first
#[derive(Debug)]
struct RankedBox {
    key: u64,
    seq: usize,
    bx: ColorBox,
}

impl PartialEq for RankedBox {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}

impl Eq for RankedBox {}

impl Ord for RankedBox {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for RankedBox {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// =============================================================================
// Population-based octcubes
// =============================================================================

/// Bits per channel of the octcube partition
const OCTCUBE_LEVEL: u32 = 4;

/// Keep the `max_colors` most populated octcubes.
///
/// The color cube is partitioned into 4096 octcubes (4 bits per channel).
/// Each kept cube contributes the mean of the colors that fall into it;
/// ties in population go to the lower cube index.
pub fn fast_octree(hist: &[ColorCount], max_colors: usize) -> ColorResult<PixColormap> {
    if hist.is_empty() {
        return Err(ColorError::EmptyImage);
    }
    let level = OCTCUBE_LEVEL;
    let shift = 8 - level;
    let ncubes = 1usize << (3 * level);

    let mut counts = vec![0u64; ncubes];
    let mut sums = vec![[0u64; 3]; ncubes];
    for c in hist {
        let [r, g, b] = channels(c);
        let idx = ((r >> shift) as usize) << (2 * level)
            | ((g >> shift) as usize) << level
            | (b >> shift) as usize;
        let n = c.count as u64;
        counts[idx] += n;
        sums[idx][0] += r as u64 * n;
        sums[idx][1] += g as u64 * n;
        sums[idx][2] += b as u64 * n;
    }

    // Occupied octcubes sorted by population (descending)
    let mut occupied: Vec<(usize, u64)> = counts
        .iter()
        .enumerate()
        .filter(|(_, n)| **n > 0)
        .map(|(i, n)| (i, *n))
        .collect();
    occupied.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    occupied.truncate(max_colors.clamp(1, MAX_PALETTE_COLORS as usize));

    let colors: Vec<(u8, u8, u8)> = occupied
        .iter()
        .map(|&(idx, n)| {
            let avg = sums[idx].map(|s| ((s + n / 2) / n) as u8);
            (avg[0], avg[1], avg[2])
        })
        .collect();
    Ok(PixColormap::from_rgb(&colors)?)
}

// =============================================================================
// libimagequant
// =============================================================================

/// Palette from libimagequant.
///
/// The library needs at least two colors, so a limit of one yields the
/// histogram mean instead.
fn libimagequant(rgb: &Pix, hist: &[ColorCount], max_colors: usize) -> ColorResult<PixColormap> {
    if max_colors < 2 {
        return mean_palette(hist);
    }

    let (w, h) = (rgb.width(), rgb.height());
    let mut pixels = Vec::with_capacity(w as usize * h as usize);
    for y in 0..h {
        for x in 0..w {
            let (r, g, b) = pixelart_core::color::extract_rgb(rgb.get_pixel_unchecked(x, y));
            pixels.push(imagequant::RGBA { r, g, b, a: 255 });
        }
    }

    let mut liq = imagequant::new();
    liq.set_max_colors(max_colors as u32)?;
    let mut img = liq.new_image(&pixels[..], w as usize, h as usize, 0.0)?;
    let mut res = liq.quantize(&mut img)?;
    res.set_dithering_level(0.0)?;
    let (palette, _) = res.remapped(&mut img)?;

    let colors: Vec<(u8, u8, u8)> = palette.iter().map(|c| (c.r, c.g, c.b)).collect();
    if colors.is_empty() {
        return Err(ColorError::InvalidPalette("libimagequant returned an empty palette".into()));
    }
    Ok(PixColormap::from_rgb(&colors)?)
}

// =============================================================================
// k-means refinement
// =============================================================================

/// Refine a palette with up to `passes` k-means (Lloyd) iterations.
///
/// Each pass assigns every histogram color to its nearest entry and moves
/// each entry to the weighted mean of its members. Entries without members
/// stay put. Iteration stops early once no entry moves, and the palette
/// size never changes.
pub fn kmeans_refine(
    cmap: &PixColormap,
    hist: &[ColorCount],
    passes: u32,
) -> ColorResult<PixColormap> {
    if cmap.is_empty() {
        return Err(ColorError::InvalidPalette("cannot refine an empty palette".into()));
    }
    let mut centers: Vec<(u8, u8, u8)> = cmap
        .colors()
        .iter()
        .map(|c| (c.red, c.green, c.blue))
        .collect();

    for pass in 0..passes {
        let current = PixColormap::from_rgb(&centers)?;
        let mut sums = vec![[0u64; 4]; centers.len()];
        for c in hist {
            let [r, g, b] = channels(c);
            let idx = current
                .find_nearest(r, g, b)
                .ok_or_else(|| ColorError::InvalidPalette("empty palette".into()))?;
            let n = c.count as u64;
            sums[idx][0] += r as u64 * n;
            sums[idx][1] += g as u64 * n;
            sums[idx][2] += b as u64 * n;
            sums[idx][3] += n;
        }

        let mut moved = 0usize;
        for (center, s) in centers.iter_mut().zip(&sums) {
            let n = s[3];
            if n == 0 {
                continue;
            }
            let mean = (
                ((s[0] + n / 2) / n) as u8,
                ((s[1] + n / 2) / n) as u8,
                ((s[2] + n / 2) / n) as u8,
            );
            if mean != *center {
                *center = mean;
                moved += 1;
            }
        }

        trace!(pass, moved, "k-means pass");
        if moved == 0 {
            break;
        }
    }

    Ok(PixColormap::from_rgb(&centers)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelart_core::color;

    fn cc(r: u8, g: u8, b: u8, count: u32) -> ColorCount {
        ColorCount {
            color: color::rgb_key(color::compose_rgb(r, g, b)),
            count,
        }
    }

    fn palette(cmap: &PixColormap) -> Vec<(u8, u8, u8)> {
        let mut v: Vec<_> = (0..cmap.len()).filter_map(|i| cmap.get_rgb(i)).collect();
        v.sort();
        v
    }

    #[test]
    fn test_check_palette_size() {
        assert!(matches!(check_palette_size(0), Err(ColorError::InvalidPalette(_))));
        assert!(check_palette_size(1).is_ok());
        assert!(check_palette_size(256).is_ok());
        assert!(matches!(
            check_palette_size(257),
            Err(ColorError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_median_cut_two_clusters() {
        let hist = vec![
            cc(0, 0, 0, 10),
            cc(2, 2, 2, 10),
            cc(250, 250, 250, 10),
            cc(252, 252, 252, 10),
        ];
        let cmap = median_cut(&hist, 2).unwrap();
        assert_eq!(palette(&cmap), vec![(1, 1, 1), (251, 251, 251)]);
    }

    #[test]
    fn test_median_cut_weighted_median() {
        // The heavy dark color owns the lower half on its own
        let hist = vec![cc(0, 0, 0, 100), cc(100, 0, 0, 1), cc(200, 0, 0, 1)];
        let cmap = median_cut(&hist, 2).unwrap();
        assert_eq!(palette(&cmap), vec![(0, 0, 0), (150, 0, 0)]);
    }

    #[test]
    fn test_max_coverage_isolates_outlier() {
        // Median cut spends its second split on the crowded dark box;
        // maximum coverage splits the wide box holding the outlier.
        let hist = vec![
            cc(0, 0, 0, 50),
            cc(10, 0, 0, 50),
            cc(20, 0, 0, 1),
            cc(255, 255, 255, 1),
        ];
        let cov = max_coverage(&hist, 3).unwrap();
        assert!(palette(&cov).contains(&(255, 255, 255)));
        assert_eq!(cov.len(), 3);
    }

    #[test]
    fn test_split_stops_at_distinct_colors() {
        let hist = vec![cc(1, 1, 1, 5), cc(2, 2, 2, 5)];
        let cmap = median_cut(&hist, 8).unwrap();
        assert_eq!(cmap.len(), 2);
    }

    #[test]
    fn test_fast_octree_keeps_populated_cubes() {
        let hist = vec![
            cc(0, 0, 0, 5),
            cc(1, 1, 1, 5),
            cc(128, 0, 0, 3),
            cc(0, 128, 0, 1),
        ];
        let cmap = fast_octree(&hist, 2).unwrap();
        // (0,0,0) and (1,1,1) share a cube; the green cube is least populated
        assert_eq!(palette(&cmap), vec![(1, 1, 1), (128, 0, 0)]);
    }

    #[test]
    fn test_mean_palette() {
        let hist = vec![cc(0, 0, 0, 1), cc(255, 255, 255, 3)];
        let cmap = mean_palette(&hist).unwrap();
        assert_eq!(cmap.get_rgb(0), Some((191, 191, 191)));
    }

    #[test]
    fn test_kmeans_moves_to_cluster_means() {
        let hist = vec![
            cc(0, 0, 0, 1),
            cc(20, 20, 20, 1),
            cc(200, 200, 200, 1),
            cc(220, 220, 220, 1),
        ];
        let start = PixColormap::from_rgb(&[(0, 0, 0), (255, 255, 255)]).unwrap();
        let refined = kmeans_refine(&start, &hist, 8).unwrap();
        assert_eq!(palette(&refined), vec![(10, 10, 10), (210, 210, 210)]);

        // Zero passes leave the palette untouched
        let same = kmeans_refine(&start, &hist, 0).unwrap();
        assert_eq!(same, start);
    }

    #[test]
    fn test_kmeans_keeps_empty_entries() {
        let hist = vec![cc(10, 10, 10, 4)];
        let start = PixColormap::from_rgb(&[(0, 0, 0), (255, 0, 0)]).unwrap();
        let refined = kmeans_refine(&start, &hist, 3).unwrap();
        assert_eq!(refined.get_rgb(0), Some((10, 10, 10)));
        assert_eq!(refined.get_rgb(1), Some((255, 0, 0)));
    }
}
