//! Conversion between [`Pix`] and the `image` crate's `DynamicImage`
//!
//! Hosts decode and encode files with `image`; the transforms operate on
//! `Pix`. These two functions are the only crossing point.
//!
//! | `DynamicImage` | `Pix` |
//! |---|---|
//! | `ImageLuma8` | 8 bpp luminance |
//! | `ImageRgb8` | 32 bpp RGB (spp 3) |
//! | anything else | 32 bpp RGBA (spp 4), via `to_rgba8` |
//!
//! Going back, luminance becomes `ImageLuma8`, RGB becomes `ImageRgb8`,
//! RGBA stays RGBA, and colormapped or binary images are expanded to RGB.

use crate::color;
use crate::error::Result;
use crate::pix::{Pix, PixMut, PixelDepth};
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

impl Pix {
    /// Build a `Pix` from a decoded `image` crate image.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDimension`] for an empty image.
    pub fn from_dynamic_image(img: &DynamicImage) -> Result<Pix> {
        let (w, h) = (img.width(), img.height());
        match img {
            DynamicImage::ImageLuma8(gray) => {
                let mut pix = PixMut::new(w, h, PixelDepth::Bit8)?;
                for (x, y, p) in gray.enumerate_pixels() {
                    pix.set_pixel_unchecked(x, y, p.0[0] as u32);
                }
                Ok(pix.into())
            }
            DynamicImage::ImageRgb8(rgb) => {
                let mut pix = PixMut::new(w, h, PixelDepth::Bit32)?;
                for (x, y, p) in rgb.enumerate_pixels() {
                    let [r, g, b] = p.0;
                    pix.set_pixel_unchecked(x, y, color::compose_rgb(r, g, b));
                }
                Ok(pix.into())
            }
            other => {
                let rgba = other.to_rgba8();
                let mut pix = PixMut::new(w, h, PixelDepth::Bit32)?;
                pix.set_spp(4)?;
                for (x, y, p) in rgba.enumerate_pixels() {
                    let [r, g, b, a] = p.0;
                    pix.set_pixel_unchecked(x, y, color::compose_rgba(r, g, b, a));
                }
                Ok(pix.into())
            }
        }
    }

    /// Convert this image into an `image` crate `DynamicImage`.
    ///
    /// # Errors
    ///
    /// Propagates colormap expansion failures for indexed images.
    pub fn to_dynamic_image(&self) -> Result<DynamicImage> {
        let (w, h) = (self.width(), self.height());

        if self.depth() == PixelDepth::Bit8 && !self.has_colormap() {
            let img = GrayImage::from_fn(w, h, |x, y| {
                image::Luma([self.get_pixel_unchecked(x, y) as u8])
            });
            return Ok(DynamicImage::ImageLuma8(img));
        }

        if self.is_rgba() {
            let img = RgbaImage::from_fn(w, h, |x, y| {
                let (r, g, b, a) = color::extract_rgba(self.get_pixel_unchecked(x, y));
                image::Rgba([r, g, b, a])
            });
            return Ok(DynamicImage::ImageRgba8(img));
        }

        let rgb_owned;
        let rgb = if self.depth() == PixelDepth::Bit32 {
            self
        } else {
            rgb_owned = self.convert_to_rgb()?;
            &rgb_owned
        };
        let img = RgbImage::from_fn(w, h, |x, y| {
            let (r, g, b) = color::extract_rgb(rgb.get_pixel_unchecked(x, y));
            image::Rgb([r, g, b])
        });
        Ok(DynamicImage::ImageRgb8(img))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixColormap;
    use image::{ImageBuffer, Luma, LumaA, Rgb, Rgba};

    #[test]
    fn test_from_luma8() {
        let img: GrayImage = ImageBuffer::from_fn(3, 2, |x, y| Luma([(x * 10 + y) as u8]));
        let pix = Pix::from_dynamic_image(&DynamicImage::ImageLuma8(img)).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit8);
        assert_eq!(pix.get_pixel(2, 1), Some(21));
    }

    #[test]
    fn test_from_rgb8() {
        let img: RgbImage = ImageBuffer::from_pixel(2, 2, Rgb([1, 2, 3]));
        let pix = Pix::from_dynamic_image(&DynamicImage::ImageRgb8(img)).unwrap();
        assert!(pix.is_rgb());
        assert_eq!(pix.get_rgba(1, 1), Some((1, 2, 3, 255)));
    }

    #[test]
    fn test_from_rgba8_keeps_alpha() {
        let img: RgbaImage = ImageBuffer::from_pixel(2, 1, Rgba([9, 8, 7, 6]));
        let pix = Pix::from_dynamic_image(&DynamicImage::ImageRgba8(img)).unwrap();
        assert!(pix.is_rgba());
        assert_eq!(pix.get_rgba(0, 0), Some((9, 8, 7, 6)));
    }

    #[test]
    fn test_from_luma_alpha_becomes_rgba() {
        let img = ImageBuffer::from_pixel(1, 1, LumaA([50u8, 100]));
        let pix = Pix::from_dynamic_image(&DynamicImage::ImageLumaA8(img)).unwrap();
        assert!(pix.is_rgba());
        assert_eq!(pix.get_rgba(0, 0), Some((50, 50, 50, 100)));
    }

    #[test]
    fn test_to_dynamic_image_formats() {
        let gray = Pix::new(2, 2, PixelDepth::Bit8).unwrap();
        assert!(matches!(
            gray.to_dynamic_image().unwrap(),
            DynamicImage::ImageLuma8(_)
        ));

        let mut rgba = PixMut::new(1, 1, PixelDepth::Bit32).unwrap();
        rgba.set_spp(4).unwrap();
        rgba.set_rgba(0, 0, 1, 2, 3, 4).unwrap();
        let rgba: Pix = rgba.into();
        let img = rgba.to_dynamic_image().unwrap();
        assert_eq!(img.to_rgba8().get_pixel(0, 0).0, [1, 2, 3, 4]);

        let cmap = PixColormap::from_rgb(&[(10, 20, 30), (40, 50, 60)]).unwrap();
        let mut indexed = PixMut::new(2, 1, PixelDepth::Bit1).unwrap();
        indexed.set_colormap(Some(cmap)).unwrap();
        indexed.set_pixel(1, 0, 1).unwrap();
        let indexed: Pix = indexed.into();
        match indexed.to_dynamic_image().unwrap() {
            DynamicImage::ImageRgb8(img) => {
                assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30]);
                assert_eq!(img.get_pixel(1, 0).0, [40, 50, 60]);
            }
            other => panic!("expected RGB output, got {:?}", other.color()),
        }
    }
}
