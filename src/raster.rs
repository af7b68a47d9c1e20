//! Raster sampling
//!
//! The crop core never owns a renderer. It only needs per-pixel color lookup
//! over a rendered page, which [`BitmapSampler`] describes. Every
//! [`image::ImageBuffer`] is a sampler, so rasters decoded from `pdftoppm`
//! output and synthetic test images go through the same code path.

use image::{imageops, ImageBuffer, Pixel, Rgba, RgbaImage};
use std::ops::Deref;

/// Opaque pure white, the background reference for rendered pages
pub const BLANK_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Per-pixel color lookup over a rendered page
pub trait BitmapSampler {
    /// Sampled color type. Blank detection compares colors exactly.
    type Color: Copy + PartialEq;

    /// Raster width in pixels
    fn width(&self) -> u32;

    /// Raster height in pixels
    fn height(&self) -> u32;

    /// Color of the pixel at column `x`, row `y` (origin top-left)
    fn color_at(&self, x: u32, y: u32) -> Self::Color;

    /// (width, height)
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    /// True when every pixel of row `y` equals `blank`
    fn is_blank_row(&self, y: u32, blank: &Self::Color) -> bool {
        (0..self.width()).all(|x| self.color_at(x, y) == *blank)
    }

    /// True when every pixel of column `x` equals `blank`
    fn is_blank_column(&self, x: u32, blank: &Self::Color) -> bool {
        (0..self.height()).all(|y| self.color_at(x, y) == *blank)
    }
}

impl<P, C> BitmapSampler for ImageBuffer<P, C>
where
    P: Pixel + PartialEq,
    C: Deref<Target = [P::Subpixel]>,
{
    type Color = P;

    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn color_at(&self, x: u32, y: u32) -> P {
        *self.get_pixel(x, y)
    }
}

/// Turn a raster rendered in display orientation back into page space.
///
/// `degrees` is the page's clockwise `/Rotate`, normalized to `0..360`.
/// Returns `None` unless it is a right angle.
pub fn unrotate(raster: RgbaImage, degrees: i64) -> Option<RgbaImage> {
    match degrees {
        0 => Some(raster),
        90 => Some(imageops::rotate270(&raster)),
        180 => Some(imageops::rotate180(&raster)),
        270 => Some(imageops::rotate90(&raster)),
        _ => None,
    }
}
