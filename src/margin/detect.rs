//! Content Bounding-Box Detection
//!
//! Scans a rendered page inward from each edge and stops at the first row or
//! column that holds a non-blank pixel.

use super::types::{ContentRect, MarginError, Result};
use crate::raster::BitmapSampler;

/// Edge-scanning content box detector
pub struct ContentBoxDetector;

impl ContentBoxDetector {
    /// Detect the smallest rectangle holding every non-blank pixel.
    ///
    /// Blank means exactly equal to `blank`. Cursors start on the raster
    /// edges and move inward one row/column at a time while the row/column
    /// under them is blank. Each opposing pair stops once the cursors meet,
    /// so an all-blank raster collapses to `top == bottom == height - 1` and
    /// `left == right == width - 1`.
    pub fn detect<S>(raster: &S, blank: &S::Color) -> Result<ContentRect>
    where
        S: BitmapSampler + ?Sized,
    {
        let (width, height) = raster.dimensions();
        let full =
            ContentRect::full(width, height).ok_or(MarginError::EmptyRaster { width, height })?;

        let (top, bottom) = Self::scan_rows(raster, blank, full.top, full.bottom);
        let (left, right) = Self::scan_columns(raster, blank, full.left, full.right);

        let rect = ContentRect::new(top, left, bottom, right);
        tracing::debug!(
            top,
            left,
            bottom,
            right,
            width,
            height,
            "detected content box"
        );
        Ok(rect)
    }

    /// Advance `top` down, then `bottom` up, over full-width blank rows
    fn scan_rows<S>(raster: &S, blank: &S::Color, mut top: u32, mut bottom: u32) -> (u32, u32)
    where
        S: BitmapSampler + ?Sized,
    {
        while top < bottom && raster.is_blank_row(top, blank) {
            top += 1;
        }
        while top < bottom && raster.is_blank_row(bottom, blank) {
            bottom -= 1;
        }
        (top, bottom)
    }

    /// Advance `left` right, then `right` left, over full-height blank columns
    fn scan_columns<S>(raster: &S, blank: &S::Color, mut left: u32, mut right: u32) -> (u32, u32)
    where
        S: BitmapSampler + ?Sized,
    {
        while left < right && raster.is_blank_column(left, blank) {
            left += 1;
        }
        while left < right && raster.is_blank_column(right, blank) {
            right -= 1;
        }
        (left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::BLANK_WHITE;
    use image::{Rgba, RgbaImage};

    const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn fill(
        img: &mut RgbaImage,
        rows: std::ops::RangeInclusive<u32>,
        cols: std::ops::RangeInclusive<u32>,
    ) {
        for y in rows {
            for x in cols.clone() {
                img.put_pixel(x, y, INK);
            }
        }
    }

    // TC-DET-001: all-blank raster collapses without crossing
    #[test]
    fn test_all_blank_collapses() {
        for (w, h) in [(100, 100), (1, 1), (7, 3), (3, 7), (2, 2)] {
            let img = RgbaImage::from_pixel(w, h, BLANK_WHITE);
            let rect = ContentBoxDetector::detect(&img, &BLANK_WHITE).unwrap();

            assert_eq!(rect.top, rect.bottom, "{}x{}", w, h);
            assert_eq!(rect.left, rect.right, "{}x{}", w, h);
            assert_eq!(rect, ContentRect::new(h - 1, w - 1, h - 1, w - 1));
        }
    }

    // TC-DET-002: single non-blank pixel
    #[test]
    fn test_single_pixel() {
        for (x, y) in [(0, 0), (19, 9), (5, 3), (0, 9), (19, 0)] {
            let mut img = RgbaImage::from_pixel(20, 10, BLANK_WHITE);
            img.put_pixel(x, y, INK);

            let rect = ContentBoxDetector::detect(&img, &BLANK_WHITE).unwrap();
            assert_eq!(rect, ContentRect::new(y, x, y, x), "pixel at ({x}, {y})");
        }
    }

    // TC-DET-003: centered block
    #[test]
    fn test_centered_block() {
        let mut img = RgbaImage::from_pixel(100, 100, BLANK_WHITE);
        fill(&mut img, 20..=79, 10..=89);

        let rect = ContentBoxDetector::detect(&img, &BLANK_WHITE).unwrap();
        assert_eq!(rect.top, 20);
        assert_eq!(rect.bottom, 79);
        assert_eq!(rect.left, 10);
        assert_eq!(rect.right, 89);
    }

    #[test]
    fn test_scattered_content() {
        let mut img = RgbaImage::from_pixel(50, 40, BLANK_WHITE);
        img.put_pixel(12, 5, INK);
        img.put_pixel(40, 31, INK);
        img.put_pixel(3, 20, INK);

        let rect = ContentBoxDetector::detect(&img, &BLANK_WHITE).unwrap();
        assert_eq!(rect, ContentRect::new(5, 3, 31, 40));
    }

    #[test]
    fn test_full_bleed_content() {
        let img = RgbaImage::from_pixel(30, 20, INK);
        let rect = ContentBoxDetector::detect(&img, &BLANK_WHITE).unwrap();
        assert_eq!(rect, ContentRect::new(0, 0, 19, 29));
    }

    #[test]
    fn test_single_row_and_column_rasters() {
        let row = RgbaImage::from_pixel(12, 1, BLANK_WHITE);
        let rect = ContentBoxDetector::detect(&row, &BLANK_WHITE).unwrap();
        assert_eq!((rect.top, rect.bottom), (0, 0));
        assert_eq!((rect.left, rect.right), (11, 11));

        let column = RgbaImage::from_pixel(1, 12, INK);
        let rect = ContentBoxDetector::detect(&column, &BLANK_WHITE).unwrap();
        assert_eq!(rect, ContentRect::new(0, 0, 11, 0));
    }

    #[test]
    fn test_anti_aliased_fringe_counts_as_content() {
        let mut img = RgbaImage::from_pixel(40, 40, BLANK_WHITE);
        fill(&mut img, 10..=29, 10..=29);
        img.put_pixel(9, 15, Rgba([250, 250, 250, 255]));

        let rect = ContentBoxDetector::detect(&img, &BLANK_WHITE).unwrap();
        assert_eq!(rect.left, 9);
    }

    #[test]
    fn test_empty_raster_is_error() {
        let img = RgbaImage::new(0, 10);
        assert_eq!(
            ContentBoxDetector::detect(&img, &BLANK_WHITE),
            Err(MarginError::EmptyRaster {
                width: 0,
                height: 10
            })
        );

        let img = RgbaImage::new(10, 0);
        assert!(ContentBoxDetector::detect(&img, &BLANK_WHITE).is_err());
    }

    #[test]
    fn test_custom_blank_color() {
        let paper = Rgba([240, 230, 200, 255]);
        let mut img = RgbaImage::from_pixel(30, 30, paper);
        fill(&mut img, 4..=6, 8..=20);

        let rect = ContentBoxDetector::detect(&img, &paper).unwrap();
        assert_eq!(rect, ContentRect::new(4, 8, 6, 20));
    }
}
