//! Margin Detection & Crop Geometry module
//!
//! Decides the new visible rectangle of a rendered page.
//!
//! # Features
//!
//! - Edge-scanning content box detection with exact blank-color matching
//! - Per-side margin padding clamped to the raster
//! - Raster-to-page coordinate translation (top-left to bottom-left origin)
//!
//! # Example
//!
//! ```rust
//! use pdf_autocrop::{
//!     ContentBoxDetector, GeometryTranslator, MarginApplicator, Margins, BLANK_WHITE,
//! };
//! use image::{Rgba, RgbaImage};
//!
//! let mut raster = RgbaImage::from_pixel(200, 100, BLANK_WHITE);
//! raster.put_pixel(50, 40, Rgba([0, 0, 0, 255]));
//!
//! let detected = ContentBoxDetector::detect(&raster, &BLANK_WHITE).unwrap();
//! let padded = MarginApplicator::apply(detected, &Margins::uniform(5), 200, 100);
//! let bounds = GeometryTranslator::translate(&padded, 100);
//!
//! assert_eq!((bounds.x, bounds.y, bounds.width, bounds.height), (45, 55, 10, 10));
//! ```

// Submodules
mod apply;
mod detect;
mod geometry;
mod types;

// Re-export public API
pub use apply::MarginApplicator;
pub use detect::ContentBoxDetector;
pub use geometry::{GeometryTranslator, PageBounds};
pub use types::{ContentRect, MarginError, Margins, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::BLANK_WHITE;
    use image::{imageops, Rgba, RgbaImage};

    const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn run(raster: &RgbaImage, margins: &Margins) -> (ContentRect, ContentRect, PageBounds) {
        let (width, height) = raster.dimensions();
        let detected = ContentBoxDetector::detect(raster, &BLANK_WHITE).unwrap();
        let padded = MarginApplicator::apply(detected, margins, width, height);
        let bounds = GeometryTranslator::translate(&padded, height);
        (detected, padded, bounds)
    }

    #[test]
    fn test_uniform_margins() {
        assert_eq!(Margins::uniform(20), Margins::new(20, 20, 20, 20));
        assert_eq!(Margins::uniform(0), Margins::ZERO);
    }

    #[test]
    fn test_margins_from_values() {
        assert_eq!(Margins::from_values(&[]), Margins::ZERO);
        assert_eq!(Margins::from_values(&[7]), Margins::new(7, 0, 0, 0));
        assert_eq!(Margins::from_values(&[1, 2, 3]), Margins::new(1, 2, 3, 0));
        let margins = Margins::from_values(&[1, 2, 3, 4, 5]);
        assert_eq!(margins, Margins::new(1, 2, 3, 4));
    }

    #[test]
    fn test_margins_default_is_zero() {
        let margins = Margins::default();
        assert!(margins.is_zero());
        assert!(!Margins::new(0, 0, 1, 0).is_zero());
    }

    #[test]
    fn test_margins_deserialize_partial() {
        let margins: Margins = toml::from_str("top = 4\nright = 9").unwrap();
        assert_eq!(margins, Margins::new(4, 0, 0, 9));
    }

    #[test]
    fn test_content_rect_helpers() {
        let full = ContentRect::full(200, 100);
        assert_eq!(full, Some(ContentRect::new(0, 0, 99, 199)));
        assert_eq!(ContentRect::full(0, 100), None);
        assert_eq!(ContentRect::full(1, 1), Some(ContentRect::new(0, 0, 0, 0)));
    }

    #[test]
    fn test_error_display_messages() {
        let err = MarginError::EmptyRaster {
            width: 0,
            height: 12,
        };
        assert!(err.to_string().contains("0x12"));
    }

    // TC-CRP-001: blank page with margins stays in bounds
    #[test]
    fn test_blank_page_with_margins() {
        let raster = RgbaImage::from_pixel(100, 100, BLANK_WHITE);
        let (detected, padded, bounds) = run(&raster, &Margins::uniform(5));

        assert_eq!(detected.top, detected.bottom);
        assert_eq!(detected.left, detected.right);
        assert!(padded.bottom < 100 && padded.right < 100);
        assert!(bounds.width <= 5 && bounds.height <= 5);
        assert!(bounds.area() <= 25);
    }

    // TC-CRP-002: centered block, zero margins
    #[test]
    fn test_centered_block_zero_margins() {
        let mut raster = RgbaImage::from_pixel(100, 100, BLANK_WHITE);
        for y in 20..=79 {
            for x in 10..=89 {
                raster.put_pixel(x, y, INK);
            }
        }

        let (detected, padded, bounds) = run(&raster, &Margins::ZERO);
        assert_eq!(detected, ContentRect::new(20, 10, 79, 89));
        assert_eq!(padded, detected);
        assert_eq!(bounds, PageBounds::new(10, 21, 79, 59));
    }

    // TC-CRP-003: a second pass over the cropped region detects the full raster
    #[test]
    fn test_second_pass_is_near_no_op() {
        let mut raster = RgbaImage::from_pixel(120, 90, BLANK_WHITE);
        for y in 30..=60 {
            for x in 25..=100 {
                raster.put_pixel(x, y, INK);
            }
        }

        let (detected, _, _) = run(&raster, &Margins::ZERO);
        let cropped = imageops::crop_imm(
            &raster,
            detected.left,
            detected.top,
            detected.right - detected.left + 1,
            detected.bottom - detected.top + 1,
        )
        .to_image();

        let (w, h) = cropped.dimensions();
        let (again, _, _) = run(&cropped, &Margins::ZERO);
        assert_eq!(Some(again), ContentRect::full(w, h));
    }

    #[test]
    fn test_margins_then_translate_against_bottom_edge() {
        let mut raster = RgbaImage::from_pixel(200, 100, BLANK_WHITE);
        raster.put_pixel(3, 2, INK);
        raster.put_pixel(193, 97, INK);

        let (detected, _, bounds) = run(&raster, &Margins::ZERO);
        assert_eq!(detected, ContentRect::new(2, 3, 97, 193));
        assert_eq!(bounds, PageBounds::new(3, 3, 190, 95));
    }
}
