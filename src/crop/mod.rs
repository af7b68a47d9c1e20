//! Auto Crop module
//!
//! Drives page rendering, content detection, padding and bounds rewriting
//! across a document.
//!
//! # Features
//!
//! - Per-page outcomes: a failed page is skipped and left untouched
//! - Optional parallel rendering with rayon; writes stay in page order
//! - Renders from the source file, or from a snapshot once edited in memory
//!
//! # Example
//!
//! ```rust,no_run
//! use pdf_autocrop::{AutoCropper, CropOptions, Margins, PdfDocument, PopplerRenderer};
//! use std::path::Path;
//!
//! let mut doc = PdfDocument::load(Path::new("input.pdf")).unwrap();
//! let options = CropOptions::builder()
//!     .margins(Margins::uniform(10))
//!     .parallel(true)
//!     .build();
//!
//! let cropper = AutoCropper::new(PopplerRenderer::locate().unwrap(), options);
//! let report = cropper.crop_document(&mut doc).unwrap();
//! println!("{} of {} pages cropped", report.cropped_count(), report.page_count());
//!
//! doc.save(Path::new("output.pdf")).unwrap();
//! ```

// Submodules
mod cropper;
mod types;

// Re-export public API
pub use cropper::{AutoCropper, CropProgress, NoProgress};
pub use types::{
    CropOptions, CropOptionsBuilder, CropPlan, CropReport, PageOutcome, PageStatus, PageSummary,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::margin::{ContentRect, Margins, PageBounds};
    use crate::raster::BLANK_WHITE;
    use crate::render::RenderError;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_options_default() {
        let options = CropOptions::default();
        assert!(options.margins.is_zero());
        assert_eq!(options.blank, BLANK_WHITE);
        assert!(!options.parallel);
        assert!(options.threads.is_none());
    }

    #[test]
    fn test_options_builder() {
        let options = CropOptions::builder()
            .margins(Margins::new(1, 2, 3, 4))
            .blank(Rgba([0, 0, 0, 255]))
            .parallel(true)
            .threads(Some(0))
            .build();

        assert_eq!(options.margins, Margins::new(1, 2, 3, 4));
        assert_eq!(options.blank, Rgba([0, 0, 0, 255]));
        assert!(options.parallel);
        // zero falls back to rayon's default
        assert!(options.threads.is_none());

        let options = CropOptions::builder().threads(Some(4)).build();
        assert_eq!(options.threads, Some(4));
    }

    #[test]
    fn test_plan_compute() {
        let mut raster = RgbaImage::from_pixel(200, 100, BLANK_WHITE);
        raster.put_pixel(50, 40, Rgba([10, 10, 10, 255]));

        let plan = CropPlan::compute(&raster, &BLANK_WHITE, &Margins::uniform(5)).unwrap();

        assert_eq!(plan.raster_size, (200, 100));
        assert_eq!(plan.detected, ContentRect::new(40, 50, 40, 50));
        assert_eq!(plan.padded, ContentRect::new(35, 45, 45, 55));
        assert_eq!(plan.bounds, PageBounds::new(45, 55, 10, 10));
    }

    #[test]
    fn test_report_counts_and_json() {
        let raster = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        let plan = CropPlan::compute(&raster, &BLANK_WHITE, &Margins::ZERO).unwrap();
        let report = CropReport {
            source: None,
            pages: vec![
                PageOutcome::Cropped {
                    page_number: 1,
                    plan,
                    media_box: crate::document::PdfRect::new(0.0, 1.0, 9.0, 10.0),
                },
                PageOutcome::Skipped {
                    page_number: 2,
                    reason: RenderError::UnsupportedRotation {
                        page_number: 2,
                        degrees: 45,
                    },
                },
            ],
            elapsed_seconds: 0.5,
        };

        assert_eq!(report.page_count(), 2);
        assert_eq!(report.cropped_count(), 1);
        assert_eq!(report.skipped_count(), 1);

        let json = report.to_json();
        assert_eq!(json["cropped"], 1);
        assert_eq!(json["skipped"], 1);
        assert_eq!(json["pages"][0]["status"], "cropped");
        assert_eq!(json["pages"][0]["bounds"]["width"], 9);
        assert_eq!(json["pages"][1]["status"], "skipped");
        assert!(json["pages"][1]["reason"]
            .as_str()
            .unwrap()
            .contains("rotated"));
        assert!(json["pages"][1].get("bounds").is_none());
    }
}
