//! Page Rendering module
//!
//! Turns one PDF page into an RGBA raster at a caller-chosen pixel size.
//!
//! # Features
//!
//! - [`PageRenderer`] seam so the crop pipeline can run on synthetic rasters
//! - Poppler (`pdftoppm`) backed renderer with exact output sizing
//!
//! # Example
//!
//! ```rust,no_run
//! use pdf_autocrop::{PageRenderer, PopplerRenderer};
//! use std::path::Path;
//!
//! let renderer = PopplerRenderer::locate().unwrap();
//! let raster = renderer.render(Path::new("input.pdf"), 1, 612, 792).unwrap();
//! assert_eq!(raster.dimensions(), (612, 792));
//! ```

mod poppler;

pub use poppler::{PopplerRenderer, DEFAULT_PDFTOPPM};

use image::RgbaImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================
// Error Types
// ============================================================

/// Render error types. All of them are local to one page.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Renderer not found: {0}")]
    ToolNotFound(String),

    #[error("Renderer failed on page {page_number} ({status}): {stderr}")]
    CommandFailed {
        page_number: u32,
        status: String,
        stderr: String,
    },

    #[error("Renderer produced no output at {}", .0.display())]
    MissingOutput(PathBuf),

    #[error("Invalid raster: {0}")]
    InvalidImage(String),

    #[error("Page {page_number} has no pixels at 1:1 scale ({width}x{height})")]
    EmptyPage {
        page_number: u32,
        width: u32,
        height: u32,
    },

    #[error("Page {page_number} is rotated by {degrees} degrees, not a multiple of 90")]
    UnsupportedRotation { page_number: u32, degrees: i64 },

    #[error(
        "Renderer returned {width}x{height} for page {page_number}, \
         expected {expected_width}x{expected_height}"
    )]
    SizeMismatch {
        page_number: u32,
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    #[error("Page {page_number} geometry unavailable: {reason}")]
    Geometry { page_number: u32, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;

// ============================================================
// Renderer Trait
// ============================================================

/// Renders a single page of a PDF file to a raster
pub trait PageRenderer: Sync {
    /// Render 1-based `page_number` of the PDF at `source` to exactly
    /// `width` x `height` pixels.
    fn render(&self, source: &Path, page_number: u32, width: u32, height: u32) -> Result<RgbaImage>;
}

impl<R: PageRenderer + ?Sized> PageRenderer for &R {
    fn render(
        &self,
        source: &Path,
        page_number: u32,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage> {
        (**self).render(source, page_number, width, height)
    }
}

impl<R: PageRenderer + ?Sized> PageRenderer for Box<R> {
    fn render(
        &self,
        source: &Path,
        page_number: u32,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage> {
        (**self).render(source, page_number, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Solid;

    impl PageRenderer for Solid {
        fn render(&self, _: &Path, _: u32, width: u32, height: u32) -> Result<RgbaImage> {
            Ok(RgbaImage::new(width, height))
        }
    }

    #[test]
    fn test_renderer_through_reference_and_box() {
        let by_ref: &dyn PageRenderer = &Solid;
        let raster = by_ref.render(Path::new("x.pdf"), 1, 3, 2).unwrap();
        assert_eq!(raster.dimensions(), (3, 2));

        let boxed: Box<dyn PageRenderer + Send> = Box::new(Solid);
        let raster = boxed.render(Path::new("x.pdf"), 1, 4, 5).unwrap();
        assert_eq!(raster.dimensions(), (4, 5));
    }

    #[test]
    fn test_error_display_messages() {
        let err = RenderError::ToolNotFound("pdftoppm".into());
        assert!(err.to_string().contains("not found"));

        let err = RenderError::EmptyPage {
            page_number: 2,
            width: 0,
            height: 10,
        };
        assert!(err.to_string().contains("Page 2"));

        let err = RenderError::UnsupportedRotation {
            page_number: 4,
            degrees: 45,
        };
        assert!(err.to_string().contains("45"));

        let err = RenderError::SizeMismatch {
            page_number: 3,
            expected_width: 612,
            expected_height: 792,
            width: 612,
            height: 793,
        };
        assert_eq!(
            err.to_string(),
            "Renderer returned 612x793 for page 3, expected 612x792"
        );

        let _io: RenderError = std::io::Error::other("test").into();
    }
}
