//! pdf-autocrop - Crop blank margins from PDF pages
//!
//! Each page is rendered at one pixel per point, the bounding box of
//! non-blank pixels is found by scanning inward from the edges, optional
//! padding is added back, and the result is written as the page's new
//! MediaBox.
//!
//! # Modules
//!
//! - [`raster`]: Pixel sampling over rendered pages
//! - [`margin`]: Content box detection, padding and page-space translation
//! - [`document`]: PDF loading, page geometry and bounds rewriting (lopdf)
//! - [`render`]: Page rendering (Poppler `pdftoppm`)
//! - [`crop`]: Per-page orchestration across a document
//! - [`config`]: TOML configuration
//! - [`cli`]: Command-line definitions
//! - [`output`]: Output path resolution
//! - [`progress`]: Progress display
//!
//! # Example
//!
//! ```rust,no_run
//! use pdf_autocrop::{AutoCropper, CropOptions, Margins, PdfDocument, PopplerRenderer};
//! use std::path::Path;
//!
//! let mut doc = PdfDocument::load(Path::new("scan.pdf")).unwrap();
//! let options = CropOptions::builder().margins(Margins::uniform(12)).build();
//! let cropper = AutoCropper::new(PopplerRenderer::locate().unwrap(), options);
//!
//! let report = cropper.crop_document(&mut doc).unwrap();
//! assert_eq!(report.page_count(), doc.page_count());
//! doc.save(Path::new("scan-cropped.pdf")).unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod crop;
pub mod document;
pub mod margin;
pub mod output;
pub mod progress;
pub mod raster;
pub mod render;

// CLI
pub use cli::{exit_codes, Cli, Commands, CropArgs};

// Config
pub use config::{CliOverrides, Config, ConfigError};

// Crop
pub use crop::{
    AutoCropper, CropOptions, CropOptionsBuilder, CropPlan, CropProgress, CropReport,
    NoProgress, PageOutcome, PageStatus, PageSummary,
};

// Document
pub use document::{DocumentError, PageRef, PdfDocument, PdfRect};

// Margin
pub use margin::{
    ContentBoxDetector, ContentRect, GeometryTranslator, MarginApplicator, MarginError, Margins,
    PageBounds,
};

// Output
pub use output::{resolve_output_path, timestamped_file_name};

// Progress
pub use progress::{OutputMode, ProgressTracker};

// Raster
pub use raster::{BitmapSampler, BLANK_WHITE};

// Render
pub use render::{PageRenderer, PopplerRenderer, RenderError, DEFAULT_PDFTOPPM};
