//! Crop module core types

use crate::document::PdfRect;
use crate::margin::{
    ContentBoxDetector, ContentRect, GeometryTranslator, MarginApplicator, Margins, PageBounds,
};
use crate::raster::{BitmapSampler, BLANK_WHITE};
use crate::render::RenderError;
use image::Rgba;
use serde::Serialize;
use std::path::PathBuf;

// ============================================================
// Options
// ============================================================

/// Crop options
#[derive(Debug, Clone)]
pub struct CropOptions {
    /// Padding added back around detected content
    pub margins: Margins,
    /// Background reference color, compared exactly
    pub blank: Rgba<u8>,
    /// Render and detect pages on a thread pool
    pub parallel: bool,
    /// Thread count for parallel mode (None = rayon default)
    pub threads: Option<usize>,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            margins: Margins::ZERO,
            blank: BLANK_WHITE,
            parallel: false,
            threads: None,
        }
    }
}

impl CropOptions {
    /// Create a new options builder
    pub fn builder() -> CropOptionsBuilder {
        CropOptionsBuilder::default()
    }
}

/// Builder for CropOptions
#[derive(Debug, Default)]
pub struct CropOptionsBuilder {
    options: CropOptions,
}

impl CropOptionsBuilder {
    #[must_use]
    pub fn margins(mut self, margins: Margins) -> Self {
        self.options.margins = margins;
        self
    }

    #[must_use]
    pub fn blank(mut self, blank: Rgba<u8>) -> Self {
        self.options.blank = blank;
        self
    }

    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.options.parallel = parallel;
        self
    }

    /// Thread count for parallel mode; zero means rayon's default
    #[must_use]
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.options.threads = threads.filter(|&n| n > 0);
        self
    }

    #[must_use]
    pub fn build(self) -> CropOptions {
        self.options
    }
}

// ============================================================
// Crop Plan
// ============================================================

/// Everything decided for one page from its raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropPlan {
    /// Raster (width, height)
    pub raster_size: (u32, u32),
    /// Content box before padding
    pub detected: ContentRect,
    /// Content box after padding and clamping
    pub padded: ContentRect,
    /// Page-space bounds relative to the MediaBox origin
    pub bounds: PageBounds,
}

impl CropPlan {
    /// Detect, pad and translate in one go
    pub fn compute<S>(
        raster: &S,
        blank: &S::Color,
        margins: &Margins,
    ) -> crate::margin::Result<Self>
    where
        S: BitmapSampler + ?Sized,
    {
        let (width, height) = raster.dimensions();
        let detected = ContentBoxDetector::detect(raster, blank)?;
        let padded = MarginApplicator::apply(detected, margins, width, height);
        let bounds = GeometryTranslator::translate(&padded, height);

        Ok(Self {
            raster_size: (width, height),
            detected,
            padded,
            bounds,
        })
    }
}

// ============================================================
// Outcomes
// ============================================================

/// Result of processing one page
#[derive(Debug)]
pub enum PageOutcome {
    /// New bounds were written to the page
    Cropped {
        page_number: u32,
        plan: CropPlan,
        media_box: PdfRect,
    },
    /// The page was left untouched
    Skipped {
        page_number: u32,
        reason: RenderError,
    },
}

impl PageOutcome {
    pub fn page_number(&self) -> u32 {
        match self {
            PageOutcome::Cropped { page_number, .. } | PageOutcome::Skipped { page_number, .. } => {
                *page_number
            }
        }
    }

    pub fn is_cropped(&self) -> bool {
        matches!(self, PageOutcome::Cropped { .. })
    }

    /// Serializable one-line view
    pub fn summary(&self) -> PageSummary {
        match self {
            PageOutcome::Cropped {
                page_number,
                plan,
                media_box,
            } => PageSummary {
                page_number: *page_number,
                status: PageStatus::Cropped,
                bounds: Some(plan.bounds),
                media_box: Some(*media_box),
                degenerate: plan.bounds.is_degenerate(),
                reason: None,
            },
            PageOutcome::Skipped {
                page_number,
                reason,
            } => PageSummary {
                page_number: *page_number,
                status: PageStatus::Skipped,
                bounds: None,
                media_box: None,
                degenerate: false,
                reason: Some(reason.to_string()),
            },
        }
    }
}

/// Page status in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Cropped,
    Skipped,
}

/// Serializable per-page summary
#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub page_number: u32,
    pub status: PageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<PageBounds>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_box: Option<PdfRect>,
    pub degenerate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Result of processing a whole document, pages in document order
#[derive(Debug, Default)]
pub struct CropReport {
    /// File the pages were rendered from
    pub source: Option<PathBuf>,
    pub pages: Vec<PageOutcome>,
    pub elapsed_seconds: f64,
}

impl CropReport {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn cropped_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_cropped()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.page_count() - self.cropped_count()
    }

    /// JSON document with counts and per-page summaries
    pub fn to_json(&self) -> serde_json::Value {
        let pages: Vec<PageSummary> = self.pages.iter().map(PageOutcome::summary).collect();
        serde_json::json!({
            "source": self.source,
            "page_count": self.page_count(),
            "cropped": self.cropped_count(),
            "skipped": self.skipped_count(),
            "elapsed_seconds": self.elapsed_seconds,
            "pages": pages,
        })
    }
}
