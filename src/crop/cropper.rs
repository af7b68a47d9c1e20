//! Page orchestration
//!
//! For each page: resolve geometry, render at 1:1, plan the crop, then write
//! the bounds back. Rendering and planning never touch the document, so they
//! can run on a thread pool; writing is always sequential in page order.

use super::types::{CropOptions, CropPlan, CropReport, PageOutcome};
use crate::document::{self, PageRef, PdfDocument};
use crate::margin::MarginError;
use crate::raster;
use crate::render::{PageRenderer, RenderError};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

// ============================================================
// Progress
// ============================================================

/// Progress callback for document cropping
pub trait CropProgress: Sync {
    /// Called once before any page is processed
    fn on_start(&self, _total_pages: usize) {}

    /// Called after a page has been rendered and planned (any thread)
    fn on_page_planned(&self, _page_number: u32) {}

    /// Called in page order once a page's outcome is final
    fn on_page_done(&self, _outcome: &PageOutcome) {}

    /// Called once after the last page
    fn on_finish(&self, _report: &CropReport) {}
}

/// Progress callback that ignores everything
pub struct NoProgress;

impl CropProgress for NoProgress {}

// ============================================================
// Auto Cropper
// ============================================================

/// Geometry gathered for one page before rendering
#[derive(Debug, Clone, Copy)]
struct PageJob {
    page: PageRef,
    /// MediaBox size in pixels, unrotated
    width: u32,
    height: u32,
    /// Clockwise `/Rotate`, a right angle
    rotation: i64,
}

impl PageJob {
    /// Raster size in display orientation, as the renderer produces it
    fn render_size(&self) -> (u32, u32) {
        if self.rotation % 180 == 0 {
            (self.width, self.height)
        } else {
            (self.height, self.width)
        }
    }
}

/// File the renderer reads pages from
enum RenderSource {
    File(PathBuf),
    Snapshot(NamedTempFile),
}

impl RenderSource {
    fn path(&self) -> &Path {
        match self {
            RenderSource::File(path) => path,
            RenderSource::Snapshot(file) => file.path(),
        }
    }
}

/// Crops pages of a document to their rendered content
pub struct AutoCropper<R> {
    renderer: R,
    options: CropOptions,
}

impl<R: PageRenderer> AutoCropper<R> {
    pub fn new(renderer: R, options: CropOptions) -> Self {
        Self { renderer, options }
    }

    /// Crop a single page in place.
    ///
    /// Render failures are reported as [`PageOutcome::Skipped`]; only an
    /// out-of-range index or a failure to snapshot the document is an error.
    pub fn crop_page(
        &self,
        doc: &mut PdfDocument,
        page_index: usize,
    ) -> document::Result<PageOutcome> {
        let page = doc.page(page_index)?;
        let source = Self::render_source(doc, &[page])?;
        let planned = Self::prepare(doc, page).and_then(|job| self.plan(source.path(), job));
        Ok(Self::finish(doc, page, planned))
    }

    /// Crop a set of pages in place, sharing one render source.
    ///
    /// Outcomes follow `page_indices` order; repeated indices are cropped
    /// once. Any out-of-range index fails the call before a page is touched.
    pub fn crop_pages(
        &self,
        doc: &mut PdfDocument,
        page_indices: &[usize],
    ) -> document::Result<Vec<PageOutcome>> {
        let mut pages = Vec::with_capacity(page_indices.len());
        for &index in page_indices {
            let page = doc.page(index)?;
            if !pages.contains(&page) {
                pages.push(page);
            }
        }
        self.run(doc, pages, &NoProgress)
    }

    /// Crop every page in place
    pub fn crop_document(&self, doc: &mut PdfDocument) -> document::Result<CropReport> {
        self.crop_document_with_progress(doc, &NoProgress)
    }

    /// Crop every page in place, reporting progress
    pub fn crop_document_with_progress(
        &self,
        doc: &mut PdfDocument,
        progress: &dyn CropProgress,
    ) -> document::Result<CropReport> {
        let start = Instant::now();
        progress.on_start(doc.page_count());

        let all_pages: Vec<PageRef> = doc.pages().collect();
        let pages = self.run(doc, all_pages, progress)?;

        let report = CropReport {
            source: doc.source_path().map(Path::to_path_buf),
            pages,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        };
        tracing::info!(
            pages = report.page_count(),
            cropped = report.cropped_count(),
            skipped = report.skipped_count(),
            "document cropped"
        );
        progress.on_finish(&report);
        Ok(report)
    }

    // ============ Steps ============

    /// Plan `pages` (in parallel when enabled), then write them in order
    fn run(
        &self,
        doc: &mut PdfDocument,
        pages: Vec<PageRef>,
        progress: &dyn CropProgress,
    ) -> document::Result<Vec<PageOutcome>> {
        let source = Self::render_source(doc, &pages)?;
        // Every page is prepared before any bounds are written
        let jobs: Vec<(PageRef, Result<PageJob, RenderError>)> = pages
            .into_iter()
            .map(|page| (page, Self::prepare(doc, page)))
            .collect();

        let plan_one = |(page, job): (PageRef, Result<PageJob, RenderError>)| {
            let planned = job.and_then(|job| self.plan(source.path(), job));
            progress.on_page_planned(page.number());
            (page, planned)
        };

        let planned: Vec<(PageRef, Result<CropPlan, RenderError>)> = if self.options.parallel {
            self.run_parallel(jobs, plan_one)
        } else {
            jobs.into_iter().map(plan_one).collect()
        };

        let mut outcomes = Vec::with_capacity(planned.len());
        for (page, plan) in planned {
            let outcome = Self::finish(doc, page, plan);
            progress.on_page_done(&outcome);
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    /// Resolve raster size and rotation for a page
    fn prepare(doc: &PdfDocument, page: PageRef) -> Result<PageJob, RenderError> {
        let page_number = page.number();
        let geometry = |e: document::DocumentError| RenderError::Geometry {
            page_number,
            reason: e.to_string(),
        };

        let rotation = doc.rotation(&page).map_err(geometry)?;
        if rotation % 90 != 0 {
            return Err(RenderError::UnsupportedRotation {
                page_number,
                degrees: rotation,
            });
        }

        let (width, height) = doc.media_box(&page).map_err(geometry)?.raster_size();
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyPage {
                page_number,
                width,
                height,
            });
        }

        Ok(PageJob {
            page,
            width,
            height,
            rotation,
        })
    }

    /// Render and compute the crop for one page
    fn plan(&self, source: &Path, job: PageJob) -> Result<CropPlan, RenderError> {
        let page_number = job.page.number();
        let (render_width, render_height) = job.render_size();
        let rendered = self
            .renderer
            .render(source, page_number, render_width, render_height)?;

        // Bounds are only meaningful at exactly one pixel per point
        let (width, height) = rendered.dimensions();
        if (width, height) != (render_width, render_height) {
            return Err(RenderError::SizeMismatch {
                page_number,
                expected_width: render_width,
                expected_height: render_height,
                width,
                height,
            });
        }
        let Some(raster) = raster::unrotate(rendered, job.rotation) else {
            return Err(RenderError::UnsupportedRotation {
                page_number,
                degrees: job.rotation,
            });
        };

        CropPlan::compute(&raster, &self.options.blank, &self.options.margins).map_err(
            |e| match e {
                MarginError::EmptyRaster { width, height } => RenderError::EmptyPage {
                    page_number,
                    width,
                    height,
                },
            },
        )
    }

    /// Write a successful plan, or record why the page was skipped
    fn finish(
        doc: &mut PdfDocument,
        page: PageRef,
        planned: Result<CropPlan, RenderError>,
    ) -> PageOutcome {
        let page_number = page.number();
        let written = planned.and_then(|plan| {
            doc.set_page_bounds(&page, &plan.bounds)
                .map(|media_box| (plan, media_box))
                .map_err(|e| RenderError::Geometry {
                    page_number,
                    reason: e.to_string(),
                })
        });

        match written {
            Ok((plan, media_box)) => {
                if plan.bounds.is_degenerate() {
                    tracing::warn!(
                        page = page_number,
                        bounds = ?plan.bounds,
                        "page has no discernible content, crop is degenerate"
                    );
                } else {
                    tracing::info!(page = page_number, bounds = ?plan.bounds, "page cropped");
                }
                PageOutcome::Cropped {
                    page_number,
                    plan,
                    media_box,
                }
            }
            Err(reason) => {
                tracing::warn!(page = page_number, %reason, "page skipped");
                PageOutcome::Skipped {
                    page_number,
                    reason,
                }
            }
        }
    }

    /// Pages render from the loaded file unless one of them was rewritten
    /// since load, or there is no file
    fn render_source(
        doc: &mut PdfDocument,
        pages: &[PageRef],
    ) -> document::Result<RenderSource> {
        if let Some(path) = doc.source_path() {
            if !pages.iter().any(|page| doc.is_page_modified(page)) {
                return Ok(RenderSource::File(path.to_path_buf()));
            }
        }
        let snapshot = tempfile::Builder::new()
            .prefix("pdf-autocrop-")
            .suffix(".pdf")
            .tempfile()?;
        doc.save(snapshot.path())?;
        tracing::debug!(path = %snapshot.path().display(), "rendering from snapshot");
        Ok(RenderSource::Snapshot(snapshot))
    }

    fn run_parallel<T, U, F>(&self, items: Vec<T>, f: F) -> Vec<U>
    where
        T: Send,
        U: Send,
        F: Fn(T) -> U + Sync + Send,
    {
        let threads = self.options.threads.unwrap_or(0);
        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(|| items.into_par_iter().map(&f).collect()),
            Err(e) => {
                tracing::warn!(error = %e, "thread pool unavailable, using global pool");
                items.into_par_iter().map(&f).collect()
            }
        }
    }
}
