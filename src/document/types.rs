//! Document module core types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

// ============================================================
// Error Types
// ============================================================

/// Document error types
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to load PDF {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("Failed to write PDF {}: {reason}", .path.display())]
    Write { path: PathBuf, reason: String },

    #[error("Page index {index} out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    #[error("Malformed page {page_number}: {reason}")]
    MalformedPage { page_number: u32, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DocumentError>;

// ============================================================
// Core Data Structures
// ============================================================

/// Handle to one page of a loaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRef {
    /// 0-based page index
    pub index: usize,
    /// Page dictionary object
    pub object_id: lopdf::ObjectId,
}

impl PageRef {
    /// 1-based page number, as used by renderers and in messages
    pub fn number(&self) -> u32 {
        u32::try_from(self.index + 1).unwrap_or(u32::MAX)
    }
}

/// A PDF rectangle `[llx lly urx ury]` in page space (points)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PdfRect {
    pub llx: f64,
    pub lly: f64,
    pub urx: f64,
    pub ury: f64,
}

impl PdfRect {
    pub fn new(llx: f64, lly: f64, urx: f64, ury: f64) -> Self {
        Self { llx, lly, urx, ury }
    }

    /// Build from two opposite corners in any order
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            llx: x0.min(x1),
            lly: y0.min(y1),
            urx: x0.max(x1),
            ury: y0.max(y1),
        }
    }

    pub fn width(&self) -> f64 {
        self.urx - self.llx
    }

    pub fn height(&self) -> f64 {
        self.ury - self.lly
    }

    /// Raster size for a 1:1 render, truncating fractional points
    pub fn raster_size(&self) -> (u32, u32) {
        let truncate = |v: f64| if v.is_finite() && v > 0.0 { v as u32 } else { 0 };
        (truncate(self.width()), truncate(self.height()))
    }
}
