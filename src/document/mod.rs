//! PDF Document module
//!
//! Loads PDF files, exposes page geometry and rewrites page bounds.
//!
//! # Features
//!
//! - MediaBox/Rotate lookup with page-tree inheritance
//! - In-place MediaBox rewrite offset by the page's original origin
//! - Save to disk or to memory
//!
//! # Example
//!
//! ```rust,no_run
//! use pdf_autocrop::{PageBounds, PdfDocument};
//! use std::path::Path;
//!
//! let mut doc = PdfDocument::load(Path::new("input.pdf")).unwrap();
//! let page = doc.page(0).unwrap();
//! println!("Page size: {:?}", doc.page_size(&page).unwrap());
//!
//! doc.set_page_bounds(&page, &PageBounds::new(36, 36, 540, 720)).unwrap();
//! doc.save(Path::new("output.pdf")).unwrap();
//! ```

// Submodules
mod pdf;
mod types;

// Re-export public API
pub use pdf::PdfDocument;
pub use types::{DocumentError, PageRef, PdfRect, Result};
