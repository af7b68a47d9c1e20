//! lopdf-backed document access
//!
//! Loads a PDF, resolves page geometry through the page tree and rewrites
//! page boxes in place.

use super::types::{DocumentError, PageRef, PdfRect, Result};
use crate::margin::PageBounds;
use lopdf::{Dictionary, Object, ObjectId};
use std::collections::HashSet;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// A loaded PDF document
pub struct PdfDocument {
    inner: lopdf::Document,
    /// Ordered page dictionaries (0-based)
    page_ids: Vec<ObjectId>,
    /// File the document was loaded from, if any
    source: Option<PathBuf>,
    /// Pages whose bounds were rewritten since load
    modified: HashSet<ObjectId>,
}

impl std::fmt::Debug for PdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfDocument")
            .field("page_count", &self.page_ids.len())
            .field("source", &self.source)
            .field("modified_pages", &self.modified.len())
            .finish_non_exhaustive()
    }
}

impl PdfDocument {
    /// Load a document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let inner = lopdf::Document::load(path).map_err(|source| DocumentError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        let mut doc = Self::from_lopdf(inner);
        doc.source = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Load a document from memory
    pub fn load_mem(bytes: &[u8]) -> Result<Self> {
        let inner = lopdf::Document::load_mem(bytes).map_err(|source| DocumentError::Load {
            path: PathBuf::from("<memory>"),
            source,
        })?;
        Ok(Self::from_lopdf(inner))
    }

    /// Wrap an already parsed lopdf document
    pub fn from_lopdf(inner: lopdf::Document) -> Self {
        // get_pages() is keyed by 1-based page number, so values are in order
        let page_ids = inner.get_pages().into_values().collect();
        Self {
            inner,
            page_ids,
            source: None,
            modified: HashSet::new(),
        }
    }

    /// File this document was loaded from
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// This page's bounds were rewritten since load
    pub fn is_page_modified(&self, page: &PageRef) -> bool {
        self.modified.contains(&page.object_id)
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Page handle by 0-based index
    pub fn page(&self, index: usize) -> Result<PageRef> {
        self.page_ids
            .get(index)
            .map(|&object_id| PageRef { index, object_id })
            .ok_or(DocumentError::PageOutOfRange {
                index,
                count: self.page_ids.len(),
            })
    }

    /// All page handles in document order
    pub fn pages(&self) -> impl Iterator<Item = PageRef> + '_ {
        self.page_ids
            .iter()
            .enumerate()
            .map(|(index, &object_id)| PageRef { index, object_id })
    }

    /// Effective MediaBox, inherited through `/Parent` when absent on the page
    pub fn media_box(&self, page: &PageRef) -> Result<PdfRect> {
        let obj = self.resolve_inherited(page, b"MediaBox")?.ok_or_else(|| {
            DocumentError::MalformedPage {
                page_number: page.number(),
                reason: "MediaBox not found on page or ancestors".into(),
            }
        })?;
        self.rect_from_object(page, obj)
    }

    /// Page size in points
    pub fn page_size(&self, page: &PageRef) -> Result<(f64, f64)> {
        let media = self.media_box(page)?;
        Ok((media.width(), media.height()))
    }

    /// Effective `/Rotate`, normalized to `0..360`
    pub fn rotation(&self, page: &PageRef) -> Result<i64> {
        match self.resolve_inherited(page, b"Rotate")? {
            Some(obj) => {
                let degrees = self
                    .resolve_ref(obj)
                    .as_i64()
                    .map_err(|e| DocumentError::MalformedPage {
                        page_number: page.number(),
                        reason: format!("Rotate is not an integer: {e}"),
                    })?;
                Ok(degrees.rem_euclid(360))
            }
            None => Ok(0),
        }
    }

    /// Rewrite the page's visible rectangle.
    ///
    /// `bounds` is relative to the current MediaBox origin. The new rectangle
    /// is written as the page's own `/MediaBox`; a `/CropBox` in effect on the
    /// page is replaced with the same rectangle so it cannot clip differently.
    pub fn set_page_bounds(&mut self, page: &PageRef, bounds: &PageBounds) -> Result<PdfRect> {
        let media = self.media_box(page)?;
        let [llx, lly, urx, ury] = bounds.to_corners(media.llx, media.lly);
        let rect = PdfRect::new(llx, lly, urx, ury);
        let has_crop_box = self.resolve_inherited(page, b"CropBox")?.is_some();

        let dict = self.page_dict_mut(page)?;
        dict.set("MediaBox", rect_to_object(&rect));
        if has_crop_box {
            dict.set("CropBox", rect_to_object(&rect));
        }
        self.modified.insert(page.object_id);

        tracing::debug!(
            page = page.number(),
            llx,
            lly,
            urx,
            ury,
            "wrote page bounds"
        );
        Ok(rect)
    }

    /// Save to `path`
    pub fn save(&mut self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|e| DocumentError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let mut writer = BufWriter::new(file);
        self.inner
            .save_to(&mut writer)
            .map_err(|e| DocumentError::Write {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    }

    /// Serialize to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.inner
            .save_to(&mut buf)
            .map_err(|e| DocumentError::Write {
                path: PathBuf::from("<memory>"),
                reason: e.to_string(),
            })?;
        Ok(buf)
    }

    // ============ Helpers ============

    /// Look up `key` on the page, then up the page tree via `/Parent`
    fn resolve_inherited(&self, page: &PageRef, key: &[u8]) -> Result<Option<&Object>> {
        let mut current = page.object_id;
        // Bounded walk so a cyclic /Parent chain cannot hang
        for _ in 0..=self.inner.objects.len() {
            let dict = self.dict(page, current)?;
            if let Ok(value) = dict.get(key) {
                return Ok(Some(value));
            }
            match dict.get(b"Parent") {
                Ok(parent) => {
                    current = parent.as_reference().map_err(|e| DocumentError::MalformedPage {
                        page_number: page.number(),
                        reason: format!("invalid /Parent reference: {e}"),
                    })?;
                }
                Err(_) => return Ok(None),
            }
        }
        Err(DocumentError::MalformedPage {
            page_number: page.number(),
            reason: "cyclic page tree".into(),
        })
    }

    fn dict(&self, page: &PageRef, id: ObjectId) -> Result<&Dictionary> {
        self.inner
            .get_object(id)
            .and_then(Object::as_dict)
            .map_err(|e| DocumentError::MalformedPage {
                page_number: page.number(),
                reason: format!("failed to get page dictionary: {e}"),
            })
    }

    fn page_dict_mut(&mut self, page: &PageRef) -> Result<&mut Dictionary> {
        self.inner
            .get_object_mut(page.object_id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| DocumentError::MalformedPage {
                page_number: page.number(),
                reason: format!("failed to get page dictionary: {e}"),
            })
    }

    /// Follow a single indirect reference, if any
    fn resolve_ref<'a>(&'a self, obj: &'a Object) -> &'a Object {
        match obj {
            Object::Reference(id) => self.inner.get_object(*id).unwrap_or(obj),
            _ => obj,
        }
    }

    fn rect_from_object(&self, page: &PageRef, obj: &Object) -> Result<PdfRect> {
        let malformed = |reason: String| DocumentError::MalformedPage {
            page_number: page.number(),
            reason,
        };
        let array = self
            .resolve_ref(obj)
            .as_array()
            .map_err(|e| malformed(format!("page box is not an array: {e}")))?;
        if array.len() != 4 {
            return Err(malformed(format!(
                "expected 4-element array for page box, got {}",
                array.len()
            )));
        }
        let mut values = [0.0f64; 4];
        for (slot, item) in values.iter_mut().zip(array) {
            *slot = object_to_f64(self.resolve_ref(item))
                .ok_or_else(|| malformed(format!("non-numeric page box entry {item:?}")))?;
        }
        let [llx, lly, urx, ury] = values;
        Ok(PdfRect::from_corners(llx, lly, urx, ury))
    }
}

/// Integer or Real to f64
fn object_to_f64(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(f) => Some(f64::from(*f)),
        _ => None,
    }
}

/// Whole numbers stay integers so unchanged values round-trip exactly
fn number_to_object(value: f64) -> Object {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Object::Integer(value as i64)
    } else {
        Object::Real(value as f32)
    }
}

fn rect_to_object(rect: &PdfRect) -> Object {
    Object::Array(vec![
        number_to_object(rect.llx),
        number_to_object(rect.lly),
        number_to_object(rect.urx),
        number_to_object(rect.ury),
    ])
}
