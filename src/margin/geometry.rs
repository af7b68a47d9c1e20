//! Raster-to-page geometry
//!
//! Rasters put the origin at the top-left with rows growing downward. PDF
//! page space puts it at the bottom-left with y growing upward.

use super::types::ContentRect;
use serde::{Deserialize, Serialize};

/// Crop rectangle in page space, relative to the page's MediaBox origin.
///
/// Signed so that degenerate rectangles can be represented as computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBounds {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl PageBounds {
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Zero or negative extent on either axis
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Area in square points, zero when degenerate
    pub fn area(&self) -> i64 {
        if self.is_degenerate() {
            0
        } else {
            self.width * self.height
        }
    }

    /// `[llx, lly, urx, ury]` after shifting by the MediaBox lower-left corner
    pub fn to_corners(&self, origin_x: f64, origin_y: f64) -> [f64; 4] {
        let llx = origin_x + self.x as f64;
        let lly = origin_y + self.y as f64;
        [llx, lly, llx + self.width as f64, lly + self.height as f64]
    }
}

/// Converts raster rectangles into page-space bounds
pub struct GeometryTranslator;

impl GeometryTranslator {
    /// Map a padded content rectangle onto a page of `raster_height` rows.
    ///
    /// The y offset is anchored at `bottom` while the height spans
    /// `bottom - top`; width spans `right - left`.
    pub fn translate(rect: &ContentRect, raster_height: u32) -> PageBounds {
        let top = i64::from(rect.top);
        let left = i64::from(rect.left);
        let bottom = i64::from(rect.bottom);
        let right = i64::from(rect.right);

        PageBounds {
            x: left,
            y: i64::from(raster_height) - bottom,
            width: right - left,
            height: bottom - top,
        }
    }
}
