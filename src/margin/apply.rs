//! Margin Application
//!
//! Pads a detected content rectangle outward, clamped to the raster.

use super::types::{ContentRect, Margins};

/// Applies configured margins to a detected content rectangle
pub struct MarginApplicator;

impl MarginApplicator {
    /// Expand `rect` by `margins`, never past the edges of a
    /// `width` x `height` raster.
    ///
    /// Each side is handled independently and only when its margin is
    /// non-zero. Degenerate input passes through with the same per-side rule.
    pub fn apply(rect: ContentRect, margins: &Margins, width: u32, height: u32) -> ContentRect {
        let mut padded = rect;

        if margins.top > 0 {
            padded.top = rect.top.saturating_sub(margins.top);
        }
        if margins.left > 0 {
            padded.left = rect.left.saturating_sub(margins.left);
        }
        if margins.bottom > 0 {
            padded.bottom = rect
                .bottom
                .saturating_add(margins.bottom)
                .min(height.saturating_sub(1));
        }
        if margins.right > 0 {
            padded.right = rect
                .right
                .saturating_add(margins.right)
                .min(width.saturating_sub(1));
        }

        padded
    }
}
