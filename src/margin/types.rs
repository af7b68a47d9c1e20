//! Margin module core types
//!
//! Contains the padding value object and the raster-space content rectangle.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================
// Error Types
// ============================================================

/// Margin detection error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarginError {
    #[error("Raster has no pixels to scan ({width}x{height})")]
    EmptyRaster { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, MarginError>;

// ============================================================
// Margins
// ============================================================

/// Extra padding added back around the detected content, per side.
///
/// Units are raster pixels, which equal page-space points because pages are
/// rendered at a 1:1 scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

impl Margins {
    /// No extra padding
    pub const ZERO: Margins = Margins {
        top: 0,
        left: 0,
        bottom: 0,
        right: 0,
    };

    pub const fn new(top: u32, left: u32, bottom: u32, right: u32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same padding on all four sides
    pub const fn uniform(value: u32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Build from a list ordered top, left, bottom, right.
    ///
    /// Missing trailing values are zero; values past the fourth are ignored.
    pub fn from_values(values: &[u32]) -> Self {
        let at = |i: usize| values.get(i).copied().unwrap_or(0);
        Self::new(at(0), at(1), at(2), at(3))
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

// ============================================================
// Content Rectangle
// ============================================================

/// Axis-aligned rectangle in raster coordinates (origin top-left, rows grow
/// downward). All four edges are inclusive pixel indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRect {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

impl ContentRect {
    pub const fn new(top: u32, left: u32, bottom: u32, right: u32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The rectangle covering a whole `width` x `height` raster.
    ///
    /// Returns `None` when the raster has no pixels.
    pub fn full(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self::new(0, 0, height - 1, width - 1))
    }
}
