//! Tracking window and clipped map regions.

use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Axis-aligned tracking window.
///
/// `(x, y)` is the top-left corner in map coordinates and may be negative or
/// lie outside the map; it is clipped to the map before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    /// Left edge (column of the first pixel).
    pub x: i32,
    /// Top edge (row of the first pixel).
    pub y: i32,
    /// Width in pixels, always positive.
    pub width: i32,
    /// Height in pixels, always positive.
    pub height: i32,
}

impl Window {
    /// Create a window, rejecting non-positive sizes.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Result<Self> {
        let window = Self { x, y, width, height };
        window.validate()?;
        Ok(window)
    }

    /// Check that width and height are positive.
    ///
    /// Fields are public, so engines re-check windows built by struct literal.
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(Error::InvalidWindow(format!(
                "width and height must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Window center in map coordinates.
    ///
    /// Uses the same convention as re-centering: a window whose center equals
    /// a centroid `(cx, cy)` has top-left `(cx - w/2, cy - h/2)`.
    pub fn center(&self) -> (f64, f64) {
        (
            f64::from(self.x) + 0.5 * f64::from(self.width),
            f64::from(self.y) + 0.5 * f64::from(self.height),
        )
    }

    /// Grow the window by `margin` pixels on every side.
    pub fn expand(&self, margin: i32) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2 * margin,
            height: self.height + 2 * margin,
        }
    }

    /// Same size, different top-left corner.
    pub fn moved_to(&self, x: i32, y: i32) -> Self {
        Self { x, y, ..*self }
    }

    /// Euclidean distance between the top-left corners of two windows.
    pub fn corner_distance(&self, other: &Window) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }

    /// Clip the window against a `height x width` map.
    ///
    /// The result may be empty when the window lies completely outside.
    pub fn clip(&self, map_height: usize, map_width: usize) -> Region {
        let (x0, x1) = clip_span(self.x, self.width, map_width);
        let (y0, y1) = clip_span(self.y, self.height, map_height);
        Region { x0, y0, x1, y1 }
    }

    /// `(x, y, width, height)` tuple.
    pub fn as_tuple(&self) -> (i32, i32, i32, i32) {
        (self.x, self.y, self.width, self.height)
    }
}

impl TryFrom<(i32, i32, i32, i32)> for Window {
    type Error = Error;

    fn try_from((x, y, width, height): (i32, i32, i32, i32)) -> Result<Self> {
        Self::new(x, y, width, height)
    }
}

/// Clip the half-open span `[start, start + len)` to `[0, limit)`.
fn clip_span(start: i32, len: i32, limit: usize) -> (usize, usize) {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let lo = i64::from(start).clamp(0, limit);
    let hi = (i64::from(start) + i64::from(len)).clamp(lo, limit);
    // both bounds lie in [0, limit] and limit came from a usize
    (lo as usize, hi as usize)
}

/// Half-open pixel rectangle `[x0, x1) x [y0, y1)` inside a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Region {
    /// The whole `height x width` map.
    pub fn full(map_height: usize, map_width: usize) -> Self {
        Self {
            x0: 0,
            y0: 0,
            x1: map_width,
            y1: map_height,
        }
    }

    /// Restrict this region to a `height x width` map.
    pub fn clamp_to(&self, map_height: usize, map_width: usize) -> Self {
        let x1 = self.x1.min(map_width);
        let y1 = self.y1.min(map_height);
        Self {
            x0: self.x0.min(x1),
            y0: self.y0.min(y1),
            x1,
            y1,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0)
    }

    /// True when the region covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}
