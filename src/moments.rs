//! Image moments over a rectangular region of a probability map.
//!
//! Coordinates are local to the region: the pixel at `(region.x0, region.y0)`
//! has local coordinates `(0, 0)`. Callers translate centroids back to map
//! coordinates themselves.

use serde::{Deserialize, Serialize};
use crate::{ProbabilityMap, Region};

/// Total mass below which a region is treated as empty.
pub const DEGENERACY_THRESHOLD: f64 = 1e-7;

/// Raw zeroth/first-order and central second-order moments of a region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    /// Total mass.
    pub m00: f64,
    /// Mass-weighted sum of local x.
    pub m10: f64,
    /// Mass-weighted sum of local y.
    pub m01: f64,
    /// Central moment sum(w * (x - cx)^2).
    pub mu20: f64,
    /// Central moment sum(w * (x - cx) * (y - cy)).
    pub mu11: f64,
    /// Central moment sum(w * (y - cy)^2).
    pub mu02: f64,
}

impl Moments {
    /// True when the mass is too small to divide by.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.m00 < DEGENERACY_THRESHOLD
    }

    /// Local centroid `(m10 / m00, m01 / m00)`, or `None` for a degenerate region.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.is_degenerate() {
            return None;
        }
        Some((self.m10 / self.m00, self.m01 / self.m00))
    }
}

/// Zeroth and first-order moments only; central moments are left at zero.
///
/// This is all Mean-Shift needs per iteration.
pub fn compute_spatial_moments(map: &ProbabilityMap, region: &Region) -> Moments {
    let region = region.clamp_to(map.height(), map.width());
    let mut moments = Moments::default();

    for y in region.y0..region.y1 {
        let ly = (y - region.y0) as f64;
        for x in region.x0..region.x1 {
            let w = map.at(x, y);
            if w == 0.0 {
                continue;
            }
            let lx = (x - region.x0) as f64;
            moments.m00 += w;
            moments.m10 += w * lx;
            moments.m01 += w * ly;
        }
    }

    moments
}

/// All moments of `region`, including central second-order moments.
///
/// The region is clamped to the map again, so out-of-range bounds never index
/// past the map. An empty region yields all-zero moments; a degenerate region
/// yields its raw moments with zero central moments.
pub fn compute_moments(map: &ProbabilityMap, region: &Region) -> Moments {
    let region = region.clamp_to(map.height(), map.width());
    let mut moments = compute_spatial_moments(map, &region);

    let Some((cx, cy)) = moments.centroid() else {
        return moments;
    };

    for y in region.y0..region.y1 {
        let dy = (y - region.y0) as f64 - cy;
        for x in region.x0..region.x1 {
            let w = map.at(x, y);
            if w == 0.0 {
                continue;
            }
            let dx = (x - region.x0) as f64 - cx;
            moments.mu20 += w * dx * dx;
            moments.mu11 += w * dx * dy;
            moments.mu02 += w * dy * dy;
        }
    }

    moments
}
