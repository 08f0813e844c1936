//! Equivalent ellipse of a mass distribution, from its second-order moments.

use std::f64::consts::FRAC_PI_2;
use serde::{Deserialize, Serialize};
use crate::Moments;

/// Ellipse with the same second-order moments as a region's mass.
///
/// `theta` is the angle of the major axis from the +x axis, in radians, in
/// map coordinates (y grows downwards, so positive angles lean towards +y).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipseFit {
    pub theta: f64,
    /// Full length of the major axis, `4 * sqrt(I_max / m00)`.
    pub major_axis: f64,
    /// Full length of the minor axis, `4 * sqrt(I_min / m00)`.
    pub minor_axis: f64,
}

impl EllipseFit {
    /// Fit the ellipse, or `None` if the moments are degenerate.
    pub fn from_moments(m: &Moments) -> Option<Self> {
        if m.is_degenerate() {
            return None;
        }

        let (mu20, mu11, mu02) = (m.mu20, m.mu11, m.mu02);
        let diff = mu20 - mu02;
        let mut theta = (2.0 * mu11).atan2(diff + (4.0 * mu11 * mu11 + diff * diff).sqrt());
        let (mut sin_t, mut cos_t) = theta.sin_cos();

        let cross = 2.0 * mu11 * cos_t * sin_t;
        let i_max = mu20 * cos_t * cos_t + cross + mu02 * sin_t * sin_t;
        let i_min = mu20 * sin_t * sin_t + cross + mu02 * cos_t * cos_t;

        // rounding can push a vanishing inertia slightly negative
        let mut a = 4.0 * (i_max.max(0.0) / m.m00).sqrt();
        let mut b = 4.0 * (i_min.max(0.0) / m.m00).sqrt();

        // keep `a` as the major axis: theta -> pi/2 - theta
        if a < b {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut cos_t, &mut sin_t);
            theta = FRAC_PI_2 - theta;
        }
        debug_assert!((theta.cos() - cos_t).abs() < 1e-9);

        Some(Self {
            theta,
            major_axis: a,
            minor_axis: b,
        })
    }

    /// Width and height of the axis-aligned box `max(a cos, b sin) x max(a sin, b cos)`.
    ///
    /// Signed `sin`/`cos` of `theta` are used, so the box depends on which way
    /// the ellipse leans. `theta` lies in `(-pi/2, pi)`, which keeps one term of
    /// each `max` non-negative.
    pub fn axis_aligned_extent(&self) -> (f64, f64) {
        let (sin_t, cos_t) = self.theta.sin_cos();
        let (a, b) = (self.major_axis, self.minor_axis);
        ((a * cos_t).max(b * sin_t), (a * sin_t).max(b * cos_t))
    }
}
