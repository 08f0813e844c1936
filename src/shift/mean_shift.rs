//! Mean-Shift: move a fixed-size window onto the local centroid of mass.

use crate::moments::compute_spatial_moments;
use crate::{ProbabilityMap, Region, Result, StopCriteria, Window};
use super::traits::WindowTracker;
use super::ConvergenceResult;

/// Fixed-size Mean-Shift tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanShift;

impl MeanShift {
    pub fn new() -> Self {
        Self
    }
}

impl WindowTracker for MeanShift {
    fn track(
        &self,
        map: &ProbabilityMap,
        window: &Window,
        criteria: &StopCriteria,
    ) -> Result<ConvergenceResult> {
        mean_shift(map, window, criteria)
    }

    fn name(&self) -> &'static str {
        "meanshift"
    }
}

/// Re-center `window` on the mass centroid until it stops moving.
///
/// Each iteration clips the window to the map, takes the centroid of the
/// clipped region and moves the window so its center sits on that centroid.
/// The window size never changes. The loop stops as soon as a step moves the
/// top-left corner by less than `criteria.epsilon` (converged), or after
/// `criteria.max_iterations` steps (not converged, last window returned).
///
/// When the window holds (numerically) no mass, the centroid of the whole map
/// is used instead. If the whole map is empty too, the current window is
/// returned unchanged with `converged = false`.
///
/// # Errors
/// `InvalidCriteria` / `InvalidWindow` for malformed inputs, checked before
/// the first iteration.
pub fn mean_shift(
    map: &ProbabilityMap,
    window: &Window,
    criteria: &StopCriteria,
) -> Result<ConvergenceResult> {
    criteria.validate()?;
    window.validate()?;

    let (height, width) = (map.height(), map.width());
    let half_w = 0.5 * f64::from(window.width);
    let half_h = 0.5 * f64::from(window.height);
    let mut current = *window;

    for iteration in 1..=criteria.max_iterations {
        let region = current.clip(height, width);
        let local = compute_spatial_moments(map, &region);

        // Centroid in map coordinates
        let (cx, cy) = match local.centroid() {
            Some((lx, ly)) => (lx + region.x0 as f64, ly + region.y0 as f64),
            None => {
                let global = compute_spatial_moments(map, &Region::full(height, width));
                match global.centroid() {
                    Some(c) => {
                        log::debug!(
                            "mean_shift: empty window {:?}, using map centroid ({:.2}, {:.2})",
                            current,
                            c.0,
                            c.1
                        );
                        c
                    }
                    None => {
                        log::debug!(
                            "mean_shift: probability map is empty, keeping window {:?}",
                            current
                        );
                        return Ok(ConvergenceResult::new(false, current, iteration - 1));
                    }
                }
            }
        };

        let next = current.moved_to(
            round_to_pixel(cx - half_w),
            round_to_pixel(cy - half_h),
        );
        let shift = current.corner_distance(&next);

        log::trace!(
            "mean_shift: iteration {} centroid=({:.3}, {:.3}) window={:?} shift={:.3}",
            iteration, cx, cy, next, shift
        );

        current = next;
        if shift < criteria.epsilon {
            return Ok(ConvergenceResult::new(true, current, iteration));
        }
    }

    log::debug!(
        "mean_shift: no convergence after {} iterations, window {:?}",
        criteria.max_iterations, current
    );
    Ok(ConvergenceResult::new(false, current, criteria.max_iterations))
}

/// Round half to even, saturating at the `i32` range.
#[inline]
fn round_to_pixel(v: f64) -> i32 {
    // `as` saturates for out-of-range floats
    v.round_ties_even() as i32
}
