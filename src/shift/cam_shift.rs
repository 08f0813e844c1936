//! CAMShift: Mean-Shift followed by a size/orientation refit.

use serde::{Deserialize, Serialize};
use crate::moments::compute_moments;
use crate::{Error, ProbabilityMap, Result, StopCriteria, Window};
use super::ellipse::EllipseFit;
use super::mean_shift::mean_shift;
use super::traits::WindowTracker;
use super::ConvergenceResult;

/// Tuning for the CAMShift resize step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CamShiftConfig {
    /// Pixels added on every side of the converged window before refitting.
    pub margin: i32,

    /// Smallest width/height a resized window may have.
    pub min_side_length: i32,

    /// Scale applied to the ellipse's bounding box (1.2 = enlarge by 20%).
    pub box_scale: f64,
}

impl CamShiftConfig {
    /// Create a validated configuration.
    pub fn new(margin: i32, min_side_length: i32, box_scale: f64) -> Result<Self> {
        let config = Self { margin, min_side_length, box_scale };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.margin < 0 {
            return Err(Error::InvalidConfig(format!(
                "margin must be non-negative, got {}",
                self.margin
            )));
        }

        if self.min_side_length < 1 {
            return Err(Error::InvalidConfig(format!(
                "min_side_length must be at least 1, got {}",
                self.min_side_length
            )));
        }

        if !self.box_scale.is_finite() || self.box_scale <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "box_scale must be finite and positive, got {}",
                self.box_scale
            )));
        }

        Ok(())
    }
}

impl Default for CamShiftConfig {
    fn default() -> Self {
        Self {
            margin: 5,
            min_side_length: 10,
            box_scale: 1.2,
        }
    }
}

/// Adaptive-size CAMShift tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CamShift {
    config: CamShiftConfig,
}

impl CamShift {
    /// CAMShift with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// CAMShift with custom tuning.
    pub fn with_config(config: CamShiftConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CamShiftConfig {
        &self.config
    }
}

impl WindowTracker for CamShift {
    fn track(
        &self,
        map: &ProbabilityMap,
        window: &Window,
        criteria: &StopCriteria,
    ) -> Result<ConvergenceResult> {
        cam_shift_with_config(map, window, criteria, &self.config)
    }

    fn name(&self) -> &'static str {
        "camshift"
    }
}

/// CAMShift with the default configuration (margin 5, min side 10, +20%).
pub fn cam_shift(
    map: &ProbabilityMap,
    window: &Window,
    criteria: &StopCriteria,
) -> Result<ConvergenceResult> {
    cam_shift_with_config(map, window, criteria, &CamShiftConfig::default())
}

/// Run Mean-Shift, then refit the window size from the converged region.
///
/// The converged window is grown by `config.margin` on each side, and the
/// second-order moments of that region give an equivalent ellipse. Its
/// axis-aligned box, scaled by `config.box_scale`, rounded and clamped to
/// `config.min_side_length`, becomes the new size. The new top-left corner is
/// the grown window's corner.
///
/// Without convergence, or when the grown region holds no mass, the
/// Mean-Shift result is returned as is.
pub fn cam_shift_with_config(
    map: &ProbabilityMap,
    window: &Window,
    criteria: &StopCriteria,
    config: &CamShiftConfig,
) -> Result<ConvergenceResult> {
    config.validate()?;

    let result = mean_shift(map, window, criteria)?;
    if !result.converged {
        return Ok(result);
    }

    let grown = result.window.expand(config.margin);
    let region = grown.clip(map.height(), map.width());
    let moments = compute_moments(map, &region);

    let Some(ellipse) = EllipseFit::from_moments(&moments) else {
        log::debug!("cam_shift: grown window {:?} holds no mass, keeping mean-shift size", grown);
        return Ok(result);
    };

    let (w, h) = ellipse.axis_aligned_extent();
    let width = scale_side(w, config);
    let height = scale_side(h, config);
    let resized = Window {
        x: grown.x,
        y: grown.y,
        width,
        height,
    };

    log::debug!(
        "cam_shift: theta={:.3} axes=({:.2}, {:.2}) window {:?} -> {:?}",
        ellipse.theta, ellipse.major_axis, ellipse.minor_axis, result.window, resized
    );

    Ok(ConvergenceResult {
        converged: true,
        window: resized,
        iterations: result.iterations,
        ellipse: Some(ellipse),
    })
}

/// Scale, round and clamp one side of the fitted box.
fn scale_side(extent: f64, config: &CamShiftConfig) -> i32 {
    let side = (config.box_scale * extent).round_ties_even();
    // `as` saturates; NaN maps to 0 and is then clamped
    (side as i32).max(config.min_side_length)
}
