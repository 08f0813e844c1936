//! Enum-based tracker dispatch for static (non-virtual) function calls.
//!
//! `TrackerKind` wraps all built-in trackers so sessions can hold one by value
//! without a `Box<dyn WindowTracker>`.

use crate::{Error, ProbabilityMap, Result, StopCriteria, Window};
use super::cam_shift::{CamShift, CamShiftConfig};
use super::mean_shift::MeanShift;
use super::traits::WindowTracker;
use super::ConvergenceResult;

/// Built-in tracker selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackerKind {
    MeanShift(MeanShift),
    CamShift(CamShift),
}

impl TrackerKind {
    /// Mean-Shift tracker.
    pub fn mean_shift() -> Self {
        TrackerKind::MeanShift(MeanShift::new())
    }

    /// CAMShift tracker with default tuning.
    pub fn cam_shift() -> Self {
        TrackerKind::CamShift(CamShift::new())
    }

    /// CAMShift tracker with custom tuning.
    pub fn cam_shift_with_config(config: CamShiftConfig) -> Result<Self> {
        Ok(TrackerKind::CamShift(CamShift::with_config(config)?))
    }

    #[inline(always)]
    pub fn track(
        &self,
        map: &ProbabilityMap,
        window: &Window,
        criteria: &StopCriteria,
    ) -> Result<ConvergenceResult> {
        match self {
            TrackerKind::MeanShift(t) => t.track(map, window, criteria),
            TrackerKind::CamShift(t) => t.track(map, window, criteria),
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &'static str {
        match self {
            TrackerKind::MeanShift(t) => t.name(),
            TrackerKind::CamShift(t) => t.name(),
        }
    }
}

impl Default for TrackerKind {
    fn default() -> Self {
        TrackerKind::cam_shift()
    }
}

// Implement the WindowTracker trait so TrackerKind works wherever a trait object does
impl WindowTracker for TrackerKind {
    #[inline(always)]
    fn track(
        &self,
        map: &ProbabilityMap,
        window: &Window,
        criteria: &StopCriteria,
    ) -> Result<ConvergenceResult> {
        TrackerKind::track(self, map, window, criteria)
    }

    #[inline(always)]
    fn name(&self) -> &'static str {
        TrackerKind::name(self)
    }
}

/// Get a tracker by name.
///
/// Supported names:
/// - "meanshift", "mean_shift" - fixed-size Mean-Shift
/// - "camshift", "cam_shift" - CAMShift with default tuning
pub fn tracker_by_name(name: &str) -> Result<TrackerKind> {
    match name.to_ascii_lowercase().as_str() {
        "meanshift" | "mean_shift" => Ok(TrackerKind::mean_shift()),
        "camshift" | "cam_shift" => Ok(TrackerKind::cam_shift()),
        _ => Err(Error::UnknownTracker(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_by_name() {
        assert_eq!(tracker_by_name("meanshift").unwrap().name(), "meanshift");
        assert_eq!(tracker_by_name("mean_shift").unwrap().name(), "meanshift");
        assert_eq!(tracker_by_name("CamShift").unwrap().name(), "camshift");
        assert_eq!(tracker_by_name("cam_shift").unwrap().name(), "camshift");
    }

    #[test]
    fn test_unknown_tracker() {
        match tracker_by_name("kcf") {
            Err(Error::UnknownTracker(name)) => assert_eq!(name, "kcf"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_matches_direct_call() {
        let map = ProbabilityMap::from_fn(30, 30, |x, y| {
            if (12..18).contains(&x) && (10..14).contains(&y) {
                1.0
            } else {
                0.0
            }
        });
        let window = Window::new(8, 6, 10, 10).unwrap();
        let criteria = StopCriteria::new(20, 0.5).unwrap();

        let via_enum = TrackerKind::mean_shift().track(&map, &window, &criteria).unwrap();
        let direct = crate::mean_shift(&map, &window, &criteria).unwrap();
        assert_eq!(via_enum, direct);

        let via_enum = TrackerKind::cam_shift().track(&map, &window, &criteria).unwrap();
        let direct = crate::cam_shift(&map, &window, &criteria).unwrap();
        assert_eq!(via_enum, direct);
    }

    #[test]
    fn test_boxed_trait_object() {
        let trackers: Vec<Box<dyn WindowTracker>> = vec![
            Box::new(MeanShift::new()),
            Box::new(CamShift::new()),
            Box::new(TrackerKind::default()),
        ];
        let names: Vec<_> = trackers.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["meanshift", "camshift", "camshift"]);
    }
}
