//! Tracker traits.

use crate::{ProbabilityMap, Result, StopCriteria, Window};
use super::ConvergenceResult;

/// A single-call window tracker.
///
/// Implementations hold configuration only, never per-call state, so one
/// instance can serve any number of independent streams and threads.
pub trait WindowTracker: Send + Sync {
    /// Refine `window` against `map`.
    ///
    /// # Arguments
    /// * `map` - Probability map for the current frame
    /// * `window` - Previous window (or the initial window on the first frame)
    /// * `criteria` - Iteration budget and convergence threshold
    ///
    /// # Errors
    /// Only malformed criteria or windows are errors; degenerate maps are
    /// reported through `ConvergenceResult::converged`.
    fn track(
        &self,
        map: &ProbabilityMap,
        window: &Window,
        criteria: &StopCriteria,
    ) -> Result<ConvergenceResult>;

    /// Short name used for lookup and logging.
    fn name(&self) -> &'static str;
}
