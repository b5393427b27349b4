//! Common traits defining interfaces for behavior planning

use crate::common::error::CostResult;
use crate::common::types::*;

/// Trait for trajectory scoring algorithms
///
/// Lower scores are preferred by the candidate selection logic.
pub trait TrajectoryScorer {
    /// Score one candidate trajectory against the predictions of other vehicles
    fn score(
        &self,
        goal: &VehicleGoal,
        predictions: &Predictions,
        trajectory: &[Snapshot],
    ) -> CostResult<f64>;
}
