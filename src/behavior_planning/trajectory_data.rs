//! Trajectory feature extraction
//!
//! Walks the planning horizon of one candidate trajectory once and
//! summarizes what the cost functions need to know about it: progress,
//! acceleration statistics, clearance to other vehicles and collisions.

use log::{debug, trace};
use ordered_float::OrderedFloat;

use crate::common::{CostError, CostResult, Predictions, Snapshot, VehicleGoal, EGO_VEHICLE_ID};

use super::collision::check_collision;
use super::prediction_filter::filter_predictions_by_lane;

/// Initial value of `closest_approach` before any vehicle is seen
pub const CLOSEST_APPROACH_SENTINEL: i64 = 999_999;

/// Summary of a candidate trajectory shared by all cost functions
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryData {
    /// Lane of the first predicted snapshot
    pub proposed_lane: i32,
    /// Net displacement divided by the number of snapshots
    pub avg_speed: f64,
    /// Horizon acceleration with the greatest magnitude, sign preserved
    pub max_acceleration: f64,
    pub mean_squared_acceleration: f64,
    /// Minimum longitudinal distance to any tracked vehicle over the horizon
    pub closest_approach: i64,
    /// `goal_s` minus the position of the last snapshot
    pub end_distance_to_goal: i64,
    /// Lanes between the last snapshot and the goal lane
    pub end_lanes_from_goal: i64,
    pub collision_detected: bool,
    /// Last timestep at which a collision was detected
    pub collision_timestep: Option<usize>,
}

/// Check the scorer's preconditions on a trajectory.
///
/// The trajectory needs the current snapshot plus `horizon` predicted ones,
/// all with finite velocity and acceleration.
pub fn validate_trajectory(trajectory: &[Snapshot], horizon: usize) -> CostResult<()> {
    if horizon == 0 {
        return Err(CostError::InvalidParameter(
            "planning horizon must be at least 1".to_string(),
        ));
    }

    if trajectory.len() < horizon + 1 {
        return Err(CostError::InvalidTrajectory(format!(
            "need at least {} snapshots for a horizon of {}, got {}",
            horizon + 1,
            horizon,
            trajectory.len()
        )));
    }

    if let Some((index, snapshot)) = trajectory
        .iter()
        .enumerate()
        .find(|(_, snapshot)| !snapshot.v.is_finite() || !snapshot.a.is_finite())
    {
        return Err(CostError::InvalidTrajectory(format!(
            "snapshot {} has non-finite kinematics ({})",
            index, snapshot
        )));
    }

    Ok(())
}

/// Calculate the helper data of `trajectory` for the cost functions.
///
/// `trajectory[0]` is the current state of the vehicle; predicted states start
/// at `trajectory[1]`. Steps `1..=horizon` are scanned against every tracked
/// vehicle in `all_predictions`, regardless of the lane it starts in.
pub fn calculate_helper_data(
    goal: &VehicleGoal,
    all_predictions: &Predictions,
    trajectory: &[Snapshot],
    horizon: usize,
) -> CostResult<TrajectoryData> {
    validate_trajectory(trajectory, horizon)?;

    let current_snapshot = &trajectory[0];
    let first_snapshot = &trajectory[1];
    let last_snapshot = &trajectory[trajectory.len() - 1];

    let proposed_lane = first_snapshot.lane;

    // Divides by the number of snapshots, not by the horizon
    let avg_speed =
        (f64::from(last_snapshot.s) - f64::from(current_snapshot.s)) / trajectory.len() as f64;

    // i64 holds the difference of any two i32 positions
    let end_distance_to_goal = i64::from(goal.goal_s) - i64::from(last_snapshot.s);
    let end_lanes_from_goal = (i64::from(goal.goal_lane) - i64::from(last_snapshot.lane)).abs();

    let filtered_predictions = filter_predictions_by_lane(all_predictions, proposed_lane);
    debug!(
        "{} of {} tracked vehicles start in proposed lane {}",
        filtered_predictions.len(),
        all_predictions.len(),
        proposed_lane
    );

    let mut collision_detected = false;
    let mut collision_timestep = None;
    let mut closest_approach = CLOSEST_APPROACH_SENTINEL;
    let mut accelerations = Vec::with_capacity(horizon);

    for step in 1..=horizon {
        let snapshot = &trajectory[step];
        accelerations.push(snapshot.a);

        for (&vehicle_id, vehicle_predictions) in all_predictions {
            if vehicle_id == EGO_VEHICLE_ID {
                continue;
            }

            let missing = || CostError::MissingPrediction { vehicle_id, timestep: step };
            let prediction_now = vehicle_predictions.get(step).ok_or_else(missing)?;
            let prediction_previous = vehicle_predictions.get(step - 1).ok_or_else(missing)?;

            if check_collision(snapshot, prediction_now.s, prediction_previous.s) {
                trace!(
                    "collision with vehicle {} at timestep {} (ego s {}, other s {} -> {})",
                    vehicle_id,
                    step,
                    snapshot.s,
                    prediction_previous.s,
                    prediction_now.s
                );
                collision_detected = true;
                collision_timestep = Some(step);
            }

            let distance = (i64::from(prediction_now.s) - i64::from(snapshot.s)).abs();
            if distance < closest_approach {
                closest_approach = distance;
            }
        }
    }

    // Iterate in reverse so that the earliest of equal magnitudes wins
    let max_acceleration = accelerations
        .iter()
        .rev()
        .copied()
        .max_by_key(|a| OrderedFloat(a.abs()))
        .unwrap_or(0.0);

    let mean_squared_acceleration =
        accelerations.iter().map(|a| a.powi(2)).sum::<f64>() / accelerations.len() as f64;

    Ok(TrajectoryData {
        proposed_lane,
        avg_speed,
        max_acceleration,
        mean_squared_acceleration,
        closest_approach,
        end_distance_to_goal,
        end_lanes_from_goal,
        collision_detected,
        collision_timestep,
    })
}
