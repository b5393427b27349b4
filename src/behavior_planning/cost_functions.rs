//! Cost functions for behavior planning
//!
//! Every function shares the [`CostFunction`] signature and returns an
//! unweighted sub-cost. Weighting and summation happen in
//! [`super::cost_calculator`].

use crate::common::{Predictions, Snapshot, VehicleGoal};

use super::cost_calculator::CostConfig;
use super::trajectory_data::TrajectoryData;

/// Signature shared by all cost functions
pub type CostFunction =
    fn(&VehicleGoal, &Predictions, &[Snapshot], &TrajectoryData, &CostConfig) -> f64;

/// Squash a non-negative value into [0, 1)
pub fn logistic(x: f64) -> f64 {
    2.0 / (1.0 + (-x).exp()) - 1.0
}

/// 1 if any collision was detected within the planning horizon
pub fn collision_cost(
    _goal: &VehicleGoal,
    _predictions: &Predictions,
    _trajectory: &[Snapshot],
    data: &TrajectoryData,
    _config: &CostConfig,
) -> f64 {
    if data.collision_detected {
        1.0
    } else {
        0.0
    }
}

/// Penalty for getting closer to another vehicle than the buffer distance.
///
/// The buffer distance is `buffer_time` timesteps of travel at the
/// trajectory's average speed.
pub fn buffer_cost(
    _goal: &VehicleGoal,
    _predictions: &Predictions,
    _trajectory: &[Snapshot],
    data: &TrajectoryData,
    config: &CostConfig,
) -> f64 {
    let closest = data.closest_approach as f64;
    if closest <= 0.0 {
        return 1.0;
    }

    let buffer_distance = config.buffer_time * data.avg_speed;
    if closest >= buffer_distance {
        return 0.0;
    }

    1.0 - (closest / buffer_distance).powi(2)
}

/// Penalty for ending far from the goal lane with little time left to reach it.
///
/// A trajectory that ends outside the goal lane at or past the goal, or that
/// makes no forward progress, can no longer close the gap and costs 1.
pub fn distance_from_goal_lane_cost(
    _goal: &VehicleGoal,
    _predictions: &Predictions,
    _trajectory: &[Snapshot],
    data: &TrajectoryData,
    _config: &CostConfig,
) -> f64 {
    if data.end_lanes_from_goal == 0 {
        return 0.0;
    }
    if data.end_distance_to_goal <= 0 || data.avg_speed <= 0.0 {
        return 1.0;
    }

    let time_to_goal = data.end_distance_to_goal as f64 / data.avg_speed;
    let multiplier = 5.0 * data.end_lanes_from_goal as f64 / time_to_goal;
    logistic(multiplier)
}

/// Penalty for harsh and sustained accelerations
pub fn comfort_cost(
    _goal: &VehicleGoal,
    _predictions: &Predictions,
    _trajectory: &[Snapshot],
    data: &TrajectoryData,
    config: &CostConfig,
) -> f64 {
    let peak = data.max_acceleration.abs() / config.max_acceleration;
    let sustained = data.mean_squared_acceleration / config.max_acceleration.powi(2);
    0.5 * logistic(peak) + 0.5 * logistic(sustained)
}

/// 1 if the proposed lane moves the vehicle away from its goal lane.
///
/// An empty trajectory has no current lane and costs 0.
pub fn change_lane_cost(
    goal: &VehicleGoal,
    _predictions: &Predictions,
    trajectory: &[Snapshot],
    data: &TrajectoryData,
    _config: &CostConfig,
) -> f64 {
    let current_lane = match trajectory.first() {
        Some(snapshot) => snapshot.lane,
        None => return 0.0,
    };
    let lanes_from_goal = |lane: i32| (i64::from(goal.goal_lane) - i64::from(lane)).abs();
    let current_lanes_from_goal = lanes_from_goal(current_lane);
    let proposed_lanes_from_goal = lanes_from_goal(data.proposed_lane);
    if proposed_lanes_from_goal > current_lanes_from_goal {
        1.0
    } else {
        0.0
    }
}

/// Penalty for an average speed below the target speed
pub fn inefficiency_cost(
    _goal: &VehicleGoal,
    _predictions: &Predictions,
    _trajectory: &[Snapshot],
    data: &TrajectoryData,
    config: &CostConfig,
) -> f64 {
    let diff = config.target_speed - data.avg_speed;
    if diff <= 0.0 {
        return 0.0;
    }
    (diff / config.target_speed).powi(2).min(1.0)
}
