//! Behavior Planning Cost Module
//!
//! This module scores candidate trajectories of an ego vehicle driving
//! among other tracked vehicles. A behavior planner generates one trajectory
//! per candidate behavior (keep lane, change lane, ...) and keeps the one
//! with the lowest cost.
//!
//! # Components
//!
//! - `prediction_filter`: Selects the vehicles starting in a given lane
//! - `collision`: Longitudinal collision rule between two timesteps
//! - `trajectory_data`: Feature summary of a trajectory over the planning horizon
//! - `cost_functions`: Individual, unweighted cost terms
//! - `cost_calculator`: Weight registry and total cost
//!
//! # Example
//!
//! ```
//! use rust_behavior_planning::behavior_planning::CostCalculator;
//! use rust_behavior_planning::common::{
//!     constant_speed_predictions, BehaviorState, Predictions, Snapshot, VehicleGoal,
//! };
//!
//! let calculator = CostCalculator::with_defaults();
//! let goal = VehicleGoal::new(300, 0);
//!
//! let mut predictions = Predictions::new();
//! predictions.insert(0, constant_speed_predictions(1, 40, 8, 3));
//!
//! let trajectory: Vec<Snapshot> = (0..3)
//!     .map(|t| Snapshot::new(1, 10 * t, 10.0, 0.0, BehaviorState::KeepLane))
//!     .collect();
//!
//! let cost = calculator.calculate_cost(&goal, &predictions, &trajectory).unwrap();
//! assert!(cost >= 0.0);
//! ```

pub mod prediction_filter;
pub mod collision;
pub mod trajectory_data;
pub mod cost_functions;
pub mod cost_calculator;

// Re-exports
pub use prediction_filter::filter_predictions_by_lane;
pub use collision::check_collision;
pub use trajectory_data::{
    calculate_helper_data, validate_trajectory, TrajectoryData, CLOSEST_APPROACH_SENTINEL,
};
pub use cost_functions::{
    buffer_cost, change_lane_cost, collision_cost, comfort_cost, distance_from_goal_lane_cost,
    inefficiency_cost, logistic, CostFunction,
};
pub use cost_calculator::{
    CostBreakdown, CostCalculator, CostCategory, CostConfig, CostTerm, CostWeights,
    RegisteredCost, COST_FUNCTIONS,
};
