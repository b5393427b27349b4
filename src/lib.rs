//! RustBehaviorPlanning - trajectory cost evaluation for behavior planning
//!
//! This crate scores candidate short-horizon trajectories of an autonomous
//! vehicle against the predicted motion of the surrounding traffic, so that
//! a behavior planner can pick the safest, most comfortable and most
//! productive one.

// Core modules
pub mod common;
pub mod utils;

// Algorithm modules
pub mod behavior_planning;

// Re-export common types for convenience
pub use common::{BehaviorState, Snapshot, VehicleGoal, PredictedPosition, Predictions, EGO_VEHICLE_ID};
pub use common::TrajectoryScorer;
pub use common::{CostError, CostResult};
pub use behavior_planning::{CostCalculator, CostConfig, TrajectoryData};
