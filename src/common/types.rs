//! Common types used throughout rust_behavior_planning

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::common::error::CostError;

/// Identifier reserved for the ego vehicle inside a predictions map
pub const EGO_VEHICLE_ID: i32 = -1;

/// Behavior active at a given timestep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorState {
    /// Constant speed
    ConstantSpeed,
    /// Keep lane
    KeepLane,
    /// Lane change left
    LaneChangeLeft,
    /// Lane change right
    LaneChangeRight,
    /// Prepare lane change left
    PrepareLaneChangeLeft,
    /// Prepare lane change right
    PrepareLaneChangeRight,
}

impl BehaviorState {
    /// Short planner label ("KL", "LCL", ...)
    pub fn label(&self) -> &'static str {
        match self {
            BehaviorState::ConstantSpeed => "CS",
            BehaviorState::KeepLane => "KL",
            BehaviorState::LaneChangeLeft => "LCL",
            BehaviorState::LaneChangeRight => "LCR",
            BehaviorState::PrepareLaneChangeLeft => "PLCL",
            BehaviorState::PrepareLaneChangeRight => "PLCR",
        }
    }
}

impl fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for BehaviorState {
    type Err = CostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CS" => Ok(BehaviorState::ConstantSpeed),
            "KL" => Ok(BehaviorState::KeepLane),
            "LCL" => Ok(BehaviorState::LaneChangeLeft),
            "LCR" => Ok(BehaviorState::LaneChangeRight),
            "PLCL" => Ok(BehaviorState::PrepareLaneChangeLeft),
            "PLCR" => Ok(BehaviorState::PrepareLaneChangeRight),
            other => Err(CostError::InvalidParameter(format!(
                "unknown behavior state '{}'",
                other
            ))),
        }
    }
}

/// Kinematic and behavioral state of a vehicle at one timestep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// Lane index, 0 is the leftmost lane
    pub lane: i32,
    /// Longitudinal position along the route
    pub s: i32,
    pub v: f64,
    pub a: f64,
    pub state: BehaviorState,
}

impl Snapshot {
    pub fn new(lane: i32, s: i32, v: f64, a: f64, state: BehaviorState) -> Self {
        Self { lane, s, v, a, state }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lane {}, s {}, v {:.6}, a {:.6}, state {}",
            self.lane, self.s, self.v, self.a, self.state
        )
    }
}

/// Target the ego vehicle is planning toward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleGoal {
    pub goal_s: i32,
    pub goal_lane: i32,
}

impl VehicleGoal {
    pub fn new(goal_s: i32, goal_lane: i32) -> Self {
        Self { goal_s, goal_lane }
    }
}

/// Predicted `[s, lane]` pair of another vehicle at one timestep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PredictedPosition {
    pub s: i32,
    pub lane: i32,
}

impl PredictedPosition {
    pub fn new(s: i32, lane: i32) -> Self {
        Self { s, lane }
    }
}

impl From<[i32; 2]> for PredictedPosition {
    fn from(pair: [i32; 2]) -> Self {
        Self { s: pair[0], lane: pair[1] }
    }
}

/// Predictions of other vehicles keyed by vehicle id.
///
/// Each sequence is aligned index-for-index with the ego trajectory,
/// index 0 being the vehicle's current position.
pub type Predictions = BTreeMap<i32, Vec<PredictedPosition>>;

/// Predicted positions of a vehicle keeping `lane` at constant integer speed
pub fn constant_speed_predictions(lane: i32, s: i32, v: i32, steps: usize) -> Vec<PredictedPosition> {
    (0..steps as i32)
        .map(|t| PredictedPosition::new(s + v * t, lane))
        .collect()
}
