//! Weighted trajectory cost
//!
//! Combines the cost functions of [`super::cost_functions`] into the single
//! scalar that a behavior planner minimizes when choosing between candidate
//! trajectories. Every registered function is evaluated on every call.

use std::fmt;

use itertools::Itertools;
use log::debug;

use crate::common::{
    CostError, CostResult, Predictions, Snapshot, TrajectoryScorer, VehicleGoal,
};

use super::cost_functions::{
    buffer_cost, change_lane_cost, collision_cost, comfort_cost, distance_from_goal_lane_cost,
    inefficiency_cost, CostFunction,
};
use super::trajectory_data::{calculate_helper_data, TrajectoryData};

/// Category deciding which weight applies to a cost function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostCategory {
    Collision,
    Danger,
    ReachGoal,
    Comfort,
    Efficiency,
}

/// Weights for each category of cost functions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostWeights {
    pub collision: f64,
    pub danger: f64,
    pub reach_goal: f64,
    pub comfort: f64,
    pub efficiency: f64,
}

impl CostWeights {
    pub fn weight(&self, category: CostCategory) -> f64 {
        match category {
            CostCategory::Collision => self.collision,
            CostCategory::Danger => self.danger,
            CostCategory::ReachGoal => self.reach_goal,
            CostCategory::Comfort => self.comfort,
            CostCategory::Efficiency => self.efficiency,
        }
    }
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            collision: 1e6,
            danger: 1e5,
            reach_goal: 1e5,
            comfort: 1e4,
            efficiency: 1e2,
        }
    }
}

/// Configuration for trajectory cost calculation
#[derive(Debug, Clone, PartialEq)]
pub struct CostConfig {
    /// Number of predicted timesteps scanned for collisions and accelerations
    pub planning_horizon: usize,
    /// Timesteps of travel other vehicles should stay away [timestep]
    pub buffer_time: f64,
    /// Desired average speed [s per timestep]
    pub target_speed: f64,
    /// Acceleration the comfort cost is normalized by [s per timestep^2]
    pub max_acceleration: f64,
    pub weights: CostWeights,
}

impl CostConfig {
    /// Check that every parameter is usable
    pub fn validate(&self) -> CostResult<()> {
        if self.planning_horizon == 0 {
            return Err(CostError::InvalidParameter(
                "planning_horizon must be at least 1".to_string(),
            ));
        }

        let positive = [
            ("buffer_time", self.buffer_time),
            ("target_speed", self.target_speed),
            ("max_acceleration", self.max_acceleration),
        ];
        if let Some((name, value)) = positive
            .iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        {
            return Err(CostError::InvalidParameter(format!(
                "{} must be positive and finite, got {}",
                name, value
            )));
        }

        let weights = &self.weights;
        let all_weights = [
            weights.collision,
            weights.danger,
            weights.reach_goal,
            weights.comfort,
            weights.efficiency,
        ];
        if all_weights.iter().any(|w| !(w.is_finite() && *w >= 0.0)) {
            return Err(CostError::InvalidParameter(format!(
                "cost weights must be non-negative and finite, got {:?}",
                weights
            )));
        }

        Ok(())
    }
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            planning_horizon: 2,
            buffer_time: 1.5,
            target_speed: 10.0,
            max_acceleration: 2.0,
            weights: CostWeights::default(),
        }
    }
}

/// Entry of the cost function registration table
#[derive(Clone, Copy)]
pub struct RegisteredCost {
    pub name: &'static str,
    pub category: CostCategory,
    pub function: CostFunction,
}

/// All cost functions evaluated for a trajectory
pub const COST_FUNCTIONS: [RegisteredCost; 6] = [
    RegisteredCost {
        name: "collision",
        category: CostCategory::Collision,
        function: collision_cost,
    },
    RegisteredCost {
        name: "buffer",
        category: CostCategory::Danger,
        function: buffer_cost,
    },
    RegisteredCost {
        name: "distance_from_goal_lane",
        category: CostCategory::ReachGoal,
        function: distance_from_goal_lane_cost,
    },
    RegisteredCost {
        name: "comfort",
        category: CostCategory::Comfort,
        function: comfort_cost,
    },
    RegisteredCost {
        name: "change_lane",
        category: CostCategory::Comfort,
        function: change_lane_cost,
    },
    RegisteredCost {
        name: "inefficiency",
        category: CostCategory::Efficiency,
        function: inefficiency_cost,
    },
];

/// Result of one cost function
#[derive(Debug, Clone, PartialEq)]
pub struct CostTerm {
    pub name: &'static str,
    pub category: CostCategory,
    /// Unweighted value returned by the cost function
    pub raw: f64,
    pub weighted: f64,
}

/// Total cost of a trajectory together with what it was computed from
#[derive(Debug, Clone, PartialEq)]
pub struct CostBreakdown {
    pub data: TrajectoryData,
    pub terms: Vec<CostTerm>,
    pub total: f64,
}

impl CostBreakdown {
    /// Look up a term by its registered name
    pub fn term(&self, name: &str) -> Option<&CostTerm> {
        self.terms.iter().find(|term| term.name == name)
    }
}

impl fmt::Display for CostBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total {:.3} [{}]",
            self.total,
            self.terms
                .iter()
                .map(|term| format!("{}: {:.3}", term.name, term.weighted))
                .join(", ")
        )
    }
}

/// Calculates the weighted cost of candidate trajectories
#[derive(Debug, Clone)]
pub struct CostCalculator {
    config: CostConfig,
}

impl CostCalculator {
    /// Create a new cost calculator
    pub fn new(config: CostConfig) -> CostResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Self {
        Self {
            config: CostConfig::default(),
        }
    }

    pub fn config(&self) -> &CostConfig {
        &self.config
    }

    /// Evaluate every registered cost function on `trajectory`
    pub fn evaluate(
        &self,
        goal: &VehicleGoal,
        predictions: &Predictions,
        trajectory: &[Snapshot],
    ) -> CostResult<CostBreakdown> {
        let data = calculate_helper_data(goal, predictions, trajectory, self.config.planning_horizon)?;

        let mut terms = Vec::with_capacity(COST_FUNCTIONS.len());
        for registered in COST_FUNCTIONS.iter() {
            let raw = (registered.function)(goal, predictions, trajectory, &data, &self.config);
            if !raw.is_finite() {
                return Err(CostError::NonFiniteCost(format!(
                    "{} cost evaluated to {}",
                    registered.name, raw
                )));
            }
            terms.push(CostTerm {
                name: registered.name,
                category: registered.category,
                raw,
                weighted: raw * self.config.weights.weight(registered.category),
            });
        }

        let total: f64 = terms.iter().map(|term| term.weighted).sum();
        if !total.is_finite() {
            return Err(CostError::NonFiniteCost(format!("total cost is {}", total)));
        }

        let breakdown = CostBreakdown { data, terms, total };
        debug!("trajectory cost: {}", breakdown);
        Ok(breakdown)
    }

    /// Calculate the weighted cost of `trajectory`, lower is better
    pub fn calculate_cost(
        &self,
        goal: &VehicleGoal,
        predictions: &Predictions,
        trajectory: &[Snapshot],
    ) -> CostResult<f64> {
        self.evaluate(goal, predictions, trajectory)
            .map(|breakdown| breakdown.total)
    }
}

impl Default for CostCalculator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl TrajectoryScorer for CostCalculator {
    fn score(
        &self,
        goal: &VehicleGoal,
        predictions: &Predictions,
        trajectory: &[Snapshot],
    ) -> CostResult<f64> {
        self.calculate_cost(goal, predictions, trajectory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior_planning::prediction_filter::filter_predictions_by_lane;
    use crate::common::{constant_speed_predictions, BehaviorState, PredictedPosition};

    fn steady(lane: i32, s: &[i32], v: f64) -> Vec<Snapshot> {
        s.iter()
            .map(|&s| Snapshot::new(lane, s, v, 0.0, BehaviorState::KeepLane))
            .collect()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(CostConfig::default().validate().is_ok());
    }

    #[test]
    fn test_weights_are_ordered_by_category() {
        let weights = CostWeights::default();
        assert!(weights.collision > weights.danger);
        assert_eq!(weights.danger, weights.reach_goal);
        assert!(weights.reach_goal > weights.comfort);
        assert!(weights.comfort > weights.efficiency);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = CostConfig {
            planning_horizon: 0,
            ..CostConfig::default()
        };
        assert!(matches!(
            CostCalculator::new(config),
            Err(CostError::InvalidParameter(_))
        ));

        let config = CostConfig {
            target_speed: 0.0,
            ..CostConfig::default()
        };
        assert!(matches!(
            CostCalculator::new(config),
            Err(CostError::InvalidParameter(_))
        ));

        let mut config = CostConfig::default();
        config.weights.comfort = f64::NAN;
        assert!(CostCalculator::new(config).is_err());
    }

    #[test]
    fn test_registry_covers_every_category() {
        for category in &[
            CostCategory::Collision,
            CostCategory::Danger,
            CostCategory::ReachGoal,
            CostCategory::Comfort,
            CostCategory::Efficiency,
        ] {
            assert!(COST_FUNCTIONS.iter().any(|r| r.category == *category));
        }
    }

    #[test]
    fn test_crossing_vehicle_costs_at_least_collision_weight() {
        let calculator = CostCalculator::with_defaults();
        let goal = VehicleGoal::new(100, 1);
        let trajectory = steady(1, &[0, 10, 20], 10.0);
        let mut predictions = Predictions::new();
        predictions.insert(
            0,
            vec![
                PredictedPosition::new(2, 1),
                PredictedPosition::new(9, 1),
                PredictedPosition::new(21, 1),
            ],
        );

        let breakdown = calculator.evaluate(&goal, &predictions, &trajectory).unwrap();
        assert!(breakdown.data.collision_detected);
        assert!(breakdown.total >= CostWeights::default().collision);
        // Terms after the collision term are still evaluated
        assert_eq!(breakdown.terms.len(), COST_FUNCTIONS.len());
        assert!(breakdown.term("buffer").unwrap().weighted > 0.0);
    }

    #[test]
    fn test_trajectory_at_goal_costs_nothing() {
        let config = CostConfig {
            target_speed: 20.0 / 3.0,
            ..CostConfig::default()
        };
        let calculator = CostCalculator::new(config).unwrap();
        let goal = VehicleGoal::new(20, 1);
        let trajectory = steady(1, &[0, 10, 20], 10.0);

        let cost = calculator
            .calculate_cost(&goal, &Predictions::new(), &trajectory)
            .unwrap();
        assert!(cost.abs() < 1e-9);
    }

    #[test]
    fn test_vehicle_in_other_lane_is_filtered_but_still_scanned() {
        let calculator = CostCalculator::with_defaults();
        let goal = VehicleGoal::new(100, 1);
        let trajectory = steady(1, &[0, 10, 20], 10.0);
        let mut predictions = Predictions::new();
        predictions.insert(
            8,
            vec![
                PredictedPosition::new(2, 2),
                PredictedPosition::new(9, 2),
                PredictedPosition::new(21, 2),
            ],
        );
        predictions.insert(9, constant_speed_predictions(1, 60, 10, 3));

        let filtered = filter_predictions_by_lane(&predictions, 1);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.get(&9), predictions.get(&9));
        assert!(!filtered.contains_key(&8));

        let breakdown = calculator.evaluate(&goal, &predictions, &trajectory).unwrap();
        // Vehicle 8 overtakes the ego position between steps 1 and 2
        assert!(breakdown.data.collision_detected);
        assert_eq!(breakdown.data.collision_timestep, Some(2));
        assert_eq!(breakdown.data.closest_approach, 1);
    }

    #[test]
    fn test_lane_change_toward_goal_is_cheaper() {
        let calculator = CostCalculator::with_defaults();
        let goal = VehicleGoal::new(40, 0);
        let predictions = Predictions::new();

        let keep = steady(1, &[0, 10, 20], 10.0);
        let mut change = keep.clone();
        for snapshot in change.iter_mut().skip(1) {
            snapshot.lane = 0;
            snapshot.state = BehaviorState::LaneChangeLeft;
        }

        let keep_cost = calculator.score(&goal, &predictions, &keep).unwrap();
        let change_cost = calculator.score(&goal, &predictions, &change).unwrap();
        assert!(change_cost < keep_cost);
    }

    #[test]
    fn test_stopping_outside_goal_lane_is_not_cheaper() {
        let calculator = CostCalculator::with_defaults();
        let goal = VehicleGoal::new(100, 0);
        let predictions = Predictions::new();

        let moving = calculator.evaluate(&goal, &predictions, &steady(1, &[0, 10, 20], 10.0)).unwrap();
        let stopped = calculator.evaluate(&goal, &predictions, &steady(1, &[0, 0, 0], 0.0)).unwrap();

        assert_eq!(stopped.term("distance_from_goal_lane").unwrap().raw, 1.0);
        assert!(stopped.total > moving.total);
    }

    #[test]
    fn test_cost_is_deterministic() {
        let calculator = CostCalculator::with_defaults();
        let goal = VehicleGoal::new(100, 2);
        let trajectory = steady(1, &[0, 8, 17], 9.0);
        let mut predictions = Predictions::new();
        predictions.insert(1, constant_speed_predictions(1, 25, 8, 3));
        predictions.insert(2, constant_speed_predictions(2, 5, 12, 3));

        let first = calculator.calculate_cost(&goal, &predictions, &trajectory).unwrap();
        let second = calculator.calculate_cost(&goal, &predictions, &trajectory).unwrap();
        assert_eq!(first, second);
        assert!(first >= 0.0);
    }

    #[test]
    fn test_short_trajectory_is_an_error() {
        let calculator = CostCalculator::with_defaults();
        let result = calculator.calculate_cost(
            &VehicleGoal::new(100, 0),
            &Predictions::new(),
            &steady(0, &[0, 10], 10.0),
        );
        assert!(matches!(result, Err(CostError::InvalidTrajectory(_))));
    }

    #[test]
    fn test_breakdown_display() {
        let calculator = CostCalculator::with_defaults();
        let breakdown = calculator
            .evaluate(&VehicleGoal::new(100, 0), &Predictions::new(), &steady(0, &[0, 10, 20], 10.0))
            .unwrap();
        let text = breakdown.to_string();
        assert!(text.starts_with("total "));
        assert!(text.contains("collision: 0.000"));
        assert!(text.contains("inefficiency: "));
    }
}
