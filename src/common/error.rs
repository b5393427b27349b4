//! Error types for rust_behavior_planning

use std::fmt;

/// Main error type for trajectory cost evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum CostError {
    /// Trajectory violates the scorer's length or numeric preconditions
    InvalidTrajectory(String),
    /// A tracked vehicle has no prediction for a timestep inside the horizon
    MissingPrediction { vehicle_id: i32, timestep: usize },
    /// Invalid configuration parameter
    InvalidParameter(String),
    /// A cost term or the aggregated cost is NaN or infinite
    NonFiniteCost(String),
}

impl fmt::Display for CostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CostError::InvalidTrajectory(msg) => write!(f, "Invalid trajectory: {}", msg),
            CostError::MissingPrediction { vehicle_id, timestep } => write!(
                f,
                "Missing prediction: vehicle {} has no entry for timestep {}",
                vehicle_id, timestep
            ),
            CostError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            CostError::NonFiniteCost(msg) => write!(f, "Non-finite cost: {}", msg),
        }
    }
}

impl std::error::Error for CostError {}

/// Result type alias for cost evaluation
pub type CostResult<T> = Result<T, CostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CostError::InvalidTrajectory("need at least 3 snapshots, got 2".to_string());
        assert_eq!(
            format!("{}", err),
            "Invalid trajectory: need at least 3 snapshots, got 2"
        );
    }

    #[test]
    fn test_missing_prediction_display() {
        let err = CostError::MissingPrediction { vehicle_id: 4, timestep: 2 };
        assert_eq!(
            err.to_string(),
            "Missing prediction: vehicle 4 has no entry for timestep 2"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(CostError::NonFiniteCost("total".to_string()));
        assert!(err.to_string().starts_with("Non-finite cost"));
    }
}
