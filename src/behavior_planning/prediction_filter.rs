//! Lane-based filtering of other vehicles' predictions

use crate::common::{Predictions, EGO_VEHICLE_ID};

/// Keep only the vehicles whose first predicted position lies in `lane`.
///
/// Lane occupancy is judged by the first entry only: a vehicle that enters
/// `lane` later in its prediction is dropped. The ego vehicle and vehicles
/// without any prediction are always dropped.
pub fn filter_predictions_by_lane(predictions: &Predictions, lane: i32) -> Predictions {
    predictions
        .iter()
        .filter(|&(&vehicle_id, vehicle_predictions)| {
            vehicle_id != EGO_VEHICLE_ID
                && vehicle_predictions
                    .first()
                    .map_or(false, |first| first.lane == lane)
        })
        .map(|(&vehicle_id, vehicle_predictions)| (vehicle_id, vehicle_predictions.clone()))
        .collect()
}
