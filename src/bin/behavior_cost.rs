// Behavior planning trajectory cost sample
//
// Scores keep-lane and lane-change trajectories of an ego vehicle in
// randomly generated multi-lane traffic and plots the cheapest one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use rust_behavior_planning::behavior_planning::{CostBreakdown, CostCalculator, CostConfig};
use rust_behavior_planning::common::{
    constant_speed_predictions, BehaviorState, Predictions, Snapshot, VehicleGoal,
};
use rust_behavior_planning::utils::{colors, PathStyle, PointStyle, Visualizer};

const NUM_LANES: i32 = 3;
const NUM_VEHICLES: usize = 6;
const PREDICTION_STEPS: usize = 10;
const TRAJECTORY_STEPS: usize = 5;
const SPEED_LIMIT: f64 = 10.0;
const MAX_ACCEL: f64 = 2.0;
const SEED: u64 = 42;

/// Ego trajectory holding `lane` after the first step with constant acceleration
fn build_trajectory(current: &Snapshot, lane: i32, accel: f64, state: BehaviorState) -> Vec<Snapshot> {
    let mut trajectory = vec![*current];
    let mut s = f64::from(current.s);
    let mut v = current.v;
    for _ in 0..TRAJECTORY_STEPS {
        s += v;
        v = (v + accel).max(0.0);
        trajectory.push(Snapshot::new(lane, s.round() as i32, v, accel, state));
    }
    trajectory
}

fn generate_traffic(rng: &mut StdRng) -> Result<Predictions, Box<dyn std::error::Error>> {
    let speed = Normal::<f64>::new(7.0, 2.0)?;
    let mut predictions = Predictions::new();
    for vehicle_id in 0..NUM_VEHICLES as i32 {
        let lane = rng.gen_range(0..NUM_LANES);
        let s = rng.gen_range(-30..80);
        let v = speed.sample(rng).round().max(1.0) as i32;
        predictions.insert(vehicle_id, constant_speed_predictions(lane, s, v, PREDICTION_STEPS));
    }
    Ok(predictions)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Behavior planning cost start!!");

    let mut rng = StdRng::seed_from_u64(SEED);
    let predictions = generate_traffic(&mut rng)?;
    for (vehicle_id, vehicle_predictions) in &predictions {
        println!(
            "vehicle {}: lane {}, s {} -> {}",
            vehicle_id,
            vehicle_predictions[0].lane,
            vehicle_predictions[0].s,
            vehicle_predictions[vehicle_predictions.len() - 1].s
        );
    }

    let config = CostConfig {
        target_speed: SPEED_LIMIT,
        max_acceleration: MAX_ACCEL,
        ..CostConfig::default()
    };
    let calculator = CostCalculator::new(config)?;

    let goal = VehicleGoal::new(300, 0);
    let current = Snapshot::new(1, 0, 8.0, 0.0, BehaviorState::KeepLane);
    let accel = (SPEED_LIMIT - current.v).min(MAX_ACCEL);

    let mut candidates = vec![(
        BehaviorState::KeepLane,
        build_trajectory(&current, current.lane, accel, BehaviorState::KeepLane),
    )];
    if current.lane > 0 {
        candidates.push((
            BehaviorState::LaneChangeLeft,
            build_trajectory(&current, current.lane - 1, accel, BehaviorState::LaneChangeLeft),
        ));
    }
    if current.lane < NUM_LANES - 1 {
        candidates.push((
            BehaviorState::LaneChangeRight,
            build_trajectory(&current, current.lane + 1, accel, BehaviorState::LaneChangeRight),
        ));
    }

    let mut scored: Vec<(BehaviorState, Vec<Snapshot>, CostBreakdown)> = Vec::new();
    for (state, trajectory) in candidates {
        let breakdown = calculator.evaluate(&goal, &predictions, &trajectory)?;
        println!("{:>4}: {}", state, breakdown);
        scored.push((state, trajectory, breakdown));
    }

    let best_index = scored
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.2.total.total_cmp(&b.2.total))
        .map(|(index, _)| index)
        .ok_or("no candidate trajectory")?;
    println!("Best next state: {}", scored[best_index].0);

    let mut vis = Visualizer::new();
    vis.set_title("Behavior Planning - Candidate Trajectories");
    for (vehicle_id, vehicle_predictions) in &predictions {
        let caption = format!("vehicle {} (lane {})", vehicle_id, vehicle_predictions[0].lane);
        vis.plot_prediction(
            vehicle_predictions,
            &PointStyle::new(colors::OTHER_VEHICLE, &caption).with_size(0.5),
        );
    }
    for (index, (state, trajectory, breakdown)) in scored.iter().enumerate() {
        let caption = format!("{} ({:.0})", state, breakdown.total);
        let style = if index == best_index {
            PathStyle::new(colors::BEST, &caption).with_line_width(3.0)
        } else {
            PathStyle::new(colors::CANDIDATE, &caption)
        };
        vis.plot_trajectory(trajectory, &style);
        if let Some(timestep) = breakdown.data.collision_timestep {
            vis.plot_collision(timestep, trajectory[timestep].s);
        }
    }
    vis.set_x_range(0.0, TRAJECTORY_STEPS as f64);

    std::fs::create_dir_all("./img/behavior_planning")?;
    vis.save_svg("./img/behavior_planning/behavior_cost.svg")?;
    println!("Plot saved to ./img/behavior_planning/behavior_cost.svg");

    Ok(())
}
