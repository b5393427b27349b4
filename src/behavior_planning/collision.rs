//! Longitudinal collision check between the ego snapshot and another vehicle

use crate::common::Snapshot;

/// Decide whether another vehicle collides with the ego vehicle at this timestep.
///
/// Only longitudinal overlap is modeled. One timestep is one time unit, so the
/// other vehicle's velocity is `other_s_now - other_s_previous`.
pub fn check_collision(snapshot: &Snapshot, other_s_now: i32, other_s_previous: i32) -> bool {
    let other_v = f64::from(other_s_now) - f64::from(other_s_previous);

    // Other vehicle came from behind and reached or passed the ego position
    if other_s_previous < snapshot.s && other_s_now >= snapshot.s {
        return true;
    }

    // Ego vehicle reached or passed the other vehicle from behind
    if other_s_previous > snapshot.s && other_s_now <= snapshot.s {
        return true;
    }

    // Ego is where the other vehicle was, and the other vehicle is not pulling away fast enough
    if other_s_previous == snapshot.s && other_v <= snapshot.v {
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::BehaviorState;
    use proptest::prelude::*;

    fn ego_at(s: i32, v: f64) -> Snapshot {
        Snapshot::new(1, s, v, 0.0, BehaviorState::KeepLane)
    }

    #[test]
    fn test_collision_other_catches_up_from_behind() {
        assert!(check_collision(&ego_at(20, 10.0), 20, 12));
        assert!(check_collision(&ego_at(20, 10.0), 25, 12));
    }

    #[test]
    fn test_collision_ego_catches_up_from_behind() {
        assert!(check_collision(&ego_at(20, 10.0), 20, 24));
        assert!(check_collision(&ego_at(20, 10.0), 18, 24));
    }

    #[test]
    fn test_collision_same_position_slower_other() {
        assert!(check_collision(&ego_at(20, 10.0), 30, 20));
        assert!(check_collision(&ego_at(20, 10.0), 25, 20));
    }

    #[test]
    fn test_no_collision_same_position_faster_other() {
        assert!(!check_collision(&ego_at(20, 10.0), 31, 20));
    }

    #[test]
    fn test_no_collision_when_staying_apart() {
        // Behind and still behind
        assert!(!check_collision(&ego_at(20, 10.0), 19, 10));
        // Ahead and still ahead
        assert!(!check_collision(&ego_at(20, 10.0), 26, 22));
    }

    #[test]
    fn test_collision_at_extreme_positions() {
        assert!(check_collision(&ego_at(0, 10.0), i32::MAX, i32::MIN));
        assert!(check_collision(&ego_at(i32::MAX, 0.0), i32::MIN, i32::MAX));
        assert!(!check_collision(&ego_at(i32::MIN, 10.0), i32::MAX, i32::MIN));
    }

    proptest! {
        #[test]
        fn test_collision_rule_is_deterministic(
            ego_s in -50i32..50,
            ego_v in -5.0f64..20.0,
            previous in -50i32..50,
            now in -50i32..50,
        ) {
            let ego = ego_at(ego_s, ego_v);
            let first = check_collision(&ego, now, previous);
            let second = check_collision(&ego, now, previous);
            prop_assert_eq!(first, second);

            let expected = (previous < ego_s && now >= ego_s)
                || (previous > ego_s && now <= ego_s)
                || (previous == ego_s && f64::from(now - previous) <= ego_v);
            prop_assert_eq!(first, expected);
        }

        #[test]
        fn test_crossing_always_collides(ego_s in -50i32..50, gap in 1i32..20, overshoot in 0i32..20) {
            let ego = ego_at(ego_s, 0.0);
            prop_assert!(check_collision(&ego, ego_s + overshoot, ego_s - gap));
            prop_assert!(check_collision(&ego, ego_s - overshoot, ego_s + gap));
        }

        #[test]
        fn test_same_side_never_collides(ego_s in -50i32..50, a in 1i32..20, b in 1i32..20) {
            let ego = ego_at(ego_s, 10.0);
            prop_assert!(!check_collision(&ego, ego_s - a, ego_s - b));
            prop_assert!(!check_collision(&ego, ego_s + a, ego_s + b));
        }
    }
}
