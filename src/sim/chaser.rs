//! Pursuit AI for the runner segment
//!
//! Chasers sweep in from far ahead at a speed that ramps with run time.
//! Lane homing only engages inside the hit zone, so a chaser can be dodged
//! until the last moment but commits once it is on top of the player.

use rand::Rng;

use super::runner::in_hit_zone;
use super::state::{Chaser, GameState};
use crate::consts::*;

/// Chaser approach speed for a given run time, with the ramp ceiling applied
pub fn speed_for(run_time_ms: f64) -> f32 {
    let ramp = (run_time_ms / 60_000.0) as f32 * CHASER_SPEED_RAMP_PER_MIN;
    (CHASER_BASE_SPEED + ramp).min(CHASER_SPEED_MAX)
}

/// Chaser spawn interval for a given run time, with the floor applied
pub fn spawn_interval_for(run_time_ms: f64) -> f64 {
    let shortened =
        CHASER_SPAWN_INTERVAL_MS - run_time_ms / 60_000.0 * CHASER_SPAWN_RAMP_MS_PER_MIN;
    shortened.max(CHASER_SPAWN_INTERVAL_MIN_MS)
}

/// Advance all chasers by one tick and prune the ones that fell behind.
/// Returns true if a chaser reached the player.
pub fn advance(state: &mut GameState, dt: f32) -> bool {
    let speed = speed_for(state.run_time_ms);
    let player_lane = state.player_lane as f32;
    let road = state.road_offset;
    let clock = state.clock_ms;
    let mut hit = false;

    for chaser in &mut state.chasers {
        if chaser.is_stunned(clock) {
            continue;
        }
        chaser.z -= speed * dt;
        let rel_z = chaser.relative_z(road);
        if in_hit_zone(rel_z) {
            // Homing engages only in range
            let delta = player_lane - chaser.lane;
            let step = CHASER_HOMING_PER_SEC * dt;
            chaser.lane += delta.clamp(-step, step);
            if (chaser.lane - player_lane).abs() <= LANE_TOLERANCE {
                hit = true;
            }
        }
    }

    state
        .chasers
        .retain(|chaser| chaser.relative_z(road) >= -PRUNE_MARGIN);

    hit
}

/// Spawn one chaser if the spawn timer is due, re-arming the timer with the
/// ramped interval.
pub fn spawn_due(state: &mut GameState) {
    if state.clock_ms < state.next_chaser_spawn_ms {
        return;
    }
    state.next_chaser_spawn_ms = state.clock_ms + spawn_interval_for(state.run_time_ms);

    let lane = state.rng.random_range(0..LANE_COUNT) as f32;
    let id = state.next_entity_id();
    state.chasers.push(Chaser {
        id,
        lane,
        z: state.road_offset + CHASER_SPAWN_DISTANCE,
        stun_until_ms: 0.0,
    });
}

/// Stun every active chaser until `until_ms` (Vocal match effect)
pub fn stun_all(state: &mut GameState, until_ms: f64) {
    for chaser in &mut state.chasers {
        chaser.stun_until_ms = until_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_chaser(state: &mut GameState, lane: f32, rel_z: f32) -> u32 {
        let id = state.next_entity_id();
        let z = state.road_offset + rel_z;
        state.chasers.push(Chaser {
            id,
            lane,
            z,
            stun_until_ms: 0.0,
        });
        id
    }

    #[test]
    fn test_speed_ramp_has_ceiling() {
        assert_eq!(speed_for(0.0), CHASER_BASE_SPEED);
        assert!(speed_for(60_000.0) > CHASER_BASE_SPEED);
        assert_eq!(speed_for(3_600_000.0), CHASER_SPEED_MAX);
    }

    #[test]
    fn test_spawn_interval_has_floor() {
        assert_eq!(spawn_interval_for(0.0), CHASER_SPAWN_INTERVAL_MS);
        assert!(spawn_interval_for(60_000.0) < CHASER_SPAWN_INTERVAL_MS);
        assert_eq!(
            spawn_interval_for(3_600_000.0),
            CHASER_SPAWN_INTERVAL_MIN_MS
        );
    }

    #[test]
    fn test_stunned_chaser_does_not_advance() {
        let mut state = GameState::new(1, 0);
        state.clock_ms = 1_000.0;
        push_chaser(&mut state, 0.0, 30.0);
        state.chasers[0].stun_until_ms = 2_000.0;
        let z_before = state.chasers[0].z;
        assert!(!advance(&mut state, 0.016));
        assert_eq!(state.chasers[0].z, z_before);

        state.clock_ms = 2_500.0;
        assert!(!advance(&mut state, 0.016));
        assert!(state.chasers[0].z < z_before);
    }

    #[test]
    fn test_homing_only_inside_hit_zone() {
        let mut state = GameState::new(1, 0);
        state.player_lane = 2;
        push_chaser(&mut state, 0.0, 30.0);
        assert!(!advance(&mut state, 0.016));
        assert_eq!(state.chasers[0].lane, 0.0);

        state.chasers[0].z = state.road_offset + 1.0;
        assert!(!advance(&mut state, 0.016));
        assert!(state.chasers[0].lane > 0.0);
    }

    #[test]
    fn test_hit_when_lane_converges_in_zone() {
        let mut state = GameState::new(1, 0);
        let lane = state.player_lane as f32;
        push_chaser(&mut state, lane, 0.5);
        assert!(advance(&mut state, 0.016));
    }

    #[test]
    fn test_prune_when_fallen_behind() {
        let mut state = GameState::new(1, 0);
        push_chaser(&mut state, 0.0, -PRUNE_MARGIN - 1.0);
        assert!(!advance(&mut state, 0.016));
        assert!(state.chasers.is_empty());
    }

    #[test]
    fn test_spawn_due_re_arms_timer() {
        let mut state = GameState::new(5, 0);
        state.clock_ms = CHASER_SPAWN_INTERVAL_MS;
        spawn_due(&mut state);
        assert_eq!(state.chasers.len(), 1);
        assert!(state.chasers[0].lane < LANE_COUNT as f32);
        spawn_due(&mut state);
        assert_eq!(state.chasers.len(), 1);
        assert_eq!(
            state.next_chaser_spawn_ms,
            CHASER_SPAWN_INTERVAL_MS + spawn_interval_for(state.run_time_ms)
        );
    }
}
