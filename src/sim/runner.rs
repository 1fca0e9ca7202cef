//! Lane-entity spawning, advancement and collision for the runner segment
//!
//! Entities keep a fixed world z; the road offset grows each tick, so the
//! relative distance (z - road_offset) shrinks and the world appears to rush
//! toward the player.

use rand::Rng;

use super::state::{EntityKind, GameState, LaneEntity, TileKind};
use crate::consts::*;

/// Outcome of one tick's collision resolution
#[derive(Debug, Default)]
pub struct CollisionOutcome {
    /// An obstacle occupied the player's hit zone and lane
    pub obstacle_hit: bool,
    /// Tiles collected this tick, in lane order
    pub collected: Vec<TileKind>,
    /// A portal was picked up
    pub portal: bool,
}

/// Spawn one entity if the spawn timer is due. Lane is uniform, kind is a
/// weighted roll: 50% tile (sub-kind uniform), 30% obstacle, 20% portal.
pub fn spawn_due(state: &mut GameState) {
    if state.clock_ms < state.next_spawn_ms {
        return;
    }
    state.next_spawn_ms = state.clock_ms + SPAWN_INTERVAL_MS;

    let lane = state.rng.random_range(0..LANE_COUNT);
    let kind = roll_kind(state);
    let id = state.next_entity_id();
    state.entities.push(LaneEntity {
        id,
        lane,
        z: state.road_offset + SPAWN_DISTANCE,
        kind,
    });
}

fn roll_kind(state: &mut GameState) -> EntityKind {
    let roll: f32 = state.rng.random();
    if roll < 0.5 {
        let tile = TileKind::ALL[state.rng.random_range(0..TileKind::ALL.len())];
        EntityKind::Tile(tile)
    } else if roll < 0.8 {
        EntityKind::Obstacle
    } else {
        EntityKind::Portal
    }
}

/// Whether an entity's relative z is inside the hit zone
pub fn in_hit_zone(rel_z: f32) -> bool {
    (HIT_ZONE_NEAR..=HIT_ZONE_FAR).contains(&rel_z)
}

/// Resolve entity collisions against the player and prune entities that have
/// fallen behind. Collected tiles and portals are removed from the entity
/// list; an obstacle hit leaves the obstacle in place (the run ends anyway).
pub fn resolve_collisions(state: &mut GameState) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    let player_lane = state.player_lane as f32;
    let road = state.road_offset;

    state.entities.retain(|entity| {
        let rel_z = entity.relative_z(road);
        if rel_z < -PRUNE_MARGIN {
            return false;
        }
        let at_player =
            in_hit_zone(rel_z) && (entity.lane as f32 - player_lane).abs() <= LANE_TOLERANCE;
        if !at_player {
            return true;
        }
        match entity.kind {
            EntityKind::Obstacle => {
                outcome.obstacle_hit = true;
                true
            }
            EntityKind::Tile(kind) => {
                outcome.collected.push(kind);
                false
            }
            EntityKind::Portal => {
                outcome.portal = true;
                false
            }
        }
    });

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_entity(state: &mut GameState, lane: u8, rel_z: f32, kind: EntityKind) {
        let id = state.next_entity_id();
        let z = state.road_offset + rel_z;
        state.entities.push(LaneEntity { id, lane, z, kind });
    }

    #[test]
    fn test_spawn_cadence_and_bounds() {
        let mut state = GameState::new(99, 0);
        state.clock_ms = SPAWN_INTERVAL_MS;
        spawn_due(&mut state);
        assert_eq!(state.entities.len(), 1);
        // Timer re-armed: an immediate second call is a no-op
        spawn_due(&mut state);
        assert_eq!(state.entities.len(), 1);

        let entity = state.entities[0];
        assert!(entity.lane < LANE_COUNT);
        assert_eq!(entity.relative_z(state.road_offset), SPAWN_DISTANCE);
    }

    #[test]
    fn test_spawn_rolls_cover_all_kinds() {
        let mut state = GameState::new(4242, 0);
        let mut tiles = 0;
        let mut obstacles = 0;
        let mut portals = 0;
        for i in 0..300 {
            state.clock_ms = (i + 1) as f64 * SPAWN_INTERVAL_MS;
            spawn_due(&mut state);
        }
        for entity in &state.entities {
            match entity.kind {
                EntityKind::Tile(_) => tiles += 1,
                EntityKind::Obstacle => obstacles += 1,
                EntityKind::Portal => portals += 1,
            }
        }
        assert_eq!(tiles + obstacles + portals, 300);
        // Weighted 50/30/20: every kind shows up and tiles are the plurality
        assert!(obstacles > 0 && portals > 0);
        assert!(tiles > obstacles && tiles > portals);
    }

    #[test]
    fn test_prune_behind_margin() {
        let mut state = GameState::new(1, 0);
        push_entity(&mut state, 0, -PRUNE_MARGIN - 0.1, EntityKind::Obstacle);
        push_entity(&mut state, 0, 30.0, EntityKind::Obstacle);
        let outcome = resolve_collisions(&mut state);
        assert!(!outcome.obstacle_hit);
        assert_eq!(state.entities.len(), 1);
    }

    #[test]
    fn test_collision_requires_lane_match() {
        let mut state = GameState::new(1, 0);
        state.player_lane = 1;
        push_entity(&mut state, 0, 0.0, EntityKind::Obstacle);
        let outcome = resolve_collisions(&mut state);
        assert!(!outcome.obstacle_hit);
    }

    #[test]
    fn test_hit_zone_boundary_is_inclusive_at_both_edges() {
        for rel_z in [HIT_ZONE_NEAR, HIT_ZONE_FAR] {
            let mut state = GameState::new(1, 0);
            let lane = state.player_lane; push_entity(&mut state, lane, rel_z, EntityKind::Obstacle);
            let outcome = resolve_collisions(&mut state);
            assert!(outcome.obstacle_hit, "edge {rel_z} must classify as a hit");
        }
        for rel_z in [HIT_ZONE_NEAR - 0.01, HIT_ZONE_FAR + 0.01] {
            let mut state = GameState::new(1, 0);
            let lane = state.player_lane; push_entity(&mut state, lane, rel_z, EntityKind::Obstacle);
            let outcome = resolve_collisions(&mut state);
            assert!(!outcome.obstacle_hit, "outside edge {rel_z} must miss");
        }
    }

    #[test]
    fn test_tile_and_portal_are_consumed() {
        let mut state = GameState::new(1, 0);
        let lane = state.player_lane;
        push_entity(
            &mut state,
            lane,
            0.0,
            EntityKind::Tile(TileKind::Beat),
        );
        let lane = state.player_lane; push_entity(&mut state, lane, 1.0, EntityKind::Portal);
        let lane = state.player_lane; push_entity(&mut state, lane, 20.0, EntityKind::Portal);
        let outcome = resolve_collisions(&mut state);
        assert_eq!(outcome.collected, vec![TileKind::Beat]);
        assert!(outcome.portal);
        // Far portal untouched
        assert_eq!(state.entities.len(), 1);
    }
}
