//! Per-tick simulation advance and the top-level phase machine
//!
//! The driver calls [`tick`] once per animation frame with the current
//! timestamp and at most one action. Inside one playing tick the sub-systems
//! run in a fixed order: beat sync, action processing, road advance, chase
//! decay, runner spawning, chaser pursuit, collision resolution, portal
//! transition, inventory credit and match resolution. The ordering is load
//! bearing: a run can end from chase depletion before a tile collected the
//! same tick is ever processed.
//!
//! Time model: wall-clock deltas (clamped) accumulate into a simulation
//! clock that only advances while playing, and every timer in the state is
//! expressed against that clock. Pausing therefore freezes cooldowns, stuns,
//! the beat and the maze deadline without any special handling.

use rand::Rng;

use super::maze::{MazeState, MoveResult, PelletKind};
use super::state::{EntityKind, GamePhase, GameState, MatchFlash, Segment, TileKind};
use super::{ability, beat, chaser, runner};
use crate::consts::*;
use crate::input::Action;

/// Advance the game by one tick.
///
/// `now_ms` is the driver's monotonic timestamp. Phases other than Playing
/// perform no tick work and react only to their phase-changing action.
pub fn tick(state: &mut GameState, action: Option<Action>, now_ms: f64) {
    let dt_ms = if state.last_wall_ms > 0.0 {
        (now_ms - state.last_wall_ms).clamp(0.0, MAX_TICK_DT_MS)
    } else {
        0.0
    };
    state.last_wall_ms = now_ms;

    match state.phase {
        GamePhase::Start => {
            if action == Some(Action::Confirm) {
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::Paused => {
            if action == Some(Action::Pause) {
                state.phase = GamePhase::Playing;
            }
            return;
        }
        GamePhase::Ended => {
            if action == Some(Action::Confirm) {
                reset(state);
            }
            return;
        }
        GamePhase::Playing => {}
    }

    if action == Some(Action::Pause) {
        state.phase = GamePhase::Paused;
        return;
    }

    state.clock_ms += dt_ms;
    state.run_time_ms += dt_ms;
    let dt = (dt_ms / 1000.0) as f32;

    expire_hints(state);

    // Beat sync runs first so every later stage reads the fresh phase
    if beat::advance(state) {
        state.beat_pulse_until_ms = state.clock_ms + BEAT_PULSE_MS;
    }

    apply_action(state, action);

    match state.segment {
        Segment::Runner => runner_tick(state, dt),
        Segment::Maze => maze_tick(state, dt),
    }

    if state.phase == GamePhase::Playing {
        resolve_match(state);
    }
}

/// Discard the ended run and produce a fresh Start state. The best score
/// carries over; the RNG stream seeds the next run so runs differ.
fn reset(state: &mut GameState) {
    let seed = state.rng.random::<u64>();
    let mut fresh = GameState::new(seed, state.best_score);
    fresh.last_wall_ms = state.last_wall_ms;
    *state = fresh;
}

fn expire_hints(state: &mut GameState) {
    if let Some(flash) = state.match_flash {
        if state.clock_ms >= flash.until_ms {
            state.match_flash = None;
        }
    }
}

fn apply_action(state: &mut GameState, action: Option<Action>) {
    let Some(action) = action else { return };
    match action {
        Action::LaneLeft => switch_lane(state, -1),
        Action::LaneRight => switch_lane(state, 1),
        Action::MoveUp => move_in_maze(state, 0, -1),
        Action::MoveDown => move_in_maze(state, 0, 1),
        Action::MoveLeft => move_in_maze(state, -1, 0),
        Action::MoveRight => move_in_maze(state, 1, 0),
        Action::Ability(kind) => {
            let _ = ability::activate(state, kind);
        }
        // Pause is handled by the phase machine; Confirm means nothing mid-run
        Action::Pause | Action::Confirm => {}
    }
}

/// Switch lanes in the runner segment. Switches timed near a beat-window
/// boundary grant the temporary multiplier bump and the "perfect" flash.
fn switch_lane(state: &mut GameState, dir: i8) {
    if state.segment != Segment::Runner {
        return;
    }
    let lane = (state.player_lane as i8 + dir).clamp(0, LANE_COUNT as i8 - 1) as u8;
    if lane == state.player_lane {
        return;
    }
    state.player_lane = lane;
    if beat::switch_is_on_beat(state.beat_phase) {
        state.beat_boost_until_ms = state.clock_ms + BEAT_BOOST_MS;
        state.perfect_flash_until_ms = state.clock_ms + PERFECT_FLASH_MS;
    }
}

fn move_in_maze(state: &mut GameState, dx: i8, dy: i8) {
    if state.segment != Segment::Maze {
        return;
    }
    let multiplier = state.effective_multiplier();
    let in_window = beat::in_window(state.beat_phase);

    let result = {
        let Some(maze) = state.maze.as_mut() else {
            return;
        };
        let result = maze.move_player(dx, dy);
        if result == MoveResult::Moved(Some(PelletKind::Power)) {
            maze.freeze_chaser(POWER_PELLET_FREEZE_STEPS);
        }
        result
    };

    if let MoveResult::Moved(Some(kind)) = result {
        let base = match kind {
            PelletKind::Plain => PELLET_POINTS,
            PelletKind::Power => POWER_PELLET_POINTS,
        };
        state.score += beat::score_points(base, multiplier, in_window);
    }
}

fn runner_tick(state: &mut GameState, dt: f32) {
    state.road_offset += ROAD_SPEED * dt;

    // The danger budget drains before anything collected this tick counts
    state.chase_distance = (state.chase_distance - CHASE_DECAY_PER_SEC * dt).max(0.0);
    if state.chase_distance <= 0.0 {
        end_run(state);
        return;
    }

    runner::spawn_due(state);

    if chaser::advance(state, dt) {
        end_run(state);
        return;
    }
    chaser::spawn_due(state);

    let outcome = runner::resolve_collisions(state);
    if outcome.obstacle_hit {
        end_run(state);
        return;
    }
    if outcome.portal {
        enter_maze(state);
    }

    let multiplier = state.effective_multiplier();
    let in_window = beat::in_window(state.beat_phase);
    for kind in outcome.collected {
        state.inventory.add(kind);
        state.score += beat::score_points(kind.base_points(), multiplier, in_window);
    }
}

fn maze_tick(state: &mut GameState, dt: f32) {
    // The danger budget keeps draining while underground
    state.chase_distance = (state.chase_distance - CHASE_DECAY_PER_SEC * dt).max(0.0);
    if state.chase_distance <= 0.0 {
        end_run(state);
        return;
    }

    let clock = state.clock_ms;
    let (exited, caught, expired) = {
        let Some(maze) = state.maze.as_mut() else {
            return;
        };
        if clock >= maze.next_chaser_step_ms {
            maze.next_chaser_step_ms = clock + MAZE_CHASER_STEP_MS;
            maze.advance_chaser();
        }
        (
            maze.player_exited(),
            maze.chaser_caught(),
            clock >= maze.deadline_ms,
        )
    };

    // Exit conditions in priority order
    if exited {
        exit_maze(state, true);
    } else if caught {
        state.maze = None;
        state.segment = Segment::Runner;
        end_run(state);
    } else if expired {
        exit_maze(state, false);
    }
}

fn enter_maze(state: &mut GameState) {
    state.segment = Segment::Maze;
    state.maze = Some(MazeState::new(state.clock_ms));
    log::info!("portal pickup: entering maze");
}

fn exit_maze(state: &mut GameState, cleared: bool) {
    state.maze = None;
    state.segment = Segment::Runner;
    if cleared {
        let multiplier = state.effective_multiplier();
        let in_window = beat::in_window(state.beat_phase);
        state.score += beat::score_points(MAZE_EXIT_BONUS, multiplier, in_window);
        log::info!("maze cleared, returning to the lanes");
    } else {
        log::info!("maze deadline expired, returning to the lanes");
    }
}

fn end_run(state: &mut GameState) {
    state.phase = GamePhase::Ended;
    if state.score > state.best_score {
        state.best_score = state.score;
        log::info!("run ended: new best score {}", state.score);
    } else {
        log::info!("run ended: score {}", state.score);
    }
}

/// Resolve at most one banked match per tick and apply its effect table.
fn resolve_match(state: &mut GameState) {
    let Some(kind) = state.inventory.find_match() else {
        return;
    };
    state.inventory.consume_match(kind);

    match kind {
        TileKind::Beat => {
            state.multiplier = (state.multiplier + MULTIPLIER_STEP).min(MULTIPLIER_MAX);
        }
        TileKind::Vocal => {
            let until_ms = state.clock_ms + MATCH_STUN_MS;
            chaser::stun_all(state, until_ms);
            state.chase_distance = (state.chase_distance + MATCH_CHASE_RESTORE).min(CHASE_MAX);
        }
        TileKind::Synth => {
            // Obstacle sweep: clear everything hostile currently on the road
            state
                .entities
                .retain(|entity| entity.kind != EntityKind::Obstacle);
        }
        TileKind::Bass => {
            state.energy = (state.energy + MATCH_ENERGY_RESTORE).min(ENERGY_MAX);
        }
    }

    let multiplier = state.effective_multiplier();
    let in_window = beat::in_window(state.beat_phase);
    state.score += beat::score_points(kind.match_bonus(), multiplier, in_window);
    state.match_flash = Some(MatchFlash {
        kind,
        until_ms: state.clock_ms + MATCH_FLASH_MS,
    });
}
