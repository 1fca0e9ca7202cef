//! Tempo Rush - the hidden rhythm-runner mini-game
//!
//! Core modules:
//! - `sim`: deterministic simulation (phases, segments, entities, collisions, scoring)
//! - `input`: discrete action set and pointer-gesture disambiguation
//! - `stats`: persistent best-score/stat record
//!
//! The crate is the pure simulation engine only. Rendering, audio and input
//! capture live in the host application; it drives the engine by calling
//! [`sim::tick()`] once per animation frame and draws from the returned state.

pub mod input;
pub mod sim;
pub mod stats;

pub use input::Action;
pub use sim::{GamePhase, GameState, Segment};
pub use stats::GameStats;

/// Game configuration constants
pub mod consts {
    /// Upper bound on a single tick's wall-clock delta (ms). Scheduler
    /// hiccups beyond this are swallowed instead of teleporting the world.
    pub const MAX_TICK_DT_MS: f64 = 50.0;

    /// Number of lanes in the runner segment
    pub const LANE_COUNT: u8 = 3;
    /// Forward road speed, world units per second
    pub const ROAD_SPEED: f32 = 30.0;
    /// Entities spawn this far ahead of the player
    pub const SPAWN_DISTANCE: f32 = 60.0;
    /// Entities this far behind the player are pruned
    pub const PRUNE_MARGIN: f32 = 8.0;

    /// Hit zone: relative-z window in which an entity is "at the player"
    pub const HIT_ZONE_NEAR: f32 = -1.5;
    /// Far edge of the hit zone
    pub const HIT_ZONE_FAR: f32 = 1.5;
    /// Lane tolerance for collisions (half a lane)
    pub const LANE_TOLERANCE: f32 = 0.5;

    /// Interval between lane-entity spawns (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 600.0;

    /// Chase-distance danger budget: full value
    pub const CHASE_MAX: f32 = 100.0;
    /// Passive chase-distance decay per second
    pub const CHASE_DECAY_PER_SEC: f32 = 2.5;

    /// Chaser base approach speed (world units/sec)
    pub const CHASER_BASE_SPEED: f32 = 6.0;
    /// Chaser speed gained per minute of run time
    pub const CHASER_SPEED_RAMP_PER_MIN: f32 = 6.0;
    /// Hard ceiling on chaser speed so long runs stay playable
    pub const CHASER_SPEED_MAX: f32 = 18.0;
    /// Lane-homing rate while a chaser is inside the hit zone (lanes/sec)
    pub const CHASER_HOMING_PER_SEC: f32 = 2.0;
    /// Chasers spawn this far ahead of the player
    pub const CHASER_SPAWN_DISTANCE: f32 = 50.0;
    /// Chaser spawn interval at run start (ms)
    pub const CHASER_SPAWN_INTERVAL_MS: f64 = 8_000.0;
    /// Interval shortening per minute of run time (ms)
    pub const CHASER_SPAWN_RAMP_MS_PER_MIN: f64 = 2_500.0;
    /// Floor on the chaser spawn interval (ms)
    pub const CHASER_SPAWN_INTERVAL_MIN_MS: f64 = 3_000.0;

    /// Per-kind inventory cap
    pub const INVENTORY_CAP: u8 = 9;
    /// Tiles consumed by one match
    pub const MATCH_SIZE: u8 = 3;
    /// Vocal match: chaser stun duration (ms)
    pub const MATCH_STUN_MS: f64 = 3_000.0;
    /// Vocal match: chase-budget restore
    pub const MATCH_CHASE_RESTORE: f32 = 25.0;
    /// Bass match: energy restore
    pub const MATCH_ENERGY_RESTORE: f32 = 30.0;

    /// Score multiplier floor
    pub const MULTIPLIER_MIN: f32 = 1.0;
    /// Score multiplier cap
    pub const MULTIPLIER_MAX: f32 = 5.0;
    /// Multiplier gained per Beat match
    pub const MULTIPLIER_STEP: f32 = 0.5;
    /// Energy cap
    pub const ENERGY_MAX: f32 = 100.0;

    /// Beat cycle length (ms); 120 BPM
    pub const BEAT_INTERVAL_MS: f64 = 500.0;
    /// Early fraction of the cycle treated as "on-beat"
    pub const BEAT_WINDOW: f32 = 0.25;
    /// Score factor for beat-aligned collection
    pub const BEAT_BONUS: f32 = 1.2;
    /// Lane switches within this long of a window boundary count as on-beat (ms)
    pub const BEAT_GRACE_MS: f64 = 150.0;
    /// On-beat lane switch: temporary multiplier bump
    pub const BEAT_BOOST_AMOUNT: f32 = 0.25;
    /// Duration of the on-beat multiplier bump (ms)
    pub const BEAT_BOOST_MS: f64 = 2_000.0;

    /// Maze visit time limit before the forced return to the runner (ms)
    pub const MAZE_TIME_LIMIT_MS: f64 = 20_000.0;
    /// Maze chaser step cadence (ms)
    pub const MAZE_CHASER_STEP_MS: f64 = 350.0;
    /// Chaser steps skipped after the player eats a power pellet
    pub const POWER_PELLET_FREEZE_STEPS: u8 = 6;
    /// Plain pellet base points
    pub const PELLET_POINTS: u64 = 5;
    /// Power pellet base points
    pub const POWER_PELLET_POINTS: u64 = 25;
    /// Bonus for reaching the maze exit before the deadline
    pub const MAZE_EXIT_BONUS: u64 = 150;

    /// Surge ability: energy cost
    pub const SURGE_ENERGY_COST: f32 = 40.0;
    /// Surge ability: cooldown (ms)
    pub const SURGE_COOLDOWN_MS: f64 = 6_000.0;
    /// Focus ability: energy cost
    pub const FOCUS_ENERGY_COST: f32 = 25.0;
    /// Focus ability: cooldown (ms)
    pub const FOCUS_COOLDOWN_MS: f64 = 3_500.0;

    /// Minimum pointer travel before a gesture counts as a swipe (px)
    pub const SWIPE_MIN_DISTANCE: f32 = 24.0;

    /// "Perfect" flash duration after an on-beat lane switch (ms)
    pub const PERFECT_FLASH_MS: f64 = 600.0;
    /// Beat pulse hint duration (ms)
    pub const BEAT_PULSE_MS: f64 = 120.0;
    /// Match flash hint duration (ms)
    pub const MATCH_FLASH_MS: f64 = 800.0;
}

/// One-time platform setup for the embedding page (logging + panic hook).
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(js_name = initEngine)]
pub fn init_engine() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// One-time logging setup for native harnesses.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_engine() {
    let _ = env_logger::Builder::from_default_env().try_init();
}
