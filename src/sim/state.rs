//! Game state and core simulation types
//!
//! Everything the tick function reads or writes lives here, including the
//! RNG and every timer. There is no hidden module-level state: the tick is a
//! total function of (state, action, now).

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::inventory::Inventory;
use super::maze::MazeState;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting on the start screen for a confirm
    Start,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended; terminal until reset
    Ended,
}

/// Which of the two gameplay segments is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Endless lane runner
    Runner,
    /// Grid maze chase, entered via a portal pickup
    Maze,
}

/// Collectible tile kinds. Order is the match-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Beat,
    Vocal,
    Synth,
    Bass,
}

impl TileKind {
    /// All kinds in match-priority order
    pub const ALL: [TileKind; 4] = [
        TileKind::Beat,
        TileKind::Vocal,
        TileKind::Synth,
        TileKind::Bass,
    ];

    /// Slot index into the inventory count array
    pub fn index(self) -> usize {
        match self {
            TileKind::Beat => 0,
            TileKind::Vocal => 1,
            TileKind::Synth => 2,
            TileKind::Bass => 3,
        }
    }

    /// Base points awarded when a tile of this kind is collected
    pub fn base_points(self) -> u64 {
        match self {
            TileKind::Beat => 10,
            TileKind::Vocal => 15,
            TileKind::Synth => 15,
            TileKind::Bass => 10,
        }
    }

    /// Base bonus points awarded when a 3-of-a-kind match resolves
    pub fn match_bonus(self) -> u64 {
        match self {
            TileKind::Beat => 50,
            TileKind::Vocal => 75,
            TileKind::Synth => 60,
            TileKind::Bass => 40,
        }
    }
}

/// What a lane entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Collectible tile, credited to the inventory on pickup
    Tile(TileKind),
    /// Ends the run if it reaches the player's lane
    Obstacle,
    /// Transitions to the maze segment on pickup
    Portal,
}

/// An entity travelling down a lane toward the player
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LaneEntity {
    pub id: u32,
    /// Lane index, 0..LANE_COUNT
    pub lane: u8,
    /// World distance; fixed for the entity's lifetime
    pub z: f32,
    pub kind: EntityKind,
}

impl LaneEntity {
    /// Distance remaining to the player
    pub fn relative_z(&self, road_offset: f32) -> f32 {
        self.z - road_offset
    }
}

/// A pursuing adversary in lane space
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Chaser {
    pub id: u32,
    /// Fractional lane; drifts toward the player only inside the hit zone
    pub lane: f32,
    /// World distance; decreases as the chaser closes in
    pub z: f32,
    /// Simulation-clock timestamp until which the chaser is stunned
    pub stun_until_ms: f64,
}

impl Chaser {
    /// Distance remaining to the player
    pub fn relative_z(&self, road_offset: f32) -> f32 {
        self.z - road_offset
    }

    /// Whether the chaser is currently stunned
    pub fn is_stunned(&self, clock_ms: f64) -> bool {
        self.stun_until_ms > clock_ms
    }
}

/// Activatable abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbilityKind {
    Surge,
    Focus,
}

impl AbilityKind {
    /// Energy deducted on activation
    pub fn energy_cost(self) -> f32 {
        match self {
            AbilityKind::Surge => SURGE_ENERGY_COST,
            AbilityKind::Focus => FOCUS_ENERGY_COST,
        }
    }

    /// Cooldown applied on activation (ms)
    pub fn cooldown_ms(self) -> f64 {
        match self {
            AbilityKind::Surge => SURGE_COOLDOWN_MS,
            AbilityKind::Focus => FOCUS_COOLDOWN_MS,
        }
    }
}

/// Per-ability cooldown tracking
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub kind: AbilityKind,
    /// Simulation-clock timestamp at which the ability is ready again
    pub ready_at_ms: f64,
}

/// Match flash hint for the presentation layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchFlash {
    pub kind: TileKind,
    pub until_ms: f64,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG carried in-state so the stream position survives snapshots
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Active gameplay segment
    pub segment: Segment,
    /// Simulation clock (ms); advances only while playing
    pub clock_ms: f64,
    /// Last driver timestamp observed by the tick
    pub last_wall_ms: f64,
    /// Elapsed run time (ms); playing only
    pub run_time_ms: f64,
    /// Cumulative forward travel
    pub road_offset: f32,
    /// Player lane index, 0..LANE_COUNT
    pub player_lane: u8,
    /// Active lane entities
    pub entities: Vec<LaneEntity>,
    /// Active chasers
    pub chasers: Vec<Chaser>,
    /// Depleting danger budget; 0 ends the run
    pub chase_distance: f32,
    /// Banked tile counts
    pub inventory: Inventory,
    /// Simulation-clock timestamp of the last beat mark
    pub last_beat_ms: f64,
    /// Beat cycle phase in [0, 1)
    pub beat_phase: f32,
    /// Score
    pub score: u64,
    /// Base score multiplier, 1..5
    pub multiplier: f32,
    /// Ability energy, 0..max
    pub energy: f32,
    /// Maze sub-game state; Some iff segment == Maze
    pub maze: Option<MazeState>,
    /// Per-ability cooldown table
    pub abilities: [AbilitySlot; 2],
    /// Best score across runs, seeded from the persistent record
    pub best_score: u64,
    /// Next lane-entity spawn (simulation clock, ms)
    pub next_spawn_ms: f64,
    /// Next chaser spawn (simulation clock, ms)
    pub next_chaser_spawn_ms: f64,
    /// On-beat lane-switch multiplier bump active until this timestamp
    pub beat_boost_until_ms: f64,
    /// UI hint: "perfect" flash after an on-beat lane switch
    pub perfect_flash_until_ms: f64,
    /// UI hint: pulse when the beat fires
    pub beat_pulse_until_ms: f64,
    /// UI hint: most recent match
    pub match_flash: Option<MatchFlash>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh run in the Start phase
    pub fn new(seed: u64, best_score: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            segment: Segment::Runner,
            clock_ms: 0.0,
            last_wall_ms: 0.0,
            run_time_ms: 0.0,
            road_offset: 0.0,
            player_lane: LANE_COUNT / 2,
            entities: Vec::new(),
            chasers: Vec::new(),
            chase_distance: CHASE_MAX,
            inventory: Inventory::default(),
            last_beat_ms: 0.0,
            beat_phase: 0.0,
            score: 0,
            multiplier: MULTIPLIER_MIN,
            energy: ENERGY_MAX,
            maze: None,
            abilities: [
                AbilitySlot {
                    kind: AbilityKind::Surge,
                    ready_at_ms: 0.0,
                },
                AbilitySlot {
                    kind: AbilityKind::Focus,
                    ready_at_ms: 0.0,
                },
            ],
            best_score,
            next_spawn_ms: SPAWN_INTERVAL_MS,
            next_chaser_spawn_ms: CHASER_SPAWN_INTERVAL_MS,
            beat_boost_until_ms: 0.0,
            perfect_flash_until_ms: 0.0,
            beat_pulse_until_ms: 0.0,
            match_flash: None,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Multiplier applied to scoring right now, including the temporary
    /// on-beat lane-switch bump. Never exceeds the cap.
    pub fn effective_multiplier(&self) -> f32 {
        let boost = if self.clock_ms < self.beat_boost_until_ms {
            BEAT_BOOST_AMOUNT
        } else {
            0.0
        };
        (self.multiplier + boost).min(MULTIPLIER_MAX)
    }
}
