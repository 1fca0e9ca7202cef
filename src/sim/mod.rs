//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, carried inside the state
//! - Every timer folded into the state (no hidden module-level variables)
//! - One synchronous tick per driver pulse; no platform dependencies

pub mod ability;
pub mod beat;
pub mod chaser;
pub mod inventory;
pub mod maze;
pub mod runner;
pub mod state;
pub mod tick;

pub use inventory::Inventory;
pub use maze::{CellCoord, MazeState, MoveResult, PelletKind};
pub use state::{
    AbilityKind, AbilitySlot, Chaser, EntityKind, GamePhase, GameState, LaneEntity, MatchFlash,
    Segment, TileKind,
};
pub use tick::tick;
