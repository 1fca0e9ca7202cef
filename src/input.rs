//! Discrete input actions
//!
//! The engine consumes at most one action per tick. Actions come from
//! directional keys, on-screen buttons, or pointer/swipe gestures; the swipe
//! helper here turns a raw gesture delta into an action, so the host only
//! forwards pointer math.

use serde::{Deserialize, Serialize};

use crate::consts::SWIPE_MIN_DISTANCE;
use crate::sim::{AbilityKind, Segment};

/// The closed set of input actions. Anything else the host sees is dropped
/// before it reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Switch one lane left (runner segment)
    LaneLeft,
    /// Switch one lane right (runner segment)
    LaneRight,
    /// Step up (maze segment)
    MoveUp,
    /// Step down (maze segment)
    MoveDown,
    /// Step left (maze segment)
    MoveLeft,
    /// Step right (maze segment)
    MoveRight,
    /// Activate an ability
    Ability(AbilityKind),
    /// Pause/resume toggle
    Pause,
    /// Start the run, or reset after a run ends
    Confirm,
}

/// Disambiguate a pointer gesture into an action. Gestures shorter than the
/// minimum distance on both axes are ignored; otherwise the dominant axis
/// wins. Screen coordinates: positive dy points down.
pub fn swipe_action(dx: f32, dy: f32, segment: Segment) -> Option<Action> {
    if dx.abs() < SWIPE_MIN_DISTANCE && dy.abs() < SWIPE_MIN_DISTANCE {
        return None;
    }
    let horizontal = dx.abs() >= dy.abs();
    match segment {
        Segment::Runner => {
            // Vertical swipes have no runner meaning
            if !horizontal {
                return None;
            }
            Some(if dx < 0.0 {
                Action::LaneLeft
            } else {
                Action::LaneRight
            })
        }
        Segment::Maze => Some(if horizontal {
            if dx < 0.0 {
                Action::MoveLeft
            } else {
                Action::MoveRight
            }
        } else if dy < 0.0 {
            Action::MoveUp
        } else {
            Action::MoveDown
        }),
    }
}
