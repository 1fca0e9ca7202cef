//! Beat cycle tracking and beat-aligned scoring
//!
//! The beat runs on the simulation clock: phase = elapsed-since-last-mark /
//! interval. The early [`BEAT_WINDOW`] fraction of each cycle counts as
//! on-beat for score bonuses, and lane switches near a window boundary get a
//! rhythm grace window.

use super::state::GameState;
use crate::consts::*;

/// Advance the beat phase for the current tick. Returns true the instant the
/// phase crosses the beat-window threshold from below.
pub fn advance(state: &mut GameState) -> bool {
    let mut elapsed = state.clock_ms - state.last_beat_ms;
    if elapsed >= BEAT_INTERVAL_MS {
        let cycles = (elapsed / BEAT_INTERVAL_MS).floor();
        state.last_beat_ms += cycles * BEAT_INTERVAL_MS;
        elapsed = state.clock_ms - state.last_beat_ms;
    }
    let phase = (elapsed / BEAT_INTERVAL_MS) as f32;
    let old = state.beat_phase;
    state.beat_phase = phase;

    if phase < old {
        // Wrapped past a beat mark this tick
        phase >= BEAT_WINDOW
    } else {
        old < BEAT_WINDOW && phase >= BEAT_WINDOW
    }
}

/// Whether a beat phase is inside the on-beat window
pub fn in_window(phase: f32) -> bool {
    phase < BEAT_WINDOW
}

/// Whether a lane switch at this beat phase counts as on-beat: within the
/// grace window of either boundary of the beat window.
pub fn switch_is_on_beat(phase: f32) -> bool {
    let t = phase as f64 * BEAT_INTERVAL_MS;
    let window_end = BEAT_WINDOW as f64 * BEAT_INTERVAL_MS;
    let to_mark = t.min(BEAT_INTERVAL_MS - t);
    let to_window_end = (t - window_end).abs();
    to_mark <= BEAT_GRACE_MS || to_window_end <= BEAT_GRACE_MS
}

/// Points for a scoring event: base times the multiplier, with the beat
/// bonus applied when the event lands in the on-beat window.
pub fn score_points(base: u64, multiplier: f32, in_beat_window: bool) -> u64 {
    let bonus = if in_beat_window { BEAT_BONUS } else { 1.0 };
    (base as f32 * multiplier * bonus).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameState;

    fn state_at(clock_ms: f64, last_beat_ms: f64, beat_phase: f32) -> GameState {
        let mut state = GameState::new(1, 0);
        state.clock_ms = clock_ms;
        state.last_beat_ms = last_beat_ms;
        state.beat_phase = beat_phase;
        state
    }

    #[test]
    fn test_on_beat_fires_crossing_threshold() {
        // Phase moves from 0.2 to 0.3: crosses 0.25 from below
        let mut state = state_at(150.0, 0.0, 0.2);
        assert!(advance(&mut state));
        assert!((state.beat_phase - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_on_beat_does_not_refire_inside_cycle() {
        let mut state = state_at(200.0, 0.0, 0.3);
        assert!(!advance(&mut state));
        let mut state = state_at(60.0, 0.0, 0.1);
        assert!(!advance(&mut state));
    }

    #[test]
    fn test_on_beat_fires_across_wrap() {
        // 480ms -> 650ms wraps the 500ms cycle and lands past the threshold
        let mut state = state_at(650.0, 0.0, 0.96);
        assert!(advance(&mut state));
        assert_eq!(state.last_beat_ms, 500.0);
        assert!((state.beat_phase - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_wrap_short_of_threshold_does_not_fire() {
        let mut state = state_at(550.0, 0.0, 0.96);
        assert!(!advance(&mut state));
        assert!((state.beat_phase - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_score_points_multiplier_and_bonus() {
        assert_eq!(score_points(10, 1.0, false), 10);
        assert_eq!(score_points(10, 2.0, false), 20);
        assert_eq!(score_points(10, 1.0, true), 12);
        assert_eq!(score_points(15, 3.0, true), 54);
    }

    #[test]
    fn test_switch_grace_window() {
        // Right on the beat mark
        assert!(switch_is_on_beat(0.0));
        // Inside the window
        assert!(switch_is_on_beat(0.2));
        // Just past the window end (125ms), inside the 150ms grace
        assert!(switch_is_on_beat(0.5));
        // Mid-cycle dead zone: 300ms is 175ms from both boundaries
        assert!(!switch_is_on_beat(0.6));
        // Approaching the next mark from behind
        assert!(switch_is_on_beat(0.75));
    }
}
