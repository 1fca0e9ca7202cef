//! Persistent best-score/stat record
//!
//! Persisted to LocalStorage on wasm. Read once at startup to seed the
//! engine's best score; read-modify-written by the driver when a run ends.
//! A missing or corrupt record is absent data, never an error.

use serde::{Deserialize, Serialize};

/// Lifetime stats for the mini-game
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    /// Best score across all runs
    #[serde(default)]
    pub best_score: u64,
    /// Completed (ended) runs
    #[serde(default)]
    pub runs_completed: u32,
    /// Total time spent playing, ms
    #[serde(default)]
    pub total_play_time_ms: f64,
}

impl GameStats {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "tempo_rush_stats";

    /// Parse a stored record, falling back to defaults on corrupt data
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_default()
    }

    /// Fold one completed run into the record. Returns true if the run set
    /// a new best score.
    pub fn record_run(&mut self, score: u64, play_time_ms: f64) -> bool {
        self.runs_completed += 1;
        self.total_play_time_ms += play_time_ms;
        if score > self.best_score {
            self.best_score = score;
            true
        } else {
            false
        }
    }

    /// Load the record from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                let stats = Self::from_json(&json);
                log::info!(
                    "Loaded stats: best {} over {} runs",
                    stats.best_score,
                    stats.runs_completed
                );
                return stats;
            }
        }

        log::info!("No stats record found, starting fresh");
        Self::default()
    }

    /// Save the record to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Stats saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_record_falls_back_to_defaults() {
        assert_eq!(GameStats::from_json("not json at all"), GameStats::default());
        assert_eq!(GameStats::from_json("{\"unknown\":1}"), GameStats::default());
        assert_eq!(GameStats::from_json(""), GameStats::default());
    }

    #[test]
    fn test_partial_record_fills_missing_fields() {
        let stats = GameStats::from_json("{\"best_score\":420}");
        assert_eq!(stats.best_score, 420);
        assert_eq!(stats.runs_completed, 0);
        assert_eq!(stats.total_play_time_ms, 0.0);
    }

    #[test]
    fn test_record_run_accumulates() {
        let mut stats = GameStats::default();
        assert!(stats.record_run(100, 30_000.0));
        assert!(!stats.record_run(80, 15_000.0));
        assert!(stats.record_run(150, 5_000.0));
        assert_eq!(stats.best_score, 150);
        assert_eq!(stats.runs_completed, 3);
        assert_eq!(stats.total_play_time_ms, 50_000.0);
    }

    #[test]
    fn test_round_trip() {
        let mut stats = GameStats::default();
        let _ = stats.record_run(999, 12_345.0);
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(GameStats::from_json(&json), stats);
    }
}
