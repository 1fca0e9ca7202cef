//! Banked tile counts and 3-of-a-kind match detection
//!
//! Pure leaf utility: the tick credits collected tiles here and asks for the
//! next match to resolve. Effects of a match are applied by the tick, not by
//! this module.

use serde::{Deserialize, Serialize};

use super::state::TileKind;
use crate::consts::{INVENTORY_CAP, MATCH_SIZE};

/// Per-kind banked tile counts, each capped at [`INVENTORY_CAP`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    counts: [u8; 4],
}

impl Inventory {
    /// Credit one tile of the given kind. Saturates at the per-kind cap.
    pub fn add(&mut self, kind: TileKind) {
        let slot = &mut self.counts[kind.index()];
        if *slot < INVENTORY_CAP {
            *slot += 1;
        }
    }

    /// Banked count for a kind
    pub fn count(&self, kind: TileKind) -> u8 {
        self.counts[kind.index()]
    }

    /// First kind with a full match banked, in fixed priority order
    pub fn find_match(&self) -> Option<TileKind> {
        TileKind::ALL
            .into_iter()
            .find(|&kind| self.count(kind) >= MATCH_SIZE)
    }

    /// Consume exactly one match's worth of the given kind, flooring at zero
    pub fn consume_match(&mut self, kind: TileKind) {
        let slot = &mut self.counts[kind.index()];
        *slot = slot.saturating_sub(MATCH_SIZE);
    }
}
