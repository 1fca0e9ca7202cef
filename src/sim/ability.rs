//! Energy and per-ability cooldown accounting
//!
//! Activation is a resource gate only: deduct the cost, start the cooldown.
//! Rejected activations (broke, or still cooling down) are silent no-ops.

use super::state::{AbilityKind, GameState};

/// Attempt to activate an ability. Returns true if the activation succeeded.
pub fn activate(state: &mut GameState, kind: AbilityKind) -> bool {
    let clock = state.clock_ms;
    let energy = state.energy;
    let Some(slot) = state.abilities.iter_mut().find(|s| s.kind == kind) else {
        return false;
    };
    if energy < kind.energy_cost() || clock < slot.ready_at_ms {
        return false;
    }
    slot.ready_at_ms = clock + kind.cooldown_ms();
    state.energy -= kind.energy_cost();
    true
}
