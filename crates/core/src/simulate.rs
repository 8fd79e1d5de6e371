//! Sequential savings projection.

use crate::types::{Recommendation, SimulationResult};

/// Applies each recommendation's saving percentage to the energy remaining
/// after the previous ones. Compounding, not additive: 10% then 10% on a
/// baseline of 100 saves 19, not 20. Caller-supplied order is significant
/// and must not be reordered or merged.
pub fn simulate_actions(total_energy_mwh: f64, actions: &[Recommendation]) -> SimulationResult {
    let mut remaining_energy = total_energy_mwh;
    let mut total_savings_mwh = 0.0;

    for action in actions {
        let saved = remaining_energy * (action.estimated_saving_pct / 100.0);
        remaining_energy -= saved;
        total_savings_mwh += saved;
    }

    let total_savings_pct = if total_energy_mwh > 0.0 {
        total_savings_mwh / total_energy_mwh * 100.0
    } else {
        0.0
    };

    SimulationResult {
        initial_energy_mwh: total_energy_mwh,
        remaining_energy_mwh: remaining_energy,
        total_savings_mwh,
        total_savings_pct,
    }
}
