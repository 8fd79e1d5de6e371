//! Efficiency KPI formulas. All functions are total: degenerate
//! denominators fall back to 0.0 instead of producing inf/NaN.

use crate::types::{FacilityState, KpiSnapshot};

/// Power Usage Effectiveness: total facility energy over IT energy.
/// 1.0 is ideal, lower is better. Returns 0.0 when IT energy is not positive.
pub fn calculate_pue(it_energy_mwh: f64, total_energy_mwh: f64) -> f64 {
    if it_energy_mwh <= 0.0 {
        return 0.0;
    }
    total_energy_mwh / it_energy_mwh
}

/// Data Center infrastructure Efficiency: inverse-percentage form of PUE.
pub fn calculate_dcie(it_energy_mwh: f64, total_energy_mwh: f64) -> f64 {
    if total_energy_mwh <= 0.0 {
        return 0.0;
    }
    (it_energy_mwh / total_energy_mwh) * 100.0
}

/// Annual emissions in tonnes. MWh -> kWh, then kg CO2, then tonnes.
pub fn calculate_co2_tonnes(total_energy_mwh: f64, carbon_factor_kg_per_kwh: f64) -> f64 {
    let total_kwh = total_energy_mwh * 1000.0;
    let kg_co2 = total_kwh * carbon_factor_kg_per_kwh;
    kg_co2 / 1000.0
}

/// Share of energy spent outside IT, as a percentage: `100 * (1 - 1/PUE)`.
/// Feeds the advisory rule table.
pub fn cooling_ratio(pue: f64) -> f64 {
    if pue <= 0.0 {
        return 0.0;
    }
    100.0 * (1.0 - 1.0 / pue)
}

impl KpiSnapshot {
    pub fn from_state(state: &FacilityState) -> Self {
        Self {
            pue: calculate_pue(state.it_energy_mwh, state.total_energy_mwh),
            dcie: calculate_dcie(state.it_energy_mwh, state.total_energy_mwh),
            co2_tonnes: calculate_co2_tonnes(
                state.total_energy_mwh,
                state.carbon_factor_kg_per_kwh,
            ),
        }
    }
}
