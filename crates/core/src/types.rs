use serde::{Deserialize, Serialize};

/// Audit input snapshot for one facility. Immutable per evaluation cycle;
/// every derived value is recomputed from it on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityState {
    pub it_energy_mwh: f64,
    pub total_energy_mwh: f64,
    pub carbon_factor_kg_per_kwh: f64,
    pub cpu_utilization_pct: f64,
    pub cooling_setpoint_c: f64,
    pub has_aisle_containment: bool,
    pub virtualization_level_pct: f64,
}

impl Default for FacilityState {
    fn default() -> Self {
        Self {
            it_energy_mwh: 780.0,
            total_energy_mwh: 1300.0,
            carbon_factor_kg_per_kwh: 0.30,
            cpu_utilization_pct: 18.0,
            cooling_setpoint_c: 19.0,
            has_aisle_containment: false,
            virtualization_level_pct: 45.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub pue: f64,
    pub dcie: f64,
    pub co2_tonnes: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub reason: String,
    pub estimated_saving_pct: f64,
}

/// Output of the advisory rule table (assistant path). Distinct from
/// [`Recommendation`]: ids are stable keys, and an empty result is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryAction {
    pub id: String,
    pub action: String,
    pub justification: String,
    pub estimated_saving_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub initial_energy_mwh: f64,
    pub remaining_energy_mwh: f64,
    pub total_savings_mwh: f64,
    pub total_savings_pct: f64,
}
