use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::types::FacilityState;

/// Optional TOML configuration (`greendc.toml`). Every field is optional;
/// set values override the built-in facility defaults and are in turn
/// overridden by CLI flags.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub it_energy_mwh: Option<f64>,
    pub total_energy_mwh: Option<f64>,
    pub carbon_factor_kg_per_kwh: Option<f64>,
    pub cpu_utilization_pct: Option<f64>,
    pub cooling_setpoint_c: Option<f64>,
    pub has_aisle_containment: Option<bool>,
    pub virtualization_level_pct: Option<f64>,
    pub target_pue: Option<f64>,
    pub notes_dir: Option<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let config: Config =
            toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
        Ok(config)
    }

    pub fn discover() -> Option<Self> {
        let path = Path::new("greendc.toml");
        if path.exists() {
            Config::load(path).ok()
        } else {
            None
        }
    }

    pub fn apply_to(&self, state: &mut FacilityState) {
        if let Some(v) = self.it_energy_mwh {
            state.it_energy_mwh = v;
        }
        if let Some(v) = self.total_energy_mwh {
            state.total_energy_mwh = v;
        }
        if let Some(v) = self.carbon_factor_kg_per_kwh {
            state.carbon_factor_kg_per_kwh = v;
        }
        if let Some(v) = self.cpu_utilization_pct {
            state.cpu_utilization_pct = v;
        }
        if let Some(v) = self.cooling_setpoint_c {
            state.cooling_setpoint_c = v;
        }
        if let Some(v) = self.has_aisle_containment {
            state.has_aisle_containment = v;
        }
        if let Some(v) = self.virtualization_level_pct {
            state.virtualization_level_pct = v;
        }
    }
}
