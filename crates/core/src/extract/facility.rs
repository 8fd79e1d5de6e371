use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::kpi;
use crate::types::FacilityState;

/// Facility metrics recognized in free-form text. Every field is optional:
/// `None` means "not found in the text", never zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedMetrics {
    pub pue: Option<f64>,
    pub dcie: Option<f64>,
    pub co2_tonnes: Option<f64>,
    pub it_energy_mwh: Option<f64>,
    pub total_energy_mwh: Option<f64>,
    pub cpu_utilization_pct: Option<f64>,
    pub cooling_setpoint_c: Option<f64>,
    pub virtualization_level_pct: Option<f64>,
    pub carbon_factor_kg_per_kwh: Option<f64>,
    pub latency_ms: Option<f64>,
    pub energy_wh_per_inference: Option<f64>,
    pub energy_kwh_per_inference: Option<f64>,
    pub cost_eur_per_million_inferences: Option<f64>,
}

impl ExtractedMetrics {
    pub fn is_empty(&self) -> bool {
        self.pue.is_none()
            && self.dcie.is_none()
            && self.co2_tonnes.is_none()
            && self.it_energy_mwh.is_none()
            && self.total_energy_mwh.is_none()
            && self.cpu_utilization_pct.is_none()
            && self.cooling_setpoint_c.is_none()
            && self.virtualization_level_pct.is_none()
            && self.carbon_factor_kg_per_kwh.is_none()
            && self.latency_ms.is_none()
            && self.energy_wh_per_inference.is_none()
            && self.energy_kwh_per_inference.is_none()
            && self.cost_eur_per_million_inferences.is_none()
    }

    /// Fills in fields still absent from `self`. Values already present
    /// win, so earlier sources take precedence over later ones.
    pub fn merge_missing(&mut self, other: &ExtractedMetrics) {
        fn fill(dst: &mut Option<f64>, src: Option<f64>) {
            if dst.is_none() {
                *dst = src;
            }
        }
        fill(&mut self.pue, other.pue);
        fill(&mut self.dcie, other.dcie);
        fill(&mut self.co2_tonnes, other.co2_tonnes);
        fill(&mut self.it_energy_mwh, other.it_energy_mwh);
        fill(&mut self.total_energy_mwh, other.total_energy_mwh);
        fill(&mut self.cpu_utilization_pct, other.cpu_utilization_pct);
        fill(&mut self.cooling_setpoint_c, other.cooling_setpoint_c);
        fill(
            &mut self.virtualization_level_pct,
            other.virtualization_level_pct,
        );
        fill(
            &mut self.carbon_factor_kg_per_kwh,
            other.carbon_factor_kg_per_kwh,
        );
        fill(&mut self.latency_ms, other.latency_ms);
        fill(
            &mut self.energy_wh_per_inference,
            other.energy_wh_per_inference,
        );
        fill(
            &mut self.energy_kwh_per_inference,
            other.energy_kwh_per_inference,
        );
        fill(
            &mut self.cost_eur_per_million_inferences,
            other.cost_eur_per_million_inferences,
        );
    }

    /// Overrides the manual facility inputs with whatever was extracted.
    /// Document-sourced values win, field by field.
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
        if let Some(v) = self.virtualization_level_pct {
            state.virtualization_level_pct = v;
        }
    }
}

// One pattern per field: anchored label token, a bounded run of non-numeric
// filler, a decimal capture, and (where needed) a trailing unit token that
// disambiguates similarly labeled fields.
struct FacilityPatterns {
    pue: Regex,
    dcie: Regex,
    co2_tonnes: Regex,
    it_energy_mwh: Regex,
    total_energy_mwh: Regex,
    cpu_utilization_pct: Regex,
    cooling_setpoint_c: Regex,
    virtualization_level_pct: Regex,
    carbon_factor_kg_per_kwh: Regex,
    latency_ms: Regex,
    energy_wh_per_inference: Regex,
    energy_kwh_per_inference: Regex,
    cost_eur_per_million_inferences: Regex,
}

static PATTERNS: Lazy<FacilityPatterns> = Lazy::new(|| {
    let re = |p: &str| Regex::new(p).expect("valid regex");
    FacilityPatterns {
        pue: re(r"(?i)\bPUE\b[^0-9]{0,20}([0-9]+(?:\.[0-9]+)?)"),
        dcie: re(r"(?i)\bDCiE\b[^0-9]{0,20}([0-9]+(?:\.[0-9]+)?)"),
        co2_tonnes: re(r"(?i)\bCO2\b[^0-9]{0,20}([0-9]+(?:\.[0-9]+)?)\s*(?:t|tonnes)"),
        it_energy_mwh: re(
            r"(?i)\bIT\s*energy(?:\s*consumption)?\b[^0-9]{0,80}([0-9]+(?:\.[0-9]+)?)\s*MWh",
        ),
        total_energy_mwh: re(
            r"(?i)\bTotal\s*(?:data\s*center\s*)?energy(?:\s*consumption)?\b[^0-9]{0,80}([0-9]+(?:\.[0-9]+)?)\s*MWh",
        ),
        cpu_utilization_pct: re(r"(?i)\bCPU\b[^0-9]{0,10}([0-9]+(?:\.[0-9]+)?)\s*%?"),
        cooling_setpoint_c: re(r"(?i)\bCooling\s*Setpoint\b[^0-9]{0,10}([0-9]+(?:\.[0-9]+)?)"),
        virtualization_level_pct: re(r"(?i)\bVirtualization\b[^0-9]{0,10}([0-9]+(?:\.[0-9]+)?)\s*%?"),
        carbon_factor_kg_per_kwh: re(
            r"(?i)\bCarbon\s*Factor\b[^0-9]{0,20}([0-9]+(?:\.[0-9]+)?)\s*(?:kg|g)?\s*CO2\s*/\s*kWh",
        ),
        latency_ms: re(r"(?i)\bLatency\b[^0-9]{0,10}([0-9]+(?:\.[0-9]+)?)\s*ms"),
        energy_wh_per_inference: re(
            r"(?i)\bEnergy\b[^0-9]{0,15}([0-9]+(?:\.[0-9]+)?)\s*Wh\s*/?\s*inference",
        ),
        energy_kwh_per_inference: re(
            r"(?i)\bEnergy\b[^0-9]{0,15}([0-9]+(?:\.[0-9]+)?)\s*kWh\s*/?\s*inference",
        ),
        cost_eur_per_million_inferences: re(
            r"(?i)\bCost\b[^0-9]{0,20}([0-9]+(?:\.[0-9]+)?)\s*€\s*/?\s*1,?000,?000\s*inferences",
        ),
    }
});

/// First match in the text wins; an unparseable capture leaves the field
/// absent without affecting any other field.
fn first_number(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|cap| cap.get(1))
        .and_then(|m| super::to_float(m.as_str()))
}

/// Scans free-form text for labeled facility metrics. Best effort and
/// partial by design: fields that do not appear stay `None`.
///
/// When both IT and total energy are found (and IT is positive), PUE and
/// DCiE are re-derived from them, overwriting any directly matched value.
pub fn extract_metrics(text: &str) -> ExtractedMetrics {
    if text.is_empty() {
        return ExtractedMetrics::default();
    }
    let p = &*PATTERNS;
    let mut metrics = ExtractedMetrics {
        pue: first_number(&p.pue, text),
        dcie: first_number(&p.dcie, text),
        co2_tonnes: first_number(&p.co2_tonnes, text),
        it_energy_mwh: first_number(&p.it_energy_mwh, text),
        total_energy_mwh: first_number(&p.total_energy_mwh, text),
        cpu_utilization_pct: first_number(&p.cpu_utilization_pct, text),
        cooling_setpoint_c: first_number(&p.cooling_setpoint_c, text),
        virtualization_level_pct: first_number(&p.virtualization_level_pct, text),
        carbon_factor_kg_per_kwh: first_number(&p.carbon_factor_kg_per_kwh, text),
        latency_ms: first_number(&p.latency_ms, text),
        energy_wh_per_inference: first_number(&p.energy_wh_per_inference, text),
        energy_kwh_per_inference: first_number(&p.energy_kwh_per_inference, text),
        cost_eur_per_million_inferences: first_number(&p.cost_eur_per_million_inferences, text),
    };

    if let (Some(it), Some(total)) = (metrics.it_energy_mwh, metrics.total_energy_mwh) {
        if it > 0.0 {
            metrics.pue = Some(total / it);
            metrics.dcie = Some(kpi::calculate_dcie(it, total));
        }
    }

    metrics
}
