use serde::{Deserialize, Serialize};

use crate::{
    extract::WorkloadInputs,
    types::{AdvisoryAction, FacilityState, KpiSnapshot, Recommendation, SimulationResult},
    workload::{WorkloadDecision, WorkloadOutcome},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub report_version: String,
    pub inputs: Inputs,
    pub kpis: KpiSnapshot,
    pub recommendations: Vec<Recommendation>,
    pub simulation: SimulationResult,
    pub advisory: Vec<AdvisoryAction>,
    pub workload: Option<WorkloadSection>,
    pub gate: Option<GateResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inputs {
    pub facility: FacilityState,
    pub note_sources: Vec<String>,
}

/// Present only when benchmark figures were found in the scanned notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadSection {
    pub inputs: WorkloadInputs,
    pub outcome: WorkloadOutcome,
    pub decision: Option<WorkloadDecision>,
}

/// Result of the optional PUE target gate (CI-style pass/fail).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateResult {
    pub target_pue: f64,
    pub pass: bool,
    pub reason: String,
}

impl AuditReport {
    pub fn to_markdown(&self) -> String {
        let mut s = String::new();
        s.push_str("# greendc audit report\n\n");
        s.push_str(&format!("- report_version: `{}`\n", self.report_version));
        if !self.inputs.note_sources.is_empty() {
            s.push_str("- note_sources:\n");
            for src in &self.inputs.note_sources {
                s.push_str(&format!("  - {}\n", src));
            }
        }
        s.push('\n');

        s.push_str("## KPIs\n\n");
        s.push_str(&format!("- pue: `{:.2}`\n", self.kpis.pue));
        s.push_str(&format!("- dcie: `{:.1}%`\n", self.kpis.dcie));
        s.push_str(&format!("- co2_tonnes: `{:.1}`\n", self.kpis.co2_tonnes));
        s.push('\n');

        s.push_str("## Recommendations\n\n");
        for r in &self.recommendations {
            s.push_str(&format!(
                "### {} (~{:.1}%)\n- {}\n\n",
                r.title, r.estimated_saving_pct, r.reason
            ));
        }

        s.push_str("## Projected savings\n\n");
        s.push_str(&format!(
            "- initial_energy_mwh: `{:.1}`\n",
            self.simulation.initial_energy_mwh
        ));
        s.push_str(&format!(
            "- remaining_energy_mwh: `{:.1}`\n",
            self.simulation.remaining_energy_mwh
        ));
        s.push_str(&format!(
            "- total_savings_mwh: `{:.1}`\n",
            self.simulation.total_savings_mwh
        ));
        s.push_str(&format!(
            "- total_savings_pct: `{:.1}%`\n",
            self.simulation.total_savings_pct
        ));
        s.push('\n');

        s.push_str("## Advisory plan\n\n");
        if self.advisory.is_empty() {
            s.push_str("- No rule triggered. Keep monitoring and maintain current practices.\n");
        } else {
            for a in &self.advisory {
                s.push_str(&format!(
                    "- {} (~{:.0}%): {}\n",
                    a.action, a.estimated_saving_pct, a.justification
                ));
            }
        }
        s.push('\n');

        if let Some(w) = &self.workload {
            s.push_str("## Workload comparison\n\n");
            match &w.outcome {
                WorkloadOutcome::MissingInputs { missing } => {
                    s.push_str(&format!("- missing core values: {}\n", missing.join(", ")));
                }
                WorkloadOutcome::Complete { results } => {
                    s.push_str(&format!(
                        "- gpu_time_h: `{:.3}` / edge_time_h: `{:.3}`\n",
                        results.gpu_time_h, results.edge_time_h
                    ));
                    s.push_str(&format!(
                        "- gpu_energy_kwh: `{:.3}` / edge_energy_kwh: `{:.3}`\n",
                        results.gpu_energy_kwh, results.edge_energy_kwh
                    ));
                    s.push_str(&format!(
                        "- energy_per_inference_wh: gpu `{:.6}` / edge `{:.6}`\n",
                        results.gpu_energy_per_inference_wh, results.edge_energy_per_inference_wh
                    ));
                    match results.gpu_cost_eur {
                        Some(c) => s.push_str(&format!("- gpu_cost_eur: `{:.2}`\n", c)),
                        None => s.push_str("- gpu_cost_eur: n/a\n"),
                    }
                    match results.edge_cost_eur {
                        Some(c) => s.push_str(&format!("- edge_cost_eur: `{:.2}`\n", c)),
                        None => s.push_str("- edge_cost_eur: n/a\n"),
                    }
                    if let Some(d) = &w.decision {
                        s.push_str(&format!("- fastest: {}\n", d.fastest));
                        s.push_str(&format!(
                            "- lowest energy per inference: {}\n",
                            d.lowest_energy_per_inference
                        ));
                        match &d.lowest_cost_at_scale {
                            Some(p) => s.push_str(&format!("- lowest cost at scale: {}\n", p)),
                            None => {
                                s.push_str("- cost comparison: n/a (missing cost inputs)\n")
                            }
                        }
                        if let Some(flips) = d.ranking_flips_at_double_scale {
                            s.push_str(&format!(
                                "- does ranking change if N doubles? {}\n",
                                if flips { "yes" } else { "no" }
                            ));
                        }
                    }
                }
            }
            s.push('\n');
        }

        if let Some(g) = &self.gate {
            s.push_str("## PUE gate\n\n");
            s.push_str(&format!("- target_pue: `{:.2}`\n", g.target_pue));
            s.push_str(&format!("- pass: `{}`\n", g.pass));
            s.push_str(&format!("- reason: `{}`\n", g.reason));
            s.push('\n');
        }

        s
    }
}
