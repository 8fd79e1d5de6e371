pub mod config;
pub mod extract;
pub mod kpi;
pub mod report;
pub mod rules;
pub mod simulate;
pub mod types;
pub mod workload;

use std::path::PathBuf;

use anyhow::Context;

use crate::{
    extract::ScannedNotes,
    report::{AuditReport, GateResult, Inputs, WorkloadSection},
    types::{FacilityState, KpiSnapshot},
    workload::WorkloadOutcome,
};

pub const REPORT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// Directory of text notes to extract metrics from. Extracted values
    /// override the supplied facility state, field by field.
    pub notes_dir: Option<PathBuf>,
    pub max_total_bytes_scanned: u64,
    /// When set, the report carries a pass/fail gate on the computed PUE.
    pub target_pue: Option<f64>,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            notes_dir: None,
            max_total_bytes_scanned: 50 * 1024 * 1024,
            target_pue: None,
        }
    }
}

/// Runs the full audit pipeline: optional note extraction, KPIs, rule
/// evaluation, savings simulation, advisory plan, and (when benchmark
/// figures were found) the GPU/edge workload comparison.
pub fn run_audit(state: &FacilityState, opts: AuditOptions) -> anyhow::Result<AuditReport> {
    let mut state = state.clone();

    let notes = match &opts.notes_dir {
        Some(dir) => {
            let scanned = extract::scan_notes_dir(dir, opts.max_total_bytes_scanned)
                .with_context(|| format!("failed to scan notes at {}", dir.display()))?;
            scanned.metrics.apply_to(&mut state);
            scanned
        }
        None => ScannedNotes::default(),
    };

    let kpis = KpiSnapshot::from_state(&state);

    let recommendations = rules::recommend(&state);
    let simulation = simulate::simulate_actions(state.total_energy_mwh, &recommendations);

    let advisory = rules::advisory_plan(
        state.cpu_utilization_pct,
        kpi::cooling_ratio(kpis.pue),
        kpis.pue,
    );

    let workload = if notes.workload.has_core_fields() {
        let outcome = workload::compute_workload_audit(&notes.workload);
        let decision = match &outcome {
            WorkloadOutcome::Complete { results } => Some(workload::decide(&notes.workload, results)),
            WorkloadOutcome::MissingInputs { .. } => None,
        };
        Some(WorkloadSection {
            inputs: notes.workload.clone(),
            outcome,
            decision,
        })
    } else {
        None
    };

    let gate = opts.target_pue.map(|target| {
        let pass = kpis.pue <= target;
        GateResult {
            target_pue: target,
            pass,
            reason: if pass {
                format!("pue {:.2} within target {:.2}", kpis.pue, target)
            } else {
                format!("pue {:.2} exceeds target {:.2}", kpis.pue, target)
            },
        }
    });

    Ok(AuditReport {
        report_version: REPORT_VERSION.to_string(),
        inputs: Inputs {
            facility: state,
            note_sources: notes.sources,
        },
        kpis,
        recommendations,
        simulation,
        advisory,
        workload,
        gate,
    })
}
