//! Threshold rule tables.
//!
//! Two independent tables exist on purpose. The primary table drives the
//! audit recommendations fed into the savings simulation. The advisory
//! table is the assistant-path plan and keys on different thresholds
//! (including the derived cooling ratio); it is not a duplicate.

use crate::types::{AdvisoryAction, FacilityState, Recommendation};

struct RuleDef {
    trigger: fn(&FacilityState) -> bool,
    title: &'static str,
    reason: &'static str,
    estimated_saving_pct: f64,
}

// Evaluation order is output order; all comparisons are strict.
const AUDIT_RULES: &[RuleDef] = &[
    RuleDef {
        trigger: |s| s.cpu_utilization_pct < 30.0,
        title: "Server consolidation",
        reason: "Low average CPU utilization. Consolidating shrinks the fleet and cuts idle energy losses.",
        estimated_saving_pct: 8.0,
    },
    RuleDef {
        trigger: |s| s.cooling_setpoint_c < 22.0,
        title: "Raise cooling setpoint",
        reason: "Setpoint is low. Running warmer reduces cooling plant consumption.",
        estimated_saving_pct: 6.0,
    },
    RuleDef {
        trigger: |s| !s.has_aisle_containment,
        title: "Hot/cold aisle containment",
        reason: "Uncontained airflow mixes hot and cold streams. Containment improves cooling efficiency.",
        estimated_saving_pct: 5.0,
    },
    RuleDef {
        trigger: |s| s.virtualization_level_pct < 60.0,
        title: "Increase virtualization",
        reason: "Virtualization level is low. More logical consolidation reduces the physical server count.",
        estimated_saving_pct: 7.0,
    },
];

/// Evaluates every audit rule independently (no short-circuit, rules are
/// not mutually exclusive) and returns triggered recommendations in table
/// order. Never returns an empty list: when nothing triggers, a single
/// zero-saving fallback is emitted.
pub fn recommend(state: &FacilityState) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = AUDIT_RULES
        .iter()
        .filter(|rule| (rule.trigger)(state))
        .map(|rule| Recommendation {
            title: rule.title.to_string(),
            reason: rule.reason.to_string(),
            estimated_saving_pct: rule.estimated_saving_pct,
        })
        .collect();

    if recommendations.is_empty() {
        recommendations.push(Recommendation {
            title: "Maintain current practices".to_string(),
            reason: "Indicators are already within target ranges. Keep monitoring.".to_string(),
            estimated_saving_pct: 0.0,
        });
    }

    recommendations
}

/// Advisory (assistant-path) rule table. Thresholds differ from the audit
/// table by design: CPU below 20, cooling ratio above 60, PUE above 1.6.
/// An empty result is valid and means "no rule triggered".
pub fn advisory_plan(cpu_utilization_pct: f64, cooling_ratio: f64, pue: f64) -> Vec<AdvisoryAction> {
    let mut actions = Vec::new();

    if cpu_utilization_pct < 20.0 {
        actions.push(AdvisoryAction {
            id: "CPU_LOW".to_string(),
            action: "Consolidate underutilized servers".to_string(),
            justification: "Average CPU utilization is below 20%, so much of the fleet burns energy at idle.".to_string(),
            estimated_saving_pct: 10.0,
        });
    }
    if cooling_ratio > 60.0 {
        actions.push(AdvisoryAction {
            id: "COOLING_HIGH".to_string(),
            action: "Rework airflow and cooling strategy".to_string(),
            justification: "More than 60% of facility energy is spent outside IT, dominated by cooling overhead.".to_string(),
            estimated_saving_pct: 12.0,
        });
    }
    if pue > 1.6 {
        actions.push(AdvisoryAction {
            id: "PUE_HIGH".to_string(),
            action: "Target facility-level efficiency improvements".to_string(),
            justification: "PUE above 1.6 indicates substantial non-IT overhead against the industry baseline.".to_string(),
            estimated_saving_pct: 8.0,
        });
    }

    actions
}
