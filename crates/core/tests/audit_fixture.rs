use std::path::Path;

use greendc_core::types::FacilityState;
use greendc_core::workload::WorkloadOutcome;
use greendc_core::{run_audit, AuditOptions};

fn fixture_opts() -> AuditOptions {
    AuditOptions {
        notes_dir: Some(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/sample_audit"),
        ),
        ..AuditOptions::default()
    }
}

#[test]
fn notes_override_manual_state_and_derive_kpis() {
    // Manual inputs deliberately disagree with the notes.
    let manual = FacilityState {
        it_energy_mwh: 100.0,
        total_energy_mwh: 100.0,
        ..FacilityState::default()
    };

    let report = run_audit(&manual, fixture_opts()).unwrap();

    assert_eq!(report.inputs.facility.it_energy_mwh, 780.0);
    assert_eq!(report.inputs.facility.total_energy_mwh, 1300.0);
    // Derived from the energies, not the vendor-reported PUE 1.45.
    assert!((report.kpis.pue - 1300.0 / 780.0).abs() < 1e-9);
    assert!((report.kpis.dcie - 60.0).abs() < 1e-9);
    assert!((report.kpis.co2_tonnes - 390.0).abs() < 1e-9);

    assert!(report
        .inputs
        .note_sources
        .iter()
        .any(|s| s.contains("audit_notes.txt")));
}

#[test]
fn fixture_state_triggers_all_audit_rules() {
    let report = run_audit(&FacilityState::default(), fixture_opts()).unwrap();

    let titles: Vec<&str> = report
        .recommendations
        .iter()
        .map(|r| r.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Server consolidation",
            "Raise cooling setpoint",
            "Hot/cold aisle containment",
            "Increase virtualization",
        ]
    );

    let expected_remaining = 1300.0 * 0.92 * 0.94 * 0.95 * 0.93;
    assert!((report.simulation.remaining_energy_mwh - expected_remaining).abs() < 1e-6);
}

#[test]
fn benchmark_notes_produce_complete_workload_section() {
    let report = run_audit(&FacilityState::default(), fixture_opts()).unwrap();

    let workload = report.workload.expect("workload section");
    let WorkloadOutcome::Complete { results } = &workload.outcome else {
        panic!("expected complete workload outcome");
    };
    assert!((results.gpu_time_h - 1_000_000.0 * 0.012 / 3600.0).abs() < 1e-9);
    assert!(results.gpu_cost_eur.is_some());
    assert!(results.edge_cost_eur.is_some());

    let decision = workload.decision.expect("decision");
    assert!(decision.lowest_cost_at_scale.is_some());
    assert!(decision.ranking_flips_at_double_scale.is_some());
}

#[test]
fn missing_notes_dir_is_an_error() {
    let opts = AuditOptions {
        notes_dir: Some(Path::new("no/such/dir").to_path_buf()),
        ..AuditOptions::default()
    };
    let err = run_audit(&FacilityState::default(), opts).unwrap_err();
    assert!(format!("{:#}", err).contains("failed to scan notes"));
}

#[test]
fn byte_cap_limits_scanning() {
    let opts = AuditOptions {
        max_total_bytes_scanned: 1,
        ..fixture_opts()
    };
    let report = run_audit(&FacilityState::default(), opts).unwrap();
    // Nothing fits under the cap, so manual defaults survive untouched.
    assert!(report.inputs.note_sources.is_empty());
    assert!(report.workload.is_none());
}
