use greendc_core::extract::{extract_metrics, extract_workload_inputs, to_float};

#[test]
fn derived_pue_overrides_direct_match() {
    let text = "PUE 1.45, IT energy 780 MWh, Total energy 1300 MWh";
    let metrics = extract_metrics(text);

    assert_eq!(metrics.it_energy_mwh, Some(780.0));
    assert_eq!(metrics.total_energy_mwh, Some(1300.0));
    assert!((metrics.pue.unwrap() - 1300.0 / 780.0).abs() < 1e-9);
    assert!((metrics.dcie.unwrap() - 60.0).abs() < 1e-9);
}

#[test]
fn long_label_variants_are_recognized() {
    let text = "Total data center energy consumption was measured at 1450.5 MWh";
    let metrics = extract_metrics(text);
    assert_eq!(metrics.total_energy_mwh, Some(1450.5));
}

#[test]
fn unlabeled_numbers_are_ignored() {
    let metrics = extract_metrics("The hall hosts 320 servers across 12 rows.");
    assert!(metrics.is_empty());
}

#[test]
fn to_float_locale_cases() {
    assert_eq!(to_float("1,234.5"), Some(1234.5));
    assert_eq!(to_float("1,5"), Some(1.5));
    assert_eq!(to_float("2,500,000"), Some(2_500_000.0));
    assert_eq!(to_float("abc"), None);
}

#[test]
fn workload_and_facility_fields_coexist_in_one_text() {
    let text = "Audit context: CPU 55 %, PUE 1.3. Benchmark: N = 2000 inferences, \
                P_gpu 250 W, L_gpu 10 ms";
    let metrics = extract_metrics(text);
    let workload = extract_workload_inputs(text);

    assert_eq!(metrics.cpu_utilization_pct, Some(55.0));
    assert_eq!(metrics.pue, Some(1.3));
    assert_eq!(workload.n_inferences, Some(2000.0));
    assert_eq!(workload.gpu_power_w, Some(250.0));
    assert_eq!(workload.gpu_latency_ms, Some(10.0));
    assert_eq!(workload.edge_power_w, None);
}
