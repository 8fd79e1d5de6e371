use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// AI-workload benchmarking inputs recognized in free-form text.
/// Each field is independently optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkloadInputs {
    pub n_inferences: Option<f64>,
    pub gpu_power_w: Option<f64>,
    pub edge_power_w: Option<f64>,
    pub gpu_latency_ms: Option<f64>,
    pub edge_latency_ms: Option<f64>,
    pub gpu_cost_eur_per_hour: Option<f64>,
    pub electricity_cost_eur_per_kwh: Option<f64>,
    pub hardware_cost_eur: Option<f64>,
    pub usage_per_day: Option<f64>,
}

impl WorkloadInputs {
    /// True when any of the core benchmarking fields was found.
    pub fn has_core_fields(&self) -> bool {
        self.n_inferences.is_some()
            || self.gpu_power_w.is_some()
            || self.edge_power_w.is_some()
            || self.gpu_latency_ms.is_some()
            || self.edge_latency_ms.is_some()
    }

    pub fn merge_missing(&mut self, other: &WorkloadInputs) {
        fn fill(dst: &mut Option<f64>, src: Option<f64>) {
            if dst.is_none() {
                *dst = src;
            }
        }
        fill(&mut self.n_inferences, other.n_inferences);
        fill(&mut self.gpu_power_w, other.gpu_power_w);
        fill(&mut self.edge_power_w, other.edge_power_w);
        fill(&mut self.gpu_latency_ms, other.gpu_latency_ms);
        fill(&mut self.edge_latency_ms, other.edge_latency_ms);
        fill(&mut self.gpu_cost_eur_per_hour, other.gpu_cost_eur_per_hour);
        fill(
            &mut self.electricity_cost_eur_per_kwh,
            other.electricity_cost_eur_per_kwh,
        );
        fill(&mut self.hardware_cost_eur, other.hardware_cost_eur);
        fill(&mut self.usage_per_day, other.usage_per_day);
    }
}

struct WorkloadPatterns {
    n_inferences: Regex,
    gpu_power_w: Regex,
    edge_power_w: Regex,
    gpu_latency_ms: Regex,
    edge_latency_ms: Regex,
    gpu_cost_eur_per_hour: Regex,
    electricity_cost_eur_per_kwh: Regex,
    hardware_cost_eur: Regex,
    usage_per_day: Regex,
}

static PATTERNS: Lazy<WorkloadPatterns> = Lazy::new(|| {
    let re = |p: &str| Regex::new(p).expect("valid regex");
    WorkloadPatterns {
        n_inferences: re(r"(?i)\bN\s*=\s*([0-9,.]+)\s*inferences"),
        gpu_power_w: re(r"(?i)\bP[_\s]*gpu\b[^0-9]{0,10}([0-9,.]+)\s*W"),
        edge_power_w: re(r"(?i)\bP[_\s]*edge\b[^0-9]{0,10}([0-9,.]+)\s*W"),
        gpu_latency_ms: re(r"(?i)\bL[_\s]*gpu\b[^0-9]{0,10}([0-9,.]+)\s*ms"),
        edge_latency_ms: re(r"(?i)\bL[_\s]*edge\b[^0-9]{0,10}([0-9,.]+)\s*ms"),
        gpu_cost_eur_per_hour: re(r"(?i)\b([0-9,.]+)\s*€\s*/\s*hour"),
        electricity_cost_eur_per_kwh: re(r"(?i)\b([0-9,.]+)\s*€\s*/\s*kWh"),
        hardware_cost_eur: re(r"(?i)\bHardware cost\b[^0-9]{0,20}([0-9,.]+)\s*€"),
        usage_per_day: re(r"(?i)\b([0-9,.]+)\s*inferences\s*/\s*day"),
    }
});

fn first_number(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|cap| cap.get(1))
        .and_then(|m| super::to_float(m.as_str()))
}

/// Scans free-form text for AI-workload benchmark figures
/// (`N = 1,000,000 inferences`, `P_gpu 300 W`, `L_edge 45 ms`, ...).
pub fn extract_workload_inputs(text: &str) -> WorkloadInputs {
    if text.is_empty() {
        return WorkloadInputs::default();
    }
    let p = &*PATTERNS;
    WorkloadInputs {
        n_inferences: first_number(&p.n_inferences, text),
        gpu_power_w: first_number(&p.gpu_power_w, text),
        edge_power_w: first_number(&p.edge_power_w, text),
        gpu_latency_ms: first_number(&p.gpu_latency_ms, text),
        edge_latency_ms: first_number(&p.edge_latency_ms, text),
        gpu_cost_eur_per_hour: first_number(&p.gpu_cost_eur_per_hour, text),
        electricity_cost_eur_per_kwh: first_number(&p.electricity_cost_eur_per_kwh, text),
        hardware_cost_eur: first_number(&p.hardware_cost_eur, text),
        usage_per_day: first_number(&p.usage_per_day, text),
    }
}
