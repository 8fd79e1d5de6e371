//! Pattern-based extraction of audit metrics from free-form text.
//!
//! Everything here is best effort: a field that cannot be found or parsed
//! is simply absent, and one bad field never aborts the rest of the scan.

mod facility;
mod workload;

use std::path::Path;

use anyhow::Context;
use walkdir::WalkDir;

pub use facility::{extract_metrics, ExtractedMetrics};
pub use workload::{extract_workload_inputs, WorkloadInputs};

/// Locale-tolerant numeric parse. Commas are disambiguated by shape:
/// together with a dot (or repeated) they are thousands separators, alone
/// without a dot a decimal separator. Returns `None` on failure; callers
/// treat that as "field not extracted".
pub fn to_float(value: &str) -> Option<f64> {
    let cleaned = value.trim().replace(' ', "");
    if cleaned.is_empty() {
        return None;
    }
    let cleaned = if cleaned.contains(',') && cleaned.contains('.') {
        cleaned.replace(',', "")
    } else if cleaned.matches(',').count() > 1 {
        cleaned.replace(',', "")
    } else if cleaned.contains(',') {
        cleaned.replace(',', ".")
    } else {
        cleaned
    };
    let cleaned: String = cleaned
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().ok()
}

/// Metrics pooled from every readable note in a directory, with the list
/// of files that contributed.
#[derive(Debug, Clone, Default)]
pub struct ScannedNotes {
    pub metrics: ExtractedMetrics,
    pub workload: WorkloadInputs,
    pub sources: Vec<String>,
}

/// Walks `input` for `.txt`/`.md` notes and extracts from each, merging
/// field-wise with first-file-wins precedence (files visited in name
/// order). Stops once `max_total_bytes` of text has been read.
pub fn scan_notes_dir(input: &Path, max_total_bytes: u64) -> anyhow::Result<ScannedNotes> {
    let mut notes = ScannedNotes::default();
    let mut scanned: u64 = 0;

    for entry in WalkDir::new(input).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if !(ext == "txt" || ext == "md") {
            continue;
        }

        let meta = std::fs::metadata(path)?;
        let len = meta.len();
        if scanned.saturating_add(len) > max_total_bytes {
            break;
        }
        scanned += len;

        let bytes =
            std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        let text = String::from_utf8_lossy(&bytes);

        notes.metrics.merge_missing(&extract_metrics(&text));
        notes.workload.merge_missing(&extract_workload_inputs(&text));
        notes.sources.push(path.display().to_string());
    }

    Ok(notes)
}
