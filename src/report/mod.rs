pub mod console;
pub mod json;
pub mod junit;
pub mod types;

use anyhow::{Context, Result};
use chrono::{Local, SecondsFormat};
use std::path::Path;
use uuid::Uuid;

pub use types::{OutcomeStatus, Report, TestOutcome};

impl Report {
    /// Aggregate a snapshot of outcomes. Pure apart from stamping the time
    /// and a fresh session id.
    pub fn build(outcomes: &[TestOutcome]) -> Self {
        let total_count = outcomes.len();
        let passed_count = outcomes.iter().filter(|o| o.passed()).count();
        let failed_count = total_count - passed_count;

        Self {
            session_id: Uuid::new_v4().to_string(),
            generated_at: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            total_count,
            passed_count,
            failed_count,
            success_rate: success_rate(passed_count, total_count),
            outcomes: outcomes.to_vec(),
        }
    }
}

/// Percentage of passed outcomes, 0 for an empty run
pub fn success_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        passed as f64 / total as f64 * 100.0
    }
}

/// Load a report previously written by `json::write`
pub fn load(path: &Path) -> Result<Report> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read report: {}", path.display()))?;
    let report = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse report: {}", path.display()))?;
    Ok(report)
}

/// Write the JSON report (and the JUnit file when requested), then print
/// the console summary
pub fn publish(report: &Report, json_path: &Path, junit_path: Option<&Path>) -> Result<()> {
    json::write(report, json_path)?;
    if let Some(path) = junit_path {
        junit::write_report(report, path)?;
    }
    console::print(report);
    Ok(())
}
