use super::types::{OutcomeStatus, Report};
use colored::Colorize;
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

/// Human-readable summary: totals first, then one line per outcome
pub fn render(report: &Report) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "{}", "PET-STORE USER API TEST REPORT".bold());
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Report date: {}", report.generated_at);
    let _ = writeln!(out, "Session:     {}", report.session_id.dimmed());
    let _ = writeln!(out, "Total:       {}", report.total_count);
    let _ = writeln!(out, "Passed:      {}", report.passed_count.to_string().green());
    let _ = writeln!(out, "Failed:      {}", report.failed_count.to_string().red());
    let _ = writeln!(out, "Success rate: {:.2}%", report.success_rate);
    let _ = writeln!(out, "{}", rule);

    for outcome in &report.outcomes {
        match outcome.status {
            OutcomeStatus::Passed => {
                let _ = writeln!(out, "✅ {}: {}", outcome.test_name, "PASSED".green());
            }
            OutcomeStatus::Failed => {
                let observed = outcome
                    .observed_status_code
                    .map(|code| code.to_string())
                    .unwrap_or_else(|| "no response".to_string());
                let _ = writeln!(out, "❌ {}: {}", outcome.test_name, "FAILED".red());
                let _ = writeln!(
                    out,
                    "   Expected: {}, Observed: {}",
                    outcome.expected_status_code, observed
                );
                let _ = writeln!(out, "   Notes: {}", outcome.notes);
            }
        }
    }

    out
}

pub fn print(report: &Report) {
    print!("{}", render(report));
}
