use crate::runner::expect::ExpectedOutcome;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutcomeStatus {
    Passed,
    Failed,
}

impl OutcomeStatus {
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            Self::Passed
        } else {
            Self::Failed
        }
    }
}

/// A single recorded assertion result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestOutcome {
    pub test_name: String,
    pub status: OutcomeStatus,
    pub timestamp: String,
    /// `None` when no HTTP response was obtained
    pub observed_status_code: Option<u16>,
    pub expected_status_code: ExpectedOutcome,
    pub response_body: Value,
    pub notes: String,
}

impl TestOutcome {
    pub fn passed(&self) -> bool {
        self.status == OutcomeStatus::Passed
    }
}

/// Aggregated results of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub session_id: String,
    pub generated_at: String,
    pub total_count: usize,
    pub passed_count: usize,
    pub failed_count: usize,
    /// Percentage in [0, 100], stored unrounded
    pub success_rate: f64,
    pub outcomes: Vec<TestOutcome>,
}
