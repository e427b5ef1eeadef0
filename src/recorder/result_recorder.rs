use chrono::{Local, SecondsFormat};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::client::ApiResponse;
use crate::report::types::{OutcomeStatus, TestOutcome};
use crate::runner::expect::ExpectedOutcome;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed response body for '{test_name}' (status {status}): {source}")]
    MalformedBody {
        test_name: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

/// Ordered, append-only store of outcomes for one run
#[derive(Debug, Default)]
pub struct ResultRecorder {
    outcomes: Vec<TestOutcome>,
}

impl ResultRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a judged response. Empty bodies are stored as `{}`; a non-empty
    /// body that is not JSON is rejected and nothing is appended.
    pub fn record(
        &mut self,
        test_name: &str,
        status: OutcomeStatus,
        response: &ApiResponse,
        expected: ExpectedOutcome,
        notes: &str,
    ) -> Result<(), RecordError> {
        let response_body = parse_body(&response.body).map_err(|source| {
            RecordError::MalformedBody {
                test_name: test_name.to_string(),
                status: response.status,
                source,
            }
        })?;

        self.push(TestOutcome {
            test_name: test_name.to_string(),
            status,
            timestamp: now(),
            observed_status_code: Some(response.status),
            expected_status_code: expected,
            response_body,
            notes: notes.to_string(),
        });
        Ok(())
    }

    /// Record a step that produced no usable response
    pub fn record_transport_failure(
        &mut self,
        test_name: &str,
        expected: ExpectedOutcome,
        observed_status: Option<u16>,
        note: &str,
    ) {
        self.push(TestOutcome {
            test_name: test_name.to_string(),
            status: OutcomeStatus::Failed,
            timestamp: now(),
            observed_status_code: observed_status,
            expected_status_code: expected,
            response_body: empty_body(),
            notes: note.to_string(),
        });
    }

    pub fn outcomes(&self) -> &[TestOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn into_outcomes(self) -> Vec<TestOutcome> {
        self.outcomes
    }

    fn push(&mut self, outcome: TestOutcome) {
        log::info!("{}: {:?}", outcome.test_name, outcome.status);
        self.outcomes.push(outcome);
    }
}

fn parse_body(body: &str) -> Result<Value, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(empty_body());
    }
    serde_json::from_str(body)
}

fn empty_body() -> Value {
    Value::Object(Map::new())
}

fn now() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Millis, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_empty_body_becomes_empty_object() {
        let mut recorder = ResultRecorder::new();
        recorder
            .record(
                "delete_missing",
                OutcomeStatus::Passed,
                &response(404, "  \n"),
                ExpectedOutcome::ExactStatus(404),
                "",
            )
            .unwrap();

        let outcome = &recorder.outcomes()[0];
        assert_eq!(outcome.response_body, json!({}));
        assert_eq!(outcome.observed_status_code, Some(404));
        assert!(chrono::DateTime::parse_from_rfc3339(&outcome.timestamp).is_ok());
    }

    #[test]
    fn test_json_body_is_parsed() {
        let mut recorder = ResultRecorder::new();
        recorder
            .record(
                "create",
                OutcomeStatus::Passed,
                &response(200, r#"{"code":200,"type":"unknown","message":"1234"}"#),
                ExpectedOutcome::ExactStatus(200),
                "",
            )
            .unwrap();
        assert_eq!(recorder.outcomes()[0].response_body["message"], "1234");
    }

    #[test]
    fn test_malformed_body_is_rejected() {
        let mut recorder = ResultRecorder::new();
        let err = recorder
            .record(
                "logout",
                OutcomeStatus::Passed,
                &response(200, "<html>"),
                ExpectedOutcome::ExactStatus(200),
                "",
            )
            .unwrap_err();
        assert!(matches!(err, RecordError::MalformedBody { status: 200, .. }));
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut recorder = ResultRecorder::new();
        for i in 0..5 {
            recorder
                .record(
                    &format!("step_{}", i),
                    OutcomeStatus::from_passed(i % 2 == 0),
                    &response(200, ""),
                    ExpectedOutcome::ExactStatus(200),
                    "",
                )
                .unwrap();
        }
        recorder.record_transport_failure(
            "step_5",
            ExpectedOutcome::ExactStatus(200),
            None,
            "transport error: connection refused",
        );

        let names: Vec<_> = recorder
            .outcomes()
            .iter()
            .map(|o| o.test_name.as_str())
            .collect();
        assert_eq!(names, ["step_0", "step_1", "step_2", "step_3", "step_4", "step_5"]);

        let last = recorder.into_outcomes().pop().unwrap();
        assert_eq!(last.status, OutcomeStatus::Failed);
        assert_eq!(last.observed_status_code, None);
    }
}
