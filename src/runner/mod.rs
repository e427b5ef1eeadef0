pub mod events;
pub mod expect;
pub mod scenario;

use anyhow::{Context, Result};
use colored::Colorize;
use log::warn;
use std::time::Instant;

pub use events::{ConsoleListener, RunEvent};
pub use expect::{BodyCheck, ExpectedOutcome};
pub use scenario::{Action, Scenario, Step};

use crate::client::{ApiClient, ApiResponse, ClientError};
use crate::fixture;
use crate::recorder::{RecordError, ResultRecorder};
use crate::report::{self, Report, TestOutcome};
use crate::utils::config::Config;

/// Step counts for one scenario run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScenarioResult {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Runs scenarios one step at a time against a single API client
pub struct ScenarioRunner {
    client: ApiClient,
    recorder: ResultRecorder,
    listener: Option<ConsoleListener>,
    events: Vec<RunEvent>,
}

impl ScenarioRunner {
    /// Runner that prints progress to the console
    pub fn new(client: ApiClient) -> Self {
        Self {
            listener: Some(ConsoleListener::new()),
            ..Self::quiet(client)
        }
    }

    /// Runner without console output
    pub fn quiet(client: ApiClient) -> Self {
        Self {
            client,
            recorder: ResultRecorder::new(),
            listener: None,
            events: Vec::new(),
        }
    }

    pub async fn run(&mut self, scenario: &Scenario) -> ScenarioResult {
        let mut result = ScenarioResult::default();
        self.emit(RunEvent::ScenarioStarted {
            name: scenario.name.clone(),
            step_count: scenario.steps.len(),
        });

        for (index, step) in scenario.steps.iter().enumerate() {
            self.emit(RunEvent::StepStarted {
                index,
                name: step.name.clone(),
            });

            let started = Instant::now();
            let (passed, note) = self.run_step(step).await;
            let duration_ms = started.elapsed().as_millis() as u64;

            if passed {
                result.passed += 1;
                self.emit(RunEvent::StepPassed { index, duration_ms });
                continue;
            }

            result.failed += 1;
            self.emit(RunEvent::StepFailed {
                index,
                note,
                duration_ms,
            });

            if !step.continue_on_failure {
                let reason = format!("skipped: '{}' failed", step.name);
                for (rest_index, rest) in scenario.steps.iter().enumerate().skip(index + 1) {
                    result.skipped += 1;
                    self.emit(RunEvent::StepSkipped {
                        index: rest_index,
                        name: rest.name.clone(),
                        reason: reason.clone(),
                    });
                }
                break;
            }
        }

        self.emit(RunEvent::ScenarioFinished {
            name: scenario.name.clone(),
            passed: result.passed,
            failed: result.failed,
            skipped: result.skipped,
        });
        result
    }

    /// Execute and record one step. Transport errors and unreadable bodies
    /// become FAILED outcomes instead of aborting the run.
    async fn run_step(&mut self, step: &Step) -> (bool, String) {
        let response = match self.execute(&step.action).await {
            Ok(response) => response,
            Err(e) => {
                warn!("{}: {}", step.name, e);
                let note = format!("transport error: {}", e);
                self.recorder
                    .record_transport_failure(&step.name, step.expect.clone(), None, &note);
                return (false, note);
            }
        };

        let passed = step.judge(&response);
        let note = if passed {
            step.pass_note.clone().unwrap_or_default()
        } else {
            step.failure_note.clone()
        };
        if passed && !step.record_on_pass {
            return (true, note);
        }

        let recorded = self.recorder.record(
            &step.name,
            report::OutcomeStatus::from_passed(passed),
            &response,
            step.expect.clone(),
            &note,
        );
        match recorded {
            Ok(()) => (passed, note),
            Err(RecordError::MalformedBody { status, source, .. }) => {
                warn!("{}: unparseable body: {}", step.name, source);
                let note = format!("malformed response body: {}", source);
                self.recorder.record_transport_failure(
                    &step.name,
                    step.expect.clone(),
                    Some(status),
                    &note,
                );
                (false, note)
            }
        }
    }

    async fn execute(&self, action: &Action) -> Result<ApiResponse, ClientError> {
        match action {
            Action::CreateUser(user) => self.client.create_user(user).await,
            Action::CreateRaw(body) => self.client.create_raw(body).await,
            Action::Login { username, password } => {
                self.client.login_user(username, password).await
            }
            Action::Logout => self.client.logout_user().await,
            Action::GetUser(username) => self.client.get_user(username).await,
            Action::UpdateUser(username, user) => self.client.update_user(username, user).await,
            Action::DeleteUser(username) => self.client.delete_user(username).await,
        }
    }

    fn emit(&mut self, event: RunEvent) {
        log::debug!("{:?}", event);
        if let Some(listener) = self.listener.as_mut() {
            listener.handle(&event);
        } else {
            self.events.push(event);
        }
    }

    /// Events recorded by a quiet runner, in order; console runners print them instead
    pub fn events(&self) -> &[RunEvent] {
        &self.events
    }

    pub fn outcomes(&self) -> &[TestOutcome] {
        self.recorder.outcomes()
    }

    /// End the run: the HTTP session is dropped here
    pub fn finish(self) -> Vec<TestOutcome> {
        log::debug!("closing session to {}", self.client.base_url());
        self.recorder.into_outcomes()
    }
}

/// Run every independent scenario, then write and print the report
pub async fn run_full_suite(config: &Config) -> Result<Report> {
    println!(
        "{} Running user API tests against {}",
        "▶".green().bold(),
        config.base_url.cyan()
    );
    let scenarios = scenario::full_suite();
    run_and_report(config, &scenarios).await
}

/// Run the create → login → get → logout → delete flow for one fresh user
pub async fn run_single_flow(config: &Config) -> Result<Report> {
    println!(
        "{} Running full user flow against {}",
        "▶".green().bold(),
        config.base_url.cyan()
    );
    let user = fixture::generate();
    let scenarios = [scenario::full_flow(&user, config.flow_continue_on_failure)];
    run_and_report(config, &scenarios).await
}

async fn run_and_report(config: &Config, scenarios: &[Scenario]) -> Result<Report> {
    let client = ApiClient::new(&config.base_url).context("Failed to create API client")?;
    let mut runner = ScenarioRunner::new(client);
    for scenario in scenarios {
        runner.run(scenario).await;
    }
    let outcomes = runner.finish();

    let report = Report::build(&outcomes);
    println!();
    report::publish(&report, &config.report_path, config.junit_path.as_deref())?;
    println!(
        "\n{} Report saved to: {}",
        "✅".green(),
        config.report_path.display()
    );
    Ok(report)
}
