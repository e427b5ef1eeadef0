//! Declarative scenarios: ordered steps, each naming one API call and what
//! the answer must look like.

use serde_json::{json, Value};

use super::expect::{BodyCheck, ExpectedOutcome};
use crate::client::ApiResponse;
use crate::fixture::{self, UserRecord};

/// One call against the user API
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    CreateUser(UserRecord),
    CreateRaw(Value),
    Login { username: String, password: String },
    Logout,
    GetUser(String),
    UpdateUser(String, UserRecord),
    DeleteUser(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub name: String,
    pub action: Action,
    pub expect: ExpectedOutcome,
    pub body_check: Option<BodyCheck>,
    /// Keep running later steps when this one fails
    pub continue_on_failure: bool,
    /// Record an outcome when this step passes; failures are always recorded
    pub record_on_pass: bool,
    pub pass_note: Option<String>,
    pub failure_note: String,
}

impl Step {
    pub fn new(name: &str, action: Action, expect: ExpectedOutcome) -> Self {
        Self {
            name: name.to_string(),
            action,
            expect,
            body_check: None,
            continue_on_failure: true,
            record_on_pass: true,
            pass_note: None,
            failure_note: String::new(),
        }
    }

    pub fn check(mut self, check: BodyCheck) -> Self {
        self.body_check = Some(check);
        self
    }

    pub fn stop_on_failure(mut self) -> Self {
        self.continue_on_failure = false;
        self
    }

    pub fn continue_on_failure(mut self, keep_going: bool) -> Self {
        self.continue_on_failure = keep_going;
        self
    }

    /// Only record this step if it fails
    pub fn silent_on_pass(mut self) -> Self {
        self.record_on_pass = false;
        self
    }

    pub fn on_pass(mut self, note: &str) -> Self {
        self.pass_note = Some(note.to_string());
        self
    }

    pub fn on_fail(mut self, note: &str) -> Self {
        self.failure_note = note.to_string();
        self
    }

    /// Status predicate and body check must both hold
    pub fn judge(&self, response: &ApiResponse) -> bool {
        self.expect.matches(response.status, &response.body)
            && self
                .body_check
                .as_ref()
                .map_or(true, |check| check.passes(&response.body))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: &str, steps: Vec<Step>) -> Self {
        Self {
            name: name.to_string(),
            steps,
        }
    }
}

const OK: ExpectedOutcome = ExpectedOutcome::ExactStatus(200);

/// Create step a scenario depends on. Its failure is reported under the
/// scenario's own test name; a successful create is not an outcome.
fn create_prerequisite(name: &str, user: &UserRecord, purpose: &str) -> Step {
    Step::new(name, Action::CreateUser(user.clone()), OK)
        .stop_on_failure()
        .silent_on_pass()
        .on_fail(&format!("could not create prerequisite user for {}", purpose))
}

pub fn create_user(user: &UserRecord) -> Scenario {
    Scenario::new(
        "Create user",
        vec![Step::new(
            "test_create_user_success",
            Action::CreateUser(user.clone()),
            OK,
        )
        .on_fail("could not create user")],
    )
}

pub fn create_user_invalid_data() -> Scenario {
    Scenario::new(
        "Create user with invalid data",
        vec![Step::new(
            "test_create_user_invalid_data",
            Action::CreateRaw(json!({ "invalid": "data" })),
            ExpectedOutcome::ErrorExpected,
        )
        .on_pass("error returned for invalid payload")
        .on_fail("no error returned for invalid payload")],
    )
}

pub fn login_logout(user: &UserRecord) -> Scenario {
    Scenario::new(
        "Login and logout",
        vec![
            create_prerequisite("test_login_logout_success", user, "login test"),
            Step::new(
                "test_login_success",
                Action::Login {
                    username: user.username.clone(),
                    password: user.password.clone(),
                },
                OK,
            )
            .check(BodyCheck::contains("logged in"))
            .stop_on_failure()
            .on_fail("could not log in"),
            Step::new("test_logout_success", Action::Logout, OK)
                .check(BodyCheck::contains("ok"))
                .on_fail("could not log out"),
        ],
    )
}

pub fn login_invalid_credentials() -> Scenario {
    Scenario::new(
        "Login with invalid credentials",
        vec![Step::new(
            "test_login_invalid_credentials",
            Action::Login {
                username: "nonexistent_user".to_string(),
                password: "wrong_password".to_string(),
            },
            ExpectedOutcome::ErrorExpected,
        )
        .on_pass("error returned for invalid credentials")
        .on_fail("no error returned for invalid credentials")],
    )
}

pub fn update_user(user: &UserRecord) -> Scenario {
    let updated = UserRecord {
        first_name: "UpdatedFirstName".to_string(),
        email: "updated@example.com".to_string(),
        ..user.clone()
    };

    Scenario::new(
        "Update user",
        vec![
            create_prerequisite("test_update_user_success", user, "update test"),
            Step::new(
                "test_update_user_success",
                Action::UpdateUser(user.username.clone(), updated),
                OK,
            )
            .stop_on_failure()
            .on_fail("could not update user"),
            Step::new("test_verify_update", Action::GetUser(user.username.clone()), OK)
                .check(BodyCheck::json_field("/firstName", "UpdatedFirstName"))
                .on_fail("user data was not updated"),
        ],
    )
}

pub fn delete_user(user: &UserRecord) -> Scenario {
    Scenario::new(
        "Delete user",
        vec![
            create_prerequisite("test_delete_user_success", user, "delete test"),
            Step::new(
                "test_delete_user_success",
                Action::DeleteUser(user.username.clone()),
                OK,
            )
            .stop_on_failure()
            .on_fail("could not delete user"),
            Step::new(
                "test_verify_deletion",
                Action::GetUser(user.username.clone()),
                ExpectedOutcome::ExactStatus(404),
            )
            .on_fail("user was not deleted"),
        ],
    )
}

/// create → login → get → logout → delete for one user
pub fn full_flow(user: &UserRecord, continue_on_failure: bool) -> Scenario {
    let steps = vec![
        Step::new("full_flow_create_user", Action::CreateUser(user.clone()), OK),
        Step::new(
            "full_flow_login_user",
            Action::Login {
                username: user.username.clone(),
                password: user.password.clone(),
            },
            OK,
        ),
        Step::new("full_flow_get_user", Action::GetUser(user.username.clone()), OK),
        Step::new("full_flow_logout_user", Action::Logout, OK),
        Step::new(
            "full_flow_delete_user",
            Action::DeleteUser(user.username.clone()),
            OK,
        ),
    ];

    Scenario::new(
        "Full user flow",
        steps
            .into_iter()
            .map(|step| {
                let note = format!("{} failed", step.name);
                step.continue_on_failure(continue_on_failure).on_fail(&note)
            })
            .collect(),
    )
}

/// Every independent scenario, each with its own fresh fixture
pub fn full_suite() -> Vec<Scenario> {
    vec![
        create_user(&fixture::generate()),
        create_user_invalid_data(),
        login_logout(&fixture::generate()),
        login_invalid_credentials(),
        update_user(&fixture::generate()),
        delete_user(&fixture::generate()),
    ]
}
