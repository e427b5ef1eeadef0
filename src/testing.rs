//! In-process stand-in for the pet-store `/user` endpoints, used by tests.
//!
//! Response shapes follow the public service: `{code, type, message}`
//! envelopes, `200` with a session message on login, `404` for unknown users.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::fixture::UserRecord;

#[derive(Default)]
struct StubState {
    users: HashMap<String, UserRecord>,
    reject_creates: bool,
    reject_logins: bool,
    reject_updates: bool,
    ignore_updates: bool,
    reject_deletes: bool,
    garbage_logout: bool,
}

type Shared = Arc<Mutex<StubState>>;

pub struct StubServer {
    addr: std::net::SocketAddr,
    state: Shared,
    handle: tokio::task::JoinHandle<()>,
}

impl StubServer {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(StubState::default()));

        let app = Router::new()
            .route("/v2/user", post(create_user))
            .route("/v2/user/login", get(login))
            .route("/v2/user/logout", get(logout))
            .route(
                "/v2/user/:username",
                get(get_user).put(update_user).delete(delete_user),
            )
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub server");
        let addr = listener.local_addr().expect("stub server address");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v2", self.addr)
    }

    /// A base URL nothing listens on
    pub fn unreachable_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
        let addr = listener.local_addr().expect("free port address");
        drop(listener);
        format!("http://{}/v2", addr)
    }

    /// Answer every create with 500
    pub fn reject_creates(&self) {
        self.state.lock().unwrap().reject_creates = true;
    }

    /// Refuse every login, even with the right password
    pub fn reject_logins(&self) {
        self.state.lock().unwrap().reject_logins = true;
    }

    /// Answer every update with 500
    pub fn reject_updates(&self) {
        self.state.lock().unwrap().reject_updates = true;
    }

    /// Answer updates with 200 but keep the stored record
    pub fn ignore_updates(&self) {
        self.state.lock().unwrap().ignore_updates = true;
    }

    /// Answer every delete with 500
    pub fn reject_deletes(&self) {
        self.state.lock().unwrap().reject_deletes = true;
    }

    /// Answer logout with a non-JSON body
    pub fn garbage_logout(&self) {
        self.state.lock().unwrap().garbage_logout = true;
    }

    pub fn user(&self, username: &str) -> Option<UserRecord> {
        self.state.lock().unwrap().users.get(username).cloned()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn envelope(status: StatusCode, kind: &str, message: impl Into<String>) -> Response {
    let body = json!({
        "code": status.as_u16(),
        "type": kind,
        "message": message.into(),
    });
    (status, Json(body)).into_response()
}

async fn create_user(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    if state.reject_creates {
        return envelope(StatusCode::INTERNAL_SERVER_ERROR, "unknown", "something bad happened");
    }
    match serde_json::from_value::<UserRecord>(body) {
        Ok(user) => {
            let id = user.id;
            state.users.insert(user.username.clone(), user);
            envelope(StatusCode::OK, "unknown", id.to_string())
        }
        Err(_) => envelope(StatusCode::BAD_REQUEST, "error", "bad input"),
    }
}

async fn login(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let state = state.lock().unwrap();
    let username = params.get("username").map(String::as_str).unwrap_or("");
    let password = params.get("password").map(String::as_str).unwrap_or("");
    match state.users.get(username) {
        Some(user) if user.password == password && !state.reject_logins => envelope(
            StatusCode::OK,
            "unknown",
            "logged in user session:1700000000000",
        ),
        _ => envelope(
            StatusCode::BAD_REQUEST,
            "error",
            "Invalid username/password supplied",
        ),
    }
}

async fn logout(State(state): State<Shared>) -> Response {
    if state.lock().unwrap().garbage_logout {
        return (StatusCode::OK, "<html>ok</html>").into_response();
    }
    envelope(StatusCode::OK, "unknown", "ok")
}

async fn get_user(State(state): State<Shared>, Path(username): Path<String>) -> Response {
    match state.lock().unwrap().users.get(&username) {
        Some(user) => (StatusCode::OK, Json(user.clone())).into_response(),
        None => envelope(StatusCode::NOT_FOUND, "error", "User not found"),
    }
}

async fn update_user(
    State(state): State<Shared>,
    Path(username): Path<String>,
    Json(user): Json<UserRecord>,
) -> Response {
    let mut state = state.lock().unwrap();
    if state.reject_updates {
        return envelope(StatusCode::INTERNAL_SERVER_ERROR, "unknown", "something bad happened");
    }
    if !state.users.contains_key(&username) {
        return envelope(StatusCode::NOT_FOUND, "error", "User not found");
    }
    let id = user.id;
    if state.ignore_updates {
        return envelope(StatusCode::OK, "unknown", id.to_string());
    }
    state.users.remove(&username);
    state.users.insert(user.username.clone(), user);
    envelope(StatusCode::OK, "unknown", id.to_string())
}

async fn delete_user(State(state): State<Shared>, Path(username): Path<String>) -> Response {
    let mut state = state.lock().unwrap();
    if state.reject_deletes {
        return envelope(StatusCode::INTERNAL_SERVER_ERROR, "unknown", "something bad happened");
    }
    match state.users.remove(&username) {
        Some(_) => envelope(StatusCode::OK, "unknown", username),
        None => (StatusCode::NOT_FOUND, "").into_response(),
    }
}
