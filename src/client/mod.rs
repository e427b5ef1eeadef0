//! HTTP client for the pet-store `/user` endpoints
//!
//! Thin wrapper over a single `reqwest::Client`. The client keeps a cookie
//! store, so any session state the service hands out persists across calls
//! made through the same `ApiClient`.

use log::debug;
use reqwest::{Method, Url};
use serde::Serialize;
use thiserror::Error;

use crate::fixture::UserRecord;

/// Public pet-store instance used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://petstore.swagger.io/v2";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("{method} {url} failed: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Raw HTTP response: status code and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

pub struct ApiClient {
    base_url: Url,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the given base URL, e.g. `https://petstore.swagger.io/v2`
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let invalid = |reason: &str| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(invalid("empty"));
        }
        let url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid("scheme must be http or https"));
        }
        if url.cannot_be_a_base() {
            return Err(invalid("cannot be used as a base"));
        }

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| invalid(&e.to_string()))?;

        Ok(Self {
            base_url: url,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// POST /user
    pub async fn create_user(&self, user: &UserRecord) -> Result<ApiResponse, ClientError> {
        self.send(Method::POST, &["user"], None, Some(user)).await
    }

    /// POST /user with an arbitrary JSON payload
    pub async fn create_raw(&self, body: &serde_json::Value) -> Result<ApiResponse, ClientError> {
        self.send(Method::POST, &["user"], None, Some(body)).await
    }

    /// GET /user/login?username=&password=
    pub async fn login_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<ApiResponse, ClientError> {
        let query = [("username", username), ("password", password)];
        self.send::<()>(Method::GET, &["user", "login"], Some(&query[..]), None)
            .await
    }

    /// GET /user/logout
    pub async fn logout_user(&self) -> Result<ApiResponse, ClientError> {
        self.send::<()>(Method::GET, &["user", "logout"], None, None)
            .await
    }

    /// GET /user/{username}
    pub async fn get_user(&self, username: &str) -> Result<ApiResponse, ClientError> {
        self.send::<()>(Method::GET, &["user", username], None, None)
            .await
    }

    /// PUT /user/{username}
    pub async fn update_user(
        &self,
        username: &str,
        user: &UserRecord,
    ) -> Result<ApiResponse, ClientError> {
        self.send(Method::PUT, &["user", username], None, Some(user))
            .await
    }

    /// DELETE /user/{username}
    pub async fn delete_user(&self, username: &str) -> Result<ApiResponse, ClientError> {
        self.send::<()>(Method::DELETE, &["user", username], None, None)
            .await
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        query: Option<&[(&str, &str)]>,
        body: Option<&B>,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.endpoint(segments);
        debug!("{} {}", method, url);

        let mut req = self.client.request(method.clone(), url.clone());
        if let Some(query) = query {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let transport = |source: reqwest::Error| ClientError::Transport {
            method: method.clone(),
            url: url.to_string(),
            source,
        };

        let res = req.send().await.map_err(&transport)?;
        let status = res.status().as_u16();
        let body = res.text().await.map_err(&transport)?;
        debug!("{} {} -> {} ({} bytes)", method, url, status, body.len());

        Ok(ApiResponse { status, body })
    }
}
