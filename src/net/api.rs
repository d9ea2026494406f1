//! REST client for the booking backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages talk to the backend through four narrow traits (`AuthApi`,
//! `SessionApi`, `TeacherApi`, `UserApi`) so tests can swap in mocks.
//! `ApiClient` is the single `reqwest` implementation of all of them.
//!
//! AUTHORIZATION
//! =============
//! Every request reads the current user from `SessionState` at send time and
//! attaches `Authorization: Bearer <token>` while someone is logged in.
//!
//! ERROR HANDLING
//! ==============
//! Transport and decode failures surface as `ApiError::Request`; non-2xx
//! responses become `ApiError::Status` with the server's `message` when the
//! body carries one. Nothing here panics.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::types::{LoginRequest, MessageResponse, RegisterRequest, Session, SessionInformation, Teacher, User};
use crate::config::ClientConfig;
use crate::state::session::SessionState;

const LOGIN_ENDPOINT: &str = "api/auth/login";
const REGISTER_ENDPOINT: &str = "api/auth/register";
const SESSIONS_ENDPOINT: &str = "api/session";
const TEACHERS_ENDPOINT: &str = "api/teacher";
const USERS_ENDPOINT: &str = "api/user";

fn session_endpoint(id: u64) -> String {
    format!("{SESSIONS_ENDPOINT}/{id}")
}

fn participate_endpoint(id: u64, user_id: u64) -> String {
    format!("{SESSIONS_ENDPOINT}/{id}/participate/{user_id}")
}

fn teacher_endpoint(id: u64) -> String {
    format!("{TEACHERS_ENDPOINT}/{id}")
}

fn user_endpoint(id: u64) -> String {
    format!("{USERS_ENDPOINT}/{id}")
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
}

impl ApiError {
    /// HTTP status for `Status` errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidBaseUrl(_) => None,
        }
    }
}

/// Best human-readable message for a failed response body.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<MessageResponse>(body) {
        return parsed.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Validate and strip a configured base URL.
pub(crate) fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| ApiError::InvalidBaseUrl(raw.to_owned()))?;
    if host.is_empty() {
        return Err(ApiError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

// =============================================================================
// SERVICE TRAITS
// =============================================================================

/// Credential exchange and account creation.
#[async_trait(?Send)]
pub trait AuthApi {
    /// `POST api/auth/login`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 401 on bad credentials.
    async fn login(&self, request: &LoginRequest) -> Result<SessionInformation, ApiError>;

    /// `POST api/auth/register`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 400 when the email is taken.
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;
}

/// CRUD and participation over bookable sessions.
#[async_trait(?Send)]
pub trait SessionApi {
    async fn all(&self) -> Result<Vec<Session>, ApiError>;
    async fn detail(&self, id: u64) -> Result<Session, ApiError>;
    async fn delete(&self, id: u64) -> Result<(), ApiError>;
    async fn create(&self, session: &Session) -> Result<Session, ApiError>;
    async fn update(&self, id: u64, session: &Session) -> Result<Session, ApiError>;
    async fn participate(&self, id: u64, user_id: u64) -> Result<(), ApiError>;
    async fn un_participate(&self, id: u64, user_id: u64) -> Result<(), ApiError>;
}

#[async_trait(?Send)]
pub trait TeacherApi {
    async fn all(&self) -> Result<Vec<Teacher>, ApiError>;
    async fn detail(&self, id: u64) -> Result<Teacher, ApiError>;
}

#[async_trait(?Send)]
pub trait UserApi {
    async fn get_by_id(&self, id: u64) -> Result<User, ApiError>;
    async fn delete(&self, id: u64) -> Result<(), ApiError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// `reqwest`-backed implementation of every service trait.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionState,
}

impl ApiClient {
    /// Build a client for `config.base_url` that authenticates as whoever is
    /// logged into `session`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] for a non-http(s) base URL, or
    /// [`ApiError::Request`] if the TLS backend cannot be initialized.
    pub fn new(config: &ClientConfig, session: SessionState) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&config.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()?;
        Ok(Self { http, base_url, session })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        tracing::debug!(%method, %url, "api request");
        let builder = self.http.request(method, url);
        match self.session.current_session() {
            Some(info) => builder.bearer_auth(info.token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        tracing::warn!(status = status.as_u16(), %message, "api request rejected");
        Err(ApiError::Status { status: status.as_u16(), message })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(builder).await?;
        Ok(response.json::<T>().await?)
    }

    /// Send and discard whatever body comes back.
    async fn fetch_unit(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.send(builder).await?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl AuthApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<SessionInformation, ApiError> {
        self.fetch_json(self.request(Method::POST, LOGIN_ENDPOINT).json(request))
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.fetch_unit(self.request(Method::POST, REGISTER_ENDPOINT).json(request))
            .await
    }
}

#[async_trait(?Send)]
impl SessionApi for ApiClient {
    async fn all(&self) -> Result<Vec<Session>, ApiError> {
        self.fetch_json(self.request(Method::GET, SESSIONS_ENDPOINT)).await
    }

    async fn detail(&self, id: u64) -> Result<Session, ApiError> {
        self.fetch_json(self.request(Method::GET, &session_endpoint(id)))
            .await
    }

    async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.fetch_unit(self.request(Method::DELETE, &session_endpoint(id)))
            .await
    }

    async fn create(&self, session: &Session) -> Result<Session, ApiError> {
        self.fetch_json(self.request(Method::POST, SESSIONS_ENDPOINT).json(session))
            .await
    }

    async fn update(&self, id: u64, session: &Session) -> Result<Session, ApiError> {
        self.fetch_json(self.request(Method::PUT, &session_endpoint(id)).json(session))
            .await
    }

    async fn participate(&self, id: u64, user_id: u64) -> Result<(), ApiError> {
        self.fetch_unit(self.request(Method::POST, &participate_endpoint(id, user_id)))
            .await
    }

    async fn un_participate(&self, id: u64, user_id: u64) -> Result<(), ApiError> {
        self.fetch_unit(self.request(Method::DELETE, &participate_endpoint(id, user_id)))
            .await
    }
}

#[async_trait(?Send)]
impl TeacherApi for ApiClient {
    async fn all(&self) -> Result<Vec<Teacher>, ApiError> {
        self.fetch_json(self.request(Method::GET, TEACHERS_ENDPOINT)).await
    }

    async fn detail(&self, id: u64) -> Result<Teacher, ApiError> {
        self.fetch_json(self.request(Method::GET, &teacher_endpoint(id)))
            .await
    }
}

#[async_trait(?Send)]
impl UserApi for ApiClient {
    async fn get_by_id(&self, id: u64) -> Result<User, ApiError> {
        self.fetch_json(self.request(Method::GET, &user_endpoint(id))).await
    }

    async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.fetch_unit(self.request(Method::DELETE, &user_endpoint(id)))
            .await
    }
}
