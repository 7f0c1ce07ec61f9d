//! Session lifecycle: login, registration, token caching, and logout.
//!
//! `SessionManager` is the single source of truth for "is this device
//! authenticated, and with what token". All state transitions go through one
//! mutex so that the in-memory cache and the durable record never disagree
//! from a reader's point of view, even when responses land off the calling
//! task.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::api::ApiError;
use crate::auth::jwt;
use crate::config::Config;
use crate::models::{LoginFailure, LoginResponse, TokenResponse};

/// Session file name in the data directory
const SESSION_FILE: &str = "session.json";

/// Durable record of the authenticated identity.
/// Written whenever the session changes, read once per process on first use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub logged_in: bool,
    pub name: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// File-backed storage for the session record
pub struct SessionStore {
    data_dir: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Read the stored session, if any. A missing or unreadable file is
    /// treated as "no session" rather than an error.
    pub fn load(&self) -> Option<SessionData> {
        let path = self.session_path();
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(error = %e, "Failed to read session file");
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!(error = %e, "Failed to parse session file");
                None
            }
        }
    }

    pub fn save(&self, data: &SessionData) -> Result<()> {
        let path = self.session_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create session directory")?;
        }
        let contents = serde_json::to_string_pretty(data)?;
        std::fs::write(&path, contents).context("Failed to write session file")?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(&path).context("Failed to remove session file")?;
        }
        Ok(())
    }

    fn session_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }
}

struct Inner {
    store: SessionStore,
    cached: Option<SessionData>,
}

/// Owner of the current session.
/// Clone is cheap - the state sits behind an Arc, and reqwest::Client is
/// itself an Arc over a connection pool.
#[derive(Clone)]
pub struct SessionManager {
    http: Client,
    base_url: String,
    inner: Arc<Mutex<Inner>>,
}

impl SessionManager {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let data_dir = config.data_dir()?;
        Self::with_data_dir(&config.base_url, data_dir)
    }

    /// Build a manager with an explicit data directory (used by tests)
    pub fn with_data_dir(base_url: &str, data_dir: PathBuf) -> Result<Self, ApiError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            inner: Arc::new(Mutex::new(Inner {
                store: SessionStore::new(data_dir),
                cached: None,
            })),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Log in with email and password, returning the bearer token.
    /// The token is persisted and cached before this returns.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let url = format!("{}/auth/login", self.base_url);
        let body = serde_json::json!({ "email": email, "password": password });

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::OK {
            let decoded: LoginResponse = serde_json::from_str(&text)?;
            if !decoded.is_email_verified.unwrap_or(true) {
                return Err(ApiError::EmailNotVerified { user_id: None });
            }
            let data = SessionData {
                token: decoded.token.clone(),
                logged_in: true,
                name: decoded.name,
                email: decoded.email.or_else(|| Some(email.to_string())),
                created_at: Utc::now(),
            };
            self.install(data).await?;
            debug!(email, "Login succeeded");
            return Ok(decoded.token);
        }

        if status == StatusCode::BAD_REQUEST {
            if let Ok(failure) = serde_json::from_str::<LoginFailure>(&text) {
                if failure.needs_verification.unwrap_or(false) {
                    return Err(ApiError::EmailNotVerified {
                        user_id: failure.user_id,
                    });
                }
                if let Some(message) = failure.message {
                    return Err(ApiError::Authentication(message));
                }
            }
        }

        Err(ApiError::Authentication(format!(
            "status {}: {}",
            status.as_u16(),
            ApiError::truncate_body(&text)
        )))
    }

    /// Register a new account, returning the bearer token.
    /// A 409 means the email is already taken and surfaces as `Conflict`
    /// so the caller can prompt differently.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<String, ApiError> {
        let url = format!("{}/auth/register", self.base_url);
        let body = serde_json::json!({ "email": email, "password": password, "name": name });

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        match status {
            StatusCode::CREATED => {
                let decoded: TokenResponse = serde_json::from_str(&text)?;
                let data = SessionData {
                    token: decoded.token.clone(),
                    logged_in: true,
                    name: Some(name.to_string()),
                    email: Some(email.to_string()),
                    created_at: Utc::now(),
                };
                self.install(data).await?;
                debug!(email, "Registration succeeded");
                Ok(decoded.token)
            }
            StatusCode::CONFLICT => Err(ApiError::Conflict),
            _ => Err(ApiError::Authentication(format!(
                "status {}: {}",
                status.as_u16(),
                ApiError::truncate_body(&text)
            ))),
        }
    }

    /// Ask the server to resend the verification email. No auth required.
    pub async fn resend_verification(&self, user_id: i64) -> Result<(), ApiError> {
        let url = format!("{}/auth/resend-verification", self.base_url);
        let body = serde_json::json!({ "userId": user_id });

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::from_status(status))
        }
    }

    /// Current bearer token, if any. Read-through: a cold cache is populated
    /// from the session store. Never touches the network.
    pub async fn current_token(&self) -> Option<String> {
        let mut inner = self.inner.lock().await;
        Self::fill_cache(&mut inner);
        inner.cached.as_ref().map(|d| d.token.clone())
    }

    /// Current session record, if any
    pub async fn session(&self) -> Option<SessionData> {
        let mut inner = self.inner.lock().await;
        Self::fill_cache(&mut inner);
        inner.cached.clone()
    }

    /// Email of the logged-in user, if known
    pub async fn user_email(&self) -> Option<String> {
        self.session().await.and_then(|d| d.email)
    }

    /// Return the current token if it is present and not expired.
    /// A token that fails the local expiry check is cleared on the spot,
    /// forcing re-authentication instead of risking a dead token.
    pub async fn check_session(&self) -> Result<String, ApiError> {
        let mut inner = self.inner.lock().await;
        Self::fill_cache(&mut inner);

        let token = match inner.cached.as_ref() {
            Some(data) => data.token.clone(),
            None => return Err(ApiError::Unauthenticated),
        };

        if jwt::token_expired(&token) {
            warn!("Session token expired, clearing stored session");
            inner.store.clear()?;
            inner.cached = None;
            return Err(ApiError::TokenExpired);
        }

        Ok(token)
    }

    /// Clear the session from memory and disk. Both happen under the lock,
    /// so no reader can observe one cleared and the other not.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().await;
        inner.store.clear()?;
        inner.cached = None;
        debug!("Logged out");
        Ok(())
    }

    /// Persist then cache new session data. The store write happens first;
    /// if it fails the cache is left untouched so memory and disk agree.
    async fn install(&self, data: SessionData) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().await;
        inner.store.save(&data)?;
        inner.cached = Some(data);
        Ok(())
    }

    fn fill_cache(inner: &mut Inner) {
        if inner.cached.is_none() {
            inner.cached = inner.store.load();
        }
    }
}
