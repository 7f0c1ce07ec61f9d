use serde::{Deserialize, Serialize};

/// A registered user, as embedded in post/answer payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

// Auth endpoints use camelCase keys, unlike the resource endpoints.

/// Response body for successful registration
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Response body for successful login.
/// Older server builds omit everything but the token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub is_email_verified: Option<bool>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Error body the login endpoint sends with a 400 status
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginFailure {
    pub message: Option<String>,
    pub needs_verification: Option<bool>,
    pub user_id: Option<i64>,
}
