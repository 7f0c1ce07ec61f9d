use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned status {status}")]
    Server { status: u16 },

    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no token available - login required")]
    Unauthenticated,

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("an account with this email already exists")]
    Conflict,

    #[error("email not verified")]
    EmailNotVerified { user_id: Option<i64> },

    #[error("session token has expired")]
    TokenExpired,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Maximum length for error response bodies carried in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid carrying excessive data in errors.
    /// The cut is backed off to a char boundary - server error messages are
    /// not guaranteed to be ASCII.
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..end],
            body.len()
        )
    }

    /// Map a non-success status on an authenticated domain call.
    /// Every status is surfaced verbatim, 401 included - expiry is detected
    /// locally, never inferred from the server.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        ApiError::Server {
            status: status.as_u16(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status } => Some(*status),
            _ => None,
        }
    }
}
