//! Authentication module for managing user sessions.
//!
//! This module provides:
//! - `SessionManager`: login/register/logout and the cached bearer token
//! - `SessionStore`: durable session record on disk
//! - `jwt`: local expiry inspection of the bearer token

pub mod jwt;
pub mod session;

pub use jwt::{token_expired, token_expired_at};
pub use session::{SessionData, SessionManager, SessionStore};
