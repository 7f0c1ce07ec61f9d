//! REST API client module for the Queryon board.
//!
//! This module provides the `ApiClient` for talking to the posts, answers,
//! and account endpoints, plus the `ApiError` taxonomy every operation
//! surfaces. The API uses JWT bearer token authentication obtained through
//! the auth endpoints owned by `auth::SessionManager`.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
