//! Queryon client - the session and API layer of a Q&A community app.
//!
//! The crate is the library a view layer sits on: it owns the
//! authentication lifecycle (login, registration, token expiry, logout),
//! the durable session record, and the authenticated HTTP operations for
//! posts, answers, and the account itself.
//!
//! ```no_run
//! # async fn run() -> Result<(), queryon::ApiError> {
//! use queryon::{ApiClient, Config, ListPostsQuery, SessionManager};
//!
//! let config = Config::default();
//! let session = SessionManager::new(&config)?;
//! session.login("yeona@example.com", "hunter2").await?;
//!
//! let api = ApiClient::new(&config, session)?;
//! let posts = api.list_posts(&ListPostsQuery::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod profile;

pub use api::{ApiClient, ApiError};
pub use auth::{token_expired, SessionData, SessionManager, SessionStore};
pub use config::Config;
pub use models::{Answer, ImageAttachment, ListPostsQuery, NewPost, Post, SortOrder};
pub use profile::ProfileStore;
