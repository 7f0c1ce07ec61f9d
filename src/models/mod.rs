//! Data models for Queryon entities.
//!
//! - `Post`, `Answer`: board content, decoded from the server's snake_case keys
//! - `NewPost`, `ImageAttachment`, `ListPostsQuery`: request-side types
//! - `User` and the auth response schemas (camelCase keys)

pub mod post;
pub mod user;

pub use post::{Answer, ImageAttachment, ListPostsQuery, NewPost, Post, SortOrder};
pub use user::{LoginFailure, LoginResponse, TokenResponse, User};
