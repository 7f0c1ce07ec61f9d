//! API client for the Queryon community board.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! requests against the posts, answers, and account endpoints.

use std::path::PathBuf;
use std::sync::Arc;

use reqwest::{multipart, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::SessionManager;
use crate::config::Config;
use crate::models::{Answer, ImageAttachment, ListPostsQuery, NewPost, Post};
use crate::profile::ProfileStore;

use super::ApiError;

/// API client for the Queryon board.
/// Clone is cheap - reqwest::Client uses Arc internally for connection
/// pooling, and the session manager is itself a shared handle.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionManager,
    profiles: Arc<ProfileStore>,
}

impl ApiClient {
    /// Create a new API client sharing the given session
    pub fn new(config: &Config, session: SessionManager) -> Result<Self, ApiError> {
        let data_dir = config.data_dir()?;
        Self::with_data_dir(&config.base_url, data_dir, session)
    }

    /// Build a client with an explicit data directory (used by tests)
    pub fn with_data_dir(
        base_url: &str,
        data_dir: PathBuf,
        session: SessionManager,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            profiles: Arc::new(ProfileStore::new(data_dir)),
        })
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Advisory "my questions" count for the logged-in user
    pub async fn my_questions_count(&self) -> u32 {
        match self.session.user_email().await {
            Some(email) => self.profiles.questions(&email),
            None => 0,
        }
    }

    // ===== Posts =====

    /// Fetch a page of posts. Pagination and sort parameters are passed to
    /// the server verbatim - no client-side re-sorting or caching.
    pub async fn list_posts(&self, query: &ListPostsQuery) -> Result<Vec<Post>, ApiError> {
        let token = self.token().await?;
        let url = format!("{}/posts", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .bearer_auth(&token)
            .send()
            .await?;

        Self::decode(response, StatusCode::OK).await
    }

    /// Fetch a single post, answers included
    pub async fn get_post(&self, id: i64) -> Result<Post, ApiError> {
        let token = self.token().await?;
        let url = format!("{}/posts/{}", self.base_url, id);

        let response = self.client.get(&url).bearer_auth(&token).send().await?;
        Self::decode(response, StatusCode::OK).await
    }

    /// Create a post with a JSON body; tags travel as an array field
    pub async fn create_post(&self, new_post: &NewPost) -> Result<Post, ApiError> {
        let token = self.token().await?;
        let url = format!("{}/posts", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(new_post)
            .send()
            .await?;

        let post = Self::decode(response, StatusCode::CREATED).await?;
        self.record_question_created().await;
        Ok(post)
    }

    /// Create a post with image attachments via a multipart body.
    /// Each tag is sent as its own `tags` form field, each image as an
    /// `images` file part.
    pub async fn create_post_with_images(
        &self,
        new_post: &NewPost,
        images: Vec<ImageAttachment>,
    ) -> Result<Post, ApiError> {
        let token = self.token().await?;
        let url = format!("{}/posts", self.base_url);

        let mut form = multipart::Form::new()
            .text("title", new_post.title.clone())
            .text("content", new_post.content.clone());

        for tag in &new_post.tags {
            form = form.text("tags", tag.clone());
        }

        for image in images {
            let part = multipart::Part::bytes(image.data)
                .file_name(image.file_name)
                .mime_str(&image.mime_type)?;
            form = form.part("images", part);
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .multipart(form)
            .send()
            .await?;

        let post = Self::decode(response, StatusCode::CREATED).await?;
        self.record_question_created().await;
        Ok(post)
    }

    /// Update a post's title and content. The id is the only targeting key.
    pub async fn update_post(&self, id: i64, title: &str, content: &str) -> Result<Post, ApiError> {
        let token = self.token().await?;
        let url = format!("{}/posts/{}", self.base_url, id);
        let body = serde_json::json!({ "title": title, "content": content });

        let response = self
            .client
            .put(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;

        Self::decode(response, StatusCode::OK).await
    }

    /// Delete a post. Any 2xx status counts as success, after which the
    /// local question counter is decremented (floored at zero).
    pub async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        let token = self.token().await?;
        let url = format!("{}/posts/{}", self.base_url, id);

        let response = self.client.delete(&url).bearer_auth(&token).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %ApiError::truncate_body(&body), "Delete post failed");
            return Err(ApiError::from_status(status));
        }

        debug!(post_id = id, "Post deleted");
        self.record_question_deleted().await;
        Ok(())
    }

    // ===== Answers =====

    /// Post an answer to a question
    pub async fn create_answer(&self, post_id: i64, content: &str) -> Result<Answer, ApiError> {
        let token = self.token().await?;
        let url = format!("{}/posts/{}/answers", self.base_url, post_id);
        let body = serde_json::json!({ "content": content });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;

        Self::decode(response, StatusCode::CREATED).await
    }

    // ===== Account =====

    /// Delete the current account. On success the session is logged out,
    /// since the identity it referred to no longer exists.
    pub async fn delete_account(&self) -> Result<(), ApiError> {
        let token = self.token().await?;
        let url = format!("{}/users/delete", self.base_url);

        let response = self.client.delete(&url).bearer_auth(&token).send().await?;
        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %ApiError::truncate_body(&body), "Delete account failed");
            return Err(ApiError::from_status(status));
        }

        self.session.logout().await?;
        debug!("Account deleted and session cleared");
        Ok(())
    }

    // ===== Internals =====

    /// Current token, or `Unauthenticated` before any request is built
    async fn token(&self) -> Result<String, ApiError> {
        self.session
            .current_token()
            .await
            .ok_or(ApiError::Unauthenticated)
    }

    /// Check the status and decode the body with an explicit schema.
    /// A wrong status is surfaced verbatim; an undecodable body is a
    /// `Decode` error, never a panic.
    async fn decode<T: DeserializeOwned>(
        response: Response,
        expected: StatusCode,
    ) -> Result<T, ApiError> {
        let status = response.status();
        let text = response.text().await?;
        if status != expected {
            warn!(status = status.as_u16(), body = %ApiError::truncate_body(&text), "Unexpected status");
            return Err(ApiError::from_status(status));
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Counter updates are best effort: failures are logged, never surfaced,
    /// because the count is a display convenience and may drift anyway.
    async fn record_question_created(&self) {
        let Some(email) = self.session.user_email().await else {
            debug!("No session email, skipping question counter update");
            return;
        };
        match self.profiles.increment_questions(&email) {
            Ok(count) => debug!(email, count, "Question counter incremented"),
            Err(e) => warn!(error = %e, "Failed to update question counter"),
        }
    }

    async fn record_question_deleted(&self) {
        let Some(email) = self.session.user_email().await else {
            debug!("No session email, skipping question counter update");
            return;
        };
        match self.profiles.decrement_questions(&email) {
            Ok(count) => debug!(email, count, "Question counter decremented"),
            Err(e) => warn!(error = %e, "Failed to update question counter"),
        }
    }
}
