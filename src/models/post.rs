use serde::{Deserialize, Serialize};

/// A question on the community board.
///
/// The server sends snake_case keys, which line up with Rust field names
/// directly; optional fields are omitted by some endpoints (the list
/// endpoint does not embed answers, the detail endpoint does).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
    pub answers_count: Option<i64>,
    pub views: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub answers: Option<Vec<Answer>>,
}

/// A reply to a post. Immutable once created in this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub content: String,
    pub created_at: String,
    pub post_id: i64,
    pub user_id: i64,
}

/// Fields for creating a post. Tags are free-form; empty is allowed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// A binary attachment for the multipart create-post path.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImageAttachment {
    /// JPEG attachment with the upload naming the original client used
    pub fn jpeg(index: usize, data: Vec<u8>) -> Self {
        Self {
            file_name: format!("image{}.jpg", index),
            mime_type: "image/jpeg".to_string(),
            data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Pagination and sort parameters for the post listing.
/// Passed through to the server verbatim - the client never re-sorts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    pub page: u32,
    pub limit: u32,
    pub sort_by: String,
    pub sort_order: SortOrder,
}

impl Default for ListPostsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            sort_by: "createdAt".to_string(),
            sort_order: SortOrder::Desc,
        }
    }
}
