use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::comments::repo_types::CommentRow;
use crate::posts::dto::AuthorSummary;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub post_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub content: String,
    pub post_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub author: AuthorSummary,
}

impl From<CommentRow> for CommentResponse {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            post_id: row.post_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            author: AuthorSummary {
                id: row.author_id,
                name: row.author_name,
                profile_image: row.author_profile_image,
            },
        }
    }
}
