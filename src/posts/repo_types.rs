use sqlx::FromRow;
use time::OffsetDateTime;

/// Post row joined with its author summary and comment/like counts.
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub published: bool,
    pub location: Option<String>,
    pub author_id: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub author_name: String,
    pub author_profile_image: Option<String>,
    pub comment_count: i64,
    pub like_count: i64,
}

/// Category attached to a post, tagged with the post id so one query can
/// cover a whole page of posts.
#[derive(Debug, Clone, FromRow)]
pub struct PostCategoryRow {
    pub post_id: i64,
    pub id: i64,
    pub name: String,
}
