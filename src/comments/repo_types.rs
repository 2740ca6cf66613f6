use sqlx::FromRow;
use time::OffsetDateTime;

/// Comment row joined with its author summary.
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: i64,
    pub content: String,
    pub post_id: i64,
    pub author_id: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub author_name: String,
    pub author_profile_image: Option<String>,
}
