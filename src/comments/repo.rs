use sqlx::PgPool;

use crate::comments::repo_types::CommentRow;

const COMMENT_SELECT: &str = r#"
    SELECT c.id, c.content, c.post_id, c.author_id, c.created_at, c.updated_at,
           u.name AS author_name, u.profile_image AS author_profile_image
    FROM comments c
    JOIN users u ON u.id = c.author_id
"#;

pub async fn find_detail(db: &PgPool, id: i64) -> sqlx::Result<Option<CommentRow>> {
    sqlx::query_as::<_, CommentRow>(&format!("{COMMENT_SELECT} WHERE c.id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Owner lookup used by the ownership check before mutation.
pub async fn author_id(db: &PgPool, id: i64) -> sqlx::Result<Option<i64>> {
    sqlx::query_scalar::<_, i64>("SELECT author_id FROM comments WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn create(
    db: &PgPool,
    post_id: i64,
    author_id: i64,
    content: &str,
) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO comments (content, post_id, author_id)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(content)
    .bind(post_id)
    .bind(author_id)
    .fetch_one(db)
    .await
}

pub async fn list_by_post(db: &PgPool, post_id: i64) -> sqlx::Result<Vec<CommentRow>> {
    sqlx::query_as::<_, CommentRow>(&format!(
        "{COMMENT_SELECT} WHERE c.post_id = $1 ORDER BY c.created_at DESC"
    ))
    .bind(post_id)
    .fetch_all(db)
    .await
}

pub async fn update_content(db: &PgPool, id: i64, content: &str) -> sqlx::Result<()> {
    sqlx::query("UPDATE comments SET content = $2, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(content)
        .execute(db)
        .await?;
    Ok(())
}

/// Returns the number of rows deleted (0 when already gone).
pub async fn delete(db: &PgPool, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
