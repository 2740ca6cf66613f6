use sqlx::PgPool;

use crate::posts::repo_types::{PostCategoryRow, PostRow};

/// Base select: post columns, author summary, comment/like counts.
const POST_SELECT: &str = r#"
    SELECT p.id, p.title, p.content, p.image_url, p.published, p.location,
           p.author_id, p.created_at, p.updated_at,
           u.name AS author_name, u.profile_image AS author_profile_image,
           (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count,
           (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS like_count
    FROM posts p
    JOIN users u ON u.id = p.author_id
"#;

pub async fn find_detail(db: &PgPool, id: i64) -> sqlx::Result<Option<PostRow>> {
    sqlx::query_as::<_, PostRow>(&format!("{POST_SELECT} WHERE p.id = $1"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn exists(db: &PgPool, id: i64) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1)")
        .bind(id)
        .fetch_one(db)
        .await
}

/// Owner lookup used by the ownership check before mutation.
pub async fn author_id(db: &PgPool, id: i64) -> sqlx::Result<Option<i64>> {
    sqlx::query_scalar::<_, i64>("SELECT author_id FROM posts WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Insert a post and connect its categories in one transaction.
/// Returns the new post id.
pub async fn create(
    db: &PgPool,
    author_id: i64,
    title: &str,
    content: &str,
    image_url: Option<&str>,
    published: bool,
    location: Option<&str>,
    category_ids: &[i64],
) -> sqlx::Result<i64> {
    let mut tx = db.begin().await?;

    let post_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO posts (title, content, image_url, published, location, author_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(image_url)
    .bind(published)
    .bind(location)
    .bind(author_id)
    .fetch_one(&mut *tx)
    .await?;

    if !category_ids.is_empty() {
        sqlx::query(
            r#"
            INSERT INTO post_categories (post_id, category_id)
            SELECT $1, category_id FROM UNNEST($2::bigint[]) AS t(category_id)
            "#,
        )
        .bind(post_id)
        .bind(category_ids)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(post_id)
}

pub async fn list_published(
    db: &PgPool,
    limit: i64,
    offset: i64,
    category_id: Option<i64>,
) -> sqlx::Result<Vec<PostRow>> {
    sqlx::query_as::<_, PostRow>(&format!(
        r#"
        {POST_SELECT}
        WHERE p.published = TRUE
          AND ($3::bigint IS NULL OR EXISTS (
              SELECT 1 FROM post_categories pc
              WHERE pc.post_id = p.id AND pc.category_id = $3
          ))
        ORDER BY p.created_at DESC
        LIMIT $1 OFFSET $2
        "#
    ))
    .bind(limit)
    .bind(offset)
    .bind(category_id)
    .fetch_all(db)
    .await
}

pub async fn count_published(db: &PgPool, category_id: Option<i64>) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM posts p
        WHERE p.published = TRUE
          AND ($1::bigint IS NULL OR EXISTS (
              SELECT 1 FROM post_categories pc
              WHERE pc.post_id = p.id AND pc.category_id = $1
          ))
        "#,
    )
    .bind(category_id)
    .fetch_one(db)
    .await
}

pub async fn list_by_author(db: &PgPool, author_id: i64) -> sqlx::Result<Vec<PostRow>> {
    sqlx::query_as::<_, PostRow>(&format!(
        "{POST_SELECT} WHERE p.author_id = $1 ORDER BY p.created_at DESC"
    ))
    .bind(author_id)
    .fetch_all(db)
    .await
}

/// Partial update. Omitted fields keep their values; `category_ids` of
/// `Some` replaces the whole association set (clear-then-connect), `None`
/// leaves it untouched.
pub async fn update(
    db: &PgPool,
    id: i64,
    title: Option<&str>,
    content: Option<&str>,
    image_url: Option<&str>,
    published: Option<bool>,
    location: Option<&str>,
    category_ids: Option<&[i64]>,
) -> sqlx::Result<()> {
    let mut tx = db.begin().await?;

    sqlx::query(
        r#"
        UPDATE posts
        SET title = COALESCE($2, title),
            content = COALESCE($3, content),
            image_url = COALESCE($4, image_url),
            published = COALESCE($5, published),
            location = COALESCE($6, location),
            updated_at = now()
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(title)
    .bind(content)
    .bind(image_url)
    .bind(published)
    .bind(location)
    .execute(&mut *tx)
    .await?;

    if let Some(ids) = category_ids {
        sqlx::query("DELETE FROM post_categories WHERE post_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if !ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO post_categories (post_id, category_id)
                SELECT $1, category_id FROM UNNEST($2::bigint[]) AS t(category_id)
                "#,
            )
            .bind(id)
            .bind(ids)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    Ok(())
}

/// Returns the number of rows deleted (0 when the post was already gone).
pub async fn delete(db: &PgPool, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

/// Categories for a set of posts, one query per page.
pub async fn categories_for(db: &PgPool, post_ids: &[i64]) -> sqlx::Result<Vec<PostCategoryRow>> {
    if post_ids.is_empty() {
        return Ok(Vec::new());
    }
    sqlx::query_as::<_, PostCategoryRow>(
        r#"
        SELECT pc.post_id, c.id, c.name
        FROM post_categories pc
        JOIN categories c ON c.id = pc.category_id
        WHERE pc.post_id = ANY($1)
        ORDER BY c.name
        "#,
    )
    .bind(post_ids)
    .fetch_all(db)
    .await
}
