use sqlx::PgPool;
use tracing::info;

use crate::auth::policy::{can_modify, Identity};
use crate::comments::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use crate::comments::repo;
use crate::error::ApiError;
use crate::posts::post_exists;

pub async fn create_comment(
    db: &PgPool,
    caller: &Identity,
    input: CreateCommentRequest,
) -> Result<CommentResponse, ApiError> {
    if input.content.trim().is_empty() {
        return Err(ApiError::validation("Comment content is required"));
    }
    if !post_exists(db, input.post_id).await? {
        return Err(ApiError::NotFound("Post"));
    }

    let comment_id = repo::create(db, input.post_id, caller.user_id, input.content.trim()).await?;

    info!(comment_id, post_id = input.post_id, author_id = caller.user_id, "comment created");

    let row = repo::find_detail(db, comment_id)
        .await?
        .ok_or(ApiError::NotFound("Comment"))?;
    Ok(row.into())
}

pub async fn list_post_comments(
    db: &PgPool,
    post_id: i64,
) -> Result<Vec<CommentResponse>, ApiError> {
    if !post_exists(db, post_id).await? {
        return Err(ApiError::NotFound("Post"));
    }
    let rows = repo::list_by_post(db, post_id).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn update_comment(
    db: &PgPool,
    caller: &Identity,
    id: i64,
    input: UpdateCommentRequest,
) -> Result<CommentResponse, ApiError> {
    if input.content.trim().is_empty() {
        return Err(ApiError::validation("Comment content is required"));
    }

    let owner = repo::author_id(db, id)
        .await?
        .ok_or(ApiError::NotFound("Comment"))?;
    if !can_modify(caller, owner) {
        return Err(ApiError::Authorization);
    }

    repo::update_content(db, id, input.content.trim()).await?;

    info!(comment_id = id, user_id = caller.user_id, "comment updated");

    let row = repo::find_detail(db, id)
        .await?
        .ok_or(ApiError::NotFound("Comment"))?;
    Ok(row.into())
}

pub async fn delete_comment(db: &PgPool, caller: &Identity, id: i64) -> Result<(), ApiError> {
    let owner = repo::author_id(db, id)
        .await?
        .ok_or(ApiError::NotFound("Comment"))?;
    if !can_modify(caller, owner) {
        return Err(ApiError::Authorization);
    }

    if repo::delete(db, id).await? == 0 {
        return Err(ApiError::NotFound("Comment"));
    }

    info!(comment_id = id, user_id = caller.user_id, "comment deleted");
    Ok(())
}
