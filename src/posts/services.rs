use std::collections::HashMap;

use sqlx::PgPool;
use tracing::info;

use crate::auth::policy::{can_modify, Identity};
use crate::auth::repo as users_repo;
use crate::error::ApiError;
use crate::posts::dto::{
    CategorySummary, CreatePostRequest, ListPostsQuery, PageMeta, PostListResponse, PostResponse,
    UpdatePostRequest,
};
use crate::posts::repo;
use crate::posts::repo_types::PostRow;

const MAX_PAGE_SIZE: i64 = 100;

/// 1-based page to row offset.
fn page_offset(page: i64, limit: i64) -> i64 {
    (page - 1) * limit
}

async fn enrich_one(db: &PgPool, row: PostRow) -> Result<PostResponse, ApiError> {
    let categories = repo::categories_for(db, &[row.id])
        .await?
        .into_iter()
        .map(|c| CategorySummary { id: c.id, name: c.name })
        .collect();
    Ok(PostResponse::from_row(row, categories))
}

/// Attach categories to a batch of rows with a single query.
async fn enrich_many(db: &PgPool, rows: Vec<PostRow>) -> Result<Vec<PostResponse>, ApiError> {
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut by_post: HashMap<i64, Vec<CategorySummary>> = HashMap::new();
    for c in repo::categories_for(db, &ids).await? {
        by_post
            .entry(c.post_id)
            .or_default()
            .push(CategorySummary { id: c.id, name: c.name });
    }
    Ok(rows
        .into_iter()
        .map(|row| {
            let categories = by_post.remove(&row.id).unwrap_or_default();
            PostResponse::from_row(row, categories)
        })
        .collect())
}

pub async fn create_post(
    db: &PgPool,
    caller: &Identity,
    input: CreatePostRequest,
) -> Result<PostResponse, ApiError> {
    if input.title.trim().is_empty() {
        return Err(ApiError::validation("Title is required"));
    }
    if input.content.trim().is_empty() {
        return Err(ApiError::validation("Content is required"));
    }

    let post_id = repo::create(
        db,
        caller.user_id,
        input.title.trim(),
        &input.content,
        input.image_url.as_deref(),
        input.published,
        input.location.as_deref(),
        &input.category_ids,
    )
    .await?;

    info!(post_id, author_id = caller.user_id, "post created");

    let row = repo::find_detail(db, post_id)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;
    enrich_one(db, row).await
}

pub async fn get_post(db: &PgPool, id: i64) -> Result<PostResponse, ApiError> {
    let row = repo::find_detail(db, id)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;
    enrich_one(db, row).await
}

pub async fn list_published(
    db: &PgPool,
    query: ListPostsQuery,
) -> Result<PostListResponse, ApiError> {
    let page = query.page.max(1);
    let limit = query.limit.clamp(1, MAX_PAGE_SIZE);
    let offset = page_offset(page, limit);

    let rows = repo::list_published(db, limit, offset, query.category_id).await?;
    let total = repo::count_published(db, query.category_id).await?;

    Ok(PostListResponse {
        posts: enrich_many(db, rows).await?,
        meta: PageMeta::new(total, page, limit),
    })
}

pub async fn list_by_author(db: &PgPool, author_id: i64) -> Result<Vec<PostResponse>, ApiError> {
    if users_repo::find_by_id(db, author_id).await?.is_none() {
        return Err(ApiError::NotFound("User"));
    }
    let rows = repo::list_by_author(db, author_id).await?;
    enrich_many(db, rows).await
}

pub async fn update_post(
    db: &PgPool,
    caller: &Identity,
    id: i64,
    input: UpdatePostRequest,
) -> Result<PostResponse, ApiError> {
    let owner = repo::author_id(db, id)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;
    if !can_modify(caller, owner) {
        return Err(ApiError::Authorization);
    }

    if let Some(title) = &input.title {
        if title.trim().is_empty() {
            return Err(ApiError::validation("Title cannot be empty"));
        }
    }
    if let Some(content) = &input.content {
        if content.trim().is_empty() {
            return Err(ApiError::validation("Content cannot be empty"));
        }
    }

    repo::update(
        db,
        id,
        input.title.as_deref().map(str::trim),
        input.content.as_deref(),
        input.image_url.as_deref(),
        input.published,
        input.location.as_deref(),
        input.category_ids.as_deref(),
    )
    .await?;

    info!(post_id = id, user_id = caller.user_id, "post updated");

    let row = repo::find_detail(db, id)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;
    enrich_one(db, row).await
}

pub async fn delete_post(db: &PgPool, caller: &Identity, id: i64) -> Result<(), ApiError> {
    let owner = repo::author_id(db, id)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;
    if !can_modify(caller, owner) {
        return Err(ApiError::Authorization);
    }

    // A concurrent delete between the check and here still surfaces as 404.
    if repo::delete(db, id).await? == 0 {
        return Err(ApiError::NotFound("Post"));
    }

    info!(post_id = id, user_id = caller.user_id, "post deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_offset_is_zero_based_from_one_based_pages() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(2, 10), 10);
        assert_eq!(page_offset(3, 25), 50);
    }
}
