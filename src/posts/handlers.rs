use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::instrument;

use crate::auth::jwt::AuthUser;
use crate::error::ApiError;
use crate::posts::dto::{
    CreatePostRequest, ListPostsQuery, PostListResponse, PostResponse, UpdatePostRequest,
};
use crate::posts::services;
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/:id", get(get_post))
        .route("/users/:id/posts", get(list_user_posts))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post))
        .route("/posts/:id", put(update_post).delete(delete_post))
}

#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<PostListResponse>, ApiError> {
    let response = services::list_published(&state.db, query).await?;
    Ok(Json(response))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = services::get_post(&state.db, id).await?;
    Ok(Json(post))
}

#[instrument(skip(state))]
pub async fn list_user_posts(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = services::list_by_author(&state.db, id).await?;
    Ok(Json(posts))
}

#[instrument(skip(state, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let post = services::create_post(&state.db, &identity, payload).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

#[instrument(skip(state, payload))]
pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = services::update_post(&state.db, &identity, id, payload).await?;
    Ok(Json(post))
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    services::delete_post(&state.db, &identity, id).await?;
    Ok(Json(json!({ "message": "Post deleted successfully" })))
}
