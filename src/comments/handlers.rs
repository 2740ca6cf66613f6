use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::instrument;

use crate::auth::jwt::AuthUser;
use crate::comments::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use crate::comments::services;
use crate::error::ApiError;
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/posts/:id/comments", get(list_post_comments))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", post(create_comment))
        .route("/comments/:id", put(update_comment).delete(delete_comment))
}

#[instrument(skip(state))]
pub async fn list_post_comments(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<CommentResponse>>, ApiError> {
    let comments = services::list_post_comments(&state.db, post_id).await?;
    Ok(Json(comments))
}

#[instrument(skip(state, payload))]
pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let comment = services::create_comment(&state.db, &identity, payload).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

#[instrument(skip(state, payload))]
pub async fn update_comment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    let comment = services::update_comment(&state.db, &identity, id, payload).await?;
    Ok(Json(comment))
}

#[instrument(skip(state))]
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    services::delete_comment(&state.db, &identity, id).await?;
    Ok(Json(json!({ "message": "Comment deleted successfully" })))
}
