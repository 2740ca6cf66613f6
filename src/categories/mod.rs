mod repo;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::FromRow;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories))
}

#[instrument(skip(state))]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = repo::list_all(&state.db).await?;
    Ok(Json(categories))
}
