pub mod dto;
pub mod handlers;
mod repo;
mod repo_types;
mod services;

use axum::Router;

pub(crate) use repo::exists as post_exists;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
