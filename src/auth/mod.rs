use axum::Router;

use crate::state::AppState;

mod claims;
mod dto;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod policy;
pub mod repo;
pub mod repo_types;
pub mod services;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::auth_routes())
        .merge(handlers::me_routes())
        .merge(handlers::user_routes())
}
