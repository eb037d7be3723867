use axum::Router;

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod services;
pub mod validate;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::page_routes())
        .merge(handlers::submit_routes())
}
