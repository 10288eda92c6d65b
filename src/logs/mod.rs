use axum::Router;

use crate::state::AppState;

pub mod dashboard;
mod dto;
pub mod handlers;
pub mod records;
pub mod repo;

pub fn router() -> Router<AppState> {
    handlers::log_routes()
}
