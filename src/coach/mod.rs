use axum::Router;

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod messages;

pub fn router() -> Router<AppState> {
    handlers::coach_routes()
}
