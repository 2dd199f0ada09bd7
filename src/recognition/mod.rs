pub mod catalog;
pub mod dto;
pub mod handlers;
pub mod resolver;
pub mod service;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    handlers::router()
}
