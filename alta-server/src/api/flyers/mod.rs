//! Site Configuration (flyers) API

mod handler;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/flyers", get(handler::get).put(handler::put))
}
