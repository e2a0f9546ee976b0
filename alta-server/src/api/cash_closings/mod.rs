//! Cash Closing API

mod handler;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/cash-closings",
        get(handler::list).post(handler::create),
    )
}
