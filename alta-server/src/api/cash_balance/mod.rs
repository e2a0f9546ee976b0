//! Open Register Balance API

mod handler;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/cash-balance", get(handler::get_balance))
}
