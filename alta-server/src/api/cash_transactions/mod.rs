//! Manual Cash Transaction API

mod handler;

use axum::{
    Router,
    routing::{delete, post},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/cash-transactions", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", delete(handler::delete))
}
