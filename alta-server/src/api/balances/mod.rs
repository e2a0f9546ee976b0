//! Daily Ledger API

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/balances", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/{date}", get(handler::get_day))
        .route(
            "/{date}/transactions/{id}",
            delete(handler::delete_transaction),
        )
}
