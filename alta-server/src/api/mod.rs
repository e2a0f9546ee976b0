//! HTTP API
//!
//! | Path | Methods |
//! |------|---------|
//! | /api/balances/{date} | GET |
//! | /api/balances/{date}/transactions/{id} | DELETE |
//! | /api/cash-transactions | POST |
//! | /api/cash-transactions/{id} | DELETE |
//! | /api/cash-balance | GET |
//! | /api/cash-closings | GET, POST |
//! | /api/dashboard/stats | GET |
//! | /api/featured | GET |
//! | /api/flyers | GET, PUT |
//! | /api/products | GET, POST |
//! | /api/products/{id} | GET, PUT, DELETE |
//! | /api/clients | GET |
//! | /api/clients/loyalty/grant | POST |
//! | /health | GET |

pub mod balances;
pub mod cash_balance;
pub mod cash_closings;
pub mod cash_transactions;
pub mod clients;
pub mod dashboard;
pub mod featured;
pub mod flyers;
pub mod health;
pub mod products;

use axum::Router;
use http::StatusCode;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Every route, no middleware, no state
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(balances::router())
        .merge(cash_transactions::router())
        .merge(cash_balance::router())
        .merge(cash_closings::router())
        .merge(dashboard::router())
        .merge(featured::router())
        .merge(flyers::router())
        .merge(products::router())
        .merge(clients::router())
        .merge(health::router())
}

/// The full application: routes, middleware and state
pub fn build_app(state: AppState) -> Router {
    let timeout = state.config.request_timeout;
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .with_state(state)
}
