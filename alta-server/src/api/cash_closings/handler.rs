//! Cash Closing API Handlers

use axum::{Json, extract::State};
use shared::models::{CashClosing, CashClosingCreate};

use crate::ledger::closing::close_register;
use crate::repository::closing;
use crate::state::AppState;
use crate::utils::{AppError, AppResult};

/// GET /api/cash-closings - every closing, newest first
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<CashClosing>>> {
    let closings = closing::find_all(state.store()).await?;
    Ok(Json(closings))
}

/// POST /api/cash-closings - close the open register
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CashClosingCreate>,
) -> AppResult<Json<CashClosing>> {
    let closing = close_register(state.store(), payload, state.config.timezone)
        .await
        .map_err(AppError::from)?;
    Ok(Json(closing))
}
