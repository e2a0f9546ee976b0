//! Open Register Balance API Handlers

use axum::{Json, extract::State};
use shared::models::CashBalance;

use crate::ledger::closing::OpenRegister;
use crate::state::AppState;
use crate::utils::{AppError, AppResult};

/// GET /api/cash-balance - rollup of everything not yet closed
pub async fn get_balance(State(state): State<AppState>) -> AppResult<Json<CashBalance>> {
    let register = OpenRegister::load(state.store())
        .await
        .map_err(AppError::from)?;
    Ok(Json(register.balance()))
}
