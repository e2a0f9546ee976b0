//! Daily Ledger API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::ledger::DailyLedger;
use crate::state::AppState;
use crate::utils::AppResult;
use crate::utils::time::parse_date;

/// GET /api/balances/:date - transactions and per-currency breakdown of a day
///
/// A failed load still answers 200 with the empty day.
pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<DailyLedger>> {
    let date = parse_date(&date)?;
    let ledger = DailyLedger::load(state.store(), date, state.config.timezone).await;
    Ok(Json(ledger))
}

/// DELETE /api/balances/:date/transactions/:id - delete a row of the day
/// from whichever collection owns it and return the refreshed day
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path((date, id)): Path<(String, String)>,
) -> AppResult<Json<DailyLedger>> {
    let date = parse_date(&date)?;
    let tz = state.config.timezone;
    let mut ledger = DailyLedger::load(state.store(), date, tz).await;
    ledger.delete_transaction(state.store(), &id, tz).await?;
    Ok(Json(ledger))
}
